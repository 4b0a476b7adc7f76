pub mod memory_zone_store;
pub mod sqlite_zone_store;

pub use memory_zone_store::MemoryZoneStore;
pub use sqlite_zone_store::SqliteZoneStore;
