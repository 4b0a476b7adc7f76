pub mod record_decoder;
mod record_type_map;
mod zone_cache;
mod zone_resolver;

pub use record_type_map::RecordTypeMapper;
pub use zone_cache::{ZoneCache, ZoneSnapshot};
pub use zone_resolver::{ResolvedRecords, ZoneResolver};
