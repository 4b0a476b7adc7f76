pub mod dns;
pub mod records;
pub mod zones;

pub use dns::{HandleZoneQueryUseCase, ZoneAnswer, ZoneQuery, ZoneQueryOutcome};
pub use records::InsertRecordUseCase;
pub use zones::{CreateZoneUseCase, ListZonesUseCase};
