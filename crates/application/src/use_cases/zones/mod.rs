mod create_zone;
mod list_zones;

pub use create_zone::CreateZoneUseCase;
pub use list_zones::ListZonesUseCase;
