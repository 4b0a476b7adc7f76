#![allow(dead_code)]

mod mock_zone_store;

pub use mock_zone_store::MockZoneStore;

use hickory_proto::rr::Name;

pub fn name(value: &str) -> Name {
    Name::from_ascii(value).unwrap()
}
