/// TTL answered when neither the responder floor nor the record sets one.
pub const DEFAULT_TTL: u32 = 300;

/// Effective TTL from the responder-wide floor and the record's own TTL.
///
/// `0` means unset on either side. When both are set the smaller wins.
pub fn resolve_ttl(floor: u32, record_ttl: u32) -> u32 {
    match (floor, record_ttl) {
        (0, 0) => DEFAULT_TTL,
        (0, ttl) => ttl,
        (floor, 0) => floor,
        (floor, ttl) => floor.min(ttl),
    }
}
