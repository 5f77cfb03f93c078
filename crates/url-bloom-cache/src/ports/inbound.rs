//! Inbound Ports (Driving Ports)
//!
//! The API that callers such as the command loop use to drive the cache.

use crate::error::CacheError;

/// Primary membership API (Driving Port)
///
/// Implementations record every operation on their trace sink. The membership
/// answers themselves never fail; an `Err` only reports a sink failure.
pub trait MembershipApi {
    /// Record `item` as seen
    fn add(&mut self, item: &str) -> Result<(), CacheError>;

    /// Whether `item` was possibly seen before
    ///
    /// `false` is definite; `true` may be a false positive.
    fn contains(&mut self, item: &str) -> Result<bool, CacheError>;
}
