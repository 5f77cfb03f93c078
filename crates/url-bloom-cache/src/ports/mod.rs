//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for external callers
//! - Driven Ports (outbound) - Output the cache depends on

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipApi;
pub use outbound::TraceSink;
