//! Handler Layer
//!
//! Parses incoming command lines and dispatches them to the cache.

pub mod command_handler;

pub use command_handler::{CommandHandler, Outcome, RunSummary};
