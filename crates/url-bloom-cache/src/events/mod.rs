//! Events Layer - Command Message Types

pub mod commands;

pub use commands::Command;
