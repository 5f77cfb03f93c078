//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the trace sink port.
//!
//! ## Adapters
//!
//! - `FileTraceSink` - Appends trace lines to a file
//! - `MemoryTraceSink` - Keeps trace lines in memory

pub mod file_sink;
pub mod memory_sink;

pub use file_sink::FileTraceSink;
pub use memory_sink::MemoryTraceSink;
