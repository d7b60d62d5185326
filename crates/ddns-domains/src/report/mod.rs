//! Reporter implementations
//!
//! - [`LogReporter`]: Emits diagnostics as `tracing` events
//! - [`MemoryReporter`]: Collects diagnostics in memory

pub mod log;
pub mod memory;

pub use log::LogReporter;
pub use memory::MemoryReporter;
