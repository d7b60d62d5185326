//! Core traits for domain settings
//!
//! This module defines the abstract interfaces the parsers report through.
//!
//! - [`Reporter`]: Severity-tagged sink for user-facing diagnostics

pub mod reporter;

pub use reporter::{Reporter, Severity};
