//! Reporter backed by `tracing`

use std::fmt;

use tracing::{error, info, warn};

use crate::traits::reporter::{Reporter, Severity};

/// Emits every diagnostic as a `tracing` event
///
/// Severity maps onto the event level; the subscriber installed by the
/// binary decides what gets printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for LogReporter {
    fn report(&self, severity: Severity, message: fmt::Arguments<'_>) {
        match severity {
            Severity::Info => info!(target: "ddns_domains", "{}", message),
            Severity::Warning => warn!(target: "ddns_domains", "{}", message),
            Severity::Error => error!(target: "ddns_domains", "{}", message),
        }
    }
}
