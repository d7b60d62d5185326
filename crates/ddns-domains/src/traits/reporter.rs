// # Reporter Trait
//
// Defines the sink for diagnostics produced while parsing settings.
//
// ## Implementations
//
// - `LogReporter`: forwards to `tracing`
// - `MemoryReporter`: keeps messages in memory (tests, embedding)
//
// ## Usage
//
// ```rust,ignore
// use ddns_domains::{LogReporter, domainexp};
//
// let reporter = LogReporter::new();
// let domains = domainexp::parse_domain_list(&reporter, "DDNS_DOMAINS", "a.org, b.org")?;
// ```

use std::fmt;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational
    Info,
    /// Something looks wrong but processing continues
    Warning,
    /// The setting is invalid
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Sink for user-facing diagnostics
///
/// Parsers never abort the process. They report what went wrong here and
/// hand a `Result` back to the caller, who decides whether to stop.
///
/// Implementations must be thread-safe; the parsers themselves keep no
/// state between calls.
pub trait Reporter: Send + Sync {
    /// Record one message
    fn report(&self, severity: Severity, message: fmt::Arguments<'_>);

    /// Shorthand for [`Severity::Warning`]
    fn warn(&self, message: fmt::Arguments<'_>) {
        self.report(Severity::Warning, message);
    }

    /// Shorthand for [`Severity::Error`]
    fn error(&self, message: fmt::Arguments<'_>) {
        self.report(Severity::Error, message);
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, severity: Severity, message: fmt::Arguments<'_>) {
        (**self).report(severity, message);
    }
}
