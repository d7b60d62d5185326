// # Memory Reporter
//
// Keeps every diagnostic in order, in memory.
//
// ## When to Use
//
// - Tests asserting on exact diagnostics
// - Embedders that surface configuration problems in their own UI

use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::traits::reporter::{Reporter, Severity};

/// In-memory reporter
///
/// # Example
///
/// ```
/// use ddns_domains::{MemoryReporter, Severity, domainexp};
///
/// let reporter = MemoryReporter::new();
/// let list = domainexp::parse_domain_list(&reporter, "KEY", "a.org b.org").unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(
///     reporter.messages(),
///     vec![(Severity::Warning, r#"KEY ("a.org b.org") is missing a comma "," before "b.org""#.to_string())]
/// );
/// ```
#[derive(Debug, Default)]
pub struct MemoryReporter {
    inner: Mutex<Vec<(Severity, String)>>,
}

impl MemoryReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, oldest first
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded messages of one severity
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, severity: Severity, message: fmt::Arguments<'_>) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((severity, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_basic() {
        let reporter = MemoryReporter::new();
        assert!(reporter.is_empty());

        reporter.warn(format_args!("first {}", 1));
        reporter.error(format_args!("second"));

        assert_eq!(
            reporter.messages(),
            vec![
                (Severity::Warning, "first 1".to_string()),
                (Severity::Error, "second".to_string()),
            ]
        );
        assert_eq!(reporter.messages_at(Severity::Error), vec!["second"]);

        reporter.clear();
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_reporter_through_reference() {
        let reporter = MemoryReporter::new();
        let by_ref: &dyn Reporter = &reporter;
        (&by_ref).report(Severity::Info, format_args!("hello"));
        assert_eq!(reporter.messages_at(Severity::Info), vec!["hello"]);
    }
}
