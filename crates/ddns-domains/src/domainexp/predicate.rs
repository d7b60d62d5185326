//! Compiled domain predicates

use crate::domain::{Domain, matches_is, matches_sub};

/// A compiled boolean test over domains
///
/// Predicates are immutable trees; one compiled value can be shared across
/// threads and applied to any number of domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Const(bool),
    /// `is(d1, d2, ...)`
    Is(Vec<Domain>),
    /// `sub(d1, d2, ...)`
    Sub(Vec<Domain>),
    Not(Box<Predicate>),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// Evaluate against one domain
    pub fn matches(&self, domain: &Domain) -> bool {
        match self {
            Predicate::Const(b) => *b,
            Predicate::Is(targets) => targets.iter().any(|t| matches_is(t, domain)),
            Predicate::Sub(targets) => targets.iter().any(|t| matches_sub(t, domain)),
            Predicate::Not(p) => !p.matches(domain),
            Predicate::And(l, r) => l.matches(domain) && r.matches(domain),
            Predicate::Or(l, r) => l.matches(domain) || r.matches(domain),
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::Const(false)
    }
}
