// # Domain Lists and Domain Expressions
//
// Turns raw setting values into typed domains and predicates.
//
// ## Lists
//
// `a.org, *.b.org, c.org[::1]`: comma-separated domains, each optionally
// followed by a bracketed host ID (IPv6 lists only). Empty entries are
// skipped. A missing comma between two domains is reported as a warning and
// both domains are kept.
//
// ## Expressions
//
// `is(a.org) || (sub(b.org) && !is(*.b.org))`: boolean expressions over
// domains, compiled once into a reusable [`Predicate`].
//
// Every entry point reports at most one error through the given
// [`Reporter`] and returns it as `Err`.

mod parser;
pub mod predicate;
pub mod token;

use serde::Serialize;

use crate::domain::Domain;
use crate::error::{Error, ParseError, Result};
use crate::host_id::HostId;
use crate::traits::Reporter;

use parser::Parser;
pub use predicate::Predicate;

/// A domain with an optional host ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainHostId {
    pub domain: Domain,
    pub host_id: Option<HostId>,
}

impl DomainHostId {
    pub fn new(domain: Domain, host_id: Option<HostId>) -> Self {
        Self { domain, host_id }
    }
}

/// Parse a comma-separated list of domains
///
/// An empty (or all-whitespace) value is an empty list.
pub fn parse_domain_list(
    reporter: &dyn Reporter,
    key: &str,
    input: impl AsRef<[u8]>,
) -> Result<Vec<Domain>> {
    run(reporter, key, input.as_ref(), |parser| {
        let list = parser.scan_list(None)?;
        parser.finish()?;
        Ok(list.into_iter().map(|entry| entry.domain).collect())
    })
}

/// Parse a comma-separated list of domains with optional `[host-id]` suffixes
///
/// IPv6 suffixes are interpreted against `prefix_len`.
pub fn parse_domain_host_id_list(
    reporter: &dyn Reporter,
    key: &str,
    input: impl AsRef<[u8]>,
    prefix_len: u8,
) -> Result<Vec<DomainHostId>> {
    run(reporter, key, input.as_ref(), |parser| {
        let list = parser.scan_list(Some(prefix_len))?;
        parser.finish()?;
        Ok(list)
    })
}

/// Compile a boolean domain expression
///
/// # Example
///
/// ```
/// use ddns_domains::{Domain, LogReporter, domainexp};
///
/// let pred = domainexp::parse_expression(&LogReporter, "DDNS_PROXIED", "sub(example.org) && !is(www.example.org)").unwrap();
/// assert!(pred.matches(&Domain::fqdn("api.example.org")));
/// assert!(!pred.matches(&Domain::fqdn("www.example.org")));
/// ```
pub fn parse_expression(
    reporter: &dyn Reporter,
    key: &str,
    input: impl AsRef<[u8]>,
) -> Result<Predicate> {
    run(reporter, key, input.as_ref(), |parser| {
        let pred = parser.scan_or()?;
        parser.finish()?;
        Ok(pred)
    })
}

fn run<T>(
    reporter: &dyn Reporter,
    key: &str,
    input: &[u8],
    scan: impl for<'p> FnOnce(&mut Parser<'p>) -> std::result::Result<T, ParseError>,
) -> Result<T> {
    let result = Parser::new(reporter, key, input).and_then(|mut parser| scan(&mut parser));
    result.map_err(|source| {
        let err = Error::setting(key, input, source);
        reporter.error(format_args!("{err}"));
        err
    })
}
