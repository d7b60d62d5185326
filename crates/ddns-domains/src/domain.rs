// # Domain Values
//
// A domain is either a fully qualified name or a wildcard `*.suffix`.
// Both are stored in their IDNA ASCII form (Punycode, lower-case), so two
// domains are equal exactly when their normalized strings are equal.
//
// ## Ordering
//
// Domains order by their DNS name (`name` or `*.suffix`). A fully qualified
// name can never start with `*`, so the order is total and agrees with `Eq`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::DomainError;

/// A normalized domain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Domain {
    /// A fully qualified domain name, e.g. `sub.example.org`
    Fqdn(String),
    /// `*.suffix`; holds the suffix only
    Wildcard(String),
}

impl Domain {
    /// Normalize a raw domain
    ///
    /// A leading `*.` marks a wildcard. The rest goes through strict
    /// UTS-46 ToASCII, which maps Unicode to Punycode and lower-cases.
    ///
    /// # Example
    ///
    /// ```
    /// use ddns_domains::Domain;
    ///
    /// assert_eq!(Domain::new("Bücher.org").unwrap(), Domain::fqdn("xn--bcher-kva.org"));
    /// assert_eq!(Domain::new("*.Example.org").unwrap(), Domain::wildcard("example.org"));
    /// ```
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        if raw == "*" {
            return Err(DomainError::NotFullyQualified);
        }

        match raw.strip_prefix("*.") {
            Some(suffix) => Ok(Self::Wildcard(to_ascii(suffix)?)),
            None => Ok(Self::Fqdn(to_ascii(raw)?)),
        }
    }

    /// Wrap an already-normalized name without checking it
    pub fn fqdn(name: impl Into<String>) -> Self {
        Self::Fqdn(name.into())
    }

    /// Wrap an already-normalized wildcard suffix without checking it
    pub fn wildcard(suffix: impl Into<String>) -> Self {
        Self::Wildcard(suffix.into())
    }

    /// The name without any wildcard marker
    pub fn name(&self) -> &str {
        match self {
            Self::Fqdn(name) | Self::Wildcard(name) => name,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }

    /// The ASCII DNS name, `*.suffix` for wildcards
    pub fn dns_name_ascii(&self) -> String {
        match self {
            Self::Fqdn(name) => name.clone(),
            Self::Wildcard(suffix) => format!("*.{suffix}"),
        }
    }

    /// Human-facing rendering with Punycode labels decoded
    pub fn describe(&self) -> String {
        let (unicode, result) = idna::domain_to_unicode(self.name());
        let name = match result {
            Ok(()) => unicode,
            Err(_) => self.name().to_owned(),
        };

        match self {
            Self::Fqdn(_) => name,
            Self::Wildcard(_) => format!("*.{name}"),
        }
    }

    /// Candidate zones from the longest to the shortest
    ///
    /// `www.example.org` yields `www.example.org`, `example.org`, `org`.
    /// A wildcard starts from its suffix.
    pub fn zones(&self) -> Zones<'_> {
        Zones {
            rest: Some(self.name()),
        }
    }

    /// Whether `self` is `ancestor` or lies below it on a label boundary
    pub fn is_under(&self, ancestor: &Domain) -> bool {
        let name = self.dns_name_ascii();
        let ancestor = ancestor.dns_name_ascii();
        match name.strip_suffix(ancestor.as_str()) {
            Some("") => true,
            Some(rest) => rest.ends_with('.'),
            None => false,
        }
    }

    fn ascii_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let (marker, name) = match self {
            Self::Fqdn(name) => ("", name.as_str()),
            Self::Wildcard(suffix) => ("*.", suffix.as_str()),
        };
        marker.bytes().chain(name.bytes())
    }
}

fn to_ascii(name: &str) -> Result<String, DomainError> {
    if name.is_empty() {
        return Err(DomainError::Empty);
    }
    idna::domain_to_ascii_strict(name).map_err(DomainError::Idna)
}

impl Ord for Domain {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ascii_bytes().cmp(other.ascii_bytes())
    }
}

impl PartialOrd for Domain {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fqdn(name) => f.write_str(name),
            Self::Wildcard(suffix) => write!(f, "*.{suffix}"),
        }
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Iterator returned by [`Domain::zones`]
#[derive(Debug, Clone)]
pub struct Zones<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Zones<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let current = self.rest?;
        self.rest = current.split_once('.').map(|(_, parent)| parent);
        Some(current)
    }
}

/// `is(target)`: exact equality; a wildcard never equals the bare name
pub fn matches_is(target: &Domain, candidate: &Domain) -> bool {
    target == candidate
}

/// `sub(target)`: `candidate` is `target` or a subdomain of it
pub fn matches_sub(target: &Domain, candidate: &Domain) -> bool {
    candidate.is_under(target)
}

/// Sort by the domain order and drop duplicates
pub fn sort_and_dedup(domains: &mut Vec<Domain>) {
    domains.sort();
    domains.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fqdn_and_wildcard() {
        assert_eq!(Domain::new("a.a").unwrap(), Domain::fqdn("a.a"));
        assert_eq!(Domain::new("*.a.b").unwrap(), Domain::wildcard("a.b"));
        assert_eq!(Domain::new("Xn--53H.de").unwrap(), Domain::fqdn("xn--53h.de"));
        assert_eq!(Domain::new("書.org").unwrap(), Domain::fqdn("xn--rov.org"));
    }

    #[test]
    fn test_new_rejects() {
        assert!(matches!(
            Domain::new("*"),
            Err(DomainError::NotFullyQualified)
        ));
        assert!(matches!(Domain::new(""), Err(DomainError::Empty)));
        assert!(matches!(Domain::new("*."), Err(DomainError::Empty)));
        assert!(matches!(Domain::new("*.*"), Err(DomainError::Idna(_))));
        assert!(matches!(Domain::new("xn--:D.org"), Err(DomainError::Idna(_))));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["Bücher.org", "*.☕.de", "EXAMPLE.com", "a.b.c"] {
            let once = Domain::new(raw).unwrap();
            let twice = Domain::new(&once.dns_name_ascii()).unwrap();
            assert_eq!(once, twice, "{raw}");
        }
    }

    #[test]
    fn test_ordering_and_dedup() {
        let mut list = vec![
            Domain::fqdn("b.com"),
            Domain::wildcard("a.com"),
            Domain::fqdn("a.com"),
            Domain::fqdn("b.com"),
        ];
        sort_and_dedup(&mut list);
        assert_eq!(
            list,
            vec![
                Domain::wildcard("a.com"),
                Domain::fqdn("a.com"),
                Domain::fqdn("b.com"),
            ]
        );

        let mut same = vec![Domain::fqdn("x.y"), Domain::fqdn("x.y")];
        sort_and_dedup(&mut same);
        assert_eq!(same, vec![Domain::fqdn("x.y")]);
    }

    #[test]
    fn test_matches_is() {
        let d = Domain::fqdn("example.com");
        assert!(matches_is(&d, &d));
        assert!(!matches_is(&Domain::wildcard("example.com"), &d));
    }

    #[test]
    fn test_matches_sub() {
        let target = Domain::fqdn("example.com");
        assert!(matches_sub(&target, &Domain::fqdn("example.com")));
        assert!(matches_sub(&target, &Domain::fqdn("sub.example.com")));
        assert!(matches_sub(&target, &Domain::fqdn("a.sub.example.com")));
        assert!(matches_sub(&target, &Domain::wildcard("example.com")));
        assert!(!matches_sub(&target, &Domain::fqdn("subexample.com")));
        assert!(!matches_sub(&target, &Domain::fqdn("com")));
    }

    #[test]
    fn test_display_and_describe() {
        let d = Domain::wildcard("xn--53h.de");
        assert_eq!(d.to_string(), "*.xn--53h.de");
        assert_eq!(d.describe(), "*.☕.de");
        assert_eq!(Domain::fqdn("example.org").describe(), "example.org");
    }

    #[test]
    fn test_zones() {
        let fqdn = Domain::fqdn("www.example.org");
        let zones: Vec<_> = fqdn.zones().collect();
        assert_eq!(zones, vec!["www.example.org", "example.org", "org"]);

        let wildcard = Domain::wildcard("example.org");
        let zones: Vec<_> = wildcard.zones().collect();
        assert_eq!(zones, vec!["example.org", "org"]);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&Domain::wildcard("a.b")).unwrap();
        assert_eq!(json, r#""*.a.b""#);
    }
}
