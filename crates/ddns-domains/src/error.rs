//! Error types for domain settings
//!
//! This module defines all error types used throughout the crate. The
//! smaller enums describe one failing token; [`Error`] attaches the setting
//! key and the full raw value so its `Display` is the complete diagnostic.

use std::net::{AddrParseError, Ipv4Addr};
use std::str::Utf8Error;

use thiserror::Error;

use crate::domain::Domain;
use crate::host_id::HostId;

/// Result type alias for domain setting operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for domain settings
#[derive(Error, Debug)]
pub enum Error {
    /// A raw setting value failed to parse
    #[error("{key} ({input:?}) {source}")]
    Setting {
        /// Setting name (e.g. `DDNS_IP6_DOMAINS`)
        key: String,
        /// The full raw value, lossily decoded if it was not UTF-8
        input: String,
        /// What went wrong inside the value
        #[source]
        source: ParseError,
    },

    /// The same domain was given two different host IDs
    #[error("Domain {:?} is associated with inconsistent host IDs {first} and {second}", .domain.describe())]
    ConflictingHostId {
        /// The domain in question
        domain: Domain,
        /// Host ID seen first
        first: HostId,
        /// Host ID seen later
        second: HostId,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach a setting key and its raw value to a parse error
    pub fn setting(key: impl Into<String>, input: &[u8], source: ParseError) -> Self {
        Self::Setting {
            key: key.into(),
            input: String::from_utf8_lossy(input).into_owned(),
            source,
        }
    }

    /// The underlying parse error, if this is a setting error
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Setting { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure to normalize a single domain
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("empty domain")]
    Empty,

    /// A bare `*`, which names no particular suffix
    #[error("a lone \"*\" is not a fully qualified domain")]
    NotFullyQualified,

    #[error("not a valid domain name under UTS-46/IDNA rules")]
    Idna(idna::Errors),
}

/// MAC (EUI-48) syntax error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not in the form \"aa:bb:cc:dd:ee:ff\", \"aa-bb-cc-dd-ee-ff\" or \"aabb.ccdd.eeff\"")]
pub struct MacParseError;

/// Failure to parse a host ID
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostIdError {
    #[error("invalid prefix length {0}")]
    InvalidPrefixLength(u8),

    #[error("not an IPv6 or MAC (EUI-48) address; {0} is an IPv4 address")]
    Ip4Address(Ipv4Addr),

    #[error("not an IPv6 or MAC (EUI-48) address; as an IP address: {ip}; as a MAC address: {mac}")]
    NotHostId {
        ip: AddrParseError,
        mac: MacParseError,
    },

    #[error("IPv6 address as a host ID should not have IPv6 zone")]
    HasIp6Zone,

    #[error("IPv6 subnet /{0} is too small for a MAC (EUI-48) host ID; decrease the prefix length to 64 or less")]
    SubnetTooSmall(u8),
}

impl HostIdError {
    /// Whether the input was neither an IPv6 address nor a MAC address
    pub fn is_not_host_id(&self) -> bool {
        matches!(self, Self::Ip4Address(_) | Self::NotHostId { .. })
    }
}

/// Tokenizer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("use \"&&\" instead of \"&\"")]
    SingleAnd,

    #[error("use \"||\" instead of \"|\"")]
    SingleOr,

    #[error("invalid UTF-8 string: {0}")]
    Utf8(#[from] Utf8Error),
}

/// Structural errors inside one setting value
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("is ill-formed: {0}")]
    IllFormed(#[from] LexError),

    #[error("contains an ill-formed domain {domain:?}: {source}")]
    IllFormedDomain {
        domain: String,
        #[source]
        source: DomainError,
    },

    #[error(
        "contains a domain {domain:?} that is probably not fully qualified; \
         a fully qualified domain name (FQDN) would look like \"*.example.org\" or \"sub.example.org\""
    )]
    NotFullyQualified { domain: String },

    #[error("contains an ill-formed host ID {host_id:?}: {source}")]
    IllFormedHostId {
        host_id: String,
        #[source]
        source: HostIdError,
    },

    #[error("has unexpected token {token:?}")]
    UnexpectedToken { token: String },

    #[error("has unexpected token {token:?} when {expected:?} is expected")]
    UnexpectedTokenExpecting { token: String, expected: String },

    #[error("is missing {expected:?} at the end")]
    MissingAtEnd { expected: String },

    #[error("is not a boolean expression")]
    NotBooleanExpression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_error_message() {
        let err = Error::setting("KEY", b"a &", ParseError::IllFormed(LexError::SingleAnd));
        assert_eq!(
            err.to_string(),
            r#"KEY ("a &") is ill-formed: use "&&" instead of "&""#
        );
    }

    #[test]
    fn test_setting_error_lossy_input() {
        let err = Error::setting("KEY", b"\x80", ParseError::NotBooleanExpression);
        assert_eq!(err.to_string(), "KEY (\"\u{fffd}\") is not a boolean expression");
        assert!(matches!(
            err.parse_error(),
            Some(ParseError::NotBooleanExpression)
        ));
    }

    #[test]
    fn test_host_id_error_kind() {
        assert!(HostIdError::Ip4Address(Ipv4Addr::LOCALHOST).is_not_host_id());
        assert!(!HostIdError::HasIp6Zone.is_not_host_id());
    }

    #[test]
    fn test_idna_error_message() {
        let err = Domain::new("_dmarc.example.com").unwrap_err();
        assert!(matches!(err, DomainError::Idna(_)));
        assert_eq!(
            err.to_string(),
            "not a valid domain name under UTS-46/IDNA rules"
        );
    }
}
