//! Configuration types for domain settings
//!
//! [`DomainSettings`] holds the raw, operator-supplied values. Nothing in it
//! is parsed until [`DomainSettings::resolve`] turns it into a
//! [`DomainPlan`]. Values are kept as bytes so an environment value that is
//! not UTF-8 reaches the parsers and gets their diagnostic.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::consolidate::{DomainLists, IpVersion, consolidate};
use crate::domainexp;
use crate::error::{Error, Result};
use crate::plan::DomainPlan;
use crate::traits::Reporter;

/// Domains for both IPv4 and IPv6
pub const DOMAINS_KEY: &str = "DDNS_DOMAINS";
/// IPv4-only domains
pub const IP4_DOMAINS_KEY: &str = "DDNS_IP4_DOMAINS";
/// IPv6-only domains, with optional `[host-id]`
pub const IP6_DOMAINS_KEY: &str = "DDNS_IP6_DOMAINS";
/// Prefix length of the IPv6 network host IDs are combined with
pub const IP6_PREFIX_LEN_KEY: &str = "DDNS_IP6_PREFIX_LEN";
/// Expression selecting proxied domains
pub const PROXIED_KEY: &str = "DDNS_PROXIED";

/// One raw setting value, as bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawSetting(Vec<u8>);

impl RawSetting {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Empty or ASCII whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim_ascii().is_empty()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<Vec<u8>> for RawSetting {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<String> for RawSetting {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&str> for RawSetting {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for RawSetting {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<str> for RawSetting {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for RawSetting {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Display for RawSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Serialize for RawSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

impl<'de> Deserialize<'de> for RawSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Raw domain settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSettings {
    /// Comma-separated domains for both families
    #[serde(default)]
    pub domains: RawSetting,

    /// Comma-separated IPv4-only domains
    #[serde(default)]
    pub ip4_domains: RawSetting,

    /// Comma-separated IPv6-only domains, each optionally `domain[host-id]`
    #[serde(default)]
    pub ip6_domains: RawSetting,

    /// Prefix length IPv6 host IDs are parsed against
    ///
    /// A MAC (EUI-48) host ID needs 64 or less.
    #[serde(default = "default_ip6_prefix_len")]
    pub ip6_prefix_len: u8,

    /// Boolean domain expression, e.g. `is(a.org) || sub(b.org)`
    #[serde(default = "default_proxied")]
    pub proxied: RawSetting,
}

impl DomainSettings {
    /// Create settings with defaults and no domains
    pub fn new() -> Self {
        Self {
            domains: RawSetting::default(),
            ip4_domains: RawSetting::default(),
            ip6_domains: RawSetting::default(),
            ip6_prefix_len: default_ip6_prefix_len(),
            proxied: default_proxied(),
        }
    }

    /// Read settings through a key lookup
    ///
    /// Missing keys keep their defaults. Values may be any bytes; list and
    /// expression values are only decoded when resolved.
    pub fn from_lookup<F, V>(mut lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<V>,
        V: Into<Vec<u8>>,
    {
        let mut settings = Self::new();
        let mut raw = |key: &str| lookup(key).map(|v| RawSetting::from(v.into()));

        if let Some(v) = raw(DOMAINS_KEY) {
            settings.domains = v;
        }
        if let Some(v) = raw(IP4_DOMAINS_KEY) {
            settings.ip4_domains = v;
        }
        if let Some(v) = raw(IP6_DOMAINS_KEY) {
            settings.ip6_domains = v;
        }
        if let Some(v) = raw(IP6_PREFIX_LEN_KEY) {
            if !v.is_blank() {
                settings.ip6_prefix_len = parse_prefix_len(&v)?;
            }
        }
        if let Some(v) = raw(PROXIED_KEY) {
            if !v.is_blank() {
                settings.proxied = v;
            }
        }

        Ok(settings)
    }

    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.into_encoded_bytes()))
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.ip6_prefix_len > 128 {
            return Err(Error::config(format!(
                "{IP6_PREFIX_LEN_KEY} must be between 0 and 128. Got: {}",
                self.ip6_prefix_len
            )));
        }
        Ok(())
    }

    /// Parse every value and merge the lists
    ///
    /// Stops at the first invalid value; its diagnostic has already gone to
    /// `reporter` when this returns.
    pub fn resolve(&self, reporter: &dyn Reporter) -> Result<DomainPlan> {
        if let Err(err) = self.validate() {
            reporter.error(format_args!("{err}"));
            return Err(err);
        }

        let lists = DomainLists {
            domains: domainexp::parse_domain_list(reporter, DOMAINS_KEY, &self.domains)?,
            ip4_domains: domainexp::parse_domain_list(reporter, IP4_DOMAINS_KEY, &self.ip4_domains)?,
            ip6_domains: domainexp::parse_domain_host_id_list(
                reporter,
                IP6_DOMAINS_KEY,
                &self.ip6_domains,
                self.ip6_prefix_len,
            )?,
        };
        let consolidated = consolidate(reporter, lists)?;
        let proxied = domainexp::parse_expression(reporter, PROXIED_KEY, &self.proxied)?;

        let plan = DomainPlan {
            domains: consolidated.domains,
            host_ids: consolidated.host_ids,
            proxied,
            ip6_prefix_len: self.ip6_prefix_len,
        };

        debug!(
            ipv4 = plan.domains(IpVersion::V4).len(),
            ipv6 = plan.domains(IpVersion::V6).len(),
            host_ids = plan.host_ids.len(),
            "Resolved domain settings"
        );

        Ok(plan)
    }
}

fn parse_prefix_len(raw: &RawSetting) -> Result<u8> {
    std::str::from_utf8(raw.as_bytes())
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| {
            Error::config(format!(
                "{IP6_PREFIX_LEN_KEY} ({:?}) is not a number between 0 and 128",
                raw.to_string_lossy().trim()
            ))
        })
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn default_ip6_prefix_len() -> u8 {
    64
}

fn default_proxied() -> RawSetting {
    RawSetting::from("false")
}
