//! The resolved view of the domain settings
//!
//! The update loop asks the plan which domains to manage per family, whether
//! a domain is proxied, and which IPv6 address a domain should point to once
//! the host's own address is known.

use std::collections::BTreeMap;
use std::net::Ipv6Addr;

use ipnet::Ipv6Net;

use crate::consolidate::IpVersion;
use crate::domain::Domain;
use crate::domainexp::Predicate;
use crate::host_id::HostId;

/// Domains, host IDs and the proxied predicate, all validated
#[derive(Debug, Clone)]
pub struct DomainPlan {
    /// Sorted, deduplicated domains per family
    pub domains: BTreeMap<IpVersion, Vec<Domain>>,
    /// Host IDs of IPv6 domains
    pub host_ids: BTreeMap<Domain, HostId>,
    /// Which domains are proxied
    pub proxied: Predicate,
    /// Prefix length used to split detected IPv6 addresses
    pub ip6_prefix_len: u8,
}

impl DomainPlan {
    /// Domains managed for one family
    pub fn domains(&self, version: IpVersion) -> &[Domain] {
        self.domains.get(&version).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_proxied(&self, domain: &Domain) -> bool {
        self.proxied.matches(domain)
    }

    pub fn host_id(&self, domain: &Domain) -> Option<&HostId> {
        self.host_ids.get(domain)
    }

    /// Whether nothing at all is managed
    pub fn is_empty(&self) -> bool {
        self.domains.values().all(Vec::is_empty)
    }

    /// The address a domain's AAAA record should hold
    ///
    /// Without a host ID this is the detected address itself. With one, the
    /// host ID replaces the interface part of the detected address's
    /// `/ip6_prefix_len` network. `None` if the two cannot be combined.
    pub fn ip6_address(&self, domain: &Domain, detected: Ipv6Addr) -> Option<Ipv6Addr> {
        match self.host_id(domain) {
            None => Some(detected),
            Some(host_id) => {
                let prefix = Ipv6Net::new(detected, self.ip6_prefix_len).ok()?.trunc();
                host_id.with_prefix(&prefix)
            }
        }
    }
}
