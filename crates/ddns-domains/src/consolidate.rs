//! Merging the per-family domain lists
//!
//! `DDNS_DOMAINS` applies to both IPv4 and IPv6; `DDNS_IP4_DOMAINS` and
//! `DDNS_IP6_DOMAINS` apply to one family each. Only the IPv6 list can carry
//! host IDs. The result is sorted and free of duplicates per family.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::Serialize;

use crate::domain::{Domain, sort_and_dedup};
use crate::domainexp::DomainHostId;
use crate::error::{Error, Result};
use crate::host_id::HostId;
use crate::traits::Reporter;

/// IP version (v4 or v6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    pub const ALL: [IpVersion; 2] = [IpVersion::V4, IpVersion::V6];
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IpVersion::V4 => "IPv4",
            IpVersion::V6 => "IPv6",
        })
    }
}

/// Parsed but not yet merged lists
#[derive(Debug, Clone, Default)]
pub struct DomainLists {
    /// Domains for both families
    pub domains: Vec<Domain>,
    /// IPv4-only domains
    pub ip4_domains: Vec<Domain>,
    /// IPv6-only domains, possibly with host IDs
    pub ip6_domains: Vec<DomainHostId>,
}

/// Result of [`consolidate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Consolidated {
    /// Sorted, deduplicated domains per family
    pub domains: BTreeMap<IpVersion, Vec<Domain>>,
    /// Host IDs for IPv6 domains that have one
    pub host_ids: BTreeMap<Domain, HostId>,
}

/// Merge the lists into per-family domain sets and a host ID map
///
/// Fails if one domain is given two different host IDs, compared as
/// written. Nothing is returned on failure.
pub fn consolidate(reporter: &dyn Reporter, lists: DomainLists) -> Result<Consolidated> {
    let DomainLists {
        domains,
        ip4_domains,
        ip6_domains,
    } = lists;

    let mut host_ids: BTreeMap<Domain, HostId> = BTreeMap::new();
    let mut ip6_plain = Vec::with_capacity(ip6_domains.len() + domains.len());

    for DomainHostId { domain, host_id } in ip6_domains {
        if let Some(host_id) = host_id {
            match host_ids.entry(domain.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(host_id);
                }
                Entry::Occupied(existing) if *existing.get() == host_id => {}
                Entry::Occupied(existing) => {
                    let err = Error::ConflictingHostId {
                        domain,
                        first: *existing.get(),
                        second: host_id,
                    };
                    reporter.error(format_args!("{err}"));
                    return Err(err);
                }
            }
        }
        ip6_plain.push(domain);
    }

    let mut ip4 = ip4_domains;
    ip4.extend(domains.iter().cloned());
    sort_and_dedup(&mut ip4);

    let mut ip6 = ip6_plain;
    ip6.extend(domains);
    sort_and_dedup(&mut ip6);

    Ok(Consolidated {
        domains: BTreeMap::from([(IpVersion::V4, ip4), (IpVersion::V6, ip6)]),
        host_ids,
    })
}
