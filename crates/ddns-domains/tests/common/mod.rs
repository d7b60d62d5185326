//! Shared helpers for the contract tests

#![allow(dead_code)]

use ddns_domains::{Domain, HostId, MemoryReporter, Severity};

/// Already-normalized FQDN
pub fn f(name: &str) -> Domain {
    Domain::fqdn(name)
}

/// Already-normalized wildcard suffix
pub fn w(suffix: &str) -> Domain {
    Domain::wildcard(suffix)
}

pub fn mac(bytes: [u8; 6]) -> HostId {
    HostId::Eui48(bytes)
}

pub fn suffix(addr: &str, prefix_len: u8) -> HostId {
    let addr: std::net::Ipv6Addr = addr.parse().expect("valid IPv6 literal");
    HostId::Ip6Suffix {
        bytes: addr.octets(),
        prefix_len,
    }
}

/// Error-level messages only
pub fn errors(reporter: &MemoryReporter) -> Vec<String> {
    reporter.messages_at(Severity::Error)
}

/// Warning-level messages only
pub fn warnings(reporter: &MemoryReporter) -> Vec<String> {
    reporter.messages_at(Severity::Warning)
}

pub const NOT_FQDN_HINT: &str = "that is probably not fully qualified; a fully qualified domain name (FQDN) would look like \"*.example.org\" or \"sub.example.org\"";
