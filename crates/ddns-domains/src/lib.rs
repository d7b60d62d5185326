// # ddns-domains
//
// Domain settings for the DDNS system.
//
// ## Architecture Overview
//
// This library turns operator-supplied strings into validated values:
// - **Domain**: Normalized domain or wildcard, with a total order
// - **HostId**: IPv6 interface part (explicit suffix or MAC-derived EUI-64)
// - **domainexp**: Domain list parser and boolean domain expression compiler
// - **consolidate**: Per-family merge of the domain lists with host IDs
// - **DomainSettings**: Raw settings, resolved into a **DomainPlan**
// - **Reporter**: Sink for user-facing diagnostics
//
// ## Design Principles
//
// 1. **No I/O**: Parsing is pure; the caller owns detection and DNS updates
// 2. **Report, don't abort**: Diagnostics go to a `Reporter`, failures come
//    back as `Result`
// 3. **Stateless**: Nothing is retained between calls; all values are
//    immutable once built

pub mod consolidate;
pub mod config;
pub mod domain;
pub mod domainexp;
pub mod error;
pub mod host_id;
pub mod plan;
pub mod report;
pub mod traits;

// Re-export core types for convenience
pub use consolidate::{Consolidated, DomainLists, IpVersion, consolidate};
pub use config::{DomainSettings, RawSetting};
pub use domain::Domain;
pub use domainexp::{DomainHostId, Predicate};
pub use error::{Error, Result};
pub use host_id::HostId;
pub use plan::DomainPlan;
pub use report::{LogReporter, MemoryReporter};
pub use traits::{Reporter, Severity};
