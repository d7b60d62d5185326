// # ddns-plan - DDNS Domain Plan
//
// Thin front end over ddns-domains. It reads the domain settings from the
// environment, reports every diagnostic through tracing, and prints the
// records the updater would manage.
//
// ## Configuration
//
// ### Domains
// - `DDNS_DOMAINS`: Domains for both IPv4 and IPv6
// - `DDNS_IP4_DOMAINS`: IPv4-only domains
// - `DDNS_IP6_DOMAINS`: IPv6-only domains, each optionally `domain[host-id]`
// - `DDNS_IP6_PREFIX_LEN`: Prefix length host IDs are combined with (default 64)
// - `DDNS_PROXIED`: Expression selecting proxied domains (default `false`)
//
// ### Preview
// - `DDNS_IP6_ADDRESS`: A detected IPv6 address; when set, each IPv6 record
//   shows the address it would receive
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export DDNS_DOMAINS=example.org
// export DDNS_IP6_DOMAINS='nas.example.org[aa:bb:cc:dd:ee:ff]'
// export DDNS_PROXIED='sub(example.org) && !is(nas.example.org)'
// export DDNS_IP6_ADDRESS=2001:db8::1
//
// ddns-plan
// ```

use anyhow::{Context, Result};
use ddns_domains::{DomainPlan, DomainSettings, IpVersion, LogReporter};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::net::Ipv6Addr;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Plan printed
/// - 1: Configuration error, including any invalid domain setting
/// - 2: Runtime error (output failure)
#[derive(Debug, Clone, Copy)]
enum PlanExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<PlanExitCode> for ExitCode {
    fn from(code: PlanExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Settings of the binary itself
struct Config {
    log_level: String,
    ip6_address: Option<Ipv6Addr>,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let ip6_address = match env::var("DDNS_IP6_ADDRESS") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("DDNS_IP6_ADDRESS ({raw:?}) is not an IPv6 address"))?,
            ),
            _ => None,
        };

        Ok(Self {
            log_level: env::var("DDNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            ip6_address,
        })
    }

    fn validate(&self) -> Result<()> {
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => anyhow::bail!(
                "DDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// One DNS record the updater would manage
#[derive(Debug, Serialize)]
struct RecordPreview {
    domain: String,
    family: IpVersion,
    proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Ipv6Addr>,
}

fn preview(plan: &DomainPlan, ip6_address: Option<Ipv6Addr>) -> Vec<RecordPreview> {
    IpVersion::ALL
        .into_iter()
        .flat_map(|family| {
            plan.domains(family).iter().map(move |domain| RecordPreview {
                domain: domain.describe(),
                family,
                proxied: plan.is_proxied(domain),
                address: match family {
                    IpVersion::V6 => ip6_address.and_then(|ip| plan.ip6_address(domain, ip)),
                    IpVersion::V4 => None,
                },
            })
        })
        .collect()
}

fn print(records: &[RecordPreview]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return PlanExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return PlanExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level())
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return PlanExitCode::ConfigError.into();
    }

    let settings = match DomainSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return PlanExitCode::ConfigError.into();
        }
    };

    // Diagnostics have already been reported on failure
    let plan = match settings.resolve(&LogReporter) {
        Ok(plan) => plan,
        Err(_) => return PlanExitCode::ConfigError.into(),
    };

    if plan.is_empty() {
        info!("No domains configured");
    }

    let records = preview(&plan, config.ip6_address);
    info!("Plan resolved: {} record(s)", records.len());

    match print(&records) {
        Ok(()) => PlanExitCode::Success.into(),
        Err(e) => {
            error!("Failed to print plan: {}", e);
            PlanExitCode::RuntimeError.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddns_domains::MemoryReporter;

    #[test]
    fn test_preview_records() {
        let settings = DomainSettings {
            domains: "a.org".into(),
            ip6_domains: "b.org[::5]".into(),
            proxied: "is(b.org)".into(),
            ..Default::default()
        };
        let plan = settings.resolve(&MemoryReporter::new()).unwrap();

        let records = preview(&plan, Some("2001:db8::1".parse().unwrap()));
        let json = serde_json::to_value(&records).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"domain": "a.org", "family": "v4", "proxied": false},
                {"domain": "a.org", "family": "v6", "proxied": false, "address": "2001:db8::1"},
                {"domain": "b.org", "family": "v6", "proxied": true, "address": "2001:db8::5"},
            ])
        );
    }

    #[test]
    fn test_preview_without_address() {
        let settings = DomainSettings {
            ip6_domains: "b.org".into(),
            ..Default::default()
        };
        let plan = settings.resolve(&MemoryReporter::new()).unwrap();

        let records = preview(&plan, None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, None);
    }

    #[test]
    fn test_log_level_validation() {
        let config = Config {
            log_level: "loud".to_string(),
            ip6_address: None,
        };
        assert!(config.validate().is_err());

        let config = Config {
            log_level: "DEBUG".to_string(),
            ip6_address: None,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.level(), Level::DEBUG);
    }
}
