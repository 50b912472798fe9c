//! # DNS Lookups
//!
//! Every lookup gets its own resolver instance configured for exactly the
//! server it should ask. There is no shared resolver whose server list could
//! be swapped out, so a custom server on one request can never leak into a
//! concurrent or later one.

use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use netdiag_common::error::ResolutionError;
use netdiag_common::models::dns::{DnsLookupResult, DnsRecord, RecordType, SYSTEM_SERVER};
use netdiag_common::options::DnsOptions;
use netdiag_common::validate::validate_host;
use tracing::{debug, info, warn};

pub mod resolver;

pub use resolver::TrustDnsBackend;

/// Performs a single typed query.
#[async_trait]
pub trait DnsBackend: Send + Sync {
    /// `server = None` means the system resolver configuration.
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        server: Option<Ipv4Addr>,
    ) -> Result<Vec<DnsRecord>, ResolutionError>;
}

pub struct DnsResolver {
    backend: Box<dyn DnsBackend>,
}

impl DnsResolver {
    pub fn new(backend: Box<dyn DnsBackend>) -> Self {
        Self { backend }
    }

    pub fn system(timeout: Duration) -> Self {
        Self::new(Box::new(TrustDnsBackend::new(timeout)))
    }

    /// Validates, queries and always returns a result. Failures end up in
    /// `error` with an empty record list.
    pub async fn lookup(&self, hostname: &str, options: &DnsOptions) -> DnsLookupResult {
        let requested_type = options
            .record_type
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| RecordType::A.to_string());
        let requested_server = options
            .server
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| SYSTEM_SERVER.to_string());

        let host = match validate_host(hostname) {
            Ok(host) => host,
            Err(e) => {
                return DnsLookupResult::failed(hostname, requested_type, requested_server, e.to_string());
            }
        };
        let settings = match options.resolve() {
            Ok(settings) => settings,
            Err(e) => {
                return DnsLookupResult::failed(host.as_str(), requested_type, requested_server, e.to_string());
            }
        };

        let server_label = settings
            .server
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| SYSTEM_SERVER.to_string());

        let query_name = match settings.record_type {
            RecordType::Ptr => match ptr_query_name(host.as_str()) {
                Ok(name) => name,
                Err(e) => {
                    return DnsLookupResult::failed(
                        host.as_str(),
                        settings.record_type.as_str(),
                        server_label,
                        e.to_string(),
                    );
                }
            },
            _ => host.to_string(),
        };

        info!(
            "DNS {} lookup for {query_name} via {server_label}",
            settings.record_type
        );
        let started = Instant::now();
        let outcome = self
            .backend
            .query(&query_name, settings.record_type, settings.server)
            .await;
        let response_time = round2(started.elapsed().as_secs_f64() * 1000.0);

        match outcome {
            Ok(records) => {
                debug!("{} record(s) for {query_name}", records.len());
                DnsLookupResult {
                    hostname: host.to_string(),
                    record_type: settings.record_type.to_string(),
                    records,
                    server: server_label,
                    response_time,
                    error: None,
                }
            }
            Err(e) => {
                warn!("DNS lookup for {query_name} failed: {e}");
                DnsLookupResult {
                    response_time,
                    ..DnsLookupResult::failed(
                        host.as_str(),
                        settings.record_type.as_str(),
                        server_label,
                        e.to_string(),
                    )
                }
            }
        }
    }
}

/// Name to ask for in a PTR query: reverse-zone names pass through, IP
/// literals are turned into their `in-addr.arpa` / `ip6.arpa` form.
pub fn ptr_query_name(target: &str) -> Result<String, ResolutionError> {
    let lowered = target.trim_end_matches('.').to_ascii_lowercase();
    if lowered.ends_with(".in-addr.arpa") || lowered.ends_with(".ip6.arpa") {
        return Ok(lowered);
    }
    match target.parse::<IpAddr>() {
        Ok(ip) => Ok(reverse_name(ip)),
        Err(_) => Err(ResolutionError::InvalidPtrTarget(target.to_string())),
    }
}

pub fn reverse_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}.in-addr.arpa")
        }
        IpAddr::V6(v6) => {
            let nibbles: Vec<String> = v6
                .octets()
                .iter()
                .rev()
                .flat_map(|byte| [byte & 0x0f, byte >> 4])
                .map(|n| format!("{n:x}"))
                .collect();
            format!("{}.ip6.arpa", nibbles.join("."))
        }
    }
}

fn round2(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
