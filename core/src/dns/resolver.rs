use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use netdiag_common::error::ResolutionError;
use netdiag_common::models::dns::{DnsRecord, RecordType};
use tracing::{debug, warn};
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::rr::{RData, RecordType as WireType};

use super::DnsBackend;

const DNS_PORT: u16 = 53;

/// Builds a fresh `trust-dns` resolver for every query.
pub struct TrustDnsBackend {
    timeout: Duration,
}

impl TrustDnsBackend {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn build(&self, server: Option<Ipv4Addr>) -> TokioAsyncResolver {
        let (config, mut opts) = match server {
            Some(ip) => {
                let addr = SocketAddr::new(ip.into(), DNS_PORT);
                let mut config = ResolverConfig::new();
                config.add_name_server(NameServerConfig::new(addr, Protocol::Udp));
                config.add_name_server(NameServerConfig::new(addr, Protocol::Tcp));
                (config, ResolverOpts::default())
            }
            None => match trust_dns_resolver::system_conf::read_system_conf() {
                Ok(parts) => parts,
                Err(e) => {
                    warn!("Could not read system resolver configuration: {e}");
                    (ResolverConfig::default(), ResolverOpts::default())
                }
            },
        };
        opts.timeout = self.timeout;
        TokioAsyncResolver::tokio(config, opts)
    }
}

#[async_trait]
impl DnsBackend for TrustDnsBackend {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        server: Option<Ipv4Addr>,
    ) -> Result<Vec<DnsRecord>, ResolutionError> {
        let resolver = self.build(server);
        let wire = wire_type(record_type);

        let lookup = resolver
            .lookup(name, wire)
            .await
            .map_err(|e| map_resolve_error(e, name, record_type))?;

        let records: Vec<DnsRecord> = lookup
            .record_iter()
            .filter(|record| record.record_type() == wire)
            .filter_map(|record| {
                let value = format_rdata(record.data()?)?;
                Some(DnsRecord {
                    record_type,
                    value,
                    ttl: Some(record.ttl()),
                })
            })
            .collect();
        debug!("{name} {record_type}: {} answer(s)", records.len());

        if records.is_empty() {
            return Err(ResolutionError::NoRecords {
                name: name.to_string(),
                record_type: record_type.to_string(),
            });
        }
        Ok(records)
    }
}

fn wire_type(record_type: RecordType) -> WireType {
    match record_type {
        RecordType::A => WireType::A,
        RecordType::Aaaa => WireType::AAAA,
        RecordType::Cname => WireType::CNAME,
        RecordType::Mx => WireType::MX,
        RecordType::Ns => WireType::NS,
        RecordType::Txt => WireType::TXT,
        RecordType::Soa => WireType::SOA,
        RecordType::Ptr => WireType::PTR,
        RecordType::Srv => WireType::SRV,
    }
}

fn map_resolve_error(err: ResolveError, name: &str, record_type: RecordType) -> ResolutionError {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => ResolutionError::NoRecords {
            name: name.to_string(),
            record_type: record_type.to_string(),
        },
        _ => ResolutionError::Lookup(err.to_string()),
    }
}

/// Textual form of one answer. Types outside the supported set yield `None`.
pub fn format_rdata(data: &RData) -> Option<String> {
    let value = match data {
        RData::A(a) => a.to_string(),
        RData::AAAA(aaaa) => aaaa.to_string(),
        RData::CNAME(cname) => name_text(&cname.0),
        RData::NS(ns) => name_text(&ns.0),
        RData::PTR(ptr) => name_text(&ptr.0),
        RData::MX(mx) => format!("{} {}", mx.preference(), name_text(mx.exchange())),
        RData::TXT(txt) => txt
            .txt_data()
            .iter()
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect::<Vec<_>>()
            .concat(),
        RData::SRV(srv) => format!(
            "{} {} {} {}",
            srv.priority(),
            srv.weight(),
            srv.port(),
            name_text(srv.target())
        ),
        RData::SOA(soa) => format!(
            "{} {} {} {} {} {} {}",
            name_text(soa.mname()),
            name_text(soa.rname()),
            soa.serial(),
            soa.refresh(),
            soa.retry(),
            soa.expire(),
            soa.minimum()
        ),
        _ => return None,
    };
    Some(value)
}

fn name_text(name: &trust_dns_resolver::proto::rr::Name) -> String {
    let text = name.to_string();
    match text.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => text,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
