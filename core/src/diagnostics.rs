//! # Diagnostics Service
//!
//! The single entry point the UI process talks to. It exposes the seven
//! diagnostic operations.
//!
//! Every operation follows the same shape:
//! 1. **Validate** untrusted input with the common validator.
//! 2. **Delegate** to the platform tools, the port scanner or the resolver.
//! 3. **Report** a structured result. Errors of any kind end up in the
//!    result's `error` field, nothing is returned as `Err`.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use netdiag_common::config::Config;
use netdiag_common::error::DiagError;
use netdiag_common::models::dns::DnsLookupResult;
use netdiag_common::models::ping::PingResult;
use netdiag_common::models::scan::PortScanResult;
use netdiag_common::models::system::{ArpScanResult, InterfaceInfo, SystemInfo};
use netdiag_common::models::traceroute::TracerouteResult;
use netdiag_common::options::{DnsOptions, PingOptions, ScanOptions, TracerouteOptions};
use netdiag_common::platform::Platform;
use netdiag_common::validate::{SanitizedHost, validate_host, validate_ports};
use tracing::{error, info, warn};

use crate::dns::{DnsBackend, DnsResolver};
use crate::parsers::{parse_ping, parse_traceroute};
use crate::platform::{PlatformTools, tools_for};
use crate::process::{CommandRunner, SystemRunner};
use crate::scanner::{PortScanner, ProgressCallback, resolve_target};
use crate::system::{PROC_NET_ARP, SystemRepo, SystemRepository, arp_table};
use crate::vendors::{MacOuiRepo, NoVendors, VendorRepository};

pub struct Diagnostics {
    tools: Box<dyn PlatformTools>,
    runner: Arc<dyn CommandRunner>,
    dns: DnsResolver,
    vendor_repo: Box<dyn VendorRepository>,
    system_repo: Box<dyn SystemRepository>,
    kernel_arp_table: PathBuf,
}

impl Diagnostics {
    /// Wires the real implementations for the host this runs on.
    pub fn new(config: Config) -> Self {
        let vendor_repo: Box<dyn VendorRepository> = if config.vendor_lookup {
            Box::new(MacOuiRepo)
        } else {
            Box::new(NoVendors)
        };

        Self {
            tools: tools_for(Platform::current()),
            runner: Arc::new(SystemRunner::new(config.clone())),
            dns: DnsResolver::system(config.dns_timeout),
            vendor_repo,
            system_repo: Box::new(SystemRepo),
            kernel_arp_table: PathBuf::from(PROC_NET_ARP),
        }
    }

    pub fn with_tools(mut self, tools: Box<dyn PlatformTools>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_dns_backend(mut self, backend: Box<dyn DnsBackend>) -> Self {
        self.dns = DnsResolver::new(backend);
        self
    }

    pub fn with_vendor_repo(mut self, vendor_repo: Box<dyn VendorRepository>) -> Self {
        self.vendor_repo = vendor_repo;
        self
    }

    pub fn with_system_repo(mut self, system_repo: Box<dyn SystemRepository>) -> Self {
        self.system_repo = system_repo;
        self
    }

    pub fn with_kernel_arp_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.kernel_arp_table = path.into();
        self
    }

    pub fn platform(&self) -> Platform {
        self.tools.platform()
    }

    /// Sends `count` echo requests with the system `ping`.
    ///
    /// A run that is cut short but captured replies is still alive.
    pub async fn ping(&self, host: &str, options: &PingOptions) -> PingResult {
        let target = match validate_host(host) {
            Ok(target) => target,
            Err(e) => return PingResult::failed(host, e.to_string()),
        };
        let settings = match options.resolve() {
            Ok(settings) => settings,
            Err(e) => return PingResult::failed(target.as_str(), e.to_string()),
        };

        info!("Pinging {target} ({} probe(s))", settings.count);
        let spec = self.tools.ping_command(&target, &settings);
        let output = match self.runner.run(&spec).await {
            Ok(output) => output,
            Err(e) => {
                error!("ping {target}: {e}");
                return PingResult::failed(target.as_str(), e.to_string());
            }
        };
        if output.timed_out {
            warn!("ping {target} hit its deadline, using partial output");
        }

        let summary = parse_ping(&output.stdout, self.platform());
        let loss = summary.loss_or_derived(settings.count);
        let result = PingResult::from_samples(target.as_str(), summary.times, loss);

        if result.alive {
            return result;
        }
        let stderr = output.stderr.trim();
        if stderr.is_empty() {
            warn!("No replies parsed from ping {target}");
            result.with_error(format!("no replies from {target}"))
        } else {
            result.with_error(stderr)
        }
    }

    /// Traces the route to `host` with `traceroute` / `tracert`.
    pub async fn traceroute(&self, host: &str, options: &TracerouteOptions) -> TracerouteResult {
        let target = match validate_host(host) {
            Ok(target) => target,
            Err(e) => return TracerouteResult::failed(host, e.to_string()),
        };
        let settings = options.resolve();

        info!("Tracing route to {target} (max {} hops)", settings.max_hops);
        let spec = self.tools.traceroute_command(&target, &settings);
        let output = match self.runner.run(&spec).await {
            Ok(output) => output,
            Err(e) => {
                error!("traceroute {target}: {e}");
                return TracerouteResult::failed(target.as_str(), e.to_string());
            }
        };
        if output.timed_out {
            warn!("traceroute {target} hit its deadline, using partial output");
        }

        let hops = parse_traceroute(&output.stdout, self.platform());
        let error = if hops.is_empty() {
            warn!("No hops parsed from traceroute {target}");
            match output.stderr.trim() {
                "" => Some(format!("no hops reported for {target}")),
                stderr => Some(stderr.to_string()),
            }
        } else {
            None
        };

        TracerouteResult {
            destination: target.to_string(),
            hops,
            error,
        }
    }

    pub async fn port_scan(&self, host: &str, ports: &[i64], options: &ScanOptions) -> PortScanResult {
        self.port_scan_with_progress(host, ports, options, None).await
    }

    /// TCP connect scan of `ports`, probed in batches of `concurrency`.
    pub async fn port_scan_with_progress(
        &self,
        host: &str,
        ports: &[i64],
        options: &ScanOptions,
        on_progress: Option<ProgressCallback>,
    ) -> PortScanResult {
        let (target, ports, addr) = match scan_target(host, ports).await {
            Ok(prepared) => prepared,
            Err(e) => {
                error!("Port scan of {host}: {e}");
                return PortScanResult::failed(host, e.to_string());
            }
        };
        let settings = options.resolve();

        info!("Scanning {} port(s) on {target} ({addr})", ports.len());
        let mut scanner = PortScanner::new(settings);
        if let Some(callback) = on_progress {
            scanner = scanner.with_progress(callback);
        }
        let states = scanner.scan(addr, &ports).await;

        let result = PortScanResult {
            host: target.to_string(),
            ports: states,
            error: None,
        };
        info!("{} open port(s) on {target}", result.open_ports().count());
        result
    }

    pub async fn dns_lookup(&self, hostname: &str, options: &DnsOptions) -> DnsLookupResult {
        self.dns.lookup(hostname, options).await
    }

    pub fn get_interfaces(&self) -> Vec<InterfaceInfo> {
        self.system_repo.network_interfaces()
    }

    /// Reads the local neighbour table. Takes no user input.
    pub async fn arp_scan(&self) -> ArpScanResult {
        match arp_table(self.runner.as_ref(), self.tools.as_ref(), &self.kernel_arp_table).await {
            Ok(mut entries) => {
                self.vendor_repo.annotate(&mut entries);
                ArpScanResult {
                    entries,
                    error: None,
                }
            }
            Err(e) => {
                error!("ARP scan: {e}");
                ArpScanResult {
                    entries: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn get_system_info(&self) -> SystemInfo {
        self.system_repo.system_info()
    }
}

/// Validates scan input and resolves the host to the address to probe.
async fn scan_target(host: &str, ports: &[i64]) -> Result<(SanitizedHost, Vec<u16>, IpAddr), DiagError> {
    let target = validate_host(host)?;
    let ports = validate_ports(ports)?;
    let addr = resolve_target(&target).await?;
    Ok((target, ports, addr))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
