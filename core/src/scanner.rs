//! Batched TCP connect scanning.
//!
//! The port list is cut into sequential batches of `concurrency` ports. All
//! probes of a batch run at once, and the next batch starts only when the
//! whole batch has settled, so at most `concurrency` sockets are open at any
//! time no matter how long the list is.

use std::collections::HashSet;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use netdiag_common::error::ResolutionError;
use netdiag_common::models::scan::{PortState, PortStatus};
use netdiag_common::options::ScanSettings;
use netdiag_common::validate::SanitizedHost;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub mod services;
pub mod tcp;

pub use tcp::handshake_probe;

/// Called after each batch with `(ports_done, ports_total)`.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

pub struct PortScanner {
    settings: ScanSettings,
    on_progress: Option<ProgressCallback>,
}

impl PortScanner {
    pub fn new(settings: ScanSettings) -> Self {
        Self {
            settings,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub async fn scan(&self, target: IpAddr, ports: &[u16]) -> Vec<PortState> {
        let probe_timeout = self.settings.timeout;
        debug!(
            "Scanning {} port(s) on {target} in batches of {}",
            ports.len(),
            self.settings.concurrency
        );
        scan_in_batches(
            ports,
            self.settings.concurrency,
            move |port| handshake_probe(SocketAddr::new(target, port), probe_timeout),
            self.on_progress.as_ref(),
        )
        .await
    }
}

/// Runs `prober` over `ports` in sequential batches of `batch_size`.
///
/// Duplicate ports are probed once. Results keep the input order, but
/// callers should only rely on batch grouping.
pub async fn scan_in_batches<F, Fut>(
    ports: &[u16],
    batch_size: usize,
    prober: F,
    on_progress: Option<&ProgressCallback>,
) -> Vec<PortState>
where
    F: Fn(u16) -> Fut + Send,
    Fut: Future<Output = PortState> + Send + 'static,
{
    let mut seen = HashSet::new();
    let unique: Vec<u16> = ports.iter().copied().filter(|p| seen.insert(*p)).collect();
    let total = unique.len();

    let mut results = Vec::with_capacity(total);
    let mut done = 0;

    for batch in unique.chunks(batch_size.max(1)) {
        let handles: Vec<(u16, JoinHandle<PortState>)> = batch
            .iter()
            .map(|&port| (port, tokio::spawn(prober(port))))
            .collect();

        for (port, handle) in handles {
            let state = match handle.await {
                Ok(state) => state,
                Err(e) => {
                    warn!("Probe task for port {port} failed: {e}");
                    PortState {
                        port,
                        state: PortStatus::Filtered,
                        service: services::service_name(port).map(str::to_string),
                        response_time: None,
                    }
                }
            };
            results.push(state);
        }

        done += batch.len();
        if let Some(callback) = on_progress {
            callback(done, total);
        }
    }

    results
}

/// Address to connect to. Literals are used as-is, names go through the
/// system resolver with IPv4 preferred.
pub async fn resolve_target(host: &SanitizedHost) -> Result<IpAddr, ResolutionError> {
    if let Some(ip) = host.ip() {
        return Ok(ip);
    }

    let addrs: Vec<IpAddr> = tokio::net::lookup_host((host.as_str(), 0))
        .await
        .map_err(|e| ResolutionError::Lookup(format!("could not resolve {host}: {e}")))?
        .map(|addr| addr.ip())
        .collect();

    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| ResolutionError::NoRecords {
            name: host.to_string(),
            record_type: "A".to_string(),
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
