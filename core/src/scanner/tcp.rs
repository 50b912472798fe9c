use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use netdiag_common::models::scan::{PortState, PortStatus};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use super::services::service_name;

/// One full TCP connect against `addr`.
///
/// * handshake completed: open, with the connect time
/// * connection refused: closed
/// * timeout, unreachable, reset or anything else: filtered
///
/// The socket is owned by the connect future or the returned stream and is
/// released exactly once when either is dropped, whichever path is taken.
pub async fn handshake_probe(addr: SocketAddr, probe_timeout: Duration) -> PortState {
    let started = Instant::now();

    let (state, response_time) = match timeout(probe_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            let elapsed = started.elapsed().as_secs_f64() * 1000.0;
            drop(stream);
            (PortStatus::Open, Some(round2(elapsed)))
        }
        Ok(Err(e)) => {
            trace!("{addr}: {e}");
            (classify_connect_error(&e), None)
        }
        Err(_elapsed) => (PortStatus::Filtered, None),
    };

    PortState {
        port: addr.port(),
        state,
        service: service_name(addr.port()).map(str::to_string),
        response_time,
    }
}

/// Only a refusal is a definitive "closed". Everything else is filtered.
pub fn classify_connect_error(err: &io::Error) -> PortStatus {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => PortStatus::Closed,
        _ => PortStatus::Filtered,
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
