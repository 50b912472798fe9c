use std::collections::HashSet;

use netdiag_common::config::Config;
use netdiag_common::models::scan::PortStatus;
use netdiag_common::options::ScanOptions;
use netdiag_core::Diagnostics;
use tokio::net::TcpListener;

fn diagnostics() -> Diagnostics {
    Diagnostics::new(Config {
        vendor_lookup: false,
        ..Config::default()
    })
}

/// Binds a listener on a port of the 1..=100 range that is still free.
async fn listener_in_low_range() -> Option<(TcpListener, u16)> {
    for port in (40..=100).chain(1..40) {
        if let Ok(listener) = TcpListener::bind(("127.0.0.1", port)).await {
            return Some((listener, port));
        }
    }
    None
}

#[tokio::test]
async fn port_scan_should_report_only_listening_ports_open() {
    let Some((_listener, open_port)) = listener_in_low_range().await else {
        eprintln!("no bindable port below 101, skipping");
        return;
    };
    let ports: Vec<i64> = (1..=100).collect();
    let options = ScanOptions {
        timeout_ms: Some(1000),
        concurrency: Some(25),
    };

    let result = diagnostics().port_scan("127.0.0.1", &ports, &options).await;

    assert_eq!(result.error, None);
    assert_eq!(result.ports.len(), 100);
    let open: Vec<u16> = result.open_ports().map(|p| p.port).collect();
    assert!(open.contains(&open_port));
    // Anything else reported open must belong to another process on this host.
    for port in open.iter().filter(|&&p| p != open_port) {
        assert!(
            TcpListener::bind(("127.0.0.1", *port)).await.is_err(),
            "port {port} reported open without a listener"
        );
    }

    let unique: HashSet<u16> = result.ports.iter().map(|p| p.port).collect();
    assert_eq!(unique.len(), 100);
}

#[tokio::test]
async fn port_scan_should_classify_repeated_runs_identically() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let closed_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = closed_listener.local_addr().unwrap().port();
    drop(closed_listener);

    let diag = diagnostics();
    let ports = [i64::from(open), i64::from(closed)];
    for _ in 0..5 {
        let result = diag.port_scan("127.0.0.1", &ports, &ScanOptions::default()).await;
        let state = |port: u16| result.ports.iter().find(|p| p.port == port).unwrap().state;
        assert_eq!(state(open), PortStatus::Open);
        assert_eq!(state(closed), PortStatus::Closed);
    }
}

#[tokio::test]
async fn port_scan_should_clamp_options_instead_of_rejecting() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let options = ScanOptions {
        timeout_ms: Some(1),
        concurrency: Some(100_000),
    };

    let result = diagnostics()
        .port_scan("localhost", &[i64::from(port)], &options)
        .await;

    assert_eq!(result.error, None);
    assert_eq!(result.ports[0].state, PortStatus::Open);
}

#[tokio::test]
async fn port_scan_should_reject_oversized_port_lists() {
    let ports: Vec<i64> = (1..=10_001).collect();
    let result = diagnostics()
        .port_scan("127.0.0.1", &ports, &ScanOptions::default())
        .await;
    assert_eq!(result.error.as_deref(), Some("too many ports: 10001 (max 10000)"));
    assert!(result.ports.is_empty());
}
