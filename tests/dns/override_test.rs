use std::net::Ipv4Addr;
use std::sync::Arc;

use netdiag_common::config::Config;
use netdiag_common::models::dns::RecordType;
use netdiag_common::options::DnsOptions;
use netdiag_core::Diagnostics;
use netdiag_integration_tests::RecordingDns;

fn custom(server: &str) -> DnsOptions {
    DnsOptions {
        server: Some(server.to_string()),
        record_type: None,
    }
}

#[tokio::test]
async fn sequential_lookup_should_use_system_after_override() {
    let (backend, calls) = RecordingDns::new();
    let diag = Diagnostics::new(Config::default()).with_dns_backend(Box::new(backend));

    let first = diag.dns_lookup("example.com", &custom("9.9.9.9")).await;
    let second = diag.dns_lookup("example.com", &DnsOptions::default()).await;

    assert_eq!(first.server, "9.9.9.9");
    assert_eq!(first.records[0].value, "answer-from-9.9.9.9");
    assert_eq!(second.server, "system");
    assert_eq!(second.records[0].value, "192.0.2.1");

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].2, Some(Ipv4Addr::new(9, 9, 9, 9)));
    assert_eq!(calls[1].2, None);
}

#[tokio::test]
async fn concurrent_lookups_should_keep_their_own_servers() {
    let (backend, calls) = RecordingDns::new();
    let diag = Arc::new(Diagnostics::new(Config::default()).with_dns_backend(Box::new(backend)));

    let servers = ["1.1.1.1", "8.8.8.8", "", "9.9.9.9"];
    let handles: Vec<_> = (0..40)
        .map(|i| {
            let diag = diag.clone();
            let server = servers[i % servers.len()];
            tokio::spawn(async move {
                let result = diag.dns_lookup("example.com", &custom(server)).await;
                (server, result)
            })
        })
        .collect();

    for handle in handles {
        let (server, result) = handle.await.unwrap();
        let expected = if server.is_empty() { "system" } else { server };
        assert_eq!(result.server, expected);
        let expected_value = if server.is_empty() {
            "192.0.2.1".to_string()
        } else {
            format!("answer-from-{server}")
        };
        assert_eq!(result.records[0].value, expected_value);
    }
    assert_eq!(calls.lock().unwrap().len(), 40);
}

#[tokio::test]
async fn lookup_should_pass_requested_type() {
    let (backend, calls) = RecordingDns::new();
    let diag = Diagnostics::new(Config::default()).with_dns_backend(Box::new(backend));
    let options = DnsOptions {
        server: None,
        record_type: Some("aaaa".into()),
    };

    let result = diag.dns_lookup("example.com", &options).await;

    assert_eq!(result.record_type, "AAAA");
    assert_eq!(calls.lock().unwrap()[0].1, RecordType::Aaaa);
}
