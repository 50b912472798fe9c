use std::sync::Arc;

use netdiag_common::config::Config;
use netdiag_common::platform::Platform;
use netdiag_core::Diagnostics;
use netdiag_core::ipc;
use netdiag_core::platform::tools_for;
use netdiag_core::vendors::NoVendors;
use netdiag_integration_tests::{RecordingDns, Reply, ScriptedRunner};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, BufReader};

const LINUX_PING: &str = "\
64 bytes from 10.0.0.1: icmp_seq=1 ttl=64 time=0.5 ms
--- 10.0.0.1 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms
";

async fn round_trip(diag: Diagnostics, requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{r}\n")).collect();
    let (client, server) = tokio::io::duplex(256 * 1024);

    ipc::serve(Arc::new(diag), BufReader::new(input.as_bytes()), server)
        .await
        .unwrap();

    let mut responses = Vec::new();
    let mut lines = BufReader::new(client).lines();
    while let Some(line) = lines.next_line().await.unwrap() {
        responses.push(serde_json::from_str::<Value>(&line).unwrap());
    }
    responses.sort_by_key(|r| r["id"].as_i64());
    responses
}

#[tokio::test]
async fn serve_should_answer_each_operation_with_its_result_shape() {
    let runner = Arc::new(ScriptedRunner::new().reply("ping", Reply::Stdout(LINUX_PING.into())));
    let (dns, _) = RecordingDns::new();
    let diag = Diagnostics::new(Config::default())
        .with_tools(tools_for(Platform::Linux))
        .with_runner(runner)
        .with_dns_backend(Box::new(dns))
        .with_vendor_repo(Box::new(NoVendors));

    let responses = round_trip(
        diag,
        &[
            json!({"id": 1, "op": "ping", "args": ["10.0.0.1", {"count": 1}]}),
            json!({"id": 2, "op": "dnsLookup", "args": ["example.com", {"type": "MX", "server": "1.1.1.1"}]}),
            json!({"id": 3, "op": "portScan", "args": ["127.0.0.1", [0, 70000]]}),
            json!({"id": 4, "op": "getSystemInfo"}),
            json!({"id": 5, "op": "getInterfaces", "args": []}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 5);

    let ping = &responses[0]["result"];
    assert_eq!(ping["alive"], json!(true));
    assert_eq!(ping["packetLoss"], json!(0.0));
    assert_eq!(ping["times"], json!([0.5]));

    let dns = &responses[1]["result"];
    assert_eq!(dns["recordType"], json!("MX"));
    assert_eq!(dns["server"], json!("1.1.1.1"));
    assert_eq!(dns["records"][0]["ttl"], json!(300));

    assert_eq!(responses[2]["result"]["error"], json!("no valid ports in range 1-65535"));

    let info = &responses[3]["result"];
    assert!(info["cpuCount"].as_u64().unwrap() >= 1);
    assert!(info["totalMemory"].is_u64());

    assert!(responses[4]["result"].is_array());
    assert!(responses.iter().all(|r| r.get("error").is_none()));
}

#[tokio::test]
async fn serve_should_keep_going_after_bad_lines() {
    let diag = Diagnostics::new(Config::default()).with_vendor_repo(Box::new(NoVendors));
    let input = "garbage\n{\"id\":9,\"op\":\"ping\",\"args\":[\"\"]}\n";
    let (client, server) = tokio::io::duplex(64 * 1024);

    ipc::serve(Arc::new(diag), BufReader::new(input.as_bytes()), server)
        .await
        .unwrap();

    let mut lines = BufReader::new(client).lines();
    let mut responses = Vec::new();
    while let Some(line) = lines.next_line().await.unwrap() {
        responses.push(serde_json::from_str::<Value>(&line).unwrap());
    }

    assert_eq!(responses.len(), 2);
    let malformed = responses.iter().find(|r| r["id"].is_null()).unwrap();
    assert!(malformed["error"].as_str().unwrap().starts_with("malformed request"));
    let ping = responses.iter().find(|r| r["id"] == json!(9)).unwrap();
    assert_eq!(ping["result"]["error"], json!("host is required"));
}
