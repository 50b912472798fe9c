use std::sync::Arc;

use netdiag_common::config::Config;
use netdiag_common::models::system::{InterfaceInfo, SystemInfo};
use netdiag_common::options::{PingOptions, TracerouteOptions};
use netdiag_common::platform::Platform;
use netdiag_core::Diagnostics;
use netdiag_core::platform::tools_for;
use netdiag_core::system::SystemRepository;
use netdiag_core::vendors::NoVendors;
use netdiag_integration_tests::{Reply, ScriptedRunner};

const MACOS_PING: &str = "\
PING 1.1.1.1 (1.1.1.1): 56 data bytes
64 bytes from 1.1.1.1: icmp_seq=0 ttl=57 time=9.874 ms
Request timeout for icmp_seq 1
64 bytes from 1.1.1.1: icmp_seq=2 ttl=57 time=10.112 ms
";

const WINDOWS_TRACERT: &str = "\r
Tracing route to one.one.one.one [1.1.1.1]\r
over a maximum of 30 hops:\r
\r
  1    <1 ms    <1 ms    <1 ms  192.168.1.1\r
  2     *        *        *     Request timed out.\r
  3    12 ms    11 ms    13 ms  1.1.1.1\r
\r
Trace complete.\r
";

fn diagnostics(platform: Platform, runner: Arc<ScriptedRunner>) -> Diagnostics {
    Diagnostics::new(Config::default())
        .with_tools(tools_for(platform))
        .with_runner(runner)
        .with_vendor_repo(Box::new(NoVendors))
}

#[tokio::test]
async fn partial_ping_output_should_still_be_alive() {
    let runner = Arc::new(ScriptedRunner::new().reply("ping", Reply::Partial(MACOS_PING.into())));
    let diag = diagnostics(Platform::MacOs, runner.clone());
    let options = PingOptions {
        count: Some(3),
        timeout_ms: Some(1000),
    };

    let result = diag.ping("1.1.1.1", &options).await;

    assert!(result.alive);
    assert_eq!(result.times, vec![9.874, 10.112]);
    assert!((result.packet_loss - 100.0 / 3.0).abs() < 0.01);
    assert_eq!(result.error, None);

    let commands = runner.commands();
    assert_eq!(commands[0].args, vec!["-c", "3", "-W", "1000", "-n", "1.1.1.1"]);
}

#[tokio::test]
async fn windows_tracert_should_be_parsed_in_hop_order() {
    let runner = Arc::new(ScriptedRunner::new().reply("tracert", Reply::Stdout(WINDOWS_TRACERT.into())));
    let diag = diagnostics(Platform::Windows, runner.clone());

    let result = diag.traceroute("1.1.1.1", &TracerouteOptions::default()).await;

    assert_eq!(result.error, None);
    assert_eq!(result.hops.len(), 3);
    assert!(result.hops[1].timeout);
    assert_eq!(result.hops[2].ip, "1.1.1.1");
    assert_eq!(runner.commands()[0].program, "tracert");
}

#[tokio::test]
async fn ipv6_ping_on_macos_should_use_ping6() {
    let runner = Arc::new(ScriptedRunner::new());
    let diag = diagnostics(Platform::MacOs, runner.clone());

    let result = diag.ping("2001:db8::1", &PingOptions::default()).await;

    assert_eq!(result.error.as_deref(), Some("'ping6' was not found, is it installed?"));
    assert_eq!(runner.commands()[0].program, "ping6");
}

#[tokio::test]
async fn traceroute_timeout_should_surface_in_result() {
    let runner = Arc::new(ScriptedRunner::new().reply("traceroute", Reply::Timeout));
    let diag = diagnostics(Platform::Linux, runner);
    let options = TracerouteOptions {
        max_hops: Some(64),
        timeout_ms: Some(10_000),
    };

    let result = diag.traceroute("example.com", &options).await;

    assert!(result.hops.is_empty());
    assert_eq!(
        result.error.as_deref(),
        Some("'traceroute' produced no output within 120000 ms")
    );
}

#[tokio::test]
async fn unsafe_hosts_should_never_reach_a_process() {
    let runner = Arc::new(ScriptedRunner::new());
    let diag = diagnostics(Platform::Linux, runner.clone());

    for host in ["a.com;ls", "$(id)", "x|y", "host\nname", "`id`", "a'b", "a\"b"] {
        let ping = diag.ping(host, &PingOptions::default()).await;
        let trace = diag.traceroute(host, &TracerouteOptions::default()).await;
        assert!(ping.error.is_some(), "{host:?} accepted by ping");
        assert!(trace.error.is_some(), "{host:?} accepted by traceroute");
    }
    assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn arp_scan_should_read_windows_table() {
    let table = "\r
Interface: 192.168.1.100 --- 0xb\r
  Internet Address      Physical Address      Type\r
  192.168.1.1           aa-bb-cc-dd-ee-ff     dynamic\r
";
    let runner = Arc::new(ScriptedRunner::new().reply("arp", Reply::Stdout(table.into())));
    let diag = diagnostics(Platform::Windows, runner.clone());

    let result = diag.arp_scan().await;

    assert_eq!(result.error, None);
    assert_eq!(result.entries[0].mac, "aa:bb:cc:dd:ee:ff");
    assert_eq!(result.entries[0].interface.as_deref(), Some("192.168.1.100"));
    assert_eq!(runner.commands()[0].args, vec!["-a"]);
}

struct FixedMachine;

impl SystemRepository for FixedMachine {
    fn network_interfaces(&self) -> Vec<InterfaceInfo> {
        vec![InterfaceInfo {
            name: "eth0".into(),
            mac: "aa:bb:cc:dd:ee:ff".into(),
            ipv4: Some("192.168.1.10".into()),
            netmask: Some("255.255.255.0".into()),
            ipv6: None,
            internal: false,
        }]
    }

    fn system_info(&self) -> SystemInfo {
        SystemInfo {
            hostname: "lab-host".into(),
            platform: "linux".into(),
            arch: "x64".into(),
            cpu_count: 8,
            total_memory: 16 * 1024 * 1024 * 1024,
            uptime: 3600,
            os_version: Some("Linux 6.1".into()),
            privileged: false,
        }
    }
}

#[tokio::test]
async fn machine_queries_should_come_from_system_repository() {
    let runner = Arc::new(ScriptedRunner::new());
    let diag = diagnostics(Platform::Linux, runner.clone()).with_system_repo(Box::new(FixedMachine));

    let interfaces = diag.get_interfaces();
    let info = diag.get_system_info();

    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0].name, "eth0");
    assert_eq!(interfaces[0].ipv4.as_deref(), Some("192.168.1.10"));
    assert_eq!(info.hostname, "lab-host");
    assert_eq!(info.cpu_count, 8);
    assert_eq!(info.total_memory, 17_179_869_184);
    assert!(runner.commands().is_empty());
}
