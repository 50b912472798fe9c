use std::time::Duration;

use netdiag_common::platform::Platform;
use netdiag_common::validate::SanitizedHost;

use super::{PlatformTools, Tool};

/// `PING.EXE`, `TRACERT.EXE` and `ARP.EXE` from System32. All waits are in
/// milliseconds.
pub struct WindowsTools;

impl PlatformTools for WindowsTools {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn binary_name(&self, tool: Tool) -> &'static str {
        match tool {
            Tool::Ping | Tool::Ping6 => "ping",
            Tool::Traceroute | Tool::Traceroute6 => "tracert",
            Tool::Arp => "arp",
        }
    }

    fn binary_candidates(&self, tool: Tool) -> &'static [&'static str] {
        match tool {
            Tool::Ping | Tool::Ping6 => &[r"C:\Windows\System32\PING.EXE"],
            Tool::Traceroute | Tool::Traceroute6 => &[r"C:\Windows\System32\TRACERT.EXE"],
            Tool::Arp => &[r"C:\Windows\System32\ARP.EXE"],
        }
    }

    fn ping_args(&self, host: &SanitizedHost, count: u32, timeout: Duration) -> Vec<String> {
        vec![
            "-n".into(),
            count.to_string(),
            "-w".into(),
            timeout.as_millis().to_string(),
            host.to_string(),
        ]
    }

    fn traceroute_args(
        &self,
        host: &SanitizedHost,
        max_hops: u32,
        timeout: Duration,
    ) -> Vec<String> {
        vec![
            "-d".into(),
            "-h".into(),
            max_hops.to_string(),
            "-w".into(),
            timeout.as_millis().to_string(),
            host.to_string(),
        ]
    }

    fn arp_args(&self) -> Vec<String> {
        vec!["-a".into()]
    }
}
