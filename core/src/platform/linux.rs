use std::time::Duration;

use netdiag_common::platform::Platform;
use netdiag_common::validate::SanitizedHost;

use super::{PlatformTools, Tool, whole_secs};

/// iputils `ping`, classic `traceroute` and net-tools `arp`.
pub struct LinuxTools;

impl PlatformTools for LinuxTools {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn binary_name(&self, tool: Tool) -> &'static str {
        match tool {
            Tool::Ping | Tool::Ping6 => "ping",
            Tool::Traceroute | Tool::Traceroute6 => "traceroute",
            Tool::Arp => "arp",
        }
    }

    fn binary_candidates(&self, tool: Tool) -> &'static [&'static str] {
        match tool {
            Tool::Ping | Tool::Ping6 => &["/bin/ping", "/usr/bin/ping", "/sbin/ping", "/usr/sbin/ping"],
            Tool::Traceroute | Tool::Traceroute6 => &[
                "/usr/bin/traceroute",
                "/usr/sbin/traceroute",
                "/bin/traceroute",
            ],
            Tool::Arp => &["/usr/sbin/arp", "/sbin/arp"],
        }
    }

    /// `-W` is the per-reply wait in whole seconds.
    fn ping_args(&self, host: &SanitizedHost, count: u32, timeout: Duration) -> Vec<String> {
        vec![
            "-c".into(),
            count.to_string(),
            "-W".into(),
            whole_secs(timeout).to_string(),
            "-n".into(),
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
            "-n".into(),
            "-m".into(),
            max_hops.to_string(),
            "-w".into(),
            whole_secs(timeout).to_string(),
            host.to_string(),
        ]
    }

    fn arp_args(&self) -> Vec<String> {
        vec!["-an".into()]
    }
}
