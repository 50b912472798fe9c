use std::time::Duration;

use netdiag_common::platform::Platform;
use netdiag_common::validate::SanitizedHost;

use super::{PlatformTools, Tool, is_ipv6, whole_secs};

/// BSD userland. IPv6 targets need the separate `ping6`/`traceroute6`.
pub struct MacOsTools;

impl PlatformTools for MacOsTools {
    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    fn binary_name(&self, tool: Tool) -> &'static str {
        match tool {
            Tool::Ping => "ping",
            Tool::Ping6 => "ping6",
            Tool::Traceroute => "traceroute",
            Tool::Traceroute6 => "traceroute6",
            Tool::Arp => "arp",
        }
    }

    fn binary_candidates(&self, tool: Tool) -> &'static [&'static str] {
        match tool {
            Tool::Ping => &["/sbin/ping"],
            Tool::Ping6 => &["/sbin/ping6"],
            Tool::Traceroute => &["/usr/sbin/traceroute"],
            Tool::Traceroute6 => &["/usr/sbin/traceroute6"],
            Tool::Arp => &["/usr/sbin/arp"],
        }
    }

    fn ping_tool(&self, host: &SanitizedHost) -> Tool {
        if is_ipv6(host) { Tool::Ping6 } else { Tool::Ping }
    }

    fn traceroute_tool(&self, host: &SanitizedHost) -> Tool {
        if is_ipv6(host) {
            Tool::Traceroute6
        } else {
            Tool::Traceroute
        }
    }

    /// BSD `ping -W` takes milliseconds. `ping6` has no reply wait flag, the
    /// process deadline bounds it instead.
    fn ping_args(&self, host: &SanitizedHost, count: u32, timeout: Duration) -> Vec<String> {
        let mut args = vec!["-c".into(), count.to_string()];
        if !is_ipv6(host) {
            args.push("-W".into());
            args.push(timeout.as_millis().to_string());
        }
        args.push("-n".into());
        args.push(host.to_string());
        args
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
