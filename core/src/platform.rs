//! Per-OS knowledge about the diagnostic binaries: where they live and which
//! flags they take.
//!
//! Exactly one [`PlatformTools`] implementation is selected at startup with
//! [`tools_for`]. Nothing else in the engine branches on the operating system
//! when building a command line.

use std::time::Duration;

use netdiag_common::options::{PingSettings, TracerouteSettings};
use netdiag_common::platform::Platform;
use netdiag_common::validate::{HostKind, SanitizedHost};

mod linux;
mod macos;
mod windows;

pub use linux::LinuxTools;
pub use macos::MacOsTools;
pub use windows::WindowsTools;

/// Slack added on top of the per-probe waits before a run is killed.
pub const DEADLINE_SLACK: Duration = Duration::from_secs(5);
pub const TRACEROUTE_DEADLINE_CAP: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Ping,
    Ping6,
    Traceroute,
    Traceroute6,
    Arp,
}

/// A fully built invocation: what to run, where to look for it, and how long
/// it may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: &'static str,
    pub fallbacks: &'static [&'static str],
    pub args: Vec<String>,
    pub deadline: Duration,
}

pub trait PlatformTools: Send + Sync {
    fn platform(&self) -> Platform;

    /// Bare binary name, resolved through `PATH` when no fallback exists.
    fn binary_name(&self, tool: Tool) -> &'static str;

    /// Absolute locations tried before `PATH`.
    fn binary_candidates(&self, tool: Tool) -> &'static [&'static str];

    fn ping_args(&self, host: &SanitizedHost, count: u32, timeout: Duration) -> Vec<String>;

    fn traceroute_args(&self, host: &SanitizedHost, max_hops: u32, timeout: Duration)
    -> Vec<String>;

    fn arp_args(&self) -> Vec<String>;

    /// Most platforms ship one ping for both families.
    fn ping_tool(&self, _host: &SanitizedHost) -> Tool {
        Tool::Ping
    }

    fn traceroute_tool(&self, _host: &SanitizedHost) -> Tool {
        Tool::Traceroute
    }

    fn ping_deadline(&self, count: u32, timeout: Duration) -> Duration {
        timeout * count.max(1) + DEADLINE_SLACK
    }

    fn traceroute_deadline(&self, max_hops: u32, timeout: Duration) -> Duration {
        (timeout * max_hops.max(1) + DEADLINE_SLACK).min(TRACEROUTE_DEADLINE_CAP)
    }

    fn ping_command(&self, host: &SanitizedHost, settings: &PingSettings) -> CommandSpec {
        let tool = self.ping_tool(host);
        CommandSpec {
            program: self.binary_name(tool),
            fallbacks: self.binary_candidates(tool),
            args: self.ping_args(host, settings.count, settings.timeout),
            deadline: self.ping_deadline(settings.count, settings.timeout),
        }
    }

    fn traceroute_command(&self, host: &SanitizedHost, settings: &TracerouteSettings) -> CommandSpec {
        let tool = self.traceroute_tool(host);
        CommandSpec {
            program: self.binary_name(tool),
            fallbacks: self.binary_candidates(tool),
            args: self.traceroute_args(host, settings.max_hops, settings.timeout),
            deadline: self.traceroute_deadline(settings.max_hops, settings.timeout),
        }
    }

    /// `arp` takes no user input, so its deadline is fixed.
    fn arp_command(&self) -> CommandSpec {
        CommandSpec {
            program: self.binary_name(Tool::Arp),
            fallbacks: self.binary_candidates(Tool::Arp),
            args: self.arp_args(),
            deadline: Duration::from_secs(10),
        }
    }
}

pub fn tools_for(platform: Platform) -> Box<dyn PlatformTools> {
    match platform {
        Platform::Linux => Box::new(LinuxTools),
        Platform::MacOs => Box::new(MacOsTools),
        Platform::Windows => Box::new(WindowsTools),
    }
}

/// Whole seconds for tools whose wait flag has second granularity, never zero.
pub(crate) fn whole_secs(timeout: Duration) -> u64 {
    timeout.as_millis().div_ceil(1000).max(1) as u64
}

pub(crate) fn is_ipv6(host: &SanitizedHost) -> bool {
    host.kind() == HostKind::Ipv6
}


// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
