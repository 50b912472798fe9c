pub mod arp;
pub mod dns;
pub mod info;
pub mod interfaces;
pub mod ping;
pub mod scan;
pub mod serve;
pub mod trace;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use netdiag_common::config::Config;

#[derive(Parser)]
#[command(name = "netdiag")]
#[command(about = "Network diagnostics engine: ping, traceroute, port scans and DNS.")]
#[command(version)]
pub struct CommandLine {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// More log output, repeat for more (overridden by NETDIAG_LOG)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Do not resolve MAC vendors for ARP entries
    #[arg(long, global = true)]
    pub no_vendor: bool,

    /// Grace period between terminate and kill for overrunning tools
    #[arg(long, global = true, default_value_t = 500, value_name = "MS")]
    pub kill_grace_ms: u64,

    /// Timeout for a single DNS query
    #[arg(long, global = true, default_value_t = 5000, value_name = "MS")]
    pub dns_timeout_ms: u64,
}

impl GlobalArgs {
    pub fn config(&self) -> Config {
        Config {
            kill_grace: Duration::from_millis(self.kill_grace_ms),
            dns_timeout: Duration::from_millis(self.dns_timeout_ms),
            vendor_lookup: !self.no_vendor,
            ..Config::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve JSON requests on stdin, one response per line on stdout
    Serve,
    /// Send ICMP echo requests with the system ping
    #[command(alias = "p")]
    Ping {
        host: String,
        /// Echo requests to send (1-10)
        #[arg(short = 'c', long)]
        count: Option<i64>,
        /// Wait per reply
        #[arg(short = 't', long, value_name = "MS")]
        timeout_ms: Option<i64>,
    },
    /// Trace the route to a host
    #[command(alias = "t")]
    Trace {
        host: String,
        /// Maximum TTL (1-64)
        #[arg(short = 'm', long)]
        max_hops: Option<i64>,
        /// Wait per probe
        #[arg(short = 't', long, value_name = "MS")]
        timeout_ms: Option<i64>,
    },
    /// TCP connect scan
    #[command(alias = "s")]
    Scan {
        host: String,
        /// Ports such as `22,80,8000-8100` (default: common ports)
        #[arg(short = 'p', long)]
        ports: Option<String>,
        /// Connect timeout per port
        #[arg(short = 't', long, value_name = "MS")]
        timeout_ms: Option<i64>,
        /// Ports probed at once (1-200)
        #[arg(short = 'n', long)]
        concurrency: Option<i64>,
    },
    /// Query DNS records
    #[command(alias = "d")]
    Dns {
        hostname: String,
        /// A, AAAA, CNAME, MX, NS, TXT, SOA, PTR or SRV
        #[arg(short = 'T', long = "type", value_name = "TYPE")]
        record_type: Option<String>,
        /// IPv4 address of the server to ask
        #[arg(short = 's', long)]
        server: Option<String>,
    },
    /// List local network interfaces
    #[command(alias = "if")]
    Interfaces,
    /// Show the local ARP table
    Arp,
    /// Show information about this machine
    #[command(alias = "i")]
    Info,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
