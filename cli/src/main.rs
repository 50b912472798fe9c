mod commands;
mod terminal;

use commands::{CommandLine, Commands, arp, dns, info, interfaces, ping, scan, serve, trace};
use netdiag_common::options::{DnsOptions, PingOptions, ScanOptions, TracerouteOptions};
use netdiag_core::Diagnostics;
use terminal::logging;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let global = &commands.global;

    // Responses own stdout in serve mode, keep stderr quiet by default there.
    let base_level = match commands.command {
        Commands::Serve => Level::WARN,
        _ => Level::INFO,
    };
    logging::init_logging(base_level, global.verbose)?;

    let diag = Diagnostics::new(global.config());
    let json = global.json;

    match commands.command {
        Commands::Serve => serve::serve(diag).await,
        Commands::Ping {
            host,
            count,
            timeout_ms,
        } => ping::ping(&diag, &host, PingOptions { timeout_ms, count }, json).await,
        Commands::Trace {
            host,
            max_hops,
            timeout_ms,
        } => {
            let options = TracerouteOptions {
                max_hops,
                timeout_ms,
            };
            trace::trace(&diag, &host, options, json).await
        }
        Commands::Scan {
            host,
            ports,
            timeout_ms,
            concurrency,
        } => {
            let options = ScanOptions {
                timeout_ms,
                concurrency,
            };
            scan::scan(&diag, &host, ports.as_deref(), options, json).await
        }
        Commands::Dns {
            hostname,
            record_type,
            server,
        } => {
            let options = DnsOptions {
                server,
                record_type,
            };
            dns::dns(&diag, &hostname, options, json).await
        }
        Commands::Interfaces => interfaces::interfaces(&diag, json),
        Commands::Arp => arp::arp(&diag, json).await,
        Commands::Info => info::info(&diag, json),
    }
}
