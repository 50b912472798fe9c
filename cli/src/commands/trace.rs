use colored::*;
use netdiag_common::models::traceroute::Hop;
use netdiag_common::options::TracerouteOptions;
use netdiag_core::Diagnostics;

use crate::commands::print_json;
use crate::terminal::{colors, format, print};

pub async fn trace(
    diag: &Diagnostics,
    host: &str,
    options: TracerouteOptions,
    json: bool,
) -> anyhow::Result<()> {
    let result = diag.traceroute(host, &options).await;
    if json {
        return print_json(&result);
    }

    print::header(&format!("route to {}", result.destination));
    for hop in &result.hops {
        print_hop(hop);
    }
    if let Some(error) = &result.error {
        print::failure(error);
    }
    Ok(())
}

fn print_hop(hop: &Hop) {
    let index = format!("{:>2}", hop.hop).color(colors::ACCENT);
    if hop.timeout {
        print::print(&format!(" {index}  {}", "* * *".color(colors::TIMEOUT)));
        return;
    }

    let address = match &hop.hostname {
        Some(name) => format!("{} ({})", name.color(colors::PRIMARY), hop.ip.color(colors::IPV4_ADDR)),
        None => hop.ip.color(colors::IPV4_ADDR).to_string(),
    };
    let rtts: Vec<String> = hop.rtts.iter().map(|rtt| format::ms(*rtt)).collect();
    print::print(&format!(" {index}  {address}  {}", rtts.join("  ")));
}
