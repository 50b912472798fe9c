use colored::*;
use netdiag_common::options::DnsOptions;
use netdiag_core::Diagnostics;

use crate::commands::print_json;
use crate::terminal::{colors, format, print};

pub async fn dns(diag: &Diagnostics, hostname: &str, options: DnsOptions, json: bool) -> anyhow::Result<()> {
    let result = diag.dns_lookup(hostname, &options).await;
    if json {
        return print_json(&result);
    }

    print::header(&format!("{} {}", result.record_type, result.hostname));
    for (idx, record) in result.records.iter().enumerate() {
        let ttl = record
            .ttl
            .map(|ttl| format!("ttl {ttl}s"))
            .unwrap_or_default();
        print::print(&format!(
            "{} {}  {}",
            format!("[{idx}]").color(colors::SEPARATOR),
            record.value.color(colors::PRIMARY),
            ttl.color(colors::SEPARATOR)
        ));
    }
    if let Some(error) = &result.error {
        print::failure(error);
    }
    print::as_tree_one_level(vec![
        format::detail("Server", result.server.normal()),
        format::detail("Time", format::ms(result.response_time).normal()),
    ]);
    Ok(())
}
