use colored::*;
use netdiag_core::Diagnostics;

use crate::commands::print_json;
use crate::terminal::format::Detail;
use crate::terminal::{colors, format, print};

pub async fn arp(diag: &Diagnostics, json: bool) -> anyhow::Result<()> {
    let result = diag.arp_scan().await;
    if json {
        return print_json(&result);
    }

    print::header("arp table");
    if let Some(error) = &result.error {
        print::failure(error);
        return Ok(());
    }
    if result.entries.is_empty() {
        print::nothing_found("neighbours");
        return Ok(());
    }

    for (idx, entry) in result.entries.iter().enumerate() {
        print::tree_head(idx, &entry.ip);
        let mut details: Vec<Detail> = vec![format::detail("MAC", entry.mac.color(colors::MAC_ADDR))];
        if let Some(interface) = &entry.interface {
            details.push(format::detail("Iface", interface.normal()));
        }
        if let Some(vendor) = &entry.vendor {
            details.push(format::detail("Vendor", vendor.color(colors::SECONDARY)));
        }
        print::as_tree_one_level(details);
    }
    Ok(())
}
