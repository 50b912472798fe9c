use netdiag_core::Diagnostics;

use crate::commands::print_json;
use crate::terminal::{network_fmt, print};

pub fn interfaces(diag: &Diagnostics, json: bool) -> anyhow::Result<()> {
    let interfaces = diag.get_interfaces();
    if json {
        return print_json(&interfaces);
    }

    print::header("network interfaces");
    if interfaces.is_empty() {
        print::nothing_found("interfaces");
        return Ok(());
    }
    for (idx, interface) in interfaces.iter().enumerate() {
        network_fmt::print_interface(interface, idx);
        if idx + 1 != interfaces.len() {
            print::blank();
        }
    }
    Ok(())
}
