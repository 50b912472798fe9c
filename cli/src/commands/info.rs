use colored::*;
use netdiag_core::Diagnostics;

use crate::commands::print_json;
use crate::terminal::{colors, format, print};

const KEY_WIDTH: usize = 10;

pub fn info(diag: &Diagnostics, json: bool) -> anyhow::Result<()> {
    let info = diag.get_system_info();
    if json {
        return print_json(&info);
    }

    print::banner();
    print::header("about this machine");
    print::aligned_line("Hostname", info.hostname.as_str(), KEY_WIDTH);
    print::aligned_line("Platform", format!("{} ({})", info.platform, info.arch), KEY_WIDTH);
    if let Some(os) = &info.os_version {
        print::aligned_line("OS", os.as_str(), KEY_WIDTH);
    }
    print::aligned_line("CPUs", info.cpu_count.to_string(), KEY_WIDTH);
    print::aligned_line("Memory", format::bytes(info.total_memory), KEY_WIDTH);
    print::aligned_line("Uptime", format::duration_secs(info.uptime), KEY_WIDTH);
    let privileged = if info.privileged {
        "yes".color(colors::ACCENT)
    } else {
        "no".normal()
    };
    print::aligned_line("Privileged", privileged, KEY_WIDTH);
    Ok(())
}
