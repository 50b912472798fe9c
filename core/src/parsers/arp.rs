use std::sync::OnceLock;

use netdiag_common::models::system::ArpEntry;
use netdiag_common::network::mac::normalize_mac;
use netdiag_common::platform::Platform;
use regex::Regex;

/// `? (192.168.1.1) at aa:bb:cc:dd:ee:ff [ether] on eth0` (Linux) and
/// `? (192.168.1.1) at 0:1a:2b:3:4:5 on en0 ifscope [ethernet]` (macOS).
fn unix_entry() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\((?P<ip>[0-9a-fA-F:.]+)\)\s+at\s+(?P<mac>\S+)(?:.*?\son\s+(?P<iface>\S+))?")
            .expect("static arp pattern")
    })
}

fn windows_interface() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*Interface:\s+(\S+)").expect("static arp pattern"))
}

fn windows_entry() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d{1,3}(?:\.\d{1,3}){3})\s+([0-9a-fA-F]{2}(?:-[0-9a-fA-F]{2}){5})\b")
            .expect("static arp pattern")
    })
}

/// Parses `arp -an` / `arp -a` output into entries with normalized MACs.
///
/// Incomplete entries are dropped. On Windows every entry inherits the
/// address of the `Interface:` block it appears in.
pub fn parse_arp(raw: &str, platform: Platform) -> Vec<ArpEntry> {
    match platform {
        Platform::Windows => parse_windows(raw),
        Platform::Linux | Platform::MacOs => parse_unix(raw),
    }
}

fn parse_unix(raw: &str) -> Vec<ArpEntry> {
    raw.lines()
        .filter_map(|line| {
            let caps = unix_entry().captures(line)?;
            let mac = normalize_mac(&caps["mac"])?;
            Some(ArpEntry {
                ip: caps["ip"].to_string(),
                mac,
                interface: caps.name("iface").map(|m| m.as_str().to_string()),
                vendor: None,
            })
        })
        .collect()
}

fn parse_windows(raw: &str) -> Vec<ArpEntry> {
    let mut interface: Option<String> = None;
    let mut entries = Vec::new();

    for line in raw.lines() {
        if let Some(caps) = windows_interface().captures(line) {
            interface = Some(caps[1].to_string());
            continue;
        }
        let Some(caps) = windows_entry().captures(line) else {
            continue;
        };
        let Some(mac) = normalize_mac(&caps[2]) else {
            continue;
        };
        entries.push(ArpEntry {
            ip: caps[1].to_string(),
            mac,
            interface: interface.clone(),
            vendor: None,
        });
    }
    entries
}

/// Parses the Linux kernel neighbour table.
///
/// ```text
/// IP address       HW type     Flags       HW address            Mask     Device
/// 192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
/// ```
///
/// Rows with flags `0x0` or an all-zero address are incomplete and skipped.
pub fn parse_proc_net_arp(raw: &str) -> Vec<ArpEntry> {
    raw.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 6 || cols[2] == "0x0" {
                return None;
            }
            let mac = normalize_mac(cols[3])?;
            if mac == "00:00:00:00:00:00" {
                return None;
            }
            Some(ArpEntry {
                ip: cols[0].to_string(),
                mac,
                interface: Some(cols[5].to_string()),
                vendor: None,
            })
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
