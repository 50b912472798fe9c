use std::net::Ipv6Addr;

use crate::terminal::{colors, print};
use colored::*;
use netdiag_common::models::system::{InterfaceInfo, ZERO_MAC};

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    let first_byte = ipv6_addr.octets()[0];
    if (0x20..=0x3F).contains(&first_byte) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

pub fn to_key_value_pair(interface: &InterfaceInfo) -> Vec<(String, ColoredString)> {
    let mut pairs = Vec::new();

    if let Some(ipv4) = &interface.ipv4 {
        let address: ColoredString = ipv4.color(colors::IPV4_ADDR);
        let value = match &interface.netmask {
            Some(mask) => format!("{address} {}", mask.color(colors::IPV4_PREFIX)).normal(),
            None => address,
        };
        pairs.push(("IPv4".to_string(), value));
    }

    if let Some(ipv6) = &interface.ipv6 {
        let key = ipv6
            .parse::<Ipv6Addr>()
            .map(|addr| ipv6_to_type_str(&addr))
            .unwrap_or("IPv6");
        pairs.push((key.to_string(), ipv6.color(colors::IPV6_ADDR)));
    }

    if interface.mac != ZERO_MAC {
        pairs.push(("MAC".to_string(), interface.mac.color(colors::MAC_ADDR)));
    }
    pairs
}

pub fn print_interface(interface: &InterfaceInfo, idx: usize) {
    let name = if interface.internal {
        format!("{} (loopback)", interface.name)
    } else {
        interface.name.clone()
    };
    print::tree_head(idx, &name);
    print::as_tree_one_level(to_key_value_pair(interface));
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
