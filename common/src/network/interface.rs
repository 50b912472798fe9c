use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

use crate::models::system::{InterfaceInfo, ZERO_MAC};

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
    fn get_ipv6_nets(&self) -> Vec<Ipv6Network>;
    /// Prefers a global address over a link-local one.
    fn get_primary_ipv6(&self) -> Option<Ipv6Network>;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| match ip {
                IpNetwork::V4(ipv4) => Some(*ipv4),
                _ => None,
            })
            .collect()
    }

    fn get_ipv6_nets(&self) -> Vec<Ipv6Network> {
        self.ips
            .iter()
            .filter_map(|ip| match ip {
                IpNetwork::V6(ipv6) => Some(*ipv6),
                _ => None,
            })
            .collect()
    }

    fn get_primary_ipv6(&self) -> Option<Ipv6Network> {
        let nets = self.get_ipv6_nets();
        nets.iter()
            .find(|net| !net.ip().is_unicast_link_local())
            .or_else(|| nets.first())
            .copied()
    }
}

/// Snapshot of every interface the OS reports, loopback included.
pub fn list_interfaces() -> Vec<InterfaceInfo> {
    pnet::datalink::interfaces()
        .iter()
        .map(to_interface_info)
        .collect()
}

pub fn to_interface_info(interface: &NetworkInterface) -> InterfaceInfo {
    let ipv4 = interface.get_ipv4_nets().into_iter().next();
    let ipv6 = interface.get_primary_ipv6();

    InterfaceInfo {
        name: interface.name.clone(),
        mac: interface
            .mac
            .map(|mac| mac.to_string())
            .unwrap_or_else(|| ZERO_MAC.to_string()),
        ipv4: ipv4.map(|net| net.ip().to_string()),
        netmask: ipv4.map(|net| net.mask().to_string()),
        ipv6: ipv6.map(|net| net.ip().to_string()),
        internal: interface.is_loopback(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
