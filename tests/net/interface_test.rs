use netdiag_common::models::system::ZERO_MAC;
use netdiag_common::network::interface::to_interface_info;
use netdiag_integration_tests::{ni, v4, v6};
use pnet::datalink::{MacAddr, NetworkInterface};

const IFF_UP: u32 = 1;
const IFF_LOOPBACK: u32 = 1 << 3;

/*************************************************************
                   Tests for interface listing
**************************************************************/

#[test]
fn loopback_is_internal() {
    let info = to_interface_info(&lo());
    assert!(info.internal);
    assert_eq!(info.ipv4.as_deref(), Some("127.0.0.1"));
    assert_eq!(info.netmask.as_deref(), Some("255.0.0.0"));
    assert_eq!(info.ipv6.as_deref(), Some("::1"));
}

#[test]
fn wlan0_prefers_global_ipv6() {
    let info = to_interface_info(&wlan0());
    assert!(!info.internal);
    assert_eq!(info.mac, "aa:bb:cc:dd:ee:ff");
    assert_eq!(info.ipv6.as_deref(), Some("2001:db8::42"));
}

#[test]
fn tun0_without_mac_reports_zero_mac() {
    let info = to_interface_info(&tun0());
    assert_eq!(info.mac, ZERO_MAC);
    assert_eq!(info.ipv4.as_deref(), Some("10.8.0.2"));
    assert_eq!(info.ipv6, None);
}

#[test]
fn host_interfaces_are_listed() {
    let interfaces = netdiag_common::network::interface::list_interfaces();
    assert!(interfaces.iter().all(|i| !i.name.is_empty()));
}

/*************************************************************
                  Mock interfaces for testing
**************************************************************/

fn lo() -> NetworkInterface {
    ni(
        "lo",
        1,
        Some(MacAddr::new(0, 0, 0, 0, 0, 0)),
        &[v4(127, 0, 0, 1, 8), v6("::1", 128)],
        IFF_UP | IFF_LOOPBACK,
    )
}

fn wlan0() -> NetworkInterface {
    ni(
        "wlan0",
        3,
        Some(MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff)),
        &[
            v4(192, 168, 1, 20, 24),
            v6("fe80::1", 64),
            v6("2001:db8::42", 64),
        ],
        IFF_UP,
    )
}

fn tun0() -> NetworkInterface {
    ni("tun0", 7, None, &[v4(10, 8, 0, 2, 24)], IFF_UP)
}
