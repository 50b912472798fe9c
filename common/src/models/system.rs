use serde::{Deserialize, Serialize};

/// Placeholder for interfaces that have no hardware address.
pub const ZERO_MAC: &str = "00:00:00:00:00:00";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    pub name: String,
    pub mac: String,
    pub ipv4: Option<String>,
    pub netmask: Option<String>,
    pub ipv6: Option<String>,
    /// Loopback interfaces.
    pub internal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArpEntry {
    pub ip: String,
    /// Colon-separated lowercase hex.
    pub mac: String,
    pub interface: Option<String>,
    pub vendor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArpScanResult {
    pub entries: Vec<ArpEntry>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub arch: String,
    pub cpu_count: usize,
    /// Bytes.
    pub total_memory: u64,
    /// Seconds since boot.
    pub uptime: u64,
    pub os_version: Option<String>,
    /// Root on Unix, an elevated token on Windows.
    pub privileged: bool,
}
