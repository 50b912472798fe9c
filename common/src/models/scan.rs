use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    Open,
    Closed,
    /// No definitive answer. The default for anything ambiguous.
    Filtered,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortStatus::Open => "open",
            PortStatus::Closed => "closed",
            PortStatus::Filtered => "filtered",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortState {
    pub port: u16,
    pub state: PortStatus,
    /// Well-known service name for the port number, purely informational.
    pub service: Option<String>,
    /// Connect time in milliseconds, only for open ports.
    pub response_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortScanResult {
    pub host: String,
    /// Grouped by batch, not sorted within a batch.
    pub ports: Vec<PortState>,
    pub error: Option<String>,
}

impl PortScanResult {
    pub fn failed(host: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ports: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn open_ports(&self) -> impl Iterator<Item = &PortState> {
        self.ports.iter().filter(|p| p.state == PortStatus::Open)
    }
}
