use serde::{Deserialize, Serialize};

/// Placeholder address of a hop that never answered.
pub const TIMEOUT_MARKER: &str = "*";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    pub hop: u32,
    /// Responding address, or [`TIMEOUT_MARKER`].
    pub ip: String,
    pub hostname: Option<String>,
    pub rtts: Vec<f64>,
    pub timeout: bool,
}

impl Hop {
    /// Normalizes a parsed hop: no address and no samples is a timeout.
    pub fn new(hop: u32, ip: Option<String>, hostname: Option<String>, rtts: Vec<f64>) -> Self {
        let timeout = ip.is_none() && rtts.is_empty();
        Self {
            hop,
            ip: ip.unwrap_or_else(|| TIMEOUT_MARKER.to_string()),
            hostname,
            rtts,
            timeout,
        }
    }

    pub fn timed_out(hop: u32) -> Self {
        Self::new(hop, None, None, Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracerouteResult {
    pub destination: String,
    /// In the order the tool reported them.
    pub hops: Vec<Hop>,
    pub error: Option<String>,
}

impl TracerouteResult {
    pub fn failed(destination: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            hops: Vec::new(),
            error: Some(error.into()),
        }
    }
}
