//! Per-operation option records as they arrive from the UI, and the clamped
//! settings they resolve to.
//!
//! Numeric options outside their range are clamped silently. The two
//! exceptions are the ping `count` above its maximum and oversized port lists
//! (see [`validate_ports`](crate::validate::validate_ports)), which are hard
//! errors.

use std::net::Ipv4Addr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::dns::RecordType;
use crate::validate::validate_dns_server;

pub const PING_DEFAULT_COUNT: u32 = 4;
pub const PING_MAX_COUNT: u32 = 10;
pub const PING_DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const PING_TIMEOUT_RANGE_MS: (u64, u64) = (100, 30_000);

pub const TRACE_DEFAULT_MAX_HOPS: u32 = 30;
pub const TRACE_HOPS_RANGE: (u32, u32) = (1, 64);
pub const TRACE_DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const TRACE_TIMEOUT_RANGE_MS: (u64, u64) = (100, 10_000);

pub const SCAN_DEFAULT_TIMEOUT_MS: u64 = 3_000;
pub const SCAN_TIMEOUT_RANGE_MS: (u64, u64) = (500, 10_000);
pub const SCAN_DEFAULT_CONCURRENCY: usize = 50;
pub const SCAN_CONCURRENCY_RANGE: (usize, usize) = (1, 200);

fn clamp_ms(value: Option<i64>, default: u64, (min, max): (u64, u64)) -> u64 {
    match value {
        None => default,
        Some(v) if v < 0 => min,
        Some(v) => (v as u64).clamp(min, max),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PingOptions {
    pub timeout_ms: Option<i64>,
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingSettings {
    pub count: u32,
    /// Per-echo wait.
    pub timeout: Duration,
}

impl PingOptions {
    pub fn resolve(&self) -> Result<PingSettings, ValidationError> {
        let count = match self.count {
            None => PING_DEFAULT_COUNT,
            Some(c) if c > PING_MAX_COUNT as i64 => {
                return Err(ValidationError::CountOutOfRange {
                    min: 1,
                    max: PING_MAX_COUNT,
                    got: c,
                });
            }
            Some(c) => c.max(1) as u32,
        };
        let timeout_ms = clamp_ms(self.timeout_ms, PING_DEFAULT_TIMEOUT_MS, PING_TIMEOUT_RANGE_MS);

        Ok(PingSettings {
            count,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TracerouteOptions {
    pub max_hops: Option<i64>,
    pub timeout_ms: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracerouteSettings {
    pub max_hops: u32,
    /// Per-probe wait.
    pub timeout: Duration,
}

impl TracerouteOptions {
    pub fn resolve(&self) -> TracerouteSettings {
        let (min, max) = TRACE_HOPS_RANGE;
        let max_hops = match self.max_hops {
            None => TRACE_DEFAULT_MAX_HOPS,
            Some(h) => h.clamp(min as i64, max as i64) as u32,
        };
        let timeout_ms = clamp_ms(
            self.timeout_ms,
            TRACE_DEFAULT_TIMEOUT_MS,
            TRACE_TIMEOUT_RANGE_MS,
        );

        TracerouteSettings {
            max_hops,
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanOptions {
    pub timeout_ms: Option<i64>,
    pub concurrency: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Connect timeout for a single port.
    pub timeout: Duration,
    /// Batch size.
    pub concurrency: usize,
}

impl ScanOptions {
    pub fn resolve(&self) -> ScanSettings {
        let (min, max) = SCAN_CONCURRENCY_RANGE;
        let concurrency = match self.concurrency {
            None => SCAN_DEFAULT_CONCURRENCY,
            Some(c) => c.clamp(min as i64, max as i64) as usize,
        };
        let timeout_ms = clamp_ms(self.timeout_ms, SCAN_DEFAULT_TIMEOUT_MS, SCAN_TIMEOUT_RANGE_MS);

        ScanSettings {
            timeout: Duration::from_millis(timeout_ms),
            concurrency,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DnsOptions {
    pub server: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsSettings {
    /// `None` means the system resolver configuration.
    pub server: Option<Ipv4Addr>,
    pub record_type: RecordType,
}

impl DnsOptions {
    pub fn resolve(&self) -> Result<DnsSettings, ValidationError> {
        let record_type = match self.record_type.as_deref() {
            None | Some("") => RecordType::A,
            Some(raw) => raw.parse()?,
        };
        let server = match self.server.as_deref() {
            None => None,
            Some(raw) => validate_dns_server(raw)?,
        };

        Ok(DnsSettings {
            server,
            record_type,
        })
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
