//! # Error Taxonomy
//!
//! Every failure the engine can hit falls in one of these families. None of
//! them ever leaves the diagnostics facade as an `Err`: the facade renders
//! them into the `error` field of the operation's result.
//!
//! Socket-level failures during a port scan are not represented here at all,
//! they become a [`PortStatus`](crate::models::scan::PortStatus) instead.

use std::io;

use thiserror::Error;

/// Malformed or unsafe input, rejected before any process or socket is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} contains unsafe characters")]
    UnsafeCharacters(&'static str),
    #[error("'{0}' is not a valid IPv4 address, IPv6 address or hostname")]
    InvalidHost(String),
    #[error("ports must be an array")]
    PortsNotAnArray,
    #[error("at least one port is required")]
    NoPorts,
    #[error("too many ports: {count} (max {max})")]
    TooManyPorts { count: usize, max: usize },
    #[error("no valid ports in range 1-65535")]
    NoValidPorts,
    #[error("DNS server must be an IPv4 address")]
    DnsServerNotIpv4,
    #[error("unsupported record type '{0}'")]
    UnsupportedRecordType(String),
    #[error("count must be between {min} and {max}, got {got}")]
    CountOutOfRange { min: u32, max: u32, got: i64 },
    #[error("options must be an object")]
    OptionsNotAnObject,
    #[error("invalid option '{field}': {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

/// Failures while running an external diagnostic binary.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("'{command}' was not found, is it installed?")]
    NotFound { command: String },
    #[error("permission denied while running '{command}'")]
    PermissionDenied { command: String },
    #[error("'{command}' produced no output within {after_ms} ms")]
    Timeout { command: String, after_ms: u64 },
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("'{command}' exited with {code} and produced no output{}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        code: String,
        stderr: String,
    },
}

impl ProcessError {
    /// Maps a spawn error to the most specific variant.
    pub fn from_spawn(command: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                command: command.to_string(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                command: command.to_string(),
            },
            _ => Self::Spawn {
                command: command.to_string(),
                source: err,
            },
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// DNS lookups that could not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no {record_type} records found for {name}")]
    NoRecords { name: String, record_type: String },
    #[error("DNS lookup failed: {0}")]
    Lookup(String),
    #[error("PTR lookups need an IP address or a reverse-zone name, got '{0}'")]
    InvalidPtrTarget(String),
}

/// Umbrella error used internally by the facade before it is flattened.
#[derive(Debug, Error)]
pub enum DiagError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
