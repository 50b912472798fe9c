//! # Input Validation
//!
//! The command-injection firewall. Every host, port list and DNS server that
//! reaches a process argument vector or a socket has passed through here
//! first.
//!
//! Host rules run in order and short-circuit:
//! 1. empty is rejected as required
//! 2. more than [`MAX_HOST_LEN`] characters is rejected as too long
//! 3. any character of [`UNSAFE_CHARS`] is rejected as unsafe
//! 4. the value must classify as an IPv4 literal, an IPv6 literal or an
//!    RFC-1123 hostname, tried in that order

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

pub const MAX_HOST_LEN: usize = 253;
pub const MAX_PORTS: usize = 10_000;

/// Shell metacharacters and control whitespace.
pub const UNSAFE_CHARS: &[char] = &[
    ';', '&', '|', '`', '$', '(', ')', '{', '}', '[', ']', '<', '>', '\\', '\'', '"', '!', '\n',
    '\r', '\t',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Ipv4,
    Ipv6,
    Hostname,
}

/// A host that is safe to hand to a process or a resolver.
///
/// Never contains a character from [`UNSAFE_CHARS`], never starts with `-`
/// and is at most [`MAX_HOST_LEN`] characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedHost {
    value: String,
    kind: HostKind,
}

impl SanitizedHost {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> HostKind {
        self.kind
    }

    /// The literal address, if the host was given as one.
    pub fn ip(&self) -> Option<IpAddr> {
        match self.kind {
            HostKind::Hostname => None,
            _ => self.value.parse().ok(),
        }
    }
}

impl fmt::Display for SanitizedHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for SanitizedHost {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Strict dotted quad. Leading zeros are refused, tools would read them as octal.
fn ipv4_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^((25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)$")
            .expect("static IPv4 pattern")
    })
}

fn hostname_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$")
            .expect("static hostname pattern")
    })
}

/// Validates a host for ping, traceroute, port scans and DNS lookups.
pub fn validate_host(raw: &str) -> Result<SanitizedHost, ValidationError> {
    validate_named("host", raw)
}

fn validate_named(field: &'static str, raw: &str) -> Result<SanitizedHost, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    if raw.chars().count() > MAX_HOST_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_HOST_LEN,
        });
    }
    // Checked on the raw input so a trailing newline is never trimmed away.
    if raw.contains(UNSAFE_CHARS) {
        return Err(ValidationError::UnsafeCharacters(field));
    }
    let value = raw.trim();

    if ipv4_regex().is_match(value) {
        return Ok(SanitizedHost {
            value: value.to_string(),
            kind: HostKind::Ipv4,
        });
    }
    if value.contains(':') && value.parse::<Ipv6Addr>().is_ok() {
        return Ok(SanitizedHost {
            value: value.to_string(),
            kind: HostKind::Ipv6,
        });
    }

    let lowered = value.to_ascii_lowercase();
    if is_hostname(&lowered) {
        return Ok(SanitizedHost {
            value: lowered,
            kind: HostKind::Hostname,
        });
    }

    Err(ValidationError::InvalidHost(value.to_string()))
}

/// RFC-1123 labels, with a non-numeric top label so that things like
/// `300.1.1.1` are not mistaken for names.
fn is_hostname(candidate: &str) -> bool {
    if !hostname_regex().is_match(candidate) {
        return false;
    }
    candidate
        .rsplit('.')
        .next()
        .is_some_and(|tld| !tld.chars().all(|c| c.is_ascii_digit()))
}

/// Keeps the ports in `1..=65535`, preserving order.
///
/// Fails on an empty list, on more than [`MAX_PORTS`] entries and when no
/// entry survives the filter.
pub fn validate_ports(raw: &[i64]) -> Result<Vec<u16>, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::NoPorts);
    }
    if raw.len() > MAX_PORTS {
        return Err(ValidationError::TooManyPorts {
            count: raw.len(),
            max: MAX_PORTS,
        });
    }

    let ports: Vec<u16> = raw
        .iter()
        .filter(|&&p| (1..=65_535).contains(&p))
        .map(|&p| p as u16)
        .collect();

    if ports.is_empty() {
        return Err(ValidationError::NoValidPorts);
    }
    Ok(ports)
}

/// An empty server selects the system resolver. Anything else must be an
/// IPv4 literal, hostnames are refused to avoid an unvalidated extra lookup.
pub fn validate_dns_server(raw: &str) -> Result<Option<Ipv4Addr>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let host = validate_named("DNS server", raw)?;
    match host.ip() {
        Some(IpAddr::V4(v4)) if host.kind() == HostKind::Ipv4 => Ok(Some(v4)),
        _ => Err(ValidationError::DnsServerNotIpv4),
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
