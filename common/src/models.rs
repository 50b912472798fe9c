//! # Result Models
//!
//! The records every operation hands back across the process boundary.
//!
//! * [`ping::PingResult`]: RTT samples and aggregates of one ping run.
//! * [`traceroute::TracerouteResult`]: ordered [`traceroute::Hop`]s.
//! * [`scan::PortScanResult`]: one [`scan::PortState`] per probed port.
//! * [`dns::DnsLookupResult`]: typed [`dns::DnsRecord`]s.
//! * [`system`]: interfaces, the ARP table and host facts.
//!
//! Failures are carried in an `error` field, never raised. A result with an
//! error may still hold partial data. All field names serialize in camelCase.

pub mod dns;
pub mod ping;
pub mod scan;
pub mod system;
pub mod traceroute;
