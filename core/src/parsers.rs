//! # Output Parsers
//!
//! Best-effort extraction of structured records from the text that `ping`,
//! `traceroute`/`tracert` and `arp` print. The formats vary by OS, tool
//! version and locale, so every parser is line-oriented and skips lines it
//! does not understand instead of failing.
//!
//! Zero extracted records is an *inconclusive* run, not an error. Callers
//! decide how to report it.

pub mod arp;
pub mod ping;
pub mod traceroute;

pub use arp::{parse_arp, parse_proc_net_arp};
pub use ping::{PingSummary, parse_ping};
pub use traceroute::{parse_hop_line, parse_traceroute};
