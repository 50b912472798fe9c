use std::net::IpAddr;

use netdiag_common::models::traceroute::Hop;
use netdiag_common::platform::Platform;

const UNIX_BANNERS: &[&str] = &["traceroute to", "traceroute6 to"];
const WINDOWS_BANNERS: &[&str] = &["tracing route", "over a maximum", "trace complete"];

/// Parses every hop line of a traceroute/tracert run, in output order.
pub fn parse_traceroute(raw: &str, platform: Platform) -> Vec<Hop> {
    raw.lines()
        .filter_map(|line| parse_hop_line(line, platform))
        .collect()
}

/// Parses one line of output.
///
/// Returns `None` for banners, blank lines and anything that does not start
/// with a hop index. The remaining tokens are classified one at a time, so
/// the Unix layout (address first, then samples) and the Windows layout
/// (samples first, then address) go through the same path.
pub fn parse_hop_line(line: &str, platform: Platform) -> Option<Hop> {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_banner(trimmed, platform) {
        return None;
    }

    let mut tokens = trimmed.split_whitespace().peekable();
    let hop: u32 = tokens.next()?.parse().ok()?;

    let mut ip: Option<String> = None;
    let mut hostname: Option<String> = None;
    let mut rtts: Vec<f64> = Vec::new();

    while let Some(token) = tokens.next() {
        if token == "*" || token.starts_with('!') {
            continue;
        }

        if let Some(value) = token.strip_suffix("ms").and_then(rtt_value) {
            rtts.push(value);
            continue;
        }
        if let Some(value) = rtt_value(token) {
            if tokens.peek().is_some_and(|next| next.eq_ignore_ascii_case("ms")) {
                tokens.next();
                rtts.push(value);
            }
            continue;
        }

        let bare = token
            .trim_start_matches(['(', '['])
            .trim_end_matches([')', ']']);
        if let Ok(addr) = bare.parse::<IpAddr>() {
            if ip.is_none() {
                ip = Some(addr.to_string());
            }
            continue;
        }

        if ip.is_none() && hostname.is_none() && looks_like_hostname(token) {
            hostname = Some(token.to_ascii_lowercase());
        }
    }

    if ip.is_none() && hostname.is_none() && rtts.is_empty() {
        return Some(Hop::timed_out(hop));
    }
    Some(Hop::new(hop, ip, hostname, rtts))
}

fn is_banner(line: &str, platform: Platform) -> bool {
    let lowered = line.to_ascii_lowercase();
    let banners = match platform {
        Platform::Windows => WINDOWS_BANNERS,
        Platform::Linux | Platform::MacOs => UNIX_BANNERS,
    };
    banners.iter().any(|b| lowered.starts_with(b))
}

/// `4.567`, `12` or `<1`.
fn rtt_value(token: &str) -> Option<f64> {
    let digits = token.strip_prefix('<').unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    digits.parse().ok()
}

/// Words of tool messages such as `Request timed out.` never qualify.
fn looks_like_hostname(token: &str) -> bool {
    token.contains('.')
        && !token.ends_with('.')
        && !token.starts_with(['.', '-'])
        && token.chars().any(|c| c.is_ascii_alphabetic())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
