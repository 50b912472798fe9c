use crate::terminal::colors;
use colored::*;
use netdiag_common::models::scan::PortStatus;

pub type Detail = (String, ColoredString);

pub fn ms(value: f64) -> String {
    format!("{value:.2} ms")
}

pub fn optional_ms(value: Option<f64>) -> ColoredString {
    match value {
        Some(v) => ms(v).normal(),
        None => "n/a".color(colors::SEPARATOR),
    }
}

pub fn port_status(status: PortStatus) -> ColoredString {
    let color = match status {
        PortStatus::Open => colors::OPEN,
        PortStatus::Closed => colors::CLOSED,
        PortStatus::Filtered => colors::FILTERED,
    };
    status.to_string().color(color).bold()
}

pub fn loss(percent: f64) -> ColoredString {
    let text = format!("{percent:.1}%");
    match percent {
        p if p <= 0.0 => text.green(),
        p if p < 100.0 => text.yellow(),
        _ => text.red(),
    }
}

/// Binary units, as memory is usually reported.
pub fn bytes(value: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = value as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{value} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

pub fn duration_secs(total: u64) -> String {
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let minutes = rest / 60;
    match days {
        0 => format!("{hours}h {minutes}m"),
        _ => format!("{days}d {hours}h {minutes}m"),
    }
}

pub fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
