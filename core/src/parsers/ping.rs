use std::sync::OnceLock;

use netdiag_common::platform::Platform;
use regex::Regex;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PingSummary {
    /// RTT samples in milliseconds, in output order.
    pub times: Vec<f64>,
    /// Loss percentage from the statistics footer, if one was printed.
    pub packet_loss: Option<f64>,
}

impl PingSummary {
    /// Loss from the footer, or derived from how many replies came back.
    pub fn loss_or_derived(&self, sent: u32) -> f64 {
        if let Some(loss) = self.packet_loss {
            return loss;
        }
        if sent == 0 {
            return 100.0;
        }
        let received = (self.times.len() as f64).min(sent as f64);
        (1.0 - received / sent as f64) * 100.0
    }
}

/// `time=12.3 ms` (iputils, BSD) and `time<1 ms`.
fn unix_rtt() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\btime[=<]\s*(\d+(?:\.\d+)?)\s*ms\b").expect("static ping pattern")
    })
}

/// `time=14ms` and `time<1ms`.
fn windows_rtt() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\btime[=<](\d+(?:\.\d+)?)ms").expect("static ping pattern"))
}

/// `0% packet loss` on Unix, `(25% loss)` on Windows.
fn loss_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)%\s*(?:packet\s+)?loss").expect("static loss pattern")
    })
}

/// Extracts RTT samples and the loss percentage from ping output.
///
/// A `time<1ms` reply is recorded at its upper bound. Lines without a sample
/// (timeouts, unreachable notices, headers) are skipped.
pub fn parse_ping(raw: &str, platform: Platform) -> PingSummary {
    let rtt = match platform {
        Platform::Windows => windows_rtt(),
        Platform::Linux | Platform::MacOs => unix_rtt(),
    };

    let times = raw
        .lines()
        .filter_map(|line| rtt.captures(line))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .collect();

    let packet_loss = raw
        .lines()
        .find_map(|line| loss_regex().captures(line))
        .and_then(|caps| caps.get(1)?.as_str().parse::<f64>().ok());

    PingSummary { times, packet_loss }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
