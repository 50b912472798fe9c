use std::time::Duration;

/// Engine-wide settings that are not part of a single request.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time between the cooperative terminate signal and the forceful kill
    /// of a diagnostic process that overran its deadline.
    pub kill_grace: Duration,
    /// Per-query timeout handed to the DNS resolver.
    pub dns_timeout: Duration,
    /// How long pipe readers may keep draining after the child is gone.
    pub reader_drain: Duration,
    /// Annotates ARP entries with the vendor registered for the MAC prefix.
    pub vendor_lookup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kill_grace: Duration::from_millis(500),
            dns_timeout: Duration::from_secs(5),
            reader_drain: Duration::from_millis(250),
            vendor_lookup: true,
        }
    }
}
