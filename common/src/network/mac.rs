use std::sync::OnceLock;

use mac_oui::Oui;
use tracing::warn;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Retrieves or initializes the **Organizationally unique identifier** database.
///
/// A database that fails to load disables vendor lookups for the rest of the
/// process instead of failing ARP scans.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("OUI database unavailable, vendor lookup disabled: {e}");
                None
            }
        })
        .as_ref()
}

/// Identify the vendor of a normalized MAC address.
pub fn get_vendor(mac: &str) -> Option<String> {
    let db = get_oui_db()?;
    match db.lookup_by_mac(mac) {
        Ok(Some(entry)) => Some(entry.company_name.clone()),
        _ => None,
    }
}

/// Normalizes a MAC address to colon-separated lowercase hex.
///
/// Accepts `:` or `-` separators and single-digit octets as printed by BSD
/// `arp` (`0:1a:2b:3:4:5`). Returns `None` for anything else, including the
/// `(incomplete)` placeholder.
pub fn normalize_mac(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.trim().split([':', '-']).collect();
    if parts.len() != 6 {
        return None;
    }

    let mut octets = Vec::with_capacity(6);
    for part in parts {
        if part.is_empty() || part.len() > 2 {
            return None;
        }
        let octet = u8::from_str_radix(part, 16).ok()?;
        octets.push(format!("{octet:02x}"));
    }
    Some(octets.join(":"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
