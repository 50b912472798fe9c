use netdiag_common::models::system::ArpEntry;
use netdiag_common::network::mac::get_vendor;

/// Maps a MAC address to the company that owns its OUI.
pub trait VendorRepository: Send + Sync {
    fn get_vendor(&self, mac: &str) -> Option<String>;

    fn annotate(&self, entries: &mut [ArpEntry]) {
        for entry in entries.iter_mut() {
            entry.vendor = self.get_vendor(&entry.mac);
        }
    }
}

/// Backed by the embedded `mac_oui` database.
pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, mac: &str) -> Option<String> {
        get_vendor(mac)
    }
}

/// Used when vendor lookups are switched off.
pub struct NoVendors;

impl VendorRepository for NoVendors {
    fn get_vendor(&self, _mac: &str) -> Option<String> {
        None
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
