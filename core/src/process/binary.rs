use std::path::{Path, PathBuf};

use tracing::debug;

/// Picks the binary to run for `name`.
///
/// Known install locations win, then a `PATH` search, then the bare name so
/// that spawning reports a proper not-found error.
pub fn resolve_binary(name: &str, candidates: &[&str]) -> PathBuf {
    if let Some(found) = candidates.iter().map(Path::new).find(|p| p.is_file()) {
        debug!("Resolved {name} to fallback location {}", found.display());
        return found.to_path_buf();
    }

    match which::which(name) {
        Ok(path) => {
            debug!("Resolved {name} through PATH to {}", path.display());
            path
        }
        Err(_) => {
            debug!("Could not locate {name}, using the bare name");
            PathBuf::from(name)
        }
    }
}
