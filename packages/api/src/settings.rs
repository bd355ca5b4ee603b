//! Process-wide library configuration, read once from `SHELFMARK_CONFIG`.

use std::path::PathBuf;
use std::sync::OnceLock;

use store::LibraryConfig;

static CONFIG: OnceLock<LibraryConfig> = OnceLock::new();

/// Get or load the configuration. A broken file falls back to the defaults.
pub fn library_config() -> &'static LibraryConfig {
    CONFIG.get_or_init(|| {
        dotenvy::dotenv().ok();

        let path = std::env::var("SHELFMARK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(LibraryConfig::filename()));

        LibraryConfig::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            LibraryConfig::default()
        })
    })
}
