//! # Application configuration: `shelfmark.toml`
//!
//! Optional TOML file read by the server at start-up (path from
//! `SHELFMARK_CONFIG`, default [`LibraryConfig::filename`]).
//!
//! ## Structure
//!
//! ```toml
//! [listing]
//! page_size = 12        # books per dashboard page
//! recently_added = 4    # books in the "recently added" shelf
//!
//! [loans]
//! loan_days = 14        # due date offset for new loans
//!
//! [scheduling]
//! professors_path = "/dashboard/professors"
//!
//! [notices]
//! max_visible = 5       # toasts kept on screen
//!
//! [database]
//! max_connections = 5
//! acquire_timeout_secs = 10
//! ```
//!
//! Every section and key has a default, so a missing or empty file is the
//! default configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration stored in `shelfmark.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub loans: LoanConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub notices: NoticeConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_recently_added")]
    pub recently_added: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanConfig {
    #[serde(default = "default_loan_days")]
    pub loan_days: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Where a member lands when a credit deduction fails.
    #[serde(default = "default_professors_path")]
    pub professors_path: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

/// Connection pool settings; the URL itself comes from `DATABASE_URL`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_page_size() -> u32 {
    12
}

fn default_recently_added() -> u32 {
    4
}

fn default_loan_days() -> u32 {
    14
}

fn default_professors_path() -> String {
    "/dashboard/professors".to_string()
}

fn default_max_visible() -> usize {
    5
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            recently_added: default_recently_added(),
        }
    }
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            loan_days: default_loan_days(),
        }
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            professors_path: default_professors_path(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

/// The part of the configuration the browser needs, served by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub professors_path: String,
    pub max_visible_notices: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        LibraryConfig::default().client_settings()
    }
}

impl LibraryConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            professors_path: self.scheduling.professors_path.clone(),
            max_visible_notices: self.notices.max_visible,
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "shelfmark.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read from `path`; a missing file yields the defaults.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::from_toml(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} not found, using default configuration", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Books to skip for a 1-based page.
    pub fn offset_for_page(&self, page: u32) -> i64 {
        i64::from(page.max(1) - 1) * i64::from(self.listing.page_size)
    }

    /// Number of pages for `total` books; never below 1.
    pub fn total_pages(&self, total: i64) -> u32 {
        let size = i64::from(self.listing.page_size.max(1));
        let pages = (total + size - 1) / size;
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = LibraryConfig::from_toml("").unwrap();
        assert_eq!(config, LibraryConfig::default());
        assert_eq!(config.listing.page_size, 12);
        assert_eq!(config.scheduling.professors_path, "/dashboard/professors");
    }

    #[test]
    fn test_partial_sections() {
        let config = LibraryConfig::from_toml("[listing]\npage_size = 20\n").unwrap();
        assert_eq!(config.listing.page_size, 20);
        assert_eq!(config.listing.recently_added, 4);
        assert_eq!(config.loans.loan_days, 14);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_roundtrip() {
        let mut config = LibraryConfig::default();
        config.notices.max_visible = 2;
        let text = config.to_toml().unwrap();
        assert_eq!(LibraryConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("shelfmark-does-not-exist.toml");
        assert_eq!(LibraryConfig::load(&path).unwrap(), LibraryConfig::default());
    }

    #[test]
    fn test_client_settings_follow_file() {
        let config = LibraryConfig::from_toml(
            "[scheduling]\nprofessors_path = \"/staff\"\n[notices]\nmax_visible = 2\n",
        )
        .unwrap();
        let settings = config.client_settings();
        assert_eq!(settings.professors_path, "/staff");
        assert_eq!(settings.max_visible_notices, 2);
        assert_ne!(settings, ClientSettings::default());
    }

    #[test]
    fn test_paging_math() {
        let config = LibraryConfig::default();
        assert_eq!(config.offset_for_page(1), 0);
        assert_eq!(config.offset_for_page(0), 0);
        assert_eq!(config.offset_for_page(3), 24);
        assert_eq!(config.total_pages(0), 1);
        assert_eq!(config.total_pages(12), 1);
        assert_eq!(config.total_pages(13), 2);
    }
}
