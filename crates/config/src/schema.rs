//! Config schema types (catalog, library, download).
use std::path::PathBuf;

use {
    serde::{Deserialize, Serialize},
    tracing::warn,
};

/// Client credential appended to v1 catalog requests.
pub const DEFAULT_CLIENT_ID: &str = "11a37feb6ccc034d5975f3f803928a32";

/// Collection that receives tracks when no playlist is configured.
pub const DEFAULT_MASTER_LIBRARY: &str = "Music";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelveConfig {
    pub catalog: CatalogConfig,
    pub library: LibraryConfig,
    pub download: DownloadConfig,
}

/// Remote catalog endpoints and credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL for version 1 lookups (credentialed).
    pub api_v1_base: String,
    /// Base URL for version 2 lookups.
    pub api_v2_base: String,
    /// Client credential appended to version 1 lookups as `client_id`.
    pub client_id: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_v1_base: "https://api.soundcloud.com".into(),
            api_v2_base: "https://api-v2.soundcloud.com".into(),
            client_id: DEFAULT_CLIENT_ID.into(),
            timeout_secs: 30,
        }
    }
}

/// Local library placement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Preferred destination playlist. Unset means "use the master library".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<String>,
    /// Name of the library-wide collection used as the fallback destination.
    pub master_library: String,
    /// Timeout for a single automation bridge command, in seconds.
    pub timeout_secs: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            playlist: None,
            master_library: DEFAULT_MASTER_LIBRARY.into(),
            timeout_secs: 10,
        }
    }
}

/// Download settings. Downloading itself is out of scope; the values are kept
/// so existing config files round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dl_folder: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

impl DownloadConfig {
    /// Download folder, falling back to the home directory when unset.
    pub fn download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dl_folder {
            return dir.clone();
        }
        warn!("no download folder configured, using the home directory");
        directories::BaseDirs::new()
            .map(|d| d.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
