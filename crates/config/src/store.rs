//! Key/value access to [`ShelveConfig`] for the `config get`/`config set`
//! commands.
//!
//! Keys are dotted paths (`library.playlist`). The short names used by older
//! config files (`playlist`, `permalink`, `dl_folder`) are accepted as aliases.

use std::path::PathBuf;

use crate::{Error, Result, schema::ShelveConfig};

/// Every key accepted by [`ShelveConfig::get`] and [`ShelveConfig::set`].
pub const KEYS: &[&str] = &[
    "catalog.api_v1_base",
    "catalog.api_v2_base",
    "catalog.client_id",
    "catalog.timeout_secs",
    "library.playlist",
    "library.master_library",
    "library.timeout_secs",
    "download.dl_folder",
    "download.permalink",
];

fn canonical(key: &str) -> Result<&'static str> {
    let key = match key {
        "playlist" | "itunes_playlist" => "library.playlist",
        "permalink" => "download.permalink",
        "dl_folder" => "download.dl_folder",
        other => other,
    };
    KEYS.iter()
        .find(|k| **k == key)
        .copied()
        .ok_or_else(|| Error::unknown_key(key))
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(Error::invalid_value(key, "must be greater than zero")),
        Ok(n) => Ok(n),
        Err(e) => Err(Error::invalid_value(key, e)),
    }
}

fn optional(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|v| !v.is_empty())
}

impl ShelveConfig {
    /// Read a value by key. `Ok(None)` means the key is valid but unset.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match canonical(key)? {
            "catalog.api_v1_base" => Some(self.catalog.api_v1_base.clone()),
            "catalog.api_v2_base" => Some(self.catalog.api_v2_base.clone()),
            "catalog.client_id" => Some(self.catalog.client_id.clone()),
            "catalog.timeout_secs" => Some(self.catalog.timeout_secs.to_string()),
            "library.playlist" => self.library.playlist.clone(),
            "library.master_library" => Some(self.library.master_library.clone()),
            "library.timeout_secs" => Some(self.library.timeout_secs.to_string()),
            "download.dl_folder" => self
                .download
                .dl_folder
                .as_ref()
                .map(|p| p.display().to_string()),
            "download.permalink" => self.download.permalink.clone(),
            other => return Err(Error::unknown_key(other)),
        };
        Ok(value)
    }

    /// Write a value by key. An empty value unsets optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let key = canonical(key)?;
        match key {
            "catalog.api_v1_base" => self.catalog.api_v1_base = required(key, value)?,
            "catalog.api_v2_base" => self.catalog.api_v2_base = required(key, value)?,
            "catalog.client_id" => self.catalog.client_id = required(key, value)?,
            "catalog.timeout_secs" => self.catalog.timeout_secs = parse_secs(key, value)?,
            "library.playlist" => self.library.playlist = optional(value),
            "library.master_library" => self.library.master_library = required(key, value)?,
            "library.timeout_secs" => self.library.timeout_secs = parse_secs(key, value)?,
            "download.dl_folder" => self.download.dl_folder = optional(value).map(PathBuf::from),
            "download.permalink" => self.download.permalink = optional(value),
            other => return Err(Error::unknown_key(other)),
        }
        Ok(())
    }
}

fn required(key: &str, value: &str) -> Result<String> {
    optional(value).ok_or_else(|| Error::invalid_value(key, "cannot be empty"))
}
