//! macOS Music.app automation through the `osascript` CLI.
//!
//! Arguments travel through `argv`, never spliced into script text, so
//! playlist names and paths need no quoting.

use std::{process::Output, time::Duration};

use {
    async_trait::async_trait,
    shelve_config::LibraryConfig,
    tokio::process::Command,
    tracing::{debug, info, warn},
};

use crate::{
    Error, Result,
    bridge::{LibraryBridge, MediaRef},
    error::Context,
};

const LIST_PLAYLISTS: &str = r#"tell application "Music" to get name of every playlist"#;

const ADD_TRACK: &str = r#"on run argv
    set trackFile to POSIX file (item 1 of argv)
    tell application "Music" to add trackFile to playlist (item 2 of argv)
end run"#;

#[derive(Debug, Clone)]
pub struct OsascriptBridge {
    timeout: Duration,
}

impl OsascriptBridge {
    pub fn new(config: &LibraryConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn run(&self, script: &str, args: &[&str]) -> Result<Output> {
        debug!(args = ?args, "running osascript");
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(script).args(args).kill_on_drop(true);

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(output) => output.context("failed to run osascript"),
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "osascript timed out");
                Err(Error::bridge(format!(
                    "osascript timed out after {}s",
                    self.timeout.as_secs()
                )))
            },
        }
    }
}

impl Default for OsascriptBridge {
    fn default() -> Self {
        Self::new(&LibraryConfig::default())
    }
}

#[async_trait]
impl LibraryBridge for OsascriptBridge {
    fn is_available(&self) -> bool {
        cfg!(target_os = "macos")
    }

    fn accepts_remote(&self) -> bool {
        false
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let output = self.run(LIST_PLAYLISTS, &[]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::bridge(format!(
                "listing playlists failed: {}",
                stderr.trim()
            )));
        }
        let names = parse_playlist_list(&String::from_utf8_lossy(&output.stdout));
        debug!(count = names.len(), "listed playlists");
        Ok(names)
    }

    async fn place(&self, media: &MediaRef, collection: &str) -> Result<()> {
        let MediaRef::File(path) = media else {
            return Err(Error::placement(
                collection,
                format!("only local files can be added, got {media}"),
            ));
        };
        let path = path.to_string_lossy();

        let output = self.run(ADD_TRACK, &[&*path, collection]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::placement(collection, stderr.trim()));
        }
        info!(file = %path, playlist = collection, "added to playlist");
        Ok(())
    }
}

/// Split AppleScript's list rendering (`A, B, C`) into names.
fn parse_playlist_list(raw: &str) -> Vec<String> {
    let raw = raw.trim_end_matches(['\r', '\n']);
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(", ").map(str::to_string).collect()
}
