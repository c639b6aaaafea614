use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use {async_trait::async_trait, shelve_config::LibraryConfig};

use crate::{Error, Result};

/// What gets handed to the library on placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    /// A local audio file.
    File(PathBuf),
    /// A catalog reference (API uri or permalink) for an item not on disk.
    Remote(String),
}

impl MediaRef {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Remote(r) => f.write_str(r),
        }
    }
}

#[async_trait]
pub trait LibraryBridge: Send + Sync {
    /// Whether this platform has a library to drive at all.
    fn is_available(&self) -> bool;

    /// Whether `place` takes catalog references, not only local files.
    fn accepts_remote(&self) -> bool {
        true
    }

    /// Collection names currently in the library, in library order.
    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Insert `media` into `collection`. Not idempotent: placing the same
    /// item twice may leave two entries.
    async fn place(&self, media: &MediaRef, collection: &str) -> Result<()>;
}

/// Stand-in for platforms without library automation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBridge;

#[async_trait]
impl LibraryBridge for NoopBridge {
    fn is_available(&self) -> bool {
        false
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn place(&self, _media: &MediaRef, collection: &str) -> Result<()> {
        Err(Error::placement(
            collection,
            "library automation is not available on this platform",
        ))
    }
}

/// The bridge for the current platform.
pub fn default_bridge(config: &LibraryConfig) -> Arc<dyn LibraryBridge> {
    #[cfg(target_os = "macos")]
    {
        Arc::new(crate::osascript::OsascriptBridge::new(config))
    }
    #[cfg(not(target_os = "macos"))]
    {
        let _ = config;
        Arc::new(NoopBridge)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_bridge_is_empty_and_rejects_placement() {
        let bridge = NoopBridge;
        assert!(!bridge.is_available());
        assert!(bridge.list_collections().await.unwrap().is_empty());

        let err = bridge
            .place(&MediaRef::file("/tmp/x.mp3"), "Music")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Placement { .. }));
    }

    #[test]
    fn default_bridge_matches_platform() {
        let bridge = default_bridge(&LibraryConfig::default());
        assert_eq!(bridge.is_available(), cfg!(target_os = "macos"));
    }

    #[test]
    fn media_ref_display() {
        assert_eq!(MediaRef::file("/a/b.mp3").to_string(), "/a/b.mp3");
        assert_eq!(
            MediaRef::Remote("https://api.example/tracks/1".into()).to_string(),
            "https://api.example/tracks/1"
        );
    }
}
