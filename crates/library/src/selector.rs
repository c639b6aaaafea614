//! Choosing and validating the playlist a resolved track goes into.
//!
//! Two paths, deliberately asymmetric:
//! - [`DestinationSelector::select_default`] trusts the configured playlist
//!   without asking the library. A stale name surfaces later as a placement
//!   failure.
//! - [`DestinationSelector::get`] and [`DestinationSelector::set_default`]
//!   check the name against a freshly listed set of playlists every time.

use std::{fmt, path::Path, sync::Arc};

use {
    serde::Serialize,
    shelve_catalog::Descriptor,
    shelve_config::LibraryConfig,
    tracing::{debug, info},
};

use crate::{
    Error, Result,
    bridge::{LibraryBridge, MediaRef},
    prompt::Prompt,
};

const SET_DEFAULT_QUESTION: &str = "Enter name of default playlist to which you want add tracks \
                                    (press Enter to use the whole music library):";

/// A playlist name as given: exact, case-sensitive, never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A [`CollectionName`] that was present in the library when last listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCollection(CollectionName);

impl ValidatedCollection {
    pub fn name(&self) -> &CollectionName {
        &self.0
    }

    pub fn into_name(self) -> CollectionName {
        self.0
    }
}

impl AsRef<CollectionName> for ValidatedCollection {
    fn as_ref(&self) -> &CollectionName {
        &self.0
    }
}

/// Outcome of [`DestinationSelector::set_default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultChange {
    Set(ValidatedCollection),
    Unset,
}

pub struct DestinationSelector {
    bridge: Arc<dyn LibraryBridge>,
}

impl DestinationSelector {
    pub fn new(bridge: Arc<dyn LibraryBridge>) -> Self {
        Self { bridge }
    }

    /// Destination for unattended placement, without consulting the library.
    ///
    /// Configured playlist, else the master library when the library can be
    /// driven at all, else nothing.
    pub fn select_default(&self, config: &LibraryConfig) -> Option<CollectionName> {
        if let Some(name) = &config.playlist {
            return Some(CollectionName::new(name.clone()));
        }
        if self.bridge.is_available() {
            debug!(master = %config.master_library, "no playlist configured, using master library");
            return Some(CollectionName::new(config.master_library.clone()));
        }
        None
    }

    /// Whether placing here needs a local file rather than the item's
    /// catalog reference.
    pub fn needs_local_file(&self) -> bool {
        self.bridge.is_available() && !self.bridge.accepts_remote()
    }

    /// The library's playlists right now.
    pub async fn collections(&self) -> Result<Vec<String>> {
        self.bridge.list_collections().await
    }

    /// Validate `name` against the live playlist list.
    pub async fn get(&self, name: &str) -> Result<ValidatedCollection> {
        let live = self.collections().await?;
        if live.iter().any(|c| c == name) {
            Ok(ValidatedCollection(CollectionName::new(name)))
        } else {
            Err(Error::invalid_name(name))
        }
    }

    /// Interactively choose the default playlist, storing it in `config`.
    ///
    /// Empty input unsets it. Unknown names are reported and asked again;
    /// any other failure ends the loop.
    pub async fn set_default(
        &self,
        prompt: &mut dyn Prompt,
        config: &mut LibraryConfig,
    ) -> Result<DefaultChange> {
        loop {
            let answer = prompt.ask(SET_DEFAULT_QUESTION)?;

            if answer.is_empty() {
                config.playlist = None;
                prompt.success("Default playlist unset");
                return Ok(DefaultChange::Unset);
            }

            match self.get(&answer).await {
                Ok(validated) => {
                    config.playlist = Some(validated.name().as_str().to_string());
                    prompt.success(&format!("Default playlist set up to {}", validated.name()));
                    return Ok(DefaultChange::Set(validated));
                },
                Err(Error::InvalidName { .. }) => {
                    prompt.error("Invalid playlist name. Please enter correct name");
                },
                Err(e) => return Err(e),
            }
        }
    }

    /// Put a resolved item into `destination`.
    ///
    /// `file` is the local copy when there is one; otherwise the descriptor's
    /// own media reference is handed over. Repeating a placement may create a
    /// duplicate entry.
    pub async fn place(
        &self,
        descriptor: &Descriptor,
        file: Option<&Path>,
        destination: &CollectionName,
    ) -> Result<()> {
        let media = match file {
            Some(path) => MediaRef::file(path),
            None if !self.bridge.accepts_remote() => {
                return Err(Error::placement(
                    destination.as_str(),
                    "the library only takes local files",
                ));
            },
            None => MediaRef::Remote(
                descriptor
                    .media_reference()
                    .ok_or_else(|| {
                        Error::placement(
                            destination.as_str(),
                            "resolved item has no media reference",
                        )
                    })?
                    .to_string(),
            ),
        };

        info!(
            id = ?descriptor.id(),
            media = %media,
            playlist = %destination,
            "placing into playlist"
        );
        self.bridge.place(&media, destination.as_str()).await
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        async_trait::async_trait,
        serde_json::json,
        std::{
            collections::VecDeque,
            io,
            sync::{
                Mutex,
                atomic::{AtomicUsize, Ordering},
            },
        },
    };

    struct FakeBridge {
        available: bool,
        collections: Result<Vec<String>>,
        list_calls: AtomicUsize,
        placed: Mutex<Vec<(MediaRef, String)>>,
        reject: Option<String>,
        remote: bool,
    }

    impl FakeBridge {
        fn with(collections: &[&str]) -> Self {
            Self {
                available: true,
                collections: Ok(collections.iter().map(|c| c.to_string()).collect()),
                list_calls: AtomicUsize::new(0),
                placed: Mutex::new(Vec::new()),
                reject: None,
                remote: true,
            }
        }

        fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::with(&[])
            }
        }

        fn lists(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LibraryBridge for FakeBridge {
        fn is_available(&self) -> bool {
            self.available
        }

        fn accepts_remote(&self) -> bool {
            self.remote
        }

        async fn list_collections(&self) -> Result<Vec<String>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            match &self.collections {
                Ok(c) => Ok(c.clone()),
                Err(e) => Err(Error::bridge(e.to_string())),
            }
        }

        async fn place(&self, media: &MediaRef, collection: &str) -> Result<()> {
            if let Some(reason) = &self.reject {
                return Err(Error::placement(collection, reason.clone()));
            }
            self.placed
                .lock()
                .unwrap()
                .push((media.clone(), collection.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct ScriptedPrompt {
        answers: VecDeque<String>,
        errors: Vec<String>,
        successes: Vec<String>,
    }

    impl ScriptedPrompt {
        fn answering(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, _question: &str) -> io::Result<String> {
            self.answers
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "out of answers"))
        }

        fn error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }
    }

    fn selector(bridge: &Arc<FakeBridge>) -> DestinationSelector {
        DestinationSelector::new(bridge.clone())
    }

    // ── get ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn get_is_exact_and_case_sensitive() {
        let bridge = Arc::new(FakeBridge::with(&["Favorites", "Road Trip"]));
        let sel = selector(&bridge);

        let err = sel.get("road trip").await.unwrap_err();
        assert!(matches!(err, Error::InvalidName { ref name } if name == "road trip"));

        let ok = sel.get("Road Trip").await.unwrap();
        assert_eq!(ok.name().as_str(), "Road Trip");
    }

    #[tokio::test]
    async fn get_rejects_prefixes_and_padding() {
        let bridge = Arc::new(FakeBridge::with(&["Road Trip"]));
        let sel = selector(&bridge);
        assert!(sel.get("Road").await.is_err());
        assert!(sel.get("Road Trip ").await.is_err());
        assert!(sel.get("").await.is_err());
    }

    #[tokio::test]
    async fn get_lists_fresh_every_call() {
        let bridge = Arc::new(FakeBridge::with(&["Favorites"]));
        let sel = selector(&bridge);
        sel.get("Favorites").await.unwrap();
        sel.get("Favorites").await.unwrap();
        assert_eq!(bridge.lists(), 2);
    }

    #[tokio::test]
    async fn get_propagates_listing_failure() {
        let bridge = Arc::new(FakeBridge {
            collections: Err(Error::bridge("Music is not running")),
            ..FakeBridge::with(&[])
        });
        let err = selector(&bridge).get("Favorites").await.unwrap_err();
        assert!(matches!(err, Error::Bridge { .. }));
    }

    // ── select_default ──────────────────────────────────────────────────

    #[test]
    fn select_default_trusts_configured_name() {
        let bridge = Arc::new(FakeBridge::with(&["Favorites"]));
        let config = LibraryConfig {
            playlist: Some("Gone Since Tuesday".into()),
            ..LibraryConfig::default()
        };
        let chosen = selector(&bridge).select_default(&config);
        assert_eq!(chosen, Some(CollectionName::new("Gone Since Tuesday")));
        assert_eq!(bridge.lists(), 0);
    }

    #[test]
    fn select_default_falls_back_to_master_library() {
        let bridge = Arc::new(FakeBridge::with(&[]));
        let chosen = selector(&bridge).select_default(&LibraryConfig::default());
        assert_eq!(chosen, Some(CollectionName::new("Music")));

        let config = LibraryConfig {
            master_library: "Library".into(),
            ..LibraryConfig::default()
        };
        assert_eq!(
            selector(&bridge).select_default(&config),
            Some(CollectionName::new("Library"))
        );
        assert_eq!(bridge.lists(), 0);
    }

    #[test]
    fn select_default_without_bridge_is_none() {
        let bridge = Arc::new(FakeBridge::unavailable());
        assert_eq!(
            selector(&bridge).select_default(&LibraryConfig::default()),
            None
        );
    }

    #[test]
    fn configured_name_wins_even_without_bridge() {
        let bridge = Arc::new(FakeBridge::unavailable());
        let config = LibraryConfig {
            playlist: Some("Favorites".into()),
            ..LibraryConfig::default()
        };
        assert_eq!(
            selector(&bridge).select_default(&config),
            Some(CollectionName::new("Favorites"))
        );
    }

    // ── set_default ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn set_default_loops_until_valid() {
        let bridge = Arc::new(FakeBridge::with(&["Favorites", "Road Trip"]));
        let mut prompt = ScriptedPrompt::answering(&["road trip", "Roadtrip", "Road Trip"]);
        let mut config = LibraryConfig::default();

        let change = selector(&bridge)
            .set_default(&mut prompt, &mut config)
            .await
            .unwrap();

        assert!(matches!(change, DefaultChange::Set(ref v) if v.name().as_str() == "Road Trip"));
        assert_eq!(config.playlist.as_deref(), Some("Road Trip"));
        assert_eq!(prompt.errors.len(), 2);
        assert_eq!(prompt.successes.len(), 1);
        assert_eq!(bridge.lists(), 3);
    }

    #[tokio::test]
    async fn set_default_empty_input_unsets() {
        let bridge = Arc::new(FakeBridge::with(&["Favorites"]));
        let mut prompt = ScriptedPrompt::answering(&[""]);
        let mut config = LibraryConfig {
            playlist: Some("Favorites".into()),
            ..LibraryConfig::default()
        };

        let change = selector(&bridge)
            .set_default(&mut prompt, &mut config)
            .await
            .unwrap();

        assert_eq!(change, DefaultChange::Unset);
        assert!(config.playlist.is_none());
        assert_eq!(bridge.lists(), 0);
    }

    #[tokio::test]
    async fn set_default_stops_on_bridge_failure() {
        let bridge = Arc::new(FakeBridge {
            collections: Err(Error::bridge("osascript timed out after 10s")),
            ..FakeBridge::with(&[])
        });
        let mut prompt = ScriptedPrompt::answering(&["Favorites", "Favorites"]);
        let mut config = LibraryConfig::default();

        let err = selector(&bridge)
            .set_default(&mut prompt, &mut config)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Bridge { .. }));
        assert!(config.playlist.is_none());
        assert_eq!(prompt.answers.len(), 1);
    }

    #[tokio::test]
    async fn set_default_closed_input_is_an_error() {
        let bridge = Arc::new(FakeBridge::with(&["Favorites"]));
        let mut prompt = ScriptedPrompt::answering(&["nope"]);
        let mut config = LibraryConfig::default();

        let err = selector(&bridge)
            .set_default(&mut prompt, &mut config)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    // ── place ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn place_prefers_local_file() {
        let bridge = Arc::new(FakeBridge::with(&["Favorites"]));
        let descriptor = Descriptor::new(json!({"id": 1, "uri": "https://api.example/tracks/1"}));

        selector(&bridge)
            .place(
                &descriptor,
                Some(Path::new("/tmp/x.mp3")),
                &CollectionName::new("Favorites"),
            )
            .await
            .unwrap();

        let placed = bridge.placed.lock().unwrap();
        assert_eq!(
            placed.as_slice(),
            [(MediaRef::file("/tmp/x.mp3"), "Favorites".to_string())]
        );
    }

    #[tokio::test]
    async fn place_uses_descriptor_reference_without_file() {
        let bridge = Arc::new(FakeBridge::with(&[]));
        let descriptor = Descriptor::new(json!({"uri": "https://api.example/tracks/1"}));

        selector(&bridge)
            .place(&descriptor, None, &CollectionName::new("Music"))
            .await
            .unwrap();

        let placed = bridge.placed.lock().unwrap();
        assert_eq!(
            placed[0].0,
            MediaRef::Remote("https://api.example/tracks/1".into())
        );
    }

    #[tokio::test]
    async fn place_without_any_reference_never_reaches_bridge() {
        let bridge = Arc::new(FakeBridge::with(&[]));
        let descriptor = Descriptor::new(json!({"id": 5}));

        let err = selector(&bridge)
            .place(&descriptor, None, &CollectionName::new("Music"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Placement { .. }));
        assert!(bridge.placed.lock().unwrap().is_empty());
    }

    #[test]
    fn local_only_library_needs_a_file() {
        let local_only = Arc::new(FakeBridge {
            remote: false,
            ..FakeBridge::with(&[])
        });
        assert!(selector(&local_only).needs_local_file());

        let any_media = Arc::new(FakeBridge::with(&[]));
        assert!(!selector(&any_media).needs_local_file());

        let unavailable = Arc::new(FakeBridge {
            remote: false,
            ..FakeBridge::unavailable()
        });
        assert!(!selector(&unavailable).needs_local_file());
    }

    #[tokio::test]
    async fn local_only_library_rejects_reference_without_calling_bridge() {
        let bridge = Arc::new(FakeBridge {
            remote: false,
            ..FakeBridge::with(&["Favorites"])
        });
        let descriptor = Descriptor::new(json!({"uri": "https://api.example/tracks/1"}));

        let err = selector(&bridge)
            .place(&descriptor, None, &CollectionName::new("Favorites"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Placement { .. }));
        assert!(bridge.placed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_placement_is_not_deduplicated() {
        let bridge = Arc::new(FakeBridge::with(&[]));
        let sel = selector(&bridge);
        let descriptor = Descriptor::new(json!({"uri": "https://api.example/tracks/1"}));
        let dest = CollectionName::new("Music");

        sel.place(&descriptor, None, &dest).await.unwrap();
        sel.place(&descriptor, None, &dest).await.unwrap();

        assert_eq!(bridge.placed.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bridge_rejection_is_a_placement_failure() {
        let bridge = Arc::new(FakeBridge {
            reject: Some("Can't get playlist \"Gone\"".into()),
            ..FakeBridge::with(&[])
        });
        let descriptor = Descriptor::new(json!({"uri": "https://api.example/tracks/1"}));

        let err = selector(&bridge)
            .place(&descriptor, None, &CollectionName::new("Gone"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Placement { ref collection, .. } if collection == "Gone"));
    }
}
