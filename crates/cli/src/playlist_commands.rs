use {anyhow::Result, clap::Subcommand};

use {
    shelve_config::{find_or_default_config_path, load_config_for_edit, save_config_to},
    shelve_library::{DefaultChange, DestinationSelector, StdinPrompt, default_bridge},
};

#[derive(Subcommand)]
pub enum PlaylistAction {
    /// List the playlists currently in the library.
    List,
    /// Show where tracks go when no playlist is given.
    Show,
    /// Interactively choose the default playlist.
    Default,
}

pub async fn handle_playlist(action: PlaylistAction) -> Result<()> {
    match action {
        PlaylistAction::List => {
            let config = shelve_config::discover_and_load()?;
            let bridge = default_bridge(&config.library);
            if !bridge.is_available() {
                eprintln!("Library automation is not available on this platform.");
                return Ok(());
            }
            let selector = DestinationSelector::new(bridge);
            for name in selector.collections().await? {
                println!("{name}");
            }
        },
        PlaylistAction::Show => {
            let config = shelve_config::discover_and_load()?;
            let selector = DestinationSelector::new(default_bridge(&config.library));
            match selector.select_default(&config.library) {
                Some(name) => println!("{name}"),
                None => eprintln!("Tracks won't be added to a library on this platform."),
            }
        },
        PlaylistAction::Default => {
            // The file's own values: no env overrides, placeholders kept.
            let path = find_or_default_config_path();
            let mut config = load_config_for_edit(&path)?;

            let selector = DestinationSelector::new(default_bridge(&config.library));
            let change = selector
                .set_default(&mut StdinPrompt, &mut config.library)
                .await?;
            save_config_to(&config, &path)?;

            if let DefaultChange::Set(name) = change {
                eprintln!("Saved {} to {}", name.name(), path.display());
            }
        },
    }
    Ok(())
}
