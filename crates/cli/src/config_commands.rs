use {anyhow::Result, clap::Subcommand};

use shelve_config::{
    find_or_default_config_path, load_config_for_edit, save_config_to, store::KEYS,
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, or every value when no key is given.
    Get { key: Option<String> },
    /// Set a value. An empty value unsets optional keys.
    Set { key: String, value: String },
    /// Print the config file path in use.
    Path,
}

pub fn handle_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key: Some(key) } => {
            let config = shelve_config::discover_and_load()?;
            match config.get(&key)? {
                Some(value) => println!("{value}"),
                None => eprintln!("{key} is not set"),
            }
        },
        ConfigAction::Get { key: None } => {
            let config = shelve_config::discover_and_load()?;
            for key in KEYS {
                let value = config.get(key)?.unwrap_or_default();
                println!("{key} = {value}");
            }
            println!(
                "# download folder in use: {}",
                config.download.download_dir().display()
            );
        },
        ConfigAction::Set { key, value } => {
            let path = find_or_default_config_path();
            let mut config = load_config_for_edit(&path)?;
            config.set(&key, &value)?;
            save_config_to(&config, &path)?;
            eprintln!("Saved {key} to {}", path.display());
        },
        ConfigAction::Path => println!("{}", find_or_default_config_path().display()),
    }
    Ok(())
}
