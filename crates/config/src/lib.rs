//! Configuration loading, env substitution, and the key/value settings store.
//!
//! Config files: `shelve.toml`, `shelve.yaml`, or `shelve.json`
//! Searched in `./` then `~/.config/shelve/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod store;

pub use {
    error::{Error, Result},
    loader::{
        apply_env_overrides, clear_config_dir, config_dir, discover_and_load,
        find_or_default_config_path, load_config, load_config_for_edit, load_config_raw,
        save_config, save_config_to, set_config_dir,
    },
    schema::{
        CatalogConfig, DEFAULT_CLIENT_ID, DEFAULT_MASTER_LIBRARY, DownloadConfig, LibraryConfig,
        ShelveConfig,
    },
};
