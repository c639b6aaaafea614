use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

use tracing::debug;

use crate::{
    Result,
    env_subst::substitute_env,
    error::{Context, Error},
    schema::ShelveConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["shelve.toml", "shelve.yaml", "shelve.yml", "shelve.json"];

static CONFIG_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Override the user-global config directory for the rest of the process.
pub fn set_config_dir(dir: PathBuf) {
    if let Ok(mut guard) = CONFIG_DIR_OVERRIDE.write() {
        *guard = Some(dir);
    }
}

pub fn clear_config_dir() {
    if let Ok(mut guard) = CONFIG_DIR_OVERRIDE.write() {
        *guard = None;
    }
}

/// Returns the user-global config directory.
///
/// Resolution order:
/// 1. programmatic override (`set_config_dir`)
/// 2. `SHELVE_CONFIG_DIR`
/// 3. `~/.config/shelve`
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = CONFIG_DIR_OVERRIDE.read().ok().and_then(|g| g.clone()) {
        return Some(dir);
    }
    if let Some(dir) = std::env::var_os("SHELVE_CONFIG_DIR").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    directories::ProjectDirs::from("", "", "shelve").map(|d| d.config_dir().to_path_buf())
}

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<ShelveConfig> {
    let raw = read_config(path)?;
    parse_config(&substitute_env(&raw), path)
}

/// Load config from `path` exactly as written, leaving `${VAR}` placeholders
/// in place.
///
/// Use this when the result is going to be saved back.
pub fn load_config_raw(path: &Path) -> Result<ShelveConfig> {
    let raw = read_config(path)?;
    parse_config(&raw, path)
}

/// The file's own values for editing, or defaults when it does not exist yet.
pub fn load_config_for_edit(path: &Path) -> Result<ShelveConfig> {
    if path.exists() {
        load_config_raw(path)
    } else {
        Ok(ShelveConfig::default())
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Discover and load config from standard locations, then apply env
/// overrides.
///
/// Search order:
/// 1. `./shelve.{toml,yaml,yml,json}` (project-local)
/// 2. `<config_dir>/shelve.{toml,yaml,yml,json}` (user-global)
///
/// Uses `ShelveConfig::default()` when no file exists. A file that exists but
/// cannot be read or parsed is an error.
pub fn discover_and_load() -> Result<ShelveConfig> {
    let mut config = match find_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)?
        },
        None => {
            debug!("no config file found, using defaults");
            ShelveConfig::default()
        },
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Apply `SHELVE_*` environment overrides on top of file values.
///
/// Takes the lookup as a parameter so callers (and tests) control the source.
pub fn apply_env_overrides(config: &mut ShelveConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(playlist) = lookup("SHELVE_PLAYLIST") {
        debug!(playlist = %playlist, "playlist overridden from environment");
        config.library.playlist = Some(playlist).filter(|p| !p.is_empty());
    }
    if let Some(permalink) = lookup("SHELVE_PERMALINK") {
        config.download.permalink = Some(permalink).filter(|p| !p.is_empty());
    }
    if let Some(folder) = lookup("SHELVE_DL_FOLDER") {
        config.download.dl_folder = Some(folder)
            .filter(|f| !f.is_empty())
            .map(PathBuf::from);
    }
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the path of an existing config file, or the default TOML path.
pub fn find_or_default_config_path() -> PathBuf {
    if let Some(path) = find_config_file() {
        return path;
    }
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelve.toml")
}

/// Write `config` to the discovered (or default) config path.
pub fn save_config(config: &ShelveConfig) -> Result<PathBuf> {
    let path = find_or_default_config_path();
    save_config_to(config, &path)?;
    Ok(path)
}

/// Serialize `config` in the format implied by `path` and write it there.
///
/// Creates parent directories if needed.
pub fn save_config_to(config: &ShelveConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let raw = match extension(path) {
        "toml" => toml::to_string_pretty(config)?,
        "yaml" | "yml" => serde_yaml::to_string(config).context("serialize config")?,
        "json" => serde_json::to_string_pretty(config).context("serialize config")?,
        ext => return Err(Error::message(format!("unsupported config format: .{ext}"))),
    };
    std::fs::write(path, raw)?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

fn parse_config(raw: &str, path: &Path) -> Result<ShelveConfig> {
    let ctx = || format!("failed to parse {}", path.display());
    match extension(path) {
        "toml" => toml::from_str(raw).with_context(ctx),
        "yaml" | "yml" => serde_yaml::from_str(raw).with_context(ctx),
        "json" => serde_json::from_str(raw).with_context(ctx),
        ext => Err(Error::message(format!("unsupported config format: .{ext}"))),
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("toml")
}
