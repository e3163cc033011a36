//! # Configuration
//!
//! Two required settings (where the notes live, which editor to run) and one
//! optional one, resolved once at startup with a simple override hierarchy:
//! config file → env vars.
//!
//! Config lives at `~/.leaf/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Nothing below `main` reads the environment; the resolved values are
//! handed to the application model explicitly.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::editor::EditorCommand;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LeafConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub notes_dir: Option<String>,
    pub editor: Option<String>,
    pub new_note_name: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NEW_NOTE_NAME: &str = "my_new_note.md";

pub const NOTES_DIR_ENV: &str = "LEAF_NOTES_DIR";
pub const EDITOR_ENVS: [&str; 2] = ["EDITOR", "VISUAL"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub notes_dir: PathBuf,
    pub editor: EditorCommand,
    pub new_note_name: String,
}

impl ResolvedConfig {
    /// Where the new-note action points the editor.
    pub fn new_note_path(&self) -> PathBuf {
        self.notes_dir.join(&self.new_note_name)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no {setting} configured ({hint})")]
    Missing {
        setting: &'static str,
        hint: &'static str,
    },
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.leaf/`.
pub fn leaf_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".leaf"))
}

/// Returns the path to `~/.leaf/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    leaf_dir().map(|d| d.join("config.toml"))
}

/// Returns the path to `~/.leaf/leaf.log`.
pub fn log_path() -> Option<PathBuf> {
    leaf_dir().map(|d| d.join("leaf.log"))
}

/// Load config from `~/.leaf/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LeafConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LeafConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LeafConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LeafConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LeafConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: LeafConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Leaf Configuration
# Override hierarchy: this file → env vars.

# [general]
# notes_dir = "~/notes"              # Or set LEAF_NOTES_DIR env var
# editor = "nvim"                    # Or set EDITOR / VISUAL env var
# new_note_name = "my_new_note.md"   # File opened by the new-note key
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config from the file and the process environment.
pub fn resolve(config: &LeafConfig) -> Result<ResolvedConfig, ConfigError> {
    resolve_with(config, |key| std::env::var(key).ok())
}

/// Resolve with an explicit environment lookup. Empty values count as unset.
pub fn resolve_with(
    config: &LeafConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    // Notes dir: env → config
    let notes_dir = lookup(NOTES_DIR_ENV)
        .or_else(|| config.general.notes_dir.clone())
        .map(|dir| expand_home(&dir))
        .ok_or(ConfigError::Missing {
            setting: "notes directory",
            hint: "set LEAF_NOTES_DIR or general.notes_dir",
        })?;

    // Editor: $EDITOR → $VISUAL → config
    let editor = EDITOR_ENVS
        .iter()
        .find_map(|key| lookup(*key))
        .or_else(|| config.general.editor.clone())
        .and_then(|cmd| EditorCommand::parse(&cmd))
        .ok_or(ConfigError::Missing {
            setting: "editor",
            hint: "set EDITOR or general.editor",
        })?;

    let new_note_name = config
        .general
        .new_note_name
        .clone()
        .unwrap_or_else(|| DEFAULT_NEW_NOTE_NAME.to_string());

    Ok(ResolvedConfig {
        notes_dir,
        editor,
        new_note_name,
    })
}

/// Expand a leading `~/` to the home directory.
fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(dir)
}
