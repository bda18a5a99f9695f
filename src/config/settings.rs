//! Settings loading from config.toml and the environment.
//!
//! `config.toml` is optional; every field has a default. Environment variables
//! (usually populated from `.env`) override whatever the file says.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "SENTENCE_BUDDY_CONFIG";
/// Config file used when `CONFIG_PATH_VAR` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// Default location of the sentence file.
pub const DEFAULT_STORAGE_PATH: &str = "data/sentences.json";

/// Where slash commands get registered.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandScope {
    /// In every guild the bot is in, and in each guild it joins later
    #[default]
    Guild,
    /// Once, globally
    Global,
}

impl FromStr for CommandScope {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "guild" => Ok(Self::Guild),
            "global" => Ok(Self::Global),
            other => Err(Error::Config {
                message: format!("Unknown command scope '{other}', expected 'guild' or 'global'"),
            }),
        }
    }
}

/// Runtime settings for the bot.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// JSON file holding every guild's sentences
    pub storage_path: PathBuf,
    /// How slash commands are registered with Discord
    pub command_scope: CommandScope,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            command_scope: CommandScope::default(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text. Absent keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })
    }

    /// Reads settings from `path`; a missing file gives the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
        match std::fs::read_to_string(path_ref) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No config file at {:?}, using defaults", path_ref);
                Ok(Self::default())
            }
            Err(e) => Err(Error::Config {
                message: format!("Failed to read config file {path_ref:?}: {e}"),
            }),
        }
    }

    /// Applies `SENTENCES_PATH` and `COMMAND_SCOPE` overrides from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SENTENCES_PATH").filter(|p| !p.trim().is_empty()) {
            self.storage_path = PathBuf::from(path.trim());
        }
        if let Some(scope) = lookup("COMMAND_SCOPE").filter(|s| !s.trim().is_empty()) {
            self.command_scope = scope.parse()?;
        }
        Ok(self)
    }
}

/// Loads settings from the config file and the process environment.
pub fn load_settings() -> Result<Settings> {
    let config_path =
        std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let settings = Settings::from_file(&config_path)
        .inspect_err(|e| tracing::error!("Critical error loading configuration: {}", e))?
        .with_overrides(|key| std::env::var(key).ok())?;

    tracing::info!(
        "Using sentence file {:?} with {:?} command registration",
        settings.storage_path,
        settings.command_scope
    );
    Ok(settings)
}

/// Reads the bot token from `DISCORD_BOT_TOKEN`, falling back to `BOT_TOKEN`.
pub fn get_bot_token() -> Result<String> {
    std::env::var("DISCORD_BOT_TOKEN")
        .or_else(|_| std::env::var("BOT_TOKEN"))
        .map_err(Error::EnvVar)
}
