//! Configuration management
//!
//! Settings are resolved once at startup with precedence
//! flag > environment > settings file > built-in default, and the rest of
//! the program only ever sees the resolved [`Config`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::persona;
use crate::Result;

/// Environment variable prefix for all recognized options.
const ENV_PREFIX: &str = "CHALK_";

/// Runtime configuration, immutable for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key
    #[serde(default)]
    pub api_key: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Top-p nucleus sampling value
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Top-k sampling value
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Number of past turns (user + assistant pairs) retained in the window
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Optional path to an alternate persona description
    #[serde(default)]
    pub persona_file: Option<PathBuf>,

    /// Resolved persona text; filled by [`Config::finalize`], never read
    /// from the settings file directly.
    #[serde(skip)]
    pub persona_text: String,
}

fn default_model() -> String {
    "gemini-flash-latest".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

fn default_history_limit() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            history_limit: default_history_limit(),
            persona_file: None,
            persona_text: String::new(),
        }
    }
}

/// Command-line overrides, highest precedence in the resolution chain.
#[derive(Debug, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub history_limit: Option<usize>,
    pub api_key: Option<String>,
    pub persona_file: Option<PathBuf>,
}

impl Config {
    /// Apply command-line overrides on top of file and environment values.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        if let Some(top_p) = overrides.top_p {
            self.top_p = top_p;
        }
        if let Some(top_k) = overrides.top_k {
            self.top_k = top_k;
        }
        if let Some(history_limit) = overrides.history_limit {
            self.history_limit = history_limit;
        }
        if let Some(api_key) = overrides.api_key {
            self.api_key = api_key;
        }
        if let Some(persona_file) = overrides.persona_file {
            self.persona_file = Some(persona_file);
        }
    }

    /// Validate the final configuration and resolve the persona text.
    ///
    /// Must be called after all overrides are applied and before the
    /// session loop starts; every failure here is fatal.
    pub fn finalize(&mut self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "Missing Gemini API key. Set {ENV_PREFIX}GEMINI_API_KEY, GEMINI_API_KEY, or pass --api-key."
            )));
        }
        if self.history_limit == 0 {
            return Err(Error::Config(
                "history_limit must be positive".to_string(),
            ));
        }

        self.persona_text = match &self.persona_file {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Unreadable persona file {:?}: {e}", path))
            })?,
            None => persona::DEFAULT.to_string(),
        };
        if self.persona_text.trim().is_empty() {
            return Err(Error::Config("Persona text is empty".to_string()));
        }

        Ok(())
    }
}

/// Get the config directory path
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".chalk")
}

/// Get the settings file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Load configuration from the settings file and environment.
///
/// A missing settings file is not an error; every field has a default.
pub fn load() -> Result<Config> {
    let mut config = load_file(&config_path())?;
    apply_env(&mut config)?;
    Ok(config)
}

fn load_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid settings file {:?}: {e}", path)))
}

fn apply_env(config: &mut Config) -> Result<()> {
    if let Some(key) = env_var("GEMINI_API_KEY") {
        config.api_key = key;
    }
    // The prefixed key wins over the bare one.
    if let Some(key) = env_var(&format!("{ENV_PREFIX}GEMINI_API_KEY")) {
        config.api_key = key;
    }
    if let Some(model) = env_var(&format!("{ENV_PREFIX}MODEL")) {
        config.model = model;
    }
    if let Some(raw) = env_var(&format!("{ENV_PREFIX}TEMPERATURE")) {
        config.temperature = parse_env("TEMPERATURE", &raw)?;
    }
    if let Some(raw) = env_var(&format!("{ENV_PREFIX}TOP_P")) {
        config.top_p = parse_env("TOP_P", &raw)?;
    }
    if let Some(raw) = env_var(&format!("{ENV_PREFIX}TOP_K")) {
        config.top_k = parse_env("TOP_K", &raw)?;
    }
    if let Some(raw) = env_var(&format!("{ENV_PREFIX}HISTORY_LIMIT")) {
        config.history_limit = parse_env("HISTORY_LIMIT", &raw)?;
    }
    if let Some(path) = env_var(&format!("{ENV_PREFIX}PERSONA_FILE")) {
        config.persona_file = Some(PathBuf::from(path));
    }
    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        Error::Config(format!(
            "Environment variable {ENV_PREFIX}{name} has invalid value {raw:?}"
        ))
    })
}
