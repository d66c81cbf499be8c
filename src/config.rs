//! Normalizer configuration, persisted as TOML.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or writing the configuration file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(triple_norm::config::read),
        help("Ensure the config file exists and is readable, or create one with `triple-norm config init`.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}")]
    #[diagnostic(
        code(triple_norm::config::parse),
        help("Check the TOML syntax in the config file: {message}")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(triple_norm::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Knobs of the semantic typer plus the lexicon source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Names typed as `robot` (case-insensitive exact match).
    #[serde(default = "default_agent_names")]
    pub agent_names: Vec<String>,
    /// Names typed as `person` even when written in lowercase.
    #[serde(default)]
    pub known_persons: Vec<String>,
    /// Type any capitalized unknown word as `person`. Place names at the
    /// start of a slot are the usual false positive.
    #[serde(default = "default_capitalized_as_person")]
    pub capitalized_as_person: bool,
    /// External lexicon TOML replacing the bundled English one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

fn default_agent_names() -> Vec<String> {
    vec!["leolani".into()]
}
fn default_capitalized_as_person() -> bool {
    true
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            agent_names: default_agent_names(),
            known_persons: Vec::new(),
            capitalized_as_person: default_capitalized_as_person(),
            lexicon_path: None,
        }
    }
}

impl NormalizerConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save the config to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let write_err = |e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(write_err)
    }

    pub fn is_agent_name(&self, word: &str) -> bool {
        self.agent_names.iter().any(|n| n.eq_ignore_ascii_case(word))
    }

    pub fn is_known_person(&self, word: &str) -> bool {
        self.known_persons.iter().any(|n| n.eq_ignore_ascii_case(word))
    }
}
