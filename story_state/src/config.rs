//! Story configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::StateError;
use crate::value::Value;
use crate::variables::{VariableName, VariableStore};

const DEFAULT_CARD_TAG: &str = "card";
const DEFAULT_STICKY_TAG: &str = "sticky-card";
const DEFAULT_REQUIREMENT_PREFIX: &str = "req-";

/// Failures while loading configuration or content.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to parse {}: {source}", path.display())]
    ParseAt {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("passage {0:?} is defined more than once")]
    DuplicatePassage(String),

    #[error("initial variable {name:?}: {source}")]
    InvalidVariable {
        name: String,
        #[source]
        source: StateError,
    },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

impl ConfigError {
    /// Attach the file path to a parse failure.
    pub fn at_path(self, path: &Path) -> Self {
        match self {
            ConfigError::Parse(source) => ConfigError::ParseAt {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

/// Root story configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Seed for the story random source; entropy when absent.
    pub seed: Option<u64>,
    pub deck: DeckConfig,
    pub filter: FilterConfig,
    pub range: RangeConfig,
    /// Initial bindings keyed by sigil-qualified name (`"$gold"`, `"_mood"`).
    pub variables: BTreeMap<String, Value>,
}

/// Tags that seed the initial deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Passages with this tag start in the deck as single-use cards.
    pub card_tag: String,
    /// Passages with this tag start in the deck as sticky cards.
    pub sticky_tag: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            card_tag: DEFAULT_CARD_TAG.to_string(),
            sticky_tag: DEFAULT_STICKY_TAG.to_string(),
        }
    }
}

/// Candidate filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Tags starting with this prefix are requirements.
    pub requirement_prefix: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            requirement_prefix: DEFAULT_REQUIREMENT_PREFIX.to_string(),
        }
    }
}

/// Range classifier settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub flag_scope: FlagScope,
}

/// Where derived range flags are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagScope {
    /// Always the temporary scope (`_adult_age`).
    #[default]
    Temporary,
    /// The scope of the classified variable (`$age` gives `$adult_age`).
    Same,
}

impl StoryConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: StoryConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source).map_err(|err| err.at_path(path))?;
        tracing::info!(path = %path.display(), seed = ?config.seed, "loaded story config");
        Ok(config)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck.card_tag.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "deck.card_tag",
            });
        }
        if self.deck.sticky_tag.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "deck.sticky_tag",
            });
        }
        if self.filter.requirement_prefix.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "filter.requirement_prefix",
            });
        }
        for name in self.variables.keys() {
            VariableName::parse(name).map_err(|source| ConfigError::InvalidVariable {
                name: name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Build a variable store holding the initial bindings.
    pub fn initial_store(&self) -> Result<VariableStore, ConfigError> {
        let mut store = VariableStore::new();
        for (name, value) in &self.variables {
            store
                .set_named(name, value.clone())
                .map_err(|source| ConfigError::InvalidVariable {
                    name: name.clone(),
                    source,
                })?;
        }
        Ok(store)
    }
}
