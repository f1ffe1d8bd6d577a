//! Passages and the content store they are read from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::ConfigError;

/// A unit of narrative content: a title plus its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub title: String,

    /// Tags in the order the author wrote them.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Source text, rendered by the host.
    #[serde(default)]
    pub text: String,
}

impl Passage {
    /// Create an untagged passage with no text.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
            text: String::new(),
        }
    }

    /// Add a tag to this passage.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags to this passage.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the passage text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Check if this passage carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Read access to the passages of a story, implemented by the host.
pub trait ContentStore {
    /// Every passage, ordered by title.
    fn passages(&self) -> Vec<&Passage>;

    /// Get a passage by title.
    fn passage(&self, title: &str) -> Option<&Passage>;

    /// Check whether a passage exists.
    fn has_passage(&self, title: &str) -> bool {
        self.passage(title).is_some()
    }

    /// Every passage carrying `tag`, ordered by title.
    fn passages_tagged(&self, tag: &str) -> Vec<&Passage> {
        self.passages()
            .into_iter()
            .filter(|p| p.has_tag(tag))
            .collect()
    }
}

#[derive(Deserialize)]
struct LibraryFile {
    #[serde(default)]
    passage: Vec<Passage>,
}

/// An in-memory content store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassageLibrary {
    passages: BTreeMap<String, Passage>,
}

impl PassageLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a passage, returning the one it replaced.
    pub fn add_passage(&mut self, passage: Passage) -> Option<Passage> {
        self.passages.insert(passage.title.clone(), passage)
    }

    /// Builder form of [`PassageLibrary::add_passage`].
    pub fn with_passage(mut self, passage: Passage) -> Self {
        self.add_passage(passage);
        self
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Parse `[[passage]]` tables from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: LibraryFile = toml::from_str(source)?;
        let mut library = Self::new();
        for passage in file.passage {
            let title = passage.title.clone();
            if library.add_passage(passage).is_some() {
                return Err(ConfigError::DuplicatePassage(title));
            }
        }
        tracing::debug!(passages = library.len(), "loaded passage library");
        Ok(library)
    }

    /// Load a library from a TOML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source).map_err(|err| err.at_path(path))
    }
}

impl ContentStore for PassageLibrary {
    fn passages(&self) -> Vec<&Passage> {
        self.passages.values().collect()
    }

    fn passage(&self, title: &str) -> Option<&Passage> {
        self.passages.get(title)
    }

    fn has_passage(&self, title: &str) -> bool {
        self.passages.contains_key(title)
    }
}
