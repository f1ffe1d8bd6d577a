//! Deck/Hand Manager - the cards a story may still offer.
//!
//! The deck maps passage titles to their stickiness. Single-use cards leave
//! the deck when visited; sticky cards stay until removed with `always`.

mod hand;

pub use hand::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use story_state::{ContentStore, DeckConfig};

use crate::error::{QbnError, Result};

/// Whether a card survives being visited.
///
/// Serialized as `0` (single-use) or `1` (sticky).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stickiness {
    SingleUse,
    Sticky,
}

impl Stickiness {
    pub fn from_sticky(sticky: bool) -> Self {
        if sticky {
            Stickiness::Sticky
        } else {
            Stickiness::SingleUse
        }
    }

    pub fn is_sticky(&self) -> bool {
        *self == Stickiness::Sticky
    }
}

impl From<Stickiness> for u8 {
    fn from(s: Stickiness) -> Self {
        match s {
            Stickiness::SingleUse => 0,
            Stickiness::Sticky => 1,
        }
    }
}

impl TryFrom<u8> for Stickiness {
    type Error = String;

    fn try_from(flag: u8) -> std::result::Result<Self, Self::Error> {
        match flag {
            0 => Ok(Stickiness::SingleUse),
            1 => Ok(Stickiness::Sticky),
            other => Err(format!("stickiness flag must be 0 or 1 (got {other})")),
        }
    }
}

/// The current pool of drawable cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: BTreeMap<String, Stickiness>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the starting deck from the card-tagged passages of a story.
    ///
    /// A passage carrying both tags is sticky.
    pub fn from_content(content: &dyn ContentStore, config: &DeckConfig) -> Self {
        let mut deck = Self::new();
        for passage in content.passages_tagged(&config.card_tag) {
            deck.insert(passage.title.clone(), Stickiness::SingleUse);
        }
        for passage in content.passages_tagged(&config.sticky_tag) {
            deck.insert(passage.title.clone(), Stickiness::Sticky);
        }
        tracing::debug!(cards = deck.len(), "built deck from content");
        deck
    }

    /// Insert or overwrite a card without checking that the passage exists.
    pub fn insert(&mut self, title: impl Into<String>, stickiness: Stickiness) {
        self.cards.insert(title.into(), stickiness);
    }

    /// Add a known passage to the deck, replacing its stickiness if present.
    pub fn add(&mut self, content: &dyn ContentStore, title: &str, sticky: bool) -> Result<()> {
        if !content.has_passage(title) {
            return Err(QbnError::UnknownFragment(title.to_string()));
        }
        let stickiness = Stickiness::from_sticky(sticky);
        self.insert(title, stickiness);
        tracing::debug!(title, ?stickiness, "added card");
        Ok(())
    }

    /// Remove a known passage from the deck.
    ///
    /// Single-use cards are always removed; sticky cards only when `always`
    /// is set. Returns whether the card was removed.
    pub fn remove(&mut self, content: &dyn ContentStore, title: &str, always: bool) -> Result<bool> {
        if !content.has_passage(title) {
            return Err(QbnError::UnknownFragment(title.to_string()));
        }
        let removed = match self.cards.get(title) {
            Some(Stickiness::SingleUse) => true,
            Some(Stickiness::Sticky) => always,
            None => false,
        };
        if removed {
            self.cards.remove(title);
            tracing::debug!(title, always, "removed card");
        }
        Ok(removed)
    }

    /// Visit a card: single-use cards leave the deck, sticky and absent ones are untouched.
    pub fn consume(&mut self, title: &str) -> bool {
        if self.cards.get(title) == Some(&Stickiness::SingleUse) {
            self.cards.remove(title);
            tracing::debug!(title, "consumed single-use card");
            true
        } else {
            false
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.cards.contains_key(title)
    }

    pub fn stickiness(&self, title: &str) -> Option<Stickiness> {
        self.cards.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Titles in the deck, in title order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.cards.keys().map(String::as_str)
    }
}
