//! The QBN session - one story's deck, variables and random source.
//!
//! Every operation goes through a [`QbnSession`]. The session owns the
//! mutable state and is used from one thread; hosts that need sharing wrap
//! the whole session in a single lock.

use story_state::{
    ContentStore, Overrides, StoryConfig, StoryRng, Value, VariableName, VariableStore,
};

use crate::deck::{Deck, Hand};
use crate::error::{QbnError, Result};
use crate::filter::{lookup, passage_matches};
use crate::include::{include_all, RenderHost, Separator};
use crate::predicate::has;
use crate::range::{classify, RangeSpec};
use crate::sampler::choose;

/// Session context owning the state a story's card logic mutates.
pub struct QbnSession<C: ContentStore> {
    config: StoryConfig,
    content: C,
    store: VariableStore,
    deck: Deck,
    rng: StoryRng,
}

impl<C: ContentStore> QbnSession<C> {
    /// Start a session: seed the random source, bind initial variables and
    /// build the deck from card-tagged passages.
    pub fn new(content: C, config: StoryConfig) -> Result<Self> {
        config.validate()?;
        let store = config.initial_store()?;
        let rng = StoryRng::from_optional_seed(config.seed);
        let deck = Deck::from_content(&content, &config.deck);

        tracing::debug!(seed = ?config.seed, cards = deck.len(), "started session");
        Ok(Self {
            config,
            content,
            store,
            deck,
            rng,
        })
    }

    /// Start a session with default configuration.
    pub fn with_defaults(content: C) -> Result<Self> {
        Self::new(content, StoryConfig::default())
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VariableStore {
        &mut self.store
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn rng_mut(&mut self) -> &mut StoryRng {
        &mut self.rng
    }

    /// Rebuild the deck from the content store.
    pub fn reset_deck(&mut self) {
        self.deck = Deck::from_content(&self.content, &self.config.deck);
    }

    /// Resolve a bare variable name through overrides, temporary, then persistent scope.
    pub fn value<'a>(&'a self, name: &str, overrides: &'a Overrides) -> Option<&'a Value> {
        self.store.chain(overrides).resolve(name)
    }

    /// Evaluate a tag.
    pub fn has(&mut self, tag: &str, overrides: &Overrides) -> bool {
        let chain = self.store.chain(overrides);
        has(tag, &chain, &mut self.rng)
    }

    /// Check whether the passage titled `title` is currently eligible.
    pub fn passage_matches(&mut self, title: &str, overrides: &Overrides) -> bool {
        let Some(passage) = self.content.passage(title) else {
            return false;
        };
        let chain = self.store.chain(overrides);
        passage_matches(
            passage,
            &self.deck,
            &self.config.filter.requirement_prefix,
            &chain,
            &mut self.rng,
        )
    }

    /// Titles of every eligible passage, in title order.
    ///
    /// With a nonzero `limit`, at most that many are sampled at random.
    pub fn list_eligible_passages(&mut self, overrides: &Overrides, limit: Option<usize>) -> Vec<String> {
        let chain = self.store.chain(overrides);
        let deck = &self.deck;
        let prefix = self.config.filter.requirement_prefix.as_str();
        let rng = &mut self.rng;

        let mut eligible = lookup(self.content.passages(), |p| {
            passage_matches(p, deck, prefix, &chain, rng)
        });

        if let Some(limit) = limit.filter(|&n| n > 0) {
            eligible = choose(&eligible, limit, &mut self.rng);
        }

        tracing::debug!(count = eligible.len(), ?limit, "listed eligible passages");
        eligible.into_iter().map(|p| p.title.clone()).collect()
    }

    /// Put a passage in the deck as a single-use or sticky card.
    pub fn add_card(&mut self, title: &str, sticky: bool) -> Result<()> {
        self.deck.add(&self.content, title, sticky)
    }

    /// Take a passage out of the deck; sticky cards need `always`.
    pub fn remove_card(&mut self, title: &str, always: bool) -> Result<()> {
        self.deck.remove(&self.content, title, always).map(|_| ())
    }

    /// Notify the session that a passage was entered: single-use cards are used up.
    ///
    /// Hosts call this before computing the next set of candidates.
    pub fn passage_entered(&mut self, title: &str) {
        self.deck.consume(title);
    }

    /// Fill the hand variable `hand` up to `count` cards drawn from `pool`.
    ///
    /// An undefined hand variable is bound to a new empty list first. Returns
    /// the titles drawn.
    pub fn draw_cards(&mut self, hand: &str, count: usize, pool: &[String]) -> Result<Vec<String>> {
        let binding_failure = |reason: String| QbnError::HandBindingFailure {
            name: hand.to_string(),
            reason,
        };

        let name = VariableName::parse(hand).map_err(|err| binding_failure(err.to_string()))?;
        let mut cards = match self.store.get(&name) {
            Some(value) => {
                Hand::from_value(&name, value).map_err(|err| binding_failure(err.to_string()))?
            }
            None => {
                tracing::warn!(hand = %name, "empty hand: binding a new list");
                Hand::new()
            }
        };

        let drawn = cards.draw(count, pool, &mut self.rng);
        self.store.set(&name, cards.to_value());

        tracing::debug!(hand = %name, drawn = drawn.len(), held = cards.len(), "drew cards");
        Ok(drawn)
    }

    /// Classify the numeric variable `name` and set the flag for its bucket.
    pub fn classify_range(&mut self, name: &str, spec: &RangeSpec) -> Result<Option<VariableName>> {
        classify(&mut self.store, name, spec, self.config.range.flag_scope)
    }

    /// Display the passages in `titles` through `host`, consuming single-use cards.
    pub fn include_all(
        &mut self,
        host: &mut dyn RenderHost,
        titles: &[String],
        wrap: Option<&str>,
        separator: Option<&Separator>,
    ) -> Result<()> {
        include_all(&mut self.deck, &self.content, host, titles, wrap, separator)
    }
}
