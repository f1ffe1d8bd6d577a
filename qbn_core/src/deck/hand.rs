//! Hands - cards drawn from a candidate pool.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use story_state::{StateError, Value, VariableName};

use crate::sampler::choose;

/// An ordered list of drawn passage titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<String>,
}

impl Hand {
    /// Create an empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a hand back from the list-valued story variable `name`.
    pub fn from_value(name: &VariableName, value: &Value) -> Result<Self, StateError> {
        let items = value.as_list().ok_or_else(|| StateError::NotAList {
            name: name.to_string(),
            kind: value.kind(),
        })?;
        let cards = items
            .iter()
            .map(|item| {
                item.as_text()
                    .map(str::to_string)
                    .ok_or_else(|| StateError::NotATitle {
                        name: name.to_string(),
                        kind: item.kind(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { cards })
    }

    /// The hand as a story variable value.
    pub fn to_value(&self) -> Value {
        Value::List(self.cards.iter().map(|c| Value::from(c.as_str())).collect())
    }

    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.cards.iter().any(|c| c == title)
    }

    /// Fill the hand up to `count` cards from `pool`.
    ///
    /// Cards already held and repeats within the pool are skipped, so one
    /// draw never adds the same title twice. Returns the titles drawn.
    pub fn draw<R: Rng + ?Sized>(&mut self, count: usize, pool: &[String], rng: &mut R) -> Vec<String> {
        let mut seen: HashSet<&str> = self.cards.iter().map(String::as_str).collect();
        let candidates: Vec<&str> = pool
            .iter()
            .map(String::as_str)
            .filter(|title| seen.insert(*title))
            .collect();

        let needed = count.saturating_sub(self.cards.len());
        let drawn: Vec<String> = choose(&candidates, needed, rng)
            .into_iter()
            .map(str::to_string)
            .collect();

        self.cards.extend(drawn.iter().cloned());
        drawn
    }
}

impl From<Vec<String>> for Hand {
    fn from(cards: Vec<String>) -> Self {
        Self { cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_state::StoryRng;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_draw_into_empty_hand() {
        let mut hand = Hand::new();
        let pool = titles(&["a", "b", "c"]);
        let mut rng = StoryRng::from_seed(1);

        let drawn = hand.draw(2, &pool, &mut rng);

        assert_eq!(drawn.len(), 2);
        assert_eq!(hand.len(), 2);
        assert_ne!(hand.cards()[0], hand.cards()[1]);
        assert!(hand.cards().iter().all(|c| pool.contains(c)));
    }

    #[test]
    fn test_growth_capped_by_pool() {
        let mut hand = Hand::new();
        let pool = titles(&["a", "b"]);
        let mut rng = StoryRng::from_seed(2);

        hand.draw(5, &pool, &mut rng);
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn test_held_cards_not_redrawn() {
        let mut hand = Hand::from(titles(&["a"]));
        let pool = titles(&["a", "b", "c"]);
        let mut rng = StoryRng::from_seed(3);

        let drawn = hand.draw(3, &pool, &mut rng);

        assert_eq!(drawn.len(), 2);
        assert!(!drawn.contains(&"a".to_string()));
        assert_eq!(hand.len(), 3);
    }

    #[test]
    fn test_pool_duplicates_collapsed() {
        let mut hand = Hand::new();
        let pool = titles(&["a", "a", "a", "b"]);
        let mut rng = StoryRng::from_seed(4);

        hand.draw(4, &pool, &mut rng);
        let mut cards = hand.cards().to_vec();
        cards.sort();
        assert_eq!(cards, titles(&["a", "b"]));
    }

    #[test]
    fn test_full_hand_draws_nothing() {
        let mut hand = Hand::from(titles(&["x", "y", "z"]));
        let pool = titles(&["a", "b"]);
        let mut rng = StoryRng::from_seed(5);

        assert!(hand.draw(2, &pool, &mut rng).is_empty());
        assert_eq!(hand.len(), 3);
    }

    #[test]
    fn test_value_conversion() {
        let name = VariableName::parse("$hand").unwrap();
        let hand = Hand::from(titles(&["a", "b"]));
        let value = hand.to_value();
        assert_eq!(Hand::from_value(&name, &value).unwrap(), hand);

        assert_eq!(
            Hand::from_value(&name, &Value::Number(1.0)),
            Err(StateError::NotAList {
                name: "$hand".to_string(),
                kind: "number",
            })
        );
        assert_eq!(
            Hand::from_value(&name, &Value::List(vec![Value::from("a"), Value::Bool(true)])),
            Err(StateError::NotATitle {
                name: "$hand".to_string(),
                kind: "bool",
            })
        );
    }
}
