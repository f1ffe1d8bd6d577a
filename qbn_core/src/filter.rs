//! Candidate Filter - deck passages whose requirements all hold.

use rand::Rng;
use story_state::{Passage, ScopeChain};

use crate::deck::Deck;
use crate::predicate::has;

/// The requirement tags of a passage with their prefix stripped.
///
/// Tags without the prefix are descriptive and not returned.
pub fn requirements<'p>(passage: &'p Passage, prefix: &'p str) -> impl Iterator<Item = &'p str> {
    passage.tags.iter().filter_map(move |tag| tag.strip_prefix(prefix))
}

/// Check whether a passage is eligible.
///
/// It must be in the deck, and every requirement tag must hold. Requirements
/// are checked in tag order and checking stops at the first failure, so a
/// `random-` requirement after a failing one draws nothing.
pub fn passage_matches<R: Rng + ?Sized>(
    passage: &Passage,
    deck: &Deck,
    prefix: &str,
    chain: &ScopeChain<'_>,
    rng: &mut R,
) -> bool {
    if !deck.contains(&passage.title) {
        return false;
    }
    requirements(passage, prefix).all(|tag| has(tag, chain, rng))
}

/// Every passage of `pool` accepted by `predicate`, in pool order.
pub fn lookup<'p, I, F>(pool: I, mut predicate: F) -> Vec<&'p Passage>
where
    I: IntoIterator<Item = &'p Passage>,
    F: FnMut(&Passage) -> bool,
{
    pool.into_iter().filter(|p| predicate(*p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_state::{Overrides, StoryRng, Value, VariableStore};

    fn passages() -> Vec<Passage> {
        vec![
            Passage::new("Rich").with_tags(["card", "req-gold-ge-10"]),
            Passage::new("Poor").with_tags(["card", "req-gold-lt-10", "gloomy"]),
            Passage::new("Always").with_tag("card"),
            Passage::new("Wizard").with_tags(["req-met_wizard", "req-not-hurt"]),
        ]
    }

    fn deck_of(titles: &[&str]) -> Deck {
        let mut deck = Deck::new();
        for title in titles {
            deck.insert(*title, crate::deck::Stickiness::SingleUse);
        }
        deck
    }

    fn eligible(deck: &Deck, store: &VariableStore, overrides: &Overrides) -> Vec<String> {
        let pool = passages();
        let chain = store.chain(overrides);
        let mut rng = StoryRng::from_seed(1);
        lookup(&pool, |p| passage_matches(p, deck, "req-", &chain, &mut rng))
            .into_iter()
            .map(|p| p.title.clone())
            .collect()
    }

    #[test]
    fn test_requirements_strip_prefix() {
        let passage = Passage::new("x").with_tags(["req-a", "b", "req-not-c", "xreq-d"]);
        let reqs: Vec<_> = requirements(&passage, "req-").collect();
        assert_eq!(reqs, vec!["a", "not-c"]);
    }

    #[test]
    fn test_filters_by_requirements() {
        let deck = deck_of(&["Rich", "Poor", "Always", "Wizard"]);
        let mut store = VariableStore::new();
        store.set_named("$gold", 3).unwrap();

        let result = eligible(&deck, &store, &Overrides::new());
        assert_eq!(result, vec!["Poor", "Always"]);
    }

    #[test]
    fn test_overrides_change_eligibility() {
        let deck = deck_of(&["Rich", "Poor", "Always", "Wizard"]);
        let store = VariableStore::new();
        let mut overrides = Overrides::new();
        overrides.insert("gold".to_string(), Value::Number(50.0));
        overrides.insert("met_wizard".to_string(), Value::Bool(true));

        let result = eligible(&deck, &store, &overrides);
        assert_eq!(result, vec!["Rich", "Always", "Wizard"]);
    }

    #[test]
    fn test_absent_from_deck_never_matches() {
        let deck = deck_of(&["Poor"]);
        let mut store = VariableStore::new();
        store.set_named("$gold", 100).unwrap();
        store.set_named("$met_wizard", true).unwrap();

        // Every other passage's requirements hold, but only deck members count.
        let result = eligible(&deck, &store, &Overrides::new());
        assert!(result.is_empty());
    }
}
