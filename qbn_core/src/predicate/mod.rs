//! Predicate Engine - tag strings as tests against story variables.
//!
//! A requirement tag is one of four forms, tried in this order:
//! 1. `not-<tag>`: the complement of `<tag>`
//! 2. `random-<percent>`: true with probability `percent / 100`
//! 3. `<name>-<op>-<value>`: compare a variable, `op` is one of `eq ne lt gt le ge`
//! 4. `<name>`: the truthiness of a variable
//!
//! Tags are parsed into a [`Predicate`] once and evaluated against a
//! [`ScopeChain`]. Evaluation never fails; an undefined variable is falsy.

mod compare;

pub use compare::*;

use rand::Rng;
use serde::{Deserialize, Serialize};
use story_state::ScopeChain;

const NOT_PREFIX: &str = "not-";
const RANDOM_PREFIX: &str = "random-";

/// A parsed tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `not-<inner>`.
    Not(Box<Predicate>),

    /// `random-<percent>`.
    Random { percent: f64 },

    /// `<name>-<op>-<value>`.
    Compare {
        name: String,
        op: CompareOp,
        expected: String,
    },

    /// A bare variable or flag name.
    Flag(String),
}

impl Predicate {
    /// Parse a tag. Every string parses; anything unrecognised is a flag name.
    pub fn parse(tag: &str) -> Self {
        if let Some(inner) = tag.strip_prefix(NOT_PREFIX).filter(|s| !s.is_empty()) {
            return Predicate::Not(Box::new(Predicate::parse(inner)));
        }

        if let Some(percent) = tag.strip_prefix(RANDOM_PREFIX).and_then(leading_digits) {
            return Predicate::Random { percent };
        }

        if let Some((name, op, expected)) = split_comparison(tag) {
            return Predicate::Compare {
                name: name.to_string(),
                op,
                expected: expected.to_string(),
            };
        }

        Predicate::Flag(tag.to_string())
    }

    /// Evaluate against the given variables, drawing from `rng` for `random-` tags.
    pub fn evaluate<R: Rng + ?Sized>(&self, chain: &ScopeChain<'_>, rng: &mut R) -> bool {
        match self {
            Predicate::Not(inner) => !inner.evaluate(chain, rng),
            Predicate::Random { percent } => rng.gen::<f64>() < percent / 100.0,
            Predicate::Compare { name, op, expected } => compare(chain.resolve(name), *op, expected),
            Predicate::Flag(name) => chain.resolve(name).is_some_and(|v| v.is_truthy()),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Not(inner) => write!(f, "{}{}", NOT_PREFIX, inner),
            Predicate::Random { percent } => write!(f, "{}{}", RANDOM_PREFIX, percent),
            Predicate::Compare { name, op, expected } => write!(f, "{}-{}-{}", name, op, expected),
            Predicate::Flag(name) => f.write_str(name),
        }
    }
}

/// Parse and evaluate a tag in one step.
pub fn has<R: Rng + ?Sized>(tag: &str, chain: &ScopeChain<'_>, rng: &mut R) -> bool {
    Predicate::parse(tag).evaluate(chain, rng)
}

/// The leading run of ASCII digits as a number; trailing text is ignored.
fn leading_digits(s: &str) -> Option<f64> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}

/// Split `<name>-<op>-<value>` at the last operator, so names may contain dashes.
fn split_comparison(tag: &str) -> Option<(&str, CompareOp, &str)> {
    tag.match_indices('-').rev().find_map(|(i, _)| {
        let rest = &tag[i + 1..];
        let op = CompareOp::parse(rest.get(..2)?)?;
        let expected = rest.get(2..)?.strip_prefix('-')?;
        Some((&tag[..i], op, expected))
    })
}
