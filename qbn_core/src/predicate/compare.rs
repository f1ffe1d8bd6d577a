//! Comparison operators for `<name>-<op>-<value>` tags.

use serde::{Deserialize, Serialize};
use story_state::Value;

/// A comparison operator spelled as two letters in a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Lt,
        CompareOp::Gt,
        CompareOp::Le,
        CompareOp::Ge,
    ];

    /// Parse the two-letter spelling.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
            CompareOp::Lt => "lt",
            CompareOp::Gt => "gt",
            CompareOp::Le => "le",
            CompareOp::Ge => "ge",
        }
    }

    /// Apply the operator. Unordered pairs (NaN) satisfy only `Ne`.
    pub fn apply<T: PartialOrd + ?Sized>(&self, actual: &T, expected: &T) -> bool {
        match self {
            CompareOp::Eq => actual == expected,
            CompareOp::Ne => actual != expected,
            CompareOp::Lt => actual < expected,
            CompareOp::Gt => actual > expected,
            CompareOp::Le => actual <= expected,
            CompareOp::Ge => actual >= expected,
        }
    }

    /// Result when the two sides cannot be compared at all.
    fn incomparable(&self) -> bool {
        *self == CompareOp::Ne
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare a resolved variable against the literal from a tag.
///
/// Numbers compare numerically, with the first `_` in the literal read as a
/// decimal point (`weight-gt-2_5`). Text compares as text. Booleans compare
/// as 1 or 0. An undefined variable only satisfies `ne`.
pub fn compare(actual: Option<&Value>, op: CompareOp, expected: &str) -> bool {
    match actual {
        None => op.incomparable(),
        Some(Value::Number(n)) => match parse_number(&expected.replacen('_', ".", 1)) {
            Some(e) => op.apply(n, &e),
            None => op.incomparable(),
        },
        Some(Value::Bool(b)) => {
            let n = if *b { 1.0 } else { 0.0 };
            match parse_number(expected) {
                Some(e) => op.apply(&n, &e),
                None => op.incomparable(),
            }
        }
        Some(Value::Text(s)) => op.apply(s.as_str(), expected),
        Some(list @ Value::List(_)) => op.apply(list.to_string().as_str(), expected),
    }
}

/// A blank literal reads as zero (`gold-eq-` holds when gold is 0).
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    s.parse::<f64>().ok()
}
