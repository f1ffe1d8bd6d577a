//! Range Classifier - numeric variables bucketed into named flags.
//!
//! A range spec alternates labels and strictly increasing bounds, e.g.
//! `["child", 13, "teen", 20, "adult"]`. A value belongs to the label written
//! before the first bound it is below; reaching a bound moves it to the next
//! bucket. Classifying `$age` into `"adult"` sets the flag `adult_age`.

use serde::{Deserialize, Serialize};
use story_state::{FlagScope, Value, VariableName, VariableStore};

use crate::error::{QbnError, Result};

/// One element of a range spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeEntry {
    Bound(f64),
    Label(String),
}

impl From<f64> for RangeEntry {
    fn from(bound: f64) -> Self {
        RangeEntry::Bound(bound)
    }
}

impl From<i32> for RangeEntry {
    fn from(bound: i32) -> Self {
        RangeEntry::Bound(bound as f64)
    }
}

impl From<&str> for RangeEntry {
    fn from(label: &str) -> Self {
        RangeEntry::Label(label.to_string())
    }
}

/// A validated range spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RangeSpec {
    entries: Vec<RangeEntry>,
}

impl RangeSpec {
    /// Validate and build a spec.
    ///
    /// Rejects specs with fewer than two entries, two labels in a row,
    /// bounds that do not strictly increase, and labels that cannot form
    /// part of a variable name.
    pub fn new(entries: Vec<RangeEntry>) -> Result<Self> {
        let invalid = |reason: String| QbnError::InvalidRangeSpec {
            spec: render(&entries),
            reason,
        };

        if entries.len() < 2 {
            return Err(invalid(format!(
                "must have at least two values (got {})",
                entries.len()
            )));
        }

        let mut lower: Option<f64> = None;
        let mut prev_was_label = false;
        for entry in &entries {
            match entry {
                RangeEntry::Label(label) => {
                    if prev_was_label {
                        return Err(invalid("may not have two consecutive labels".to_string()));
                    }
                    if !is_label(label) {
                        return Err(invalid(format!("label {label:?} is not a valid name")));
                    }
                    prev_was_label = true;
                }
                RangeEntry::Bound(bound) => {
                    if bound.is_nan() {
                        return Err(invalid("bounds must be numbers".to_string()));
                    }
                    if lower.is_some_and(|lower| *bound <= lower) {
                        return Err(invalid("numbers must be strictly increasing".to_string()));
                    }
                    lower = Some(*bound);
                    prev_was_label = false;
                }
            }
        }

        Ok(Self { entries })
    }

    /// Parse a spec from a JSON array of strings and numbers.
    pub fn from_json(source: &str) -> Result<Self> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(source).map_err(|err| QbnError::InvalidRangeSpec {
                spec: source.to_string(),
                reason: err.to_string(),
            })?;

        let entries = raw
            .iter()
            .map(|item| match item {
                serde_json::Value::String(label) => Ok(RangeEntry::Label(label.clone())),
                serde_json::Value::Number(n) => n.as_f64().map(RangeEntry::Bound).ok_or(()),
                _ => Err(()),
            })
            .collect::<std::result::Result<Vec<_>, ()>>()
            .map_err(|()| QbnError::InvalidRangeSpec {
                spec: source.to_string(),
                reason: "may only contain strings and numbers".to_string(),
            })?;

        Self::new(entries)
    }

    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    /// The label of the bucket `value` falls into.
    ///
    /// `None` when the value is below a bound with no label before it, or at
    /// or above the last bound with no label after it.
    pub fn bucket(&self, value: f64) -> Option<&str> {
        let mut label: Option<&str> = None;
        for entry in &self.entries {
            match entry {
                RangeEntry::Label(l) => label = Some(l),
                RangeEntry::Bound(bound) => {
                    if value < *bound {
                        return label;
                    }
                    label = None;
                }
            }
        }
        label
    }
}

impl std::fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render(&self.entries))
    }
}

/// Classify the variable `name` and set the flag for its bucket.
///
/// Returns the flag that was set, or `None` when the value falls in an
/// unlabelled bucket. Nothing is written on error.
pub fn classify(
    store: &mut VariableStore,
    name: &str,
    spec: &RangeSpec,
    flag_scope: FlagScope,
) -> Result<Option<VariableName>> {
    let invalid = |reason: String| QbnError::InvalidRangeName {
        name: name.to_string(),
        reason,
    };

    let var = VariableName::parse(name).map_err(|err| invalid(err.to_string()))?;
    let value = match store.get(&var) {
        None => return Err(invalid("no such variable".to_string())),
        Some(Value::Number(n)) => *n,
        Some(other) => return Err(invalid(format!("holds a {}, not a number", other.kind()))),
    };

    let Some(label) = spec.bucket(value) else {
        tracing::debug!(variable = %var, value, spec = %spec, "value in unlabelled range");
        return Ok(None);
    };

    let scope = match flag_scope {
        FlagScope::Temporary => story_state::Scope::Temporary,
        FlagScope::Same => var.scope(),
    };
    let flag = VariableName::new(scope, format!("{}_{}", label, var.base()));
    store.set(&flag, true);

    tracing::debug!(variable = %var, value, flag = %flag, "classified range");
    Ok(Some(flag))
}

fn is_label(label: &str) -> bool {
    let mut chars = label.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn render(entries: &[RangeEntry]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| format!("{:?}", entries))
}
