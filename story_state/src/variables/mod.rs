//! Story variables - persistent and temporary scopes.
//!
//! Variables are named with a sigil that selects their scope: `$gold` lives
//! in the persistent scope, `_gold` in the temporary scope. Inside a scope
//! they are stored under their base name (`gold`), which is also the name
//! tags use to refer to them.

mod chain;

pub use chain::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::StateError;
use crate::value::Value;

/// The scope a variable lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Survives across passages (`$name`).
    Persistent,
    /// Cleared between passages (`_name`).
    Temporary,
}

impl Scope {
    /// The sigil that selects this scope.
    pub fn sigil(&self) -> char {
        match self {
            Scope::Persistent => '$',
            Scope::Temporary => '_',
        }
    }

    fn from_sigil(c: char) -> Option<Self> {
        match c {
            '$' => Some(Scope::Persistent),
            '_' => Some(Scope::Temporary),
            _ => None,
        }
    }
}

/// A parsed, scope-qualified variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableName {
    scope: Scope,
    base: String,
}

impl VariableName {
    /// Parse `$name` or `_name`.
    ///
    /// The part after the sigil must start with a letter or underscore and
    /// continue with letters, digits or underscores.
    pub fn parse(name: &str) -> Result<Self, StateError> {
        let invalid = || StateError::InvalidVariableName(name.to_string());

        let mut chars = name.chars();
        let scope = chars.next().and_then(Scope::from_sigil).ok_or_else(invalid)?;
        let base = chars.as_str();

        let mut base_chars = base.chars();
        match base_chars.next() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            _ => return Err(invalid()),
        }
        if !base_chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }

        Ok(Self {
            scope,
            base: base.to_string(),
        })
    }

    /// Build a name directly from a scope and base name.
    pub fn new(scope: Scope, base: impl Into<String>) -> Self {
        Self {
            scope,
            base: base.into(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The name without its sigil.
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl std::str::FromStr for VariableName {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for VariableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.scope.sigil(), self.base)
    }
}

/// Both variable scopes of a running story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableStore {
    persistent: HashMap<String, Value>,
    temporary: HashMap<String, Value>,
}

impl VariableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All bindings of one scope, keyed by base name.
    pub fn scope(&self, scope: Scope) -> &HashMap<String, Value> {
        match scope {
            Scope::Persistent => &self.persistent,
            Scope::Temporary => &self.temporary,
        }
    }

    fn scope_mut(&mut self, scope: Scope) -> &mut HashMap<String, Value> {
        match scope {
            Scope::Persistent => &mut self.persistent,
            Scope::Temporary => &mut self.temporary,
        }
    }

    /// Look up a variable by its parsed name.
    pub fn get(&self, name: &VariableName) -> Option<&Value> {
        self.scope(name.scope).get(&name.base)
    }

    /// Look up a variable by its sigil-qualified name.
    pub fn get_named(&self, name: &str) -> Result<Option<&Value>, StateError> {
        let name = VariableName::parse(name)?;
        Ok(self.get(&name))
    }

    /// Mutable access to a variable.
    pub fn get_mut(&mut self, name: &VariableName) -> Option<&mut Value> {
        self.scope_mut(name.scope).get_mut(&name.base)
    }

    /// Bind a variable, replacing any previous value.
    pub fn set(&mut self, name: &VariableName, value: impl Into<Value>) {
        self.scope_mut(name.scope)
            .insert(name.base.clone(), value.into());
    }

    /// Bind a variable by its sigil-qualified name.
    pub fn set_named(&mut self, name: &str, value: impl Into<Value>) -> Result<(), StateError> {
        let name = VariableName::parse(name)?;
        self.set(&name, value);
        Ok(())
    }

    /// Remove a variable, returning its old value.
    pub fn unset(&mut self, name: &VariableName) -> Option<Value> {
        self.scope_mut(name.scope).remove(&name.base)
    }

    /// Drop every temporary binding (done by hosts between passages).
    pub fn clear_temporary(&mut self) {
        self.temporary.clear();
    }

    /// Build the standard lookup chain: overrides, then temporary, then persistent.
    pub fn chain<'a>(&'a self, overrides: &'a Overrides) -> ScopeChain<'a> {
        ScopeChain::new()
            .with_layer(LayerName::Overrides, overrides)
            .with_layer(LayerName::Temporary, &self.temporary)
            .with_layer(LayerName::Persistent, &self.persistent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        let name = VariableName::parse("$age").unwrap();
        assert_eq!(name.scope(), Scope::Persistent);
        assert_eq!(name.base(), "age");

        let name = VariableName::parse("_tmp_2").unwrap();
        assert_eq!(name.scope(), Scope::Temporary);
        assert_eq!(name.base(), "tmp_2");
        assert_eq!(name.to_string(), "_tmp_2");
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        for bad in ["age", "$", "$2age", "$a-b", "", "@x", "_ x"] {
            assert_eq!(
                VariableName::parse(bad),
                Err(StateError::InvalidVariableName(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_scopes_are_separate() {
        let mut store = VariableStore::new();
        store.set_named("$gold", 5).unwrap();
        store.set_named("_gold", 1).unwrap();

        assert_eq!(store.get_named("$gold").unwrap(), Some(&Value::Number(5.0)));
        assert_eq!(store.get_named("_gold").unwrap(), Some(&Value::Number(1.0)));

        store.clear_temporary();
        assert_eq!(store.get_named("_gold").unwrap(), None);
        assert!(store.get_named("$gold").unwrap().is_some());
    }

    #[test]
    fn test_unset() {
        let mut store = VariableStore::new();
        let name = VariableName::new(Scope::Persistent, "met_wizard");
        store.set(&name, true);
        assert_eq!(store.unset(&name), Some(Value::Bool(true)));
        assert!(store.get(&name).is_none());
    }
}
