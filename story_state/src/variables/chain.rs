//! Ordered scope chain used to resolve bare variable names.

use std::collections::HashMap;

use crate::value::Value;

/// Call-local variable bindings that shadow every story scope.
pub type Overrides = HashMap<String, Value>;

/// Names of the lookup layers, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerName {
    Overrides,
    Temporary,
    Persistent,
}

/// An ordered list of lookup layers searched left to right.
#[derive(Debug, Clone, Default)]
pub struct ScopeChain<'a> {
    layers: Vec<(LayerName, &'a HashMap<String, Value>)>,
}

impl<'a> ScopeChain<'a> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a layer with lower precedence than every existing one.
    pub fn with_layer(mut self, name: LayerName, bindings: &'a HashMap<String, Value>) -> Self {
        self.layers.push((name, bindings));
        self
    }

    /// Resolve a bare name to the first layer that defines it.
    pub fn resolve(&self, name: &str) -> Option<&'a Value> {
        self.resolve_with_layer(name).map(|(_, value)| value)
    }

    /// Resolve a bare name, also reporting which layer answered.
    pub fn resolve_with_layer(&self, name: &str) -> Option<(LayerName, &'a Value)> {
        self.layers
            .iter()
            .find_map(|(layer, bindings)| bindings.get(name).map(|value| (*layer, value)))
    }

    /// Layer names in precedence order.
    pub fn layer_names(&self) -> Vec<LayerName> {
        self.layers.iter().map(|(name, _)| *name).collect()
    }
}
