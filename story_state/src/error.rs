//! Errors raised by the story state.

use thiserror::Error;

/// Failures when naming or binding story variables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The name is not `$name` or `_name` with an identifier after the sigil.
    #[error("invalid variable name {0:?}")]
    InvalidVariableName(String),

    /// A list was expected but the variable holds something else.
    #[error("variable {name:?} holds a {kind}, not a list")]
    NotAList { name: String, kind: &'static str },

    /// A list of passage titles holds something other than text.
    #[error("variable {name:?} contains a {kind}, not a passage title")]
    NotATitle { name: String, kind: &'static str },
}
