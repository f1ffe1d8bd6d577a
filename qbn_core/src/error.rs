//! Errors surfaced at the QBN call boundary.

use story_state::ConfigError;
use thiserror::Error;

/// Every failure a QBN operation can report.
///
/// Operations validate before mutating, so an error never leaves the deck,
/// a hand or the variable store half-updated.
#[derive(Debug, Error)]
pub enum QbnError {
    /// The referenced title is not in the content store.
    #[error("no such passage {0:?}")]
    UnknownFragment(String),

    /// The variable to classify is malformed, undefined or not a number.
    #[error("invalid range name {name:?}: {reason}")]
    InvalidRangeName { name: String, reason: String },

    /// The range spec breaks one of its shape rules.
    #[error("invalid range spec {spec}: {reason}")]
    InvalidRangeSpec { spec: String, reason: String },

    /// A wrapper widget is not registered with the host.
    #[error("no such widget {0:?}")]
    UnknownWidget(String),

    /// A separator widget is not registered with the host.
    #[error("no such separator widget {0:?}")]
    UnknownSeparator(String),

    /// The hand variable could not be read or bound.
    #[error("failed to set hand {name:?}: {reason}")]
    HandBindingFailure { name: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = QbnError> = std::result::Result<T, E>;
