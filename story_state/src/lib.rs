//! # Story State
//!
//! The state side of a quality-based narrative: story variables and their
//! scopes, the passages a story is made of, and the seeded random source
//! every random decision in a story draws from.
//! This crate holds no selection logic; `qbn_core` builds on it.
//!
//! ## Core Components
//!
//! - **variables**: Persistent and temporary scopes plus the ordered scope chain used for lookups
//! - **content**: Passages and the content store interface hosts implement
//! - **random**: The deterministic, seedable story random source
//! - **config**: TOML-backed story configuration

pub mod config;
pub mod content;
pub mod error;
pub mod random;
pub mod value;
pub mod variables;

pub use config::*;
pub use content::*;
pub use error::*;
pub use random::*;
pub use value::*;
pub use variables::*;
