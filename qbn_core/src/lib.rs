//! # QBN Core
//!
//! Card selection for quality-based narratives. Passages tagged as cards form
//! a deck; requirement tags on each card are small predicates over the story
//! variables; eligible cards are sampled into hands without bias.
//!
//! ## Core Components
//!
//! - **predicate**: Parses tag strings (`not-x`, `random-30`, `gold-ge-5`, `x`) and evaluates them
//! - **range**: Classifies a numeric variable into a named bucket and records it as a flag
//! - **filter**: Selects the deck passages whose requirements all hold
//! - **sampler**: Picks `k` distinct elements with as few random draws as possible
//! - **deck**: The deck of single-use and sticky cards, and hands drawn from it
//! - **include**: Displays a list of passages through the host renderer
//! - **session**: The context object owning deck, variables and random source
//!
//! ## Determinism
//!
//! Every random decision draws from the session's `StoryRng`, so a session
//! created from the same seed and driven by the same calls behaves identically.

pub mod deck;
pub mod error;
pub mod filter;
pub mod include;
pub mod predicate;
pub mod range;
pub mod sampler;
pub mod session;

pub use deck::*;
pub use error::*;
pub use filter::*;
pub use include::*;
pub use predicate::*;
pub use range::*;
pub use sampler::*;
pub use session::*;
