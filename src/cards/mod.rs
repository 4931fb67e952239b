//! Card model and deck construction.
//!
//! ## Key Types
//!
//! - `CardId`: identity of one physical card
//! - `Color` / `Value`: color and primary/secondary values
//! - `Card`: immutable card, optionally a fused composite
//! - `build_deck`: rule-tier-specific shuffled multiset

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Color, Value};
pub use deck::{build_deck, deck_size};
