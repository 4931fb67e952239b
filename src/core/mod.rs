//! Core engine types: seats, RNG, match configuration.
//!
//! These are the building blocks the rest of the engine is assembled
//! from. Nothing in here knows a rule of the game.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{MatchConfig, PlayerProfile, RuleSet, MAX_HAND_SIZE, MIN_HAND_SIZE};
pub use player::{PlayerId, SeatMap};
pub use rng::MatchRng;
