//! # wildstack
//!
//! A rules engine for an UNO-family shedding card game with three
//! escalating rule tiers and stacking draw penalties.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: All mutation funnels through [`MatchController`].
//!    Every intent is validated first and applied atomically; a rejected
//!    intent leaves the match untouched.
//!
//! 2. **N-Player First**: Every table runs 2 to 16 seats. Finishing
//!    order is tracked with dual rank counters, winners from the top and
//!    eliminations from the bottom.
//!
//! 3. **Deterministic Replay**: One `u64` seed drives every shuffle and
//!    reveal. The same seed, roster, and intent sequence reproduce the
//!    same match, events included.
//!
//! ## Architecture
//!
//! - **Intent/Event Split**: Frontends submit intents and render from
//!   the append-only event log plus serializable views; the engine never
//!   reads its own events back.
//!
//! - **Phase Machine**: Plays needing more input (a wild's color, a
//!   swap target, fusion sacrifices) park in a sub-decision phase that
//!   freezes the table until resolved or cancelled.
//!
//! ## Modules
//!
//! - `core`: Seat IDs, seat-indexed maps, RNG, match configuration
//! - `cards`: Card model and the per-tier deck builders
//! - `rules`: The play validator (pure, context-in boolean-out)
//! - `engine`: Match state, turn sequencing, effects, the controller
//! - `bot`: The built-in deterministic greedy strategy

pub mod bot;
pub mod cards;
pub mod core;
pub mod engine;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    MatchConfig, MatchRng, PlayerId, PlayerProfile, RuleSet, SeatMap, MAX_HAND_SIZE, MIN_HAND_SIZE,
};

pub use crate::cards::{build_deck, deck_size, Card, CardId, Color, Value};

pub use crate::rules::{can_play, PlayContext};

pub use crate::engine::{
    Direction, IntentError, MatchController, MatchEvent, MatchView, Phase, PlayOptions,
    RankTracker, Seat, SeatView,
};

pub use crate::bot::{BotAction, ChainResponse};
