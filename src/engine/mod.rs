//! The match engine: state, sequencing, effects, and the controller.
//!
//! Everything mutable funnels through [`MatchController`]; the rest of
//! this module is its machinery. Consumers observe the match through
//! the event log and the serializable views.

mod chain;
mod controller;
mod effects;
mod error;
mod events;
mod ranking;
mod state;
mod turn;

pub use controller::{MatchController, PlayOptions};
pub use error::IntentError;
pub use events::MatchEvent;
pub use ranking::RankTracker;
pub use state::{Direction, MatchState, MatchView, Phase, Seat, SeatView};
pub use turn::{advance, next_active};
