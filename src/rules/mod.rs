//! Legality rules.
//!
//! The validator is a pure predicate over a card and the table context.
//! It never mutates state; consequence application lives in
//! `engine::effects`.

pub mod validator;

pub use validator::{can_play, PlayContext};
