//! Intent rejection reasons.
//!
//! Every rejection is a no-op against match state: the caller is
//! expected to have filtered choices through the validator already, so
//! these are defensive rather than primary paths.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an intent was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IntentError {
    /// The acting seat does not hold the turn (or the decision).
    #[error("not this seat's turn")]
    NotYourTurn,

    /// The intent does not fit the current match phase.
    #[error("intent not valid in the current phase")]
    WrongPhase,

    /// The referenced card is not in the acting seat's hand.
    #[error("card not in hand")]
    UnknownCard,

    /// The validator rejected the play.
    #[error("card cannot be played now")]
    IllegalPlay,

    /// The chosen swap target is absent, inactive, or the player itself.
    #[error("invalid target seat")]
    InvalidTarget,

    /// A fusion play needs two spare cards to sacrifice.
    #[error("fusion requires two sacrifice cards")]
    NotEnoughSacrifices,

    /// Chain-draw evasion requires a Vanishing card in hand.
    #[error("no vanishing card to spend")]
    NoVanishingCard,

    /// The match has already ended.
    #[error("the match is over")]
    MatchOver,
}
