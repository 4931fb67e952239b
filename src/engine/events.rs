//! Events emitted by the match controller.
//!
//! The UI layer renders from these (turn prompts, reveal animations,
//! game-over summaries); the engine itself never reads them back.
//! Events are appended in the order the mutations happened.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color};
use crate::core::PlayerId;

/// One observable match occurrence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A new seat holds the turn.
    TurnStarted { seat: PlayerId },

    /// A card (possibly fused) was placed on the discard pile.
    CardPlayed {
        seat: PlayerId,
        card: Card,
        active_color: Color,
    },

    /// A seat drew cards. `penalty` is true when absorbing a stack.
    CardsDrawn {
        seat: PlayerId,
        count: usize,
        penalty: bool,
    },

    /// Ghost swap: two seats exchanged entire hands.
    HandsSwapped { a: PlayerId, b: PlayerId },

    /// A seat played Vanishing; its next turn will be skipped.
    SeatVanished { seat: PlayerId },

    /// A seat emptied its hand and received a rank from the top.
    SeatFinished { seat: PlayerId, rank: u8 },

    /// A seat breached the mercy limit; hand reshuffled into the deck,
    /// rank assigned from the bottom.
    SeatEliminated { seat: PlayerId, rank: u8 },

    /// A plain wild opened the chain-draw protocol against `target`.
    ChainDrawAlert {
        origin: PlayerId,
        target: PlayerId,
        color: Color,
    },

    /// The alerted seat spent a Vanishing card to pass the alert on.
    ChainDrawForwarded { from: PlayerId, to: PlayerId },

    /// The alert cascaded all the way around; nobody draws.
    ChainDrawFizzled { origin: PlayerId },

    /// One card revealed during an accepted chain draw.
    ChainDrawRevealed {
        seat: PlayerId,
        card: Card,
        matched: bool,
    },

    /// The chain draw concluded after `drawn` cards.
    ChainDrawEnded { seat: PlayerId, drawn: usize },

    /// The discard pile (minus its top card) was reshuffled under the deck.
    DeckRefilled { count: usize },

    /// Final ranks, one per seat, 1 = best.
    RoundOver { ranks: Vec<(PlayerId, u8)> },

    /// The match was aborted mid-round; no further intents are accepted.
    MatchAborted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Value};

    #[test]
    fn test_event_serialization() {
        let event = MatchEvent::CardPlayed {
            seat: PlayerId::new(1),
            card: Card::new(CardId::new(3), Color::Red, Value::Digit(7)),
            active_color: Color::Red,
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: MatchEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
