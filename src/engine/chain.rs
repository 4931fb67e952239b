//! Chain-draw protocol state.
//!
//! In the escalated rule sets a plain wild opens a chain draw against
//! the next seat: accept it and reveal cards off the deck until one
//! matches the chosen color, or spend a vanishing card to forward the
//! alert onward. The controller owns the phase transitions; this module
//! holds the in-flight record and the single-reveal step.

use serde::{Deserialize, Serialize};

use crate::cards::Color;
use crate::core::PlayerId;

use super::effects::{self, check_mercy};
use super::events::MatchEvent;
use super::ranking::RankTracker;
use super::state::MatchState;

/// An unresolved chain draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ChainDraw {
    /// Seat that played the wild.
    pub origin: PlayerId,
    /// Seat currently facing the alert.
    pub target: PlayerId,
    /// Color that stops the reveal loop.
    pub color: Color,
    /// Cards revealed so far by the current target.
    pub drawn: usize,
}

impl ChainDraw {
    pub(crate) fn new(origin: PlayerId, target: PlayerId, color: Color) -> Self {
        Self {
            origin,
            target,
            color,
            drawn: 0,
        }
    }
}

/// Result of one reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChainStep {
    /// No match yet; the reveal loop continues.
    Continue,
    /// The revealed card matched the target color.
    Matched,
    /// The deck ran dry before a match.
    Exhausted,
    /// The forced draws breached the mercy limit.
    Eliminated,
}

impl ChainStep {
    /// Does this step end the chain?
    pub(crate) fn is_terminal(self) -> bool {
        !matches!(self, ChainStep::Continue)
    }
}

/// Reveal one card into the target's hand.
///
/// One call per reveal so a frontend can pace the animation; the
/// controller loops only through its own intent boundary.
pub(crate) fn reveal_step(
    state: &mut MatchState,
    ranks: &mut RankTracker,
    chain: &mut ChainDraw,
) -> ChainStep {
    let Some(card) = state.draw_one() else {
        return ChainStep::Exhausted;
    };

    let matched = card.color == chain.color;
    state.event(MatchEvent::ChainDrawRevealed {
        seat: chain.target,
        card: card.clone(),
        matched,
    });
    state.seat_mut(chain.target).hand.push(card);
    chain.drawn += 1;

    if check_mercy(state, ranks, chain.target) {
        return ChainStep::Eliminated;
    }
    if matched {
        ChainStep::Matched
    } else {
        ChainStep::Continue
    }
}

/// Spend one vanishing card to forward the alert.
///
/// The spent card slides under the active discard so the play context
/// the wild established stays visible. Returns the new target, or
/// `None` when forwarding would wrap back to the origin (the chain
/// fizzles).
pub(crate) fn forward(
    state: &mut MatchState,
    ranks: &mut RankTracker,
    chain: &mut ChainDraw,
) -> Option<PlayerId> {
    let evader = chain.target;
    let spent = state
        .seat_mut(evader)
        .take_value(crate::cards::Value::Vanishing);
    debug_assert!(spent.is_some(), "evasion requires a vanishing card in hand");
    if let Some(card) = spent {
        let idx = 1.min(state.discard.len());
        state.discard.insert(idx, card);
    }

    // Spending the last card empties the hand and finishes the seat.
    if state.seat(evader).hand.is_empty() {
        effects::finish_seat(state, ranks, evader);
    }

    let next = super::turn::next_active(&state.seats, evader, state.direction)?;
    if next == chain.origin {
        return None;
    }

    state.event(MatchEvent::ChainDrawForwarded {
        from: evader,
        to: next,
    });
    state.event(MatchEvent::ChainDrawAlert {
        origin: chain.origin,
        target: next,
        color: chain.color,
    });
    chain.target = next;
    chain.drawn = 0;
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Value};
    use crate::core::{MatchRng, PlayerProfile, RuleSet};

    fn card(id: u32, color: Color, value: Value) -> Card {
        Card::new(CardId::new(id), color, value)
    }

    fn test_state(seats: usize, deck: Vec<Card>) -> MatchState {
        let roster = (0..seats)
            .map(|i| PlayerProfile::bot(format!("b{i}"), format!("Bot {i}")))
            .collect();
        let mut state = MatchState::new(RuleSet::Superior, roster, deck, MatchRng::new(7));
        state.place_on_discard(card(999, Color::Red, Value::Digit(0)));
        state
    }

    #[test]
    fn test_reveal_until_color_match() {
        // Top of the deck is the end of the vec.
        let deck = vec![
            card(2, Color::Green, Value::Digit(3)), // third reveal: match
            card(1, Color::Blue, Value::Digit(7)),
            card(0, Color::Red, Value::Skip),
        ];
        let mut state = test_state(3, deck);
        let mut ranks = RankTracker::new(3);
        let mut chain = ChainDraw::new(PlayerId::new(0), PlayerId::new(1), Color::Green);

        assert_eq!(reveal_step(&mut state, &mut ranks, &mut chain), ChainStep::Continue);
        assert_eq!(reveal_step(&mut state, &mut ranks, &mut chain), ChainStep::Continue);
        assert_eq!(reveal_step(&mut state, &mut ranks, &mut chain), ChainStep::Matched);

        assert_eq!(chain.drawn, 3);
        assert_eq!(state.seat(PlayerId::new(1)).hand.len(), 3);
    }

    #[test]
    fn test_reveal_exhaustion_ends_chain() {
        let mut state = test_state(2, vec![card(0, Color::Blue, Value::Digit(1))]);
        let mut ranks = RankTracker::new(2);
        let mut chain = ChainDraw::new(PlayerId::new(0), PlayerId::new(1), Color::Green);

        assert_eq!(reveal_step(&mut state, &mut ranks, &mut chain), ChainStep::Continue);
        assert_eq!(reveal_step(&mut state, &mut ranks, &mut chain), ChainStep::Exhausted);
        assert_eq!(chain.drawn, 1);
    }

    #[test]
    fn test_reveal_mercy_elimination() {
        let deck: Vec<Card> = (0..3).map(|i| card(i, Color::Blue, Value::Digit(1))).collect();
        let mut state = test_state(3, deck);
        let mut ranks = RankTracker::new(3);
        for i in 0..30 {
            state
                .seat_mut(PlayerId::new(1))
                .hand
                .push(card(100 + i, Color::Red, Value::Digit(2)));
        }
        let mut chain = ChainDraw::new(PlayerId::new(0), PlayerId::new(1), Color::Green);

        // 31st card breaches the limit even though it did not match.
        assert_eq!(reveal_step(&mut state, &mut ranks, &mut chain), ChainStep::Eliminated);
        assert!(state.seat(PlayerId::new(1)).eliminated);
    }

    #[test]
    fn test_forward_moves_target_and_spends_vanishing() {
        let mut state = test_state(3, vec![]);
        let mut ranks = RankTracker::new(3);
        let seat1 = state.seat_mut(PlayerId::new(1));
        seat1.hand.push(card(1, Color::Wild, Value::Vanishing));
        seat1.hand.push(card(2, Color::Red, Value::Digit(4)));
        let mut chain = ChainDraw::new(PlayerId::new(0), PlayerId::new(1), Color::Green);

        let next = forward(&mut state, &mut ranks, &mut chain);

        assert_eq!(next, Some(PlayerId::new(2)));
        assert_eq!(chain.target, PlayerId::new(2));
        assert!(!state.seat(PlayerId::new(1)).holds_value(Value::Vanishing));
        // The wild on top stays visible; the spent card sits beneath it.
        assert_eq!(state.top_discard().id, CardId::new(999));
        assert_eq!(state.discard[1].value, Value::Vanishing);
    }

    #[test]
    fn test_forward_wrapping_to_origin_fizzles() {
        let mut state = test_state(2, vec![]);
        let mut ranks = RankTracker::new(2);
        let seat1 = state.seat_mut(PlayerId::new(1));
        seat1.hand.push(card(1, Color::Wild, Value::Vanishing));
        seat1.hand.push(card(2, Color::Red, Value::Digit(4)));
        let mut chain = ChainDraw::new(PlayerId::new(0), PlayerId::new(1), Color::Green);

        assert_eq!(forward(&mut state, &mut ranks, &mut chain), None);
    }

    #[test]
    fn test_forwarding_last_card_finishes_the_seat() {
        let mut state = test_state(3, vec![]);
        let mut ranks = RankTracker::new(3);
        state
            .seat_mut(PlayerId::new(1))
            .hand
            .push(card(1, Color::Wild, Value::Vanishing));
        let mut chain = ChainDraw::new(PlayerId::new(0), PlayerId::new(1), Color::Green);

        let next = forward(&mut state, &mut ranks, &mut chain);

        assert_eq!(next, Some(PlayerId::new(2)));
        let seat1 = state.seat(PlayerId::new(1));
        assert!(seat1.finished);
        assert_eq!(seat1.rank, Some(1));
    }
}
