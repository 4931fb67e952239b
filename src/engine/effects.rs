//! Consequence application for accepted plays.
//!
//! Once the validator accepts a card the resolver mutates match state:
//! penalty stacking, direction flips, forced draws, hand dumps, vanish
//! flags, and the finish/eliminate bookkeeping. Effects of a fused card
//! apply recursively over its components, in sequence.

use crate::cards::{Card, Value};
use crate::core::PlayerId;

use super::events::MatchEvent;
use super::ranking::RankTracker;
use super::state::MatchState;

/// What the controller needs to know after resolving a play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlayOutcome {
    /// Seats the sequencer advances past (1 for a plain play, more per
    /// skip card).
    pub seats_to_skip: usize,
    /// Again: the same seat takes another turn, no seat advance.
    pub extra_turn: bool,
}

/// Apply an accepted play's consequences.
///
/// The card has already left the hand and sits on the discard pile;
/// ghost-swap (which needs a chosen target) is handled by the caller
/// before this runs, and the chain-draw trigger is decided after.
pub(crate) fn resolve_play(
    state: &mut MatchState,
    ranks: &mut RankTracker,
    seat_id: PlayerId,
    card: &Card,
) -> PlayOutcome {
    let mut outcome = PlayOutcome {
        seats_to_skip: 1,
        extra_turn: false,
    };
    let mut penalty_total = 0u32;

    apply_card(state, ranks, seat_id, card, &mut outcome, &mut penalty_total);

    if penalty_total > 0 {
        state.stack_count += penalty_total;
        state.last_penalty = penalty_total;
    }

    // An all-in dump may have emptied the hand mid-resolution.
    let seat = state.seat(seat_id);
    if seat.hand.is_empty() && seat.is_active() {
        finish_seat(state, ranks, seat_id);
    }

    outcome
}

fn apply_card(
    state: &mut MatchState,
    ranks: &mut RankTracker,
    seat_id: PlayerId,
    card: &Card,
    outcome: &mut PlayOutcome,
    penalty_total: &mut u32,
) {
    let own = card.own_penalty();
    if own > 0 {
        *penalty_total += own;
        // A wild-colored penalty (other than the plain wild) locks the
        // stack to wild-colored extensions.
        if card.is_wild() && card.value != Value::Wild {
            state.black_chain = true;
        }
    }

    match card.value {
        Value::Skip => outcome.seats_to_skip += 1,
        v if v.is_reverse_family() => {
            state.direction = state.direction.flipped();
        }
        Value::AllFour => resolve_all_four(state, ranks, seat_id),
        Value::AllIn => {
            let color = card.color;
            let seat = state.seat_mut(seat_id);
            seat.hand.retain(|c| c.color != color);
        }
        Value::Again => outcome.extra_turn = true,
        Value::Vanishing => {
            state.seat_mut(seat_id).vanished = true;
            state.event(MatchEvent::SeatVanished { seat: seat_id });
        }
        // Ghost-swap needs a chosen target; as a sacrificed component it
        // has none and is inert. The plain wild's chain trigger is a
        // top-level decision, not a per-card effect.
        _ => {}
    }

    for component in &card.components {
        apply_card(state, ranks, seat_id, component, outcome, penalty_total);
    }
}

/// Every other competing seat draws 4, each mercy-checked on its own.
fn resolve_all_four(state: &mut MatchState, ranks: &mut RankTracker, seat_id: PlayerId) {
    let others: Vec<PlayerId> = state.active_seats().filter(|&s| s != seat_id).collect();

    for other in others {
        draw_cards(state, other, 4, true);
        check_mercy(state, ranks, other);
    }
}

/// Draw up to `count` cards into a seat's hand.
///
/// Deck exhaustion degrades gracefully: the draw is cut short and play
/// continues (no mid-resolution refill).
pub(crate) fn draw_cards(
    state: &mut MatchState,
    seat_id: PlayerId,
    count: usize,
    penalty: bool,
) -> usize {
    let mut drawn = 0;
    for _ in 0..count {
        let Some(card) = state.draw_one() else { break };
        state.seat_mut(seat_id).hand.push(card);
        drawn += 1;
    }

    if drawn > 0 {
        state.event(MatchEvent::CardsDrawn {
            seat: seat_id,
            count: drawn,
            penalty,
        });
    }
    drawn
}

/// Eliminate the seat if its hand breached the mercy limit.
///
/// Returns true when an elimination happened.
pub(crate) fn check_mercy(state: &mut MatchState, ranks: &mut RankTracker, seat_id: PlayerId) -> bool {
    let Some(limit) = state.rule_set.mercy_limit() else {
        return false;
    };

    let seat = state.seat(seat_id);
    if !seat.is_active() || seat.hand.len() <= limit {
        return false;
    }

    eliminate_seat(state, ranks, seat_id);
    true
}

/// Flag a seat finished and hand it the next rank from the top.
pub(crate) fn finish_seat(state: &mut MatchState, ranks: &mut RankTracker, seat_id: PlayerId) {
    let rank = ranks.assign_top();
    let seat = state.seat_mut(seat_id);
    seat.finished = true;
    seat.rank = Some(rank);
    state.event(MatchEvent::SeatFinished {
        seat: seat_id,
        rank,
    });
}

/// Flag a seat eliminated: its hand is shuffled back into the deck and
/// it takes the next rank from the bottom.
pub(crate) fn eliminate_seat(state: &mut MatchState, ranks: &mut RankTracker, seat_id: PlayerId) {
    let rank = ranks.assign_bottom();

    let seat = state.seat_mut(seat_id);
    seat.eliminated = true;
    seat.rank = Some(rank);
    let hand = std::mem::take(&mut seat.hand);

    state.deck.extend(hand);
    let mut deck = std::mem::take(&mut state.deck);
    state.rng.shuffle(&mut deck);
    state.deck = deck;

    state.event(MatchEvent::SeatEliminated {
        seat: seat_id,
        rank,
    });
}
