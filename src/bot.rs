//! Built-in greedy bot.
//!
//! Pure decision functions over read-only controller state, plus thin
//! appliers that submit the chosen intent. The strategy is greedy and
//! deterministic: the first playable card wins, wilds paint the color
//! the bot holds most of, and ghost swaps chase the smallest opposing
//! hand. Determinism keeps replays reproducible from the seed alone.

use crate::cards::{Card, CardId, Color, Value};
use crate::core::PlayerId;
use crate::engine::{IntentError, MatchController, Phase, PlayOptions};

/// What the bot wants to do with its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BotAction {
    /// Play this card with these (fully specified) options.
    Play { card: CardId, options: PlayOptions },
    /// Nothing playable: draw.
    Draw,
}

/// How the bot answers a chain-draw alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainResponse {
    Accept,
    Evade,
}

/// Pick the turn action for a seat: the first playable card in hand
/// order, with all sub-decisions resolved up front, or a draw.
#[must_use]
pub fn choose_turn_action(ctrl: &MatchController, seat: PlayerId) -> BotAction {
    let ctx = ctrl.play_context();
    let hand = ctrl.hand(seat);

    for card in hand {
        if !ctx.can_play(card) {
            continue;
        }

        let options = match card.value {
            Value::Hybrid => {
                let Some(sacrifices) = pick_sacrifices(hand, card.id) else {
                    continue;
                };
                PlayOptions::fusion(preferred_color(hand), sacrifices)
            }
            Value::GhostSwap => {
                let Some(target) = smallest_opposing_hand(ctrl, seat) else {
                    continue;
                };
                PlayOptions::swap(target)
            }
            Value::Vanishing => PlayOptions::default(),
            _ if card.is_wild() => PlayOptions::color(preferred_color(hand)),
            _ => PlayOptions::default(),
        };

        return BotAction::Play {
            card: card.id,
            options,
        };
    }

    BotAction::Draw
}

/// Answer a chain-draw alert: evade when a Vanishing card is in hand,
/// otherwise accept and take the draws.
#[must_use]
pub fn choose_chain_response(hand: &[Card]) -> ChainResponse {
    if hand.iter().any(|c| c.value == Value::Vanishing) {
        ChainResponse::Evade
    } else {
        ChainResponse::Accept
    }
}

/// The suited color the hand holds most of; ties break in the fixed
/// suit order, and an all-wild hand defaults to red.
#[must_use]
pub fn preferred_color(hand: &[Card]) -> Color {
    let mut best = Color::SUITED[0];
    let mut best_count = 0usize;
    for color in Color::SUITED {
        let count = hand.iter().filter(|c| c.color == color).count();
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

/// First two cards in hand order other than the played one.
fn pick_sacrifices(hand: &[Card], played: CardId) -> Option<[CardId; 2]> {
    let mut others = hand.iter().filter(|c| c.id != played).map(|c| c.id);
    let first = others.next()?;
    let second = others.next()?;
    Some([first, second])
}

/// The active opponent with the fewest cards (first such seat on ties).
fn smallest_opposing_hand(ctrl: &MatchController, seat: PlayerId) -> Option<PlayerId> {
    PlayerId::all(ctrl.seat_count())
        .filter(|&s| s != seat && ctrl.seat(s).is_active())
        .min_by_key(|&s| ctrl.hand(s).len())
}

/// Decide and submit one turn intent for a bot seat.
pub fn take_turn(ctrl: &mut MatchController, seat: PlayerId) -> Result<(), IntentError> {
    match choose_turn_action(ctrl, seat) {
        BotAction::Play { card, options } => ctrl.play_card(seat, card, options),
        BotAction::Draw => ctrl.draw(seat),
    }
}

/// Decide and submit a chain-draw response for a bot seat, running an
/// accepted chain to completion.
pub fn respond_to_chain(ctrl: &mut MatchController, seat: PlayerId) -> Result<(), IntentError> {
    match choose_chain_response(ctrl.hand(seat)) {
        ChainResponse::Evade => ctrl.evade_chain_draw_with_vanish(seat),
        ChainResponse::Accept => {
            ctrl.accept_chain_draw(seat)?;
            while ctrl.phase() == Phase::ChainDrawInProgress {
                ctrl.advance_chain_draw()?;
            }
            Ok(())
        }
    }
}
