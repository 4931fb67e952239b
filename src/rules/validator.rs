//! Playability validation.
//!
//! `can_play` is the one legality predicate in the engine: pure, total,
//! and side-effect free. The controller consults it before committing a
//! play, the UI uses it to grey out cards, and the bot strategy uses it
//! to pick a move. All three see the same inputs.

use crate::cards::{Card, Color, Value};

/// Everything `can_play` needs to know about the table.
///
/// Borrowed from match state by the controller; built by hand in tests.
#[derive(Clone, Copy, Debug)]
pub struct PlayContext<'a> {
    /// Head of the discard pile.
    pub top_card: &'a Card,
    /// Color currently in effect (a played wild overrides its own color).
    pub active_color: Color,
    /// Accumulated, unresolved draw penalty.
    pub stack_count: u32,
    /// Once a wild-colored penalty extends the stack, only wild-colored
    /// cards may extend it further.
    pub black_chain: bool,
    /// Penalty of the last card that extended the stack.
    pub last_penalty: u32,
}

impl PlayContext<'_> {
    /// May `card` legally be placed now?
    #[must_use]
    pub fn can_play(&self, card: &Card) -> bool {
        can_play(
            card,
            self.top_card,
            self.active_color,
            self.stack_count,
            self.black_chain,
            self.last_penalty,
        )
    }
}

/// May `card` legally be placed on `top_card` in the current context?
///
/// Rules, in priority order:
/// 1. Vanishing is always playable (the escape valve, even under a stack).
/// 2. Under an open stack only penalty cards qualify, the chain may not
///    de-escalate, and a black chain restricts to wild-colored cards.
/// 3. Ghost-swap requires no open stack.
/// 4. Identical named actions match regardless of color.
/// 5. Standard matching: wild color, active color, or same primary value.
#[must_use]
pub fn can_play(
    card: &Card,
    top_card: &Card,
    active_color: Color,
    stack_count: u32,
    black_chain: bool,
    last_penalty: u32,
) -> bool {
    if card.value == Value::Vanishing {
        return true;
    }

    if stack_count > 0 {
        if !card.is_penalty() {
            return false;
        }
        if black_chain && !card.is_wild() {
            return false;
        }
        // Monotonic escalation: stacking "down" is illegal.
        return card.penalty_value() >= last_penalty;
    }

    if card.value == Value::GhostSwap {
        return true;
    }

    if card.value.pairs_with_itself() && card.value == top_card.value {
        return true;
    }

    card.is_wild() || card.color == active_color || card.value == top_card.value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn card(color: Color, value: Value) -> Card {
        Card::new(CardId::new(0), color, value)
    }

    fn plain_ctx(top: &Card, active: Color) -> PlayContext<'_> {
        PlayContext {
            top_card: top,
            active_color: active,
            stack_count: 0,
            black_chain: false,
            last_penalty: 0,
        }
    }

    #[test]
    fn test_color_match() {
        let top = card(Color::Red, Value::Digit(5));
        let ctx = plain_ctx(&top, Color::Red);

        assert!(ctx.can_play(&card(Color::Red, Value::Digit(9))));
        assert!(!ctx.can_play(&card(Color::Blue, Value::Digit(9))));
    }

    #[test]
    fn test_value_match_across_colors() {
        let top = card(Color::Red, Value::Digit(5));
        let ctx = plain_ctx(&top, Color::Red);

        assert!(ctx.can_play(&card(Color::Blue, Value::Digit(5))));
    }

    #[test]
    fn test_wild_always_matches_without_stack() {
        let top = card(Color::Green, Value::Digit(2));
        let ctx = plain_ctx(&top, Color::Green);

        assert!(ctx.can_play(&card(Color::Wild, Value::Wild)));
        assert!(ctx.can_play(&card(Color::Wild, Value::DrawFour)));
    }

    #[test]
    fn test_active_color_overrides_top_color() {
        // A wild on top set the active color to blue.
        let top = card(Color::Wild, Value::Wild);
        let ctx = plain_ctx(&top, Color::Blue);

        assert!(ctx.can_play(&card(Color::Blue, Value::Digit(3))));
        assert!(!ctx.can_play(&card(Color::Red, Value::Digit(3))));
    }

    #[test]
    fn test_vanishing_always_playable() {
        let top = card(Color::Red, Value::Digit(5));
        let vanish = card(Color::Wild, Value::Vanishing);

        // Even under a black-chain stack.
        let ctx = PlayContext {
            top_card: &top,
            active_color: Color::Red,
            stack_count: 10,
            black_chain: true,
            last_penalty: 10,
        };
        assert!(ctx.can_play(&vanish));
    }

    #[test]
    fn test_stack_requires_penalty_card() {
        let top = card(Color::Red, Value::DrawTwo);
        let ctx = PlayContext {
            top_card: &top,
            active_color: Color::Red,
            stack_count: 2,
            black_chain: false,
            last_penalty: 2,
        };

        assert!(!ctx.can_play(&card(Color::Red, Value::Digit(5))));
        assert!(ctx.can_play(&card(Color::Blue, Value::DrawTwo)));
    }

    #[test]
    fn test_stack_escalation_is_monotone() {
        let top = card(Color::Wild, Value::DrawFour);
        let ctx = PlayContext {
            top_card: &top,
            active_color: Color::Red,
            stack_count: 4,
            black_chain: false,
            last_penalty: 4,
        };

        // Equal is allowed, lower is not.
        assert!(ctx.can_play(&card(Color::Red, Value::DrawFour)));
        assert!(ctx.can_play(&card(Color::Wild, Value::DrawSix)));
        assert!(!ctx.can_play(&card(Color::Red, Value::DrawTwo)));
    }

    #[test]
    fn test_black_chain_restricts_to_wilds() {
        let top = card(Color::Wild, Value::DrawSix);
        let ctx = PlayContext {
            top_card: &top,
            active_color: Color::Red,
            stack_count: 6,
            black_chain: true,
            last_penalty: 6,
        };

        assert!(!ctx.can_play(&card(Color::Red, Value::DrawTen)));
        assert!(ctx.can_play(&card(Color::Wild, Value::DrawTen)));
    }

    #[test]
    fn test_ghost_swap_only_without_stack() {
        let top = card(Color::Red, Value::Digit(5));
        let swap = card(Color::Wild, Value::GhostSwap);

        assert!(plain_ctx(&top, Color::Red).can_play(&swap));

        let stacked = PlayContext {
            top_card: &top,
            active_color: Color::Red,
            stack_count: 2,
            black_chain: false,
            last_penalty: 2,
        };
        assert!(!stacked.can_play(&swap));
    }

    #[test]
    fn test_action_on_action() {
        let top = card(Color::Red, Value::Skip);
        let ctx = plain_ctx(&top, Color::Red);
        assert!(ctx.can_play(&card(Color::Blue, Value::Skip)));

        let top = card(Color::Green, Value::AllIn);
        let ctx = plain_ctx(&top, Color::Green);
        assert!(ctx.can_play(&card(Color::Yellow, Value::AllIn)));

        // Digits match by value, but not via the action-pair rule.
        let top = card(Color::Red, Value::Again);
        let ctx = plain_ctx(&top, Color::Red);
        assert!(ctx.can_play(&card(Color::Blue, Value::Again)));
        assert!(!ctx.can_play(&card(Color::Blue, Value::Skip)));
    }

    #[test]
    fn test_hybrid_counts_secondary_under_stack() {
        let top = card(Color::Red, Value::DrawTwo);
        let hybrid =
            Card::with_secondary(CardId::new(1), Color::Wild, Value::Hybrid, Value::DrawFour);

        let ctx = PlayContext {
            top_card: &top,
            active_color: Color::Red,
            stack_count: 2,
            black_chain: false,
            last_penalty: 2,
        };
        assert!(ctx.can_play(&hybrid));

        // But not against a larger last penalty.
        let ctx = PlayContext {
            top_card: &top,
            active_color: Color::Red,
            stack_count: 6,
            black_chain: false,
            last_penalty: 6,
        };
        assert!(!ctx.can_play(&hybrid));
    }
}
