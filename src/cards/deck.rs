//! Deck construction per rule tier.
//!
//! Each tier has an exact multiset composition:
//! - Classic: 108 cards (the familiar base game)
//! - No Mercy: 152 cards (heavier penalties, more actions)
//! - Superior: 188 cards (No Mercy plus the specialty wilds)
//!
//! The built deck is shuffled with the match RNG; the controller treats
//! it as a stack and draws from the end.

use crate::core::{MatchRng, RuleSet};

use super::card::{Card, CardId, Color, Value};

struct DeckBuilder {
    cards: Vec<Card>,
    next_id: u32,
}

impl DeckBuilder {
    fn new() -> Self {
        Self {
            cards: Vec::new(),
            next_id: 0,
        }
    }

    fn push(&mut self, color: Color, value: Value) {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        self.cards.push(Card::new(id, color, value));
    }

    fn push_n(&mut self, count: usize, color: Color, value: Value) {
        for _ in 0..count {
            self.push(color, value);
        }
    }

    fn push_with_secondary(&mut self, color: Color, value: Value, secondary: Value) {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        self.cards.push(Card::with_secondary(id, color, value, secondary));
    }
}

/// Build and shuffle the deck for a rule tier.
#[must_use]
pub fn build_deck(rule_set: RuleSet, rng: &mut MatchRng) -> Vec<Card> {
    let mut builder = DeckBuilder::new();

    match rule_set {
        RuleSet::Classic => build_classic(&mut builder),
        RuleSet::NoMercy => build_escalated(&mut builder, false),
        RuleSet::Superior => build_escalated(&mut builder, true),
    }

    let mut deck = builder.cards;
    rng.shuffle(&mut deck);
    deck
}

/// Per color: one 0, two each of 1-9, two each of draw-two/skip/reverse.
/// Plus four plain wilds and four wild draw-fours.
fn build_classic(b: &mut DeckBuilder) {
    for color in Color::SUITED {
        b.push(color, Value::Digit(0));
        for digit in 1..=9 {
            b.push_n(2, color, Value::Digit(digit));
        }
        b.push_n(2, color, Value::DrawTwo);
        b.push_n(2, color, Value::Skip);
        b.push_n(2, color, Value::Reverse);
    }

    b.push_n(4, Color::Wild, Value::Wild);
    b.push_n(4, Color::Wild, Value::DrawFour);
}

/// The shared No Mercy base; `superior` adds the specialty wilds on top.
fn build_escalated(b: &mut DeckBuilder, superior: bool) {
    for color in Color::SUITED {
        for digit in 0..=9 {
            b.push_n(2, color, Value::Digit(digit));
        }
        b.push_n(2, color, Value::DrawTwo);
        b.push_n(2, color, Value::DrawFour);
        b.push_n(2, color, Value::Reverse);
        b.push_n(4, color, Value::Skip);
        b.push_n(2, color, Value::AllIn);
        b.push_n(2, color, Value::Again);
    }

    b.push_n(4, Color::Wild, Value::Wild);
    b.push_n(4, Color::Wild, Value::ReverseFour);
    b.push_n(4, Color::Wild, Value::DrawSix);
    b.push_n(4, Color::Wild, Value::DrawTen);

    if superior {
        b.push_n(8, Color::Wild, Value::Vanishing);
        b.push_n(8, Color::Wild, Value::GhostSwap);
        b.push_n(6, Color::Wild, Value::EliteReverse);
        for _ in 0..8 {
            b.push_with_secondary(Color::Wild, Value::Hybrid, Value::DrawFour);
        }
        b.push_n(6, Color::Wild, Value::AllFour);
    }
}

/// Total card count for a rule tier's deck.
#[must_use]
pub fn deck_size(rule_set: RuleSet) -> usize {
    match rule_set {
        RuleSet::Classic => 108,
        RuleSet::NoMercy => 152,
        RuleSet::Superior => 188,
    }
}
