//! Card identity, colors, values, and penalty derivation.
//!
//! Cards are immutable once created: a card is only ever removed from a
//! hand or appended to the discard pile. Fused plays carry their
//! sacrificed components as a nested list, so the composite forms a small
//! tagged tree (depth is bounded by the sacrifice rule, but penalty
//! computation recurses for robustness).

use serde::{Deserialize, Serialize};

/// Unique identity of one physical card in the built deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Card color. `Wild` cards take a chosen color when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
}

impl Color {
    /// The four suited colors, in canonical order.
    pub const SUITED: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Is this the wild color?
    #[must_use]
    pub fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Wild => "Wild",
        };
        write!(f, "{name}")
    }
}

/// Primary (or secondary) value of a card.
///
/// `Digit` covers the numerals 0-9; the rest are named actions. Which
/// values actually appear in a deck depends on the rule tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Digit(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    DrawFour,
    DrawSix,
    DrawTen,
    ReverseFour,
    Vanishing,
    GhostSwap,
    EliteReverse,
    Hybrid,
    AllFour,
    AllIn,
    Again,
}

impl Value {
    /// Penalty carried by this value alone (fixed tier table).
    #[must_use]
    pub fn base_penalty(self) -> u32 {
        match self {
            Value::DrawTwo => 2,
            Value::DrawFour | Value::ReverseFour | Value::AllFour => 4,
            Value::DrawSix => 6,
            Value::DrawTen => 10,
            _ => 0,
        }
    }

    /// Does this value flip the play direction?
    #[must_use]
    pub fn is_reverse_family(self) -> bool {
        matches!(self, Value::Reverse | Value::ReverseFour | Value::EliteReverse)
    }

    /// Values that may be played on an identical top value regardless of
    /// color (skip-on-skip, reverse-on-reverse, and so on).
    #[must_use]
    pub fn pairs_with_itself(self) -> bool {
        matches!(
            self,
            Value::Skip
                | Value::Reverse
                | Value::ReverseFour
                | Value::EliteReverse
                | Value::AllIn
                | Value::Again
        )
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Digit(n) => write!(f, "{n}"),
            Value::Skip => write!(f, "Skip"),
            Value::Reverse => write!(f, "Reverse"),
            Value::DrawTwo => write!(f, "Draw Two"),
            Value::Wild => write!(f, "Wild"),
            Value::DrawFour => write!(f, "Draw Four"),
            Value::DrawSix => write!(f, "Draw Six"),
            Value::DrawTen => write!(f, "Draw Ten"),
            Value::ReverseFour => write!(f, "Reverse Four"),
            Value::Vanishing => write!(f, "Vanishing"),
            Value::GhostSwap => write!(f, "Ghost Swap"),
            Value::EliteReverse => write!(f, "Elite Reverse"),
            Value::Hybrid => write!(f, "Hybrid"),
            Value::AllFour => write!(f, "All Four"),
            Value::AllIn => write!(f, "All In"),
            Value::Again => write!(f, "Again"),
        }
    }
}

/// One card.
///
/// `secondary` carries the embedded penalty add-on of composite values
/// (the Hybrid card ships with an embedded Draw Four). `components` is
/// empty for ordinary cards and holds the two sacrificed cards of a
/// fused play; sacrificed cards are physically out of the hand but
/// logically referenced here for record and animation purposes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: Color,
    pub value: Value,
    pub secondary: Option<Value>,
    pub components: Vec<Card>,
}

impl Card {
    /// Create a plain card.
    #[must_use]
    pub fn new(id: CardId, color: Color, value: Value) -> Self {
        Self {
            id,
            color,
            value,
            secondary: None,
            components: Vec::new(),
        }
    }

    /// Create a card with a secondary value (hybrid's embedded +4).
    #[must_use]
    pub fn with_secondary(id: CardId, color: Color, value: Value, secondary: Value) -> Self {
        Self {
            id,
            color,
            value,
            secondary: Some(secondary),
            components: Vec::new(),
        }
    }

    /// Attach sacrificed components, producing the fused composite.
    #[must_use]
    pub fn fused(mut self, components: Vec<Card>) -> Self {
        self.components = components;
        self
    }

    /// Is this card wild-colored?
    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.color.is_wild()
    }

    /// Penalty of this card alone: primary value plus the secondary
    /// add-on, components excluded.
    #[must_use]
    pub fn own_penalty(&self) -> u32 {
        let bonus = match self.secondary {
            Some(v) => v.base_penalty(),
            None => 0,
        };
        self.value.base_penalty() + bonus
    }

    /// Total penalty including fused components, recursively.
    #[must_use]
    pub fn penalty_value(&self) -> u32 {
        self.own_penalty() + self.components.iter().map(Card::penalty_value).sum::<u32>()
    }

    /// Does this card carry any draw penalty?
    #[must_use]
    pub fn is_penalty(&self) -> bool {
        self.penalty_value() > 0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.value)
    }
}
