//! Match configuration supplied by the lobby layer.
//!
//! The lobby collaborator hands the engine a `MatchConfig`: which rule
//! set to play, how many cards to deal, and the roster of participants
//! with their display metadata. The engine accepts the roster
//! structurally and never inspects display fields.

use serde::{Deserialize, Serialize};

/// The three escalating rule tiers.
///
/// Each tier changes the deck composition and unlocks rules:
/// - `Classic`: numerals, skip/reverse/draw-two, wild and wild-draw-four.
/// - `NoMercy`: bigger penalties, direction-reversing wilds, hand-dump
///   and extra-turn actions, the 30-card mercy limit, and the chain-draw
///   protocol on the plain wild.
/// - `Superior`: NoMercy plus vanishing, ghost-swap, elite-reverse,
///   hybrid/fusion and draw-on-everyone wilds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleSet {
    Classic,
    NoMercy,
    Superior,
}

impl RuleSet {
    /// The hand-size mercy limit, if this tier enforces one.
    ///
    /// A hand strictly larger than this eliminates the player.
    #[must_use]
    pub fn mercy_limit(self) -> Option<usize> {
        match self {
            RuleSet::Classic => None,
            RuleSet::NoMercy | RuleSet::Superior => Some(30),
        }
    }

    /// Whether the plain wild triggers the chain-draw sub-protocol.
    #[must_use]
    pub fn chain_draw_enabled(self) -> bool {
        !matches!(self, RuleSet::Classic)
    }
}

impl std::fmt::Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleSet::Classic => "Classic",
            RuleSet::NoMercy => "No Mercy",
            RuleSet::Superior => "Superior",
        };
        write!(f, "{name}")
    }
}

/// Display metadata for one participant, human or bot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Lobby-assigned identifier (opaque to the engine).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar URL or token.
    pub avatar: String,
    /// Whether this seat is driven by the bot strategy.
    pub is_bot: bool,
}

impl PlayerProfile {
    /// Create a human profile.
    pub fn human(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: String::new(),
            is_bot: false,
        }
    }

    /// Create a bot profile.
    pub fn bot(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: String::new(),
            is_bot: true,
        }
    }

    /// Set the avatar.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }
}

/// Bounds on the configurable starting hand size.
pub const MIN_HAND_SIZE: usize = 2;
/// Upper bound on the configurable starting hand size.
pub const MAX_HAND_SIZE: usize = 20;

/// Everything needed to start one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Which rule tier to play.
    pub rule_set: RuleSet,
    /// Cards dealt to each seat at the start (clamped to 2..=20).
    pub starting_hand_size: usize,
    /// Participants in seating order.
    pub roster: Vec<PlayerProfile>,
    /// RNG seed for the whole match.
    pub seed: u64,
}

impl MatchConfig {
    /// Create a config with the default 7-card deal.
    pub fn new(rule_set: RuleSet, roster: Vec<PlayerProfile>, seed: u64) -> Self {
        Self {
            rule_set,
            starting_hand_size: 7,
            roster,
            seed,
        }
    }

    /// Set the starting hand size, clamped to the legal 2..=20 range.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size.clamp(MIN_HAND_SIZE, MAX_HAND_SIZE);
        self
    }
}
