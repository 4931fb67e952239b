//! Match state: seats, piles, and the table context.
//!
//! `MatchState` is owned exclusively by the `MatchController`; everything
//! else reads it. There is no locking because there is no second writer.
//!
//! ## Public view
//!
//! Opponent hand contents are private. The UI renders from `MatchView`
//! (hand sizes, flags, ranks) plus the event log; a seat's own hand is
//! available through the controller.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Color, Value};
use crate::core::{MatchRng, PlayerId, PlayerProfile, RuleSet, SeatMap};
use crate::rules::PlayContext;

use super::events::MatchEvent;

/// Deck size below which the discard pile is reshuffled underneath,
/// between two intents, never mid-resolution.
pub(crate) const LOW_DECK_THRESHOLD: usize = 8;

/// Play direction around the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    Counterclockwise,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::Counterclockwise,
            Direction::Counterclockwise => Direction::Clockwise,
        }
    }

    /// Step one seat from `index` around a table of `len` seats.
    #[must_use]
    pub fn step(self, index: usize, len: usize) -> usize {
        match self {
            Direction::Clockwise => (index + 1) % len,
            Direction::Counterclockwise => (index + len - 1) % len,
        }
    }
}

/// Controller phase: exactly one of these at a time.
///
/// The sub-decision phases freeze the match; no turn advances and no
/// other seat may act until the pending decision resolves or is
/// cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the turn holder to play or draw.
    AwaitingTurn,
    /// A wild play is pending its color choice.
    AwaitingColorChoice,
    /// A hybrid play is pending its two sacrifice cards.
    AwaitingFusionSacrifice,
    /// A ghost-swap play is pending its target seat.
    AwaitingSwapTarget,
    /// The chain-draw alert is waiting on accept-or-evade.
    AwaitingChainDrawDecision,
    /// An accepted chain draw is revealing cards one at a time.
    ChainDrawInProgress,
    /// The round ended; only the summary remains.
    RoundOver,
}

/// One seat at the table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Seat {
    /// Display metadata from the roster.
    pub profile: PlayerProfile,
    /// Hand order is irrelevant to the rules but stable for display.
    pub hand: Vec<Card>,
    /// Breached the mercy limit.
    pub eliminated: bool,
    /// Emptied the hand.
    pub finished: bool,
    /// One-round pass-through; consumed on the turn it would have taken.
    pub vanished: bool,
    /// Finishing rank, assigned exactly once. 1 = best.
    pub rank: Option<u8>,
}

impl Seat {
    pub(crate) fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            hand: Vec::new(),
            eliminated: false,
            finished: false,
            vanished: false,
            rank: None,
        }
    }

    /// Still competing: neither eliminated nor finished.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.eliminated && !self.finished
    }

    /// Find a card in the hand.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }

    /// Does the hand contain a card of the given value?
    #[must_use]
    pub fn holds_value(&self, value: Value) -> bool {
        self.hand.iter().any(|c| c.value == value)
    }

    /// Remove a card from the hand by id.
    pub(crate) fn take_card(&mut self, id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(pos))
    }

    /// Remove one card of the given value, if any.
    pub(crate) fn take_value(&mut self, value: Value) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.value == value)?;
        Some(self.hand.remove(pos))
    }
}

/// Complete mutable state of one match.
#[derive(Clone, Debug)]
pub struct MatchState {
    /// Draw pile; the top is the end of the vec.
    pub(crate) deck: Vec<Card>,
    /// Discard pile; index 0 is the active card.
    pub(crate) discard: Vec<Card>,
    pub(crate) seats: SeatMap<Seat>,
    /// Seat currently holding the turn.
    pub(crate) turn: PlayerId,
    pub(crate) direction: Direction,
    pub(crate) active_color: Color,
    /// Accumulated unresolved draw penalty.
    pub(crate) stack_count: u32,
    pub(crate) black_chain: bool,
    /// Penalty of the last card that extended the stack.
    pub(crate) last_penalty: u32,
    pub(crate) phase: Phase,
    pub(crate) rule_set: RuleSet,
    pub(crate) rng: MatchRng,
    pub(crate) events: Vector<MatchEvent>,
}

impl MatchState {
    pub(crate) fn new(
        rule_set: RuleSet,
        roster: Vec<PlayerProfile>,
        deck: Vec<Card>,
        rng: MatchRng,
    ) -> Self {
        let seats = SeatMap::new(roster.len(), |seat| Seat::new(roster[seat.index()].clone()));
        Self {
            deck,
            discard: Vec::new(),
            seats,
            turn: PlayerId::new(0),
            direction: Direction::Clockwise,
            active_color: Color::Red,
            stack_count: 0,
            black_chain: false,
            last_penalty: 0,
            phase: Phase::AwaitingTurn,
            rule_set,
            rng,
            events: Vector::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn seat(&self, id: PlayerId) -> &Seat {
        &self.seats[id]
    }

    pub(crate) fn seat_mut(&mut self, id: PlayerId) -> &mut Seat {
        &mut self.seats[id]
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Seats still competing, in seating order.
    pub fn active_seats(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seats
            .iter()
            .filter(|(_, s)| s.is_active())
            .map(|(id, _)| id)
    }

    /// Head of the discard pile.
    ///
    /// The discard pile is seeded before the first intent, so a head
    /// always exists while the match runs.
    #[must_use]
    pub fn top_discard(&self) -> &Card {
        &self.discard[0]
    }

    /// Validator context for the current table.
    #[must_use]
    pub fn play_context(&self) -> PlayContext<'_> {
        PlayContext {
            top_card: self.top_discard(),
            active_color: self.active_color,
            stack_count: self.stack_count,
            black_chain: self.black_chain,
            last_penalty: self.last_penalty,
        }
    }

    // === Mutation helpers ===

    /// Draw one card off the deck, or `None` when it is exhausted.
    pub(crate) fn draw_one(&mut self) -> Option<Card> {
        self.deck.pop()
    }

    /// Place a played card on top of the discard pile.
    pub(crate) fn place_on_discard(&mut self, card: Card) {
        self.discard.insert(0, card);
    }

    /// Reshuffle the discard pile (keeping its top card) under the deck
    /// when the deck runs low. Returns how many cards were recycled.
    pub(crate) fn refill_if_low(&mut self) -> Option<usize> {
        if self.deck.len() >= LOW_DECK_THRESHOLD || self.discard.len() <= 1 {
            return None;
        }

        let recycled: Vec<Card> = self.discard.drain(1..).collect();
        let count = recycled.len();
        // Recycled cards go under the remaining deck, then the whole
        // pile is shuffled; composites dissolve back into their parts.
        let mut flattened = Vec::with_capacity(count);
        for card in recycled {
            flatten_card(card, &mut flattened);
        }
        self.deck.splice(0..0, flattened);
        self.rng.shuffle(&mut self.deck);

        self.events.push_back(MatchEvent::DeckRefilled { count });
        Some(count)
    }

    pub(crate) fn event(&mut self, event: MatchEvent) {
        self.events.push_back(event);
    }

    /// Append-only event log since match start.
    #[must_use]
    pub fn events(&self) -> &Vector<MatchEvent> {
        &self.events
    }

    /// Serializable public snapshot.
    #[must_use]
    pub fn view(&self) -> MatchView {
        MatchView {
            rule_set: self.rule_set,
            phase: self.phase,
            turn: self.turn,
            direction: self.direction,
            active_color: self.active_color,
            stack_count: self.stack_count,
            black_chain: self.black_chain,
            top_card: self.discard.first().cloned(),
            deck_size: self.deck.len(),
            seats: self
                .seats
                .iter()
                .map(|(id, s)| SeatView {
                    seat: id,
                    id: s.profile.id.clone(),
                    name: s.profile.name.clone(),
                    avatar: s.profile.avatar.clone(),
                    is_bot: s.profile.is_bot,
                    hand_size: s.hand.len(),
                    eliminated: s.eliminated,
                    finished: s.finished,
                    vanished: s.vanished,
                    rank: s.rank,
                })
                .collect(),
        }
    }
}

/// A fused card dissolves into its physical parts when recycled.
fn flatten_card(mut card: Card, out: &mut Vec<Card>) {
    let components = std::mem::take(&mut card.components);
    out.push(card);
    for component in components {
        flatten_card(component, out);
    }
}

/// Public, per-seat information (no opponent hand contents).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: PlayerId,
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub is_bot: bool,
    pub hand_size: usize,
    pub eliminated: bool,
    pub finished: bool,
    pub vanished: bool,
    pub rank: Option<u8>,
}

/// Public snapshot of the whole table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchView {
    pub rule_set: RuleSet,
    pub phase: Phase,
    pub turn: PlayerId,
    pub direction: Direction,
    pub active_color: Color,
    pub stack_count: u32,
    pub black_chain: bool,
    pub top_card: Option<Card>,
    pub deck_size: usize,
    pub seats: Vec<SeatView>,
}
