//! The match controller: the single writer of match state.
//!
//! Frontends and bots submit *intents* (play, draw, the sub-decisions,
//! chain-draw responses); the controller validates each against the
//! current phase and the table rules, applies it atomically, and
//! appends the resulting events. A rejected intent leaves the state
//! untouched.
//!
//! ## Phases
//!
//! A play that still needs input (a wild's color, a ghost-swap target,
//! a hybrid's sacrifices) parks as a pending play and moves the phase
//! to the matching `Awaiting*` sub-decision; the table is frozen until
//! the same seat completes or cancels it. The chain-draw protocol has
//! its own two phases, driven by `accept`/`evade` and then one
//! `advance_chain_draw` call per reveal.

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cards::{build_deck, Card, CardId, Color, Value};
use crate::core::{MatchConfig, MatchRng, PlayerId, RuleSet, MAX_HAND_SIZE, MIN_HAND_SIZE};
use crate::rules::PlayContext;

use super::chain::{self, ChainDraw};
use super::effects;
use super::error::IntentError;
use super::events::MatchEvent;
use super::ranking::RankTracker;
use super::state::{Direction, MatchState, MatchView, Phase, Seat};
use super::turn;

/// Optional inputs accompanying a play intent.
///
/// Leave a field `None` to be prompted: the controller parks the play
/// and enters the matching sub-decision phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayOptions {
    /// Color a wild play paints the table (not asked for vanishing or
    /// ghost-swap plays).
    pub chosen_color: Option<Color>,
    /// Seat to exchange hands with (ghost-swap only).
    pub swap_target: Option<PlayerId>,
    /// Two hand cards to fuse under a hybrid play.
    pub fusion_sacrifices: Option<SmallVec<[CardId; 2]>>,
}

impl PlayOptions {
    /// Options carrying only a color choice.
    #[must_use]
    pub fn color(color: Color) -> Self {
        Self {
            chosen_color: Some(color),
            ..Self::default()
        }
    }

    /// Options carrying only a swap target.
    #[must_use]
    pub fn swap(target: PlayerId) -> Self {
        Self {
            swap_target: Some(target),
            ..Self::default()
        }
    }

    /// Options for a fully specified fusion play.
    #[must_use]
    pub fn fusion(color: Color, sacrifices: [CardId; 2]) -> Self {
        Self {
            chosen_color: Some(color),
            swap_target: None,
            fusion_sacrifices: Some(SmallVec::from_slice(&sacrifices)),
        }
    }
}

/// A play waiting on a sub-decision.
#[derive(Clone, Debug)]
struct PendingPlay {
    seat: PlayerId,
    card: CardId,
    options: PlayOptions,
}

/// Owns one match from deal to final ranks.
#[derive(Clone, Debug)]
pub struct MatchController {
    state: MatchState,
    ranks: RankTracker,
    pending: Option<PendingPlay>,
    chain: Option<ChainDraw>,
    /// Lobby id -> seat, for frontends addressing players by roster id.
    roster_index: FxHashMap<String, PlayerId>,
}

impl MatchController {
    /// Deal a new match: build the deck, seed the discard pile with the
    /// first non-wild card, and deal every seat its starting hand.
    ///
    /// # Panics
    ///
    /// Panics if the roster has fewer than 2 or more than 16 seats.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let seat_count = config.roster.len();
        assert!(
            (2..=16).contains(&seat_count),
            "A match takes 2 to 16 players"
        );

        let mut rng = MatchRng::new(config.seed);
        let mut deck = build_deck(config.rule_set, &mut rng);

        // Wilds drawn for the opening card go back under the deck.
        let first = loop {
            match deck.pop() {
                Some(card) if card.is_wild() => deck.insert(0, card),
                Some(card) => break card,
                None => unreachable!("every deck contains non-wild cards"),
            }
        };

        let per_seat = config
            .starting_hand_size
            .clamp(MIN_HAND_SIZE, MAX_HAND_SIZE)
            .min(deck.len() / seat_count);

        let roster_index = config
            .roster
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), PlayerId::new(i as u8)))
            .collect();

        let mut state = MatchState::new(config.rule_set, config.roster, deck, rng);
        state.active_color = first.color;
        state.place_on_discard(first);

        for _ in 0..per_seat {
            for seat in PlayerId::all(seat_count) {
                if let Some(card) = state.draw_one() {
                    state.seat_mut(seat).hand.push(card);
                }
            }
        }

        state.event(MatchEvent::TurnStarted {
            seat: PlayerId::new(0),
        });

        Self {
            state,
            ranks: RankTracker::new(seat_count),
            pending: None,
            chain: None,
            roster_index,
        }
    }

    // === Turn intents ===

    /// Play a card from the acting seat's hand.
    ///
    /// If the card needs more input than `options` carries, the play is
    /// parked and the phase moves to the matching sub-decision; nothing
    /// is committed until the decision lands.
    pub fn play_card(
        &mut self,
        seat: PlayerId,
        card: CardId,
        options: PlayOptions,
    ) -> Result<(), IntentError> {
        self.ensure_turn_phase()?;
        if seat != self.state.turn {
            return Err(IntentError::NotYourTurn);
        }
        let Some(found) = self.state.seat(seat).card(card) else {
            return Err(IntentError::UnknownCard);
        };
        if !self.state.play_context().can_play(found) {
            return Err(IntentError::IllegalPlay);
        }

        let value = found.value;
        let wild = found.is_wild();
        let needs_color = wild && !matches!(value, Value::Vanishing | Value::GhostSwap);

        if value == Value::Hybrid {
            if self.state.seat(seat).hand.len() < 3 {
                return Err(IntentError::NotEnoughSacrifices);
            }
            match &options.fusion_sacrifices {
                Some(s) => self.validate_sacrifices(seat, card, s)?,
                None => {
                    return self.park(seat, card, options, Phase::AwaitingFusionSacrifice);
                }
            }
        }

        if value == Value::GhostSwap {
            match options.swap_target {
                Some(target) => self.validate_swap_target(seat, target)?,
                None => {
                    return self.park(seat, card, options, Phase::AwaitingSwapTarget);
                }
            }
        }

        if needs_color {
            match options.chosen_color {
                Some(color) if !color.is_wild() => {}
                Some(_) => return Err(IntentError::InvalidTarget),
                None => {
                    return self.park(seat, card, options, Phase::AwaitingColorChoice);
                }
            }
        }

        self.commit_play(seat, card, options)
    }

    /// Draw instead of playing: one card, or the whole accumulated
    /// penalty stack if one is open. Clears the stack either way and
    /// passes the turn.
    pub fn draw(&mut self, seat: PlayerId) -> Result<(), IntentError> {
        self.ensure_turn_phase()?;
        if seat != self.state.turn {
            return Err(IntentError::NotYourTurn);
        }

        let penalty = self.state.stack_count > 0;
        let count = if penalty {
            self.state.stack_count as usize
        } else {
            1
        };

        effects::draw_cards(&mut self.state, seat, count, penalty);
        self.state.stack_count = 0;
        self.state.black_chain = false;
        self.state.last_penalty = 0;
        effects::check_mercy(&mut self.state, &mut self.ranks, seat);

        self.advance_and_close(seat, 1, false);
        Ok(())
    }

    // === Sub-decision intents ===

    /// Supply the color for a parked wild play, committing it.
    pub fn choose_color(&mut self, seat: PlayerId, color: Color) -> Result<(), IntentError> {
        if self.state.phase != Phase::AwaitingColorChoice {
            return Err(self.phase_error());
        }
        if color.is_wild() {
            return Err(IntentError::InvalidTarget);
        }
        let Some(mut pending) = self.pending.take() else {
            return Err(IntentError::WrongPhase);
        };
        if pending.seat != seat {
            self.pending = Some(pending);
            return Err(IntentError::NotYourTurn);
        }

        pending.options.chosen_color = Some(color);
        self.commit_play(pending.seat, pending.card, pending.options)
    }

    /// Supply the target for a parked ghost-swap play, committing it.
    pub fn choose_swap_target(
        &mut self,
        seat: PlayerId,
        target: PlayerId,
    ) -> Result<(), IntentError> {
        if self.state.phase != Phase::AwaitingSwapTarget {
            return Err(self.phase_error());
        }
        let Some(mut pending) = self.pending.take() else {
            return Err(IntentError::WrongPhase);
        };
        if pending.seat != seat {
            self.pending = Some(pending);
            return Err(IntentError::NotYourTurn);
        }
        if let Err(e) = self.validate_swap_target(seat, target) {
            self.pending = Some(pending);
            return Err(e);
        }

        pending.options.swap_target = Some(target);
        self.commit_play(pending.seat, pending.card, pending.options)
    }

    /// Supply the two sacrifices for a parked hybrid play. The play
    /// still needs a color afterwards unless one was given up front.
    pub fn choose_fusion_sacrifices(
        &mut self,
        seat: PlayerId,
        sacrifices: [CardId; 2],
    ) -> Result<(), IntentError> {
        if self.state.phase != Phase::AwaitingFusionSacrifice {
            return Err(self.phase_error());
        }
        let Some(mut pending) = self.pending.take() else {
            return Err(IntentError::WrongPhase);
        };
        if pending.seat != seat {
            self.pending = Some(pending);
            return Err(IntentError::NotYourTurn);
        }
        if let Err(e) = self.validate_sacrifices(seat, pending.card, &sacrifices) {
            self.pending = Some(pending);
            return Err(e);
        }

        pending.options.fusion_sacrifices = Some(SmallVec::from_slice(&sacrifices));
        if pending.options.chosen_color.is_none() {
            self.pending = Some(pending);
            self.state.phase = Phase::AwaitingColorChoice;
            return Ok(());
        }
        self.commit_play(pending.seat, pending.card, pending.options)
    }

    /// Abandon a parked play and return to the open turn.
    pub fn cancel_pending(&mut self, seat: PlayerId) -> Result<(), IntentError> {
        if !matches!(
            self.state.phase,
            Phase::AwaitingColorChoice | Phase::AwaitingSwapTarget | Phase::AwaitingFusionSacrifice
        ) {
            return Err(self.phase_error());
        }
        match &self.pending {
            Some(pending) if pending.seat == seat => {
                self.pending = None;
                self.state.phase = Phase::AwaitingTurn;
                Ok(())
            }
            Some(_) => Err(IntentError::NotYourTurn),
            None => Err(IntentError::WrongPhase),
        }
    }

    // === Chain-draw intents ===

    /// Accept the chain-draw alert; reveals then proceed one
    /// [`advance_chain_draw`](Self::advance_chain_draw) call at a time.
    pub fn accept_chain_draw(&mut self, seat: PlayerId) -> Result<(), IntentError> {
        self.alerted_chain(seat)?;
        self.state.phase = Phase::ChainDrawInProgress;
        Ok(())
    }

    /// Reveal the next chain-draw card. Call repeatedly (once per
    /// animation frame, or in a loop) until the phase leaves
    /// [`Phase::ChainDrawInProgress`].
    pub fn advance_chain_draw(&mut self) -> Result<(), IntentError> {
        if self.state.phase != Phase::ChainDrawInProgress {
            return Err(self.phase_error());
        }
        let Some(mut chain) = self.chain else {
            return Err(IntentError::WrongPhase);
        };

        let step = chain::reveal_step(&mut self.state, &mut self.ranks, &mut chain);
        if step.is_terminal() {
            self.state.event(MatchEvent::ChainDrawEnded {
                seat: chain.target,
                drawn: chain.drawn,
            });
            self.chain = None;
            self.advance_and_close(chain.target, 1, false);
        } else {
            self.chain = Some(chain);
        }
        Ok(())
    }

    /// Spend a Vanishing card to pass the alert to the next seat. If
    /// the alert would wrap back to its origin, the chain fizzles and
    /// nobody draws.
    pub fn evade_chain_draw_with_vanish(&mut self, seat: PlayerId) -> Result<(), IntentError> {
        let mut chain = self.alerted_chain(seat)?;
        if !self.state.seat(seat).holds_value(Value::Vanishing) {
            return Err(IntentError::NoVanishingCard);
        }

        match chain::forward(&mut self.state, &mut self.ranks, &mut chain) {
            Some(_) => {
                self.chain = Some(chain);
                Ok(())
            }
            None => {
                self.state.event(MatchEvent::ChainDrawFizzled {
                    origin: chain.origin,
                });
                self.chain = None;
                self.advance_and_close(chain.origin, 1, false);
                Ok(())
            }
        }
    }

    /// Terminate the match immediately. All further intents are
    /// rejected; unassigned ranks stay unassigned.
    pub fn abort(&mut self) {
        if self.state.phase == Phase::RoundOver {
            return;
        }
        self.pending = None;
        self.chain = None;
        self.state.phase = Phase::RoundOver;
        self.state.event(MatchEvent::MatchAborted);
    }

    // === Accessors ===

    /// Current controller phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Seat holding the turn.
    #[must_use]
    pub fn current_seat(&self) -> PlayerId {
        self.state.turn
    }

    /// Color the table is currently painted.
    #[must_use]
    pub fn active_color(&self) -> Color {
        self.state.active_color
    }

    /// Play direction around the table.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Accumulated unresolved draw penalty.
    #[must_use]
    pub fn stack_count(&self) -> u32 {
        self.state.stack_count
    }

    /// Is the open stack locked to wild-colored extensions?
    #[must_use]
    pub fn black_chain(&self) -> bool {
        self.state.black_chain
    }

    /// Rule tier this match plays under.
    #[must_use]
    pub fn rule_set(&self) -> RuleSet {
        self.state.rule_set
    }

    /// A seat's full record (hand included; callers enforce privacy).
    #[must_use]
    pub fn seat(&self, id: PlayerId) -> &Seat {
        self.state.seat(id)
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.state.seat_count()
    }

    /// A seat's hand, in stable display order.
    #[must_use]
    pub fn hand(&self, seat: PlayerId) -> &[Card] {
        &self.state.seat(seat).hand
    }

    /// Head of the discard pile.
    #[must_use]
    pub fn top_discard(&self) -> &Card {
        self.state.top_discard()
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.state.deck.len()
    }

    /// Height of the discard pile (fused cards count once).
    #[must_use]
    pub fn discard_size(&self) -> usize {
        self.state.discard.len()
    }

    /// Validator context for the current table.
    #[must_use]
    pub fn play_context(&self) -> PlayContext<'_> {
        self.state.play_context()
    }

    /// Ids of every card the seat could legally play right now.
    #[must_use]
    pub fn legal_plays(&self, seat: PlayerId) -> Vec<CardId> {
        let ctx = self.state.play_context();
        self.state
            .seat(seat)
            .hand
            .iter()
            .filter(|card| ctx.can_play(card))
            .map(|card| card.id)
            .collect()
    }

    /// Resolve a lobby roster id to its seat.
    #[must_use]
    pub fn seat_by_roster_id(&self, id: &str) -> Option<PlayerId> {
        self.roster_index.get(id).copied()
    }

    /// Seat currently facing a chain-draw alert, if one is open.
    #[must_use]
    pub fn chain_target(&self) -> Option<PlayerId> {
        self.chain.map(|c| c.target)
    }

    /// Color an open chain draw is hunting for.
    #[must_use]
    pub fn chain_color(&self) -> Option<Color> {
        self.chain.map(|c| c.color)
    }

    /// Seat whose play is parked on a sub-decision.
    #[must_use]
    pub fn pending_seat(&self) -> Option<PlayerId> {
        self.pending.as_ref().map(|p| p.seat)
    }

    /// Has the round ended (normally or by abort)?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase == Phase::RoundOver
    }

    /// Final `(seat, rank)` pairs once the round is over. An aborted
    /// match reports only the ranks assigned before the abort.
    #[must_use]
    pub fn final_ranks(&self) -> Option<Vec<(PlayerId, u8)>> {
        if self.state.phase != Phase::RoundOver {
            return None;
        }
        Some(
            self.state
                .seats
                .iter()
                .filter_map(|(id, s)| s.rank.map(|r| (id, r)))
                .collect(),
        )
    }

    /// Append-only event log since the deal.
    #[must_use]
    pub fn events(&self) -> &Vector<MatchEvent> {
        self.state.events()
    }

    /// Serializable public snapshot (no opponent hand contents).
    #[must_use]
    pub fn view(&self) -> MatchView {
        self.state.view()
    }

    // === Internals ===

    fn ensure_turn_phase(&self) -> Result<(), IntentError> {
        match self.state.phase {
            Phase::AwaitingTurn => Ok(()),
            Phase::RoundOver => Err(IntentError::MatchOver),
            _ => Err(IntentError::WrongPhase),
        }
    }

    fn phase_error(&self) -> IntentError {
        if self.state.phase == Phase::RoundOver {
            IntentError::MatchOver
        } else {
            IntentError::WrongPhase
        }
    }

    /// Check the alert phase and that `seat` is the alerted target.
    fn alerted_chain(&self, seat: PlayerId) -> Result<ChainDraw, IntentError> {
        if self.state.phase != Phase::AwaitingChainDrawDecision {
            return Err(self.phase_error());
        }
        let Some(chain) = self.chain else {
            return Err(IntentError::WrongPhase);
        };
        if chain.target != seat {
            return Err(IntentError::NotYourTurn);
        }
        Ok(chain)
    }

    fn park(
        &mut self,
        seat: PlayerId,
        card: CardId,
        options: PlayOptions,
        phase: Phase,
    ) -> Result<(), IntentError> {
        self.pending = Some(PendingPlay {
            seat,
            card,
            options,
        });
        self.state.phase = phase;
        Ok(())
    }

    fn validate_sacrifices(
        &self,
        seat: PlayerId,
        played: CardId,
        sacrifices: &[CardId],
    ) -> Result<(), IntentError> {
        if sacrifices.len() != 2 || sacrifices[0] == sacrifices[1] {
            return Err(IntentError::NotEnoughSacrifices);
        }
        for &id in sacrifices {
            if id == played {
                return Err(IntentError::NotEnoughSacrifices);
            }
            if self.state.seat(seat).card(id).is_none() {
                return Err(IntentError::UnknownCard);
            }
        }
        Ok(())
    }

    fn validate_swap_target(&self, seat: PlayerId, target: PlayerId) -> Result<(), IntentError> {
        if target == seat
            || target.index() >= self.state.seat_count()
            || !self.state.seat(target).is_active()
        {
            return Err(IntentError::InvalidTarget);
        }
        Ok(())
    }

    /// Take the card (and any sacrifices) out of the hand, put it on
    /// the pile, and run its consequences.
    fn commit_play(
        &mut self,
        seat: PlayerId,
        card_id: CardId,
        options: PlayOptions,
    ) -> Result<(), IntentError> {
        self.state.phase = Phase::AwaitingTurn;
        let Some(mut card) = self.state.seat_mut(seat).take_card(card_id) else {
            return Err(IntentError::UnknownCard);
        };

        if card.value == Value::Hybrid {
            if let Some(sacrifices) = &options.fusion_sacrifices {
                let mut components = Vec::with_capacity(sacrifices.len());
                for &id in sacrifices.iter() {
                    if let Some(component) = self.state.seat_mut(seat).take_card(id) {
                        components.push(component);
                    }
                }
                card = card.fused(components);
            }
        }

        // Vanishing and ghost-swap keep the previous color context.
        if card.is_wild() {
            if let Some(color) = options.chosen_color {
                self.state.active_color = color;
            }
        } else {
            self.state.active_color = card.color;
        }

        let played = card.clone();
        self.state.place_on_discard(card);
        self.state.event(MatchEvent::CardPlayed {
            seat,
            card: played.clone(),
            active_color: self.state.active_color,
        });

        // Emptying the hand ends the seat's round at once; the card's
        // effects never resolve.
        if self.state.seat(seat).hand.is_empty() {
            effects::finish_seat(&mut self.state, &mut self.ranks, seat);
            self.advance_and_close(seat, 1, false);
            return Ok(());
        }

        if played.value == Value::GhostSwap {
            if let Some(target) = options.swap_target {
                self.swap_hands(seat, target);
            }
        }

        let outcome = effects::resolve_play(&mut self.state, &mut self.ranks, seat, &played);

        // The plain wild opens the chain-draw protocol in the
        // escalated tiers; the turn holds at the origin until it ends.
        if played.value == Value::Wild && self.state.rule_set.chain_draw_enabled() {
            if let Some(target) = turn::next_active(&self.state.seats, seat, self.state.direction)
            {
                let new_chain = ChainDraw::new(seat, target, self.state.active_color);
                self.state.event(MatchEvent::ChainDrawAlert {
                    origin: seat,
                    target,
                    color: new_chain.color,
                });
                self.chain = Some(new_chain);
                self.state.phase = Phase::AwaitingChainDrawDecision;
                self.state.refill_if_low();
                return Ok(());
            }
        }

        self.advance_and_close(seat, outcome.seats_to_skip, outcome.extra_turn);
        Ok(())
    }

    fn swap_hands(&mut self, a: PlayerId, b: PlayerId) {
        let hand_a = std::mem::take(&mut self.state.seat_mut(a).hand);
        let hand_b = std::mem::replace(&mut self.state.seat_mut(b).hand, hand_a);
        self.state.seat_mut(a).hand = hand_b;
        self.state.event(MatchEvent::HandsSwapped { a, b });
    }

    /// Close the round if at most one seat is still competing,
    /// otherwise hand the turn to the next seat.
    fn advance_and_close(&mut self, from: PlayerId, seats_to_skip: usize, extra_turn: bool) {
        let active: Vec<PlayerId> = self.state.active_seats().collect();
        if active.len() <= 1 {
            if let Some(&last) = active.first() {
                effects::finish_seat(&mut self.state, &mut self.ranks, last);
            }
            self.close_round();
            return;
        }

        let next = if extra_turn && self.state.seat(from).is_active() {
            from
        } else {
            turn::advance(&mut self.state.seats, from, seats_to_skip, self.state.direction)
        };
        self.state.turn = next;
        self.state.phase = Phase::AwaitingTurn;
        self.state.event(MatchEvent::TurnStarted { seat: next });
        self.state.refill_if_low();
    }

    fn close_round(&mut self) {
        self.pending = None;
        self.chain = None;
        self.state.phase = Phase::RoundOver;
        let ranks: Vec<(PlayerId, u8)> = self
            .state
            .seats
            .iter()
            .filter_map(|(id, s)| s.rank.map(|r| (id, r)))
            .collect();
        self.state.event(MatchEvent::RoundOver { ranks });
    }
}
