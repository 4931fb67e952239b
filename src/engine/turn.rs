//! Turn sequencing.
//!
//! A state machine over seat indices: step by direction, pass over
//! seats that left the round, and consume vanish flags. Reversal is
//! handled by the caller flipping `Direction` before advancing (two
//! reversals are the identity).

use crate::core::{PlayerId, SeatMap};

use super::state::{Direction, Seat};

/// Next still-competing seat after `from`, without touching vanish
/// flags. `None` when nobody else is active.
#[must_use]
pub fn next_active(seats: &SeatMap<Seat>, from: PlayerId, direction: Direction) -> Option<PlayerId> {
    let len = seats.len();
    let mut idx = from.index();

    for _ in 0..len {
        idx = direction.step(idx, len);
        let id = PlayerId::new(idx as u8);
        if seats[id].is_active() {
            return Some(id);
        }
    }
    None
}

/// Advance the turn from `from` by `seats_to_skip` seats (1 for a plain
/// play; more when skip cards compound).
///
/// Eliminated and finished seats are passed over. A vanished landing
/// seat has its flag cleared and is passed once more: vanish is
/// consumed on the turn it would have taken. Returns `from` unchanged
/// when no other seat is active.
pub fn advance(
    seats: &mut SeatMap<Seat>,
    from: PlayerId,
    seats_to_skip: usize,
    direction: Direction,
) -> PlayerId {
    let mut current = from;

    for _ in 0..seats_to_skip {
        let Some(landed) = next_active(seats, current, direction) else {
            return from;
        };

        if seats[landed].vanished {
            seats[landed].vanished = false;
            current = next_active(seats, landed, direction).unwrap_or(landed);
        } else {
            current = landed;
        }
    }

    current
}
