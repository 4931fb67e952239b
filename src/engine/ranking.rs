//! Finishing-order bookkeeping.
//!
//! Winners take ranks from the top (1 upward), eliminated players take
//! ranks from the bottom (N downward). The two cursors move toward each
//! other and never collide, so the assigned ranks are always exactly
//! {1..N} with no reuse and no gaps.

use serde::{Deserialize, Serialize};

/// Monotonic dual rank counters for one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTracker {
    next_top: u8,
    next_bottom: u8,
    total: u8,
}

impl RankTracker {
    /// Create a tracker for `seat_count` players.
    #[must_use]
    pub fn new(seat_count: usize) -> Self {
        assert!(seat_count >= 2, "A table needs at least 2 seats");
        assert!(seat_count <= 255, "At most 255 seats supported");
        Self {
            next_top: 1,
            next_bottom: seat_count as u8,
            total: seat_count as u8,
        }
    }

    /// Next rank from the top (first to empty a hand gets 1).
    pub fn assign_top(&mut self) -> u8 {
        debug_assert!(self.next_top <= self.next_bottom, "rank counters collided");
        let rank = self.next_top;
        self.next_top += 1;
        rank
    }

    /// Next rank from the bottom (first eliminated gets N).
    pub fn assign_bottom(&mut self) -> u8 {
        debug_assert!(self.next_top <= self.next_bottom, "rank counters collided");
        let rank = self.next_bottom;
        self.next_bottom -= 1;
        rank
    }

    /// How many ranks remain unassigned.
    #[must_use]
    pub fn remaining(&self) -> usize {
        (self.next_bottom as usize + 1).saturating_sub(self.next_top as usize)
    }

    /// Have all ranks been handed out?
    #[must_use]
    pub fn all_assigned(&self) -> bool {
        self.next_top > self.next_bottom
    }

    /// Total player count at match start.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_move_toward_each_other() {
        let mut tracker = RankTracker::new(4);

        assert_eq!(tracker.assign_bottom(), 4); // first elimination
        assert_eq!(tracker.assign_top(), 1); // first winner
        assert_eq!(tracker.assign_bottom(), 3);
        assert_eq!(tracker.remaining(), 1);
        assert_eq!(tracker.assign_top(), 2);

        assert!(tracker.all_assigned());
    }

    #[test]
    fn test_all_from_top() {
        let mut tracker = RankTracker::new(3);
        let ranks: Vec<u8> = (0..3).map(|_| tracker.assign_top()).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(tracker.all_assigned());
    }

    #[test]
    fn test_all_from_bottom() {
        let mut tracker = RankTracker::new(3);
        let ranks: Vec<u8> = (0..3).map(|_| tracker.assign_bottom()).collect();
        assert_eq!(ranks, vec![3, 2, 1]);
        assert!(tracker.all_assigned());
    }

    #[test]
    fn test_ranks_cover_exactly_one_to_n() {
        let mut tracker = RankTracker::new(6);
        let mut ranks = vec![
            tracker.assign_bottom(),
            tracker.assign_top(),
            tracker.assign_bottom(),
            tracker.assign_bottom(),
            tracker.assign_top(),
            tracker.assign_top(),
        ];
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_remaining() {
        let mut tracker = RankTracker::new(2);
        assert_eq!(tracker.remaining(), 2);
        tracker.assign_top();
        assert_eq!(tracker.remaining(), 1);
        tracker.assign_bottom();
        assert_eq!(tracker.remaining(), 0);
    }
}
