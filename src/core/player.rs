//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. A match seats 2-16 players (humans and
//! bots alike); seat indices are stable for the whole match.
//!
//! ## SeatMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier for one player at the table.
///
/// Seat indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seat IDs for a table with `seat_count` seats.
    ///
    /// ```
    /// use wildstack::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[0], PlayerId::new(0));
    /// assert_eq!(seats[3], PlayerId::new(3));
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..seat_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat.
/// Use `SeatMap::new()` to create with a factory function,
/// or `SeatMap::with_value()` to initialize all entries to the same value.
///
/// ## Example
///
/// ```
/// use wildstack::core::{PlayerId, SeatMap};
///
/// let mut hand_sizes: SeatMap<u32> = SeatMap::with_value(4, 7);
///
/// assert_eq!(hand_sizes[PlayerId::new(0)], 7);
///
/// hand_sizes[PlayerId::new(1)] = 6;
/// assert_eq!(hand_sizes[PlayerId::new(1)], 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(seat_count: usize, mut factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(seat_count >= 2, "A table needs at least 2 seats");
        assert!(seat_count <= 255, "At most 255 seats supported");

        let data = (0..seat_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new SeatMap with all entries set to the same value.
    pub fn with_value(seat_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(seat_count, |_| value.clone())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a SeatMap holds at least 2 seats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: PlayerId) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: PlayerId) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all seat IDs.
    pub fn seat_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: PlayerId) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<PlayerId> for SeatMap<T> {
    fn index_mut(&mut self, seat: PlayerId) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
