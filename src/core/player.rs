//! Player identification.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are 0-based and fixed at match
//! creation; seat order is turn order.

use serde::{Deserialize, Serialize};

/// Seat identifier.
///
/// Seat indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a match with `seat_count` players.
    pub fn all(seat_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..seat_count as u8).map(PlayerId)
    }

    /// The seat after this one, round-robin.
    #[must_use]
    pub fn next(self, seat_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % seat_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
