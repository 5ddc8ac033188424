//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index around the table, 0-based. Turn order, hand rotation and
//! goal tie-breaks all follow seat order.
//!
//! ## PlayerMap
//!
//! One value per seat, backed by a `Vec` for O(1) access. The goal evaluator
//! builds these for keeper counts and hand sizes.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat index supporting 1-255 players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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

    /// Iterate over every seat for a game with `player_count` players.
    ///
    /// ```
    /// use fluxx_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// Seat `steps` places away, wrapping around the table.
    ///
    /// Negative steps walk backwards (used by Rotate Hands).
    ///
    /// ```
    /// use fluxx_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(2).offset(1, 3), PlayerId::new(0));
    /// assert_eq!(PlayerId::new(0).offset(-1, 3), PlayerId::new(2));
    /// ```
    #[must_use]
    pub fn offset(self, steps: i32, player_count: usize) -> Self {
        let n = player_count as i32;
        Self((self.0 as i32 + steps).rem_euclid(n) as u8)
    }

    /// The seat whose turn follows this one.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        self.offset(1, player_count)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use fluxx_engine::core::{PlayerId, PlayerMap};
///
/// let keepers: PlayerMap<usize> = PlayerMap::new(3, |p| p.index() * 2);
/// assert_eq!(keepers[PlayerId::new(2)], 4);
/// assert_eq!(keepers.max(), Some(4));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Ord + Copy> PlayerMap<T> {
    /// Largest value across all seats.
    #[must_use]
    pub fn max(&self) -> Option<T> {
        self.data.iter().copied().max()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
