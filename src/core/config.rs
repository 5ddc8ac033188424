//! Game configuration.
//!
//! A `GameConfig` fixes everything about a game that is decided before the
//! first card is dealt: how many players sit down, the RNG seed, the size of
//! the opening hands and how many cards the first player draws to start.
//!
//! ```
//! use fluxx_engine::core::GameConfig;
//!
//! let config = GameConfig::new(3).with_seed(99).with_hand_size(4);
//! assert_eq!(config.player_count, 3);
//! assert_eq!(config.hand_size, 4);
//! assert_eq!(config.opening_draw, 1);
//! ```

use serde::{Deserialize, Serialize};

/// Cards dealt to every player before the first turn.
pub const DEFAULT_HAND_SIZE: usize = 3;

/// Cards the first player draws at the start of the first turn.
pub const DEFAULT_OPENING_DRAW: usize = 1;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Seed for every shuffle and random pick.
    pub seed: u64,

    /// Opening hand size.
    pub hand_size: usize,

    /// Extra cards drawn by the first player to begin turn one.
    pub opening_draw: usize,
}

impl GameConfig {
    /// Create a configuration with default hand sizes and seed 0.
    ///
    /// Panics on an out-of-range player count; use
    /// [`Board::with_config`](crate::board::Board::with_config) with a
    /// hand-built config to get an error instead.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            seed: 0,
            hand_size: DEFAULT_HAND_SIZE,
            opening_draw: DEFAULT_OPENING_DRAW,
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set how many cards the first player draws to open the game.
    #[must_use]
    pub fn with_opening_draw(mut self, opening_draw: usize) -> Self {
        self.opening_draw = opening_draw;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new(2);
        assert_eq!(config.player_count, 2);
        assert_eq!(config.seed, 0);
        assert_eq!(config.hand_size, DEFAULT_HAND_SIZE);
        assert_eq!(config.opening_draw, DEFAULT_OPENING_DRAW);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(4)
            .with_seed(7)
            .with_hand_size(5)
            .with_opening_draw(0);

        assert_eq!(config.seed, 7);
        assert_eq!(config.hand_size, 5);
        assert_eq!(config.opening_draw, 0);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_zero_players() {
        GameConfig::new(0);
    }
}
