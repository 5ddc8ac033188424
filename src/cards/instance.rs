//! Card instances - per-game mutable card state.
//!
//! Where a card lives is tracked by the `ZoneManager`; the instance holds the
//! two flags a card carries with it: its inflation bonus and, for Rule cards,
//! whether it is currently enacted.

use serde::Serialize;

use super::definition::CardId;

/// A card in a running game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CardInstance {
    /// Reference to the card definition.
    pub card_id: CardId,

    /// +1 to every numeral on the card while Inflation is in play.
    pub inflation_bonus: u8,

    /// Rule cards only: enacted and contributing.
    pub active: bool,
}

impl CardInstance {
    /// Fresh instance with no bonus.
    #[must_use]
    pub fn new(card_id: CardId) -> Self {
        Self {
            card_id,
            inflation_bonus: 0,
            active: false,
        }
    }

    /// The inflation bonus as a signed numeral adjustment.
    #[must_use]
    pub fn bonus(&self) -> i32 {
        i32::from(self.inflation_bonus)
    }
}
