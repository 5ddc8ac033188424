//! Rules engine trait: the contract a presentation layer drives.
//!
//! A driver only ever does two things with a game: look at it and hand it a
//! selection. `RulesEngine` captures exactly that, so a text front end, a
//! random playout or a test harness can be written once against the trait.
//!
//! ## Implementation Notes
//!
//! - `options`: positional; selections index into this exact list
//! - `apply`: transactional, an `Err` leaves the game untouched
//! - `winner`: `Some` once the game is over; further `apply` calls fail

use crate::core::action::Selection;
use crate::core::error::{ApplyOutcome, EngineError};
use crate::core::player::PlayerId;

/// Rules engine trait.
pub trait RulesEngine {
    /// Read-only projection handed to the presentation layer.
    type View;

    /// One entry of the option list.
    type Choice;

    /// Snapshot of everything the acting player may see.
    fn snapshot(&self) -> Self::View;

    /// The current option list.
    fn options(&self) -> Vec<Self::Choice>;

    /// The player who must make the next selection.
    fn acting_player(&self) -> PlayerId;

    /// Apply a selection.
    fn apply(&mut self, selection: Selection) -> Result<ApplyOutcome, EngineError>;

    /// The winner, once the game is over.
    fn winner(&self) -> Option<PlayerId>;

    // === Convenience Methods ===

    /// Check if the game is over.
    fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// Enumerate selections worth trying right now.
    ///
    /// The default offers each option on its own. Engines with states that
    /// take a list of indices override this.
    fn legal_selections(&self) -> Vec<Selection> {
        (0..self.options().len()).map(Selection::One).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts down to zero; whoever reaches zero wins.
    struct Countdown {
        left: usize,
        turn: u8,
        winner: Option<PlayerId>,
    }

    impl RulesEngine for Countdown {
        type View = usize;
        type Choice = usize;

        fn snapshot(&self) -> usize {
            self.left
        }

        fn options(&self) -> Vec<usize> {
            (1..=self.left.min(2)).collect()
        }

        fn acting_player(&self) -> PlayerId {
            PlayerId::new(self.turn)
        }

        fn apply(&mut self, selection: Selection) -> Result<ApplyOutcome, EngineError> {
            if let Some(winner) = self.winner {
                return Err(EngineError::GameOver(winner));
            }
            let options = self.options();
            let index = selection.single().ok_or_else(|| EngineError::illegal("one at a time"))?;
            let take = *options.get(index).ok_or(EngineError::SelectionOutOfRange {
                index,
                available: options.len(),
            })?;

            self.left -= take;
            if self.left == 0 {
                let winner = self.acting_player();
                self.winner = Some(winner);
                return Ok(ApplyOutcome::Won(winner));
            }
            self.turn = 1 - self.turn;
            Ok(ApplyOutcome::Continue)
        }

        fn winner(&self) -> Option<PlayerId> {
            self.winner
        }
    }

    #[test]
    fn test_default_legal_selections() {
        let game = Countdown { left: 5, turn: 0, winner: None };
        assert_eq!(game.legal_selections(), vec![Selection::One(0), Selection::One(1)]);
    }

    #[test]
    fn test_drive_to_terminal() {
        let mut game = Countdown { left: 3, turn: 0, winner: None };

        assert_eq!(game.apply(Selection::One(1)), Ok(ApplyOutcome::Continue));
        assert!(!game.is_terminal());
        assert_eq!(game.apply(Selection::One(0)), Ok(ApplyOutcome::Won(PlayerId::new(1))));
        assert!(game.is_terminal());
        assert_eq!(
            game.apply(Selection::One(0)),
            Err(EngineError::GameOver(PlayerId::new(1)))
        );
    }

    #[test]
    fn test_out_of_range() {
        let mut game = Countdown { left: 1, turn: 0, winner: None };
        assert_eq!(
            game.apply(Selection::One(3)),
            Err(EngineError::SelectionOutOfRange { index: 3, available: 1 })
        );
    }
}
