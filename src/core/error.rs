//! Engine errors and apply outcomes.
//!
//! Player mistakes (`IllegalMove`, `IllegalPlay`, `SelectionOutOfRange`) are
//! recoverable: the board is restored to where it was before the call and the
//! presentation layer re-prompts. `InvariantViolation` means the engine itself
//! was misused and should be treated as a bug. A win is not an error; it comes
//! back through [`ApplyOutcome::Won`], and only calls made after it see
//! [`EngineError::GameOver`].

use super::player::PlayerId;

/// Errors returned by `Board::apply` and container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The selection is not legal right now.
    IllegalMove(String),
    /// A card play failed after it had consumed a play slot; the slot was
    /// handed back.
    IllegalPlay(String),
    /// The index was not within the current option list.
    SelectionOutOfRange { index: usize, available: usize },
    /// Contract bug: wrong-kind card in a typed container, trashing an Action,
    /// a card missing from where the engine expected it.
    InvariantViolation(String),
    /// The game has already been won.
    GameOver(PlayerId),
    /// The configuration cannot start a game.
    InvalidConfig(String),
}

impl EngineError {
    /// Whether the caller should simply re-prompt.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::IllegalMove(_)
                | EngineError::IllegalPlay(_)
                | EngineError::SelectionOutOfRange { .. }
        )
    }

    pub(crate) fn illegal(msg: impl Into<String>) -> Self {
        EngineError::IllegalMove(msg.into())
    }

    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        EngineError::InvariantViolation(msg.into())
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::IllegalMove(msg) => write!(f, "Illegal move: {}", msg),
            EngineError::IllegalPlay(msg) => write!(f, "Illegal play: {}", msg),
            EngineError::SelectionOutOfRange { index, available } => write!(
                f,
                "Option {} is not available ({} options)",
                index, available
            ),
            EngineError::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
            EngineError::GameOver(winner) => write!(f, "Game over: {} won", winner),
            EngineError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

/// What a successful `apply` did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The game goes on.
    Continue,
    /// This selection ended the game.
    Won(PlayerId),
}

impl ApplyOutcome {
    /// The winner, if the game just ended.
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            ApplyOutcome::Won(p) => Some(p),
            ApplyOutcome::Continue => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(EngineError::illegal("no").is_recoverable());
        assert!(EngineError::IllegalPlay("no".into()).is_recoverable());
        assert!(EngineError::SelectionOutOfRange { index: 4, available: 2 }.is_recoverable());
        assert!(!EngineError::invariant("bug").is_recoverable());
        assert!(!EngineError::GameOver(PlayerId::new(0)).is_recoverable());
        assert!(!EngineError::InvalidConfig("0 players".into()).is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = EngineError::SelectionOutOfRange { index: 4, available: 2 };
        assert_eq!(err.to_string(), "Option 4 is not available (2 options)");
        assert_eq!(
            EngineError::GameOver(PlayerId::new(1)).to_string(),
            "Game over: Player 1 won"
        );
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(ApplyOutcome::Won(PlayerId::new(2)).winner(), Some(PlayerId::new(2)));
        assert_eq!(ApplyOutcome::Continue.winner(), None);
    }
}
