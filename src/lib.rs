//! # fluxx-engine
//!
//! A rules engine for Fluxx, the card game whose rules change as it is played.
//!
//! ## Design Principles
//!
//! 1. **Two calls**: A presentation layer only ever takes a [`GameView`]
//!    snapshot and hands back a [`Selection`]. Everything else is internal.
//!
//! 2. **Derived, not accumulated**: Draw and play counts are recomputed from
//!    the Rules in play on every pass, so a Rule leaving undoes exactly what
//!    it granted.
//!
//! 3. **Transactional apply**: A rejected selection leaves the board as it
//!    was. Checkpoints are cheap because containers are `im` vectors.
//!
//! 4. **N-Player First**: Seat order drives turns, limits, rotations and
//!    tie-breaks for any table size.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, selections, errors
//! - `cards`: Card kinds, instances and the stock card set
//! - `zones`: Card containers and ordered movement between them
//! - `rules`: Rule aggregation, goal evaluation and the `RulesEngine` trait
//! - `board`: The game state machine
//!
//! ## Example
//!
//! ```
//! use fluxx_engine::{Board, GameConfig, RulesEngine};
//!
//! let mut board = Board::with_config(GameConfig::new(3).with_seed(42)).unwrap();
//! for _ in 0..200 {
//!     if board.is_terminal() {
//!         break;
//!     }
//!     // Take the first selection the board accepts.
//!     let moved = board
//!         .legal_selections()
//!         .into_iter()
//!         .any(|selection| board.apply(selection).is_ok());
//!     assert!(moved);
//! }
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, ApplyOutcome, EngineError, GameConfig, GameRng, PlayerId, PlayerMap, Selection,
};

pub use crate::cards::{
    ActionKind, CardDefinition, CardId, CardInstance, CardKind, CardRegistry, RuleKind,
};

pub use crate::zones::{Zone, ZoneManager, ZonePosition};

pub use crate::rules::{BonusLedger, GoalContext, RuleContext, RulesEngine};

pub use crate::board::{ActionType, Board, CardView, Choice, Direction, GameView, OptionView};
