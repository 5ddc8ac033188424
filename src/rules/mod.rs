//! Rules: the engine contract plus the two pure rule components.
//!
//! - `engine`: the `RulesEngine` trait a driver plays through
//! - `aggregator`: per-rule draw/play contributions and the bonus ledger
//! - `goals`: goal evaluation with plurality tie-breaks
//!
//! The aggregator and the evaluator never touch the board; the board builds
//! their context structs from live state and acts on the answer.

pub mod aggregator;
pub mod engine;
pub mod goals;

pub use aggregator::{contribution, BonusLedger, Contribution, RuleContext};
pub use engine::RulesEngine;
pub use goals::{find_winner, most_of, satisfies, GoalContext};
