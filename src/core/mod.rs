//! Core engine types: players, selections, errors, RNG, configuration.
//!
//! These are the building blocks every other module leans on. They carry no
//! card rules of their own.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::GameConfig;
pub use action::{ActionRecord, Selection};
pub use error::{ApplyOutcome, EngineError};
