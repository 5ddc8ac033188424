//! Zone system for card locations.
//!
//! Every card is owned by exactly one container:
//!
//! - `Deck`: ordered, drawn from the top, refilled from the Discard
//! - `Discard`: ordered by arrival
//! - `Hand(p)` / `Keep(p)`: per player
//! - `Goals` / `Rules`: shared play area
//! - `TempHand(d)`: scratch hands for nested draw-and-play actions
//!
//! ## Key Types
//!
//! - `Zone`: Container identifier with kind membership (`Zone::accepts`)
//! - `ZoneManager`: Card location tracking and movement
//! - `ZonePosition`: Top or bottom insertion

pub mod manager;

pub use manager::{Zone, ZoneManager, ZonePosition};
