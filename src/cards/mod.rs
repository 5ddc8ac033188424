//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for one physical card
//! - `CardKind`: Keeper, Goal, Action or Rule, with payload
//! - `CardDefinition`: Static card data
//! - `CardInstance`: Per-game mutable card state (inflation bonus, active flag)
//! - `CardRegistry`: Card definition lookup and the stock card set

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{
    ActionKind, CardDefinition, CardId, CardKind, EffectRule, Exotic, FreeAction, GoalCard,
    LimitTarget, PlayRule, Requirement, RuleKind, StartRule,
};
pub use instance::CardInstance;
pub use registry::{is_food, CardRegistry, FOODS};
