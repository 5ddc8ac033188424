//! Card definitions - static card data.
//!
//! `CardDefinition` holds what never changes about a card: its name and its
//! kind, with the kind-specific payload (a Goal's requirement tokens, a Rule's
//! base numeral, which one-shot effect an Action performs).
//!
//! Per-game mutable data (the inflation bonus, whether a Rule is active) lives
//! in `CardInstance`.
//!
//! ## Kinds
//!
//! ```text
//! Keeper
//! Goal(requirements)
//! Action(ActionKind)
//! Rule(Draw | Play | Limit | Effect | Start | FreeAction)
//! ```
//!
//! Every behaviour is an enum variant, so adding a card kind without handling
//! it in the board is a compile error.

use serde::Serialize;
use smallvec::SmallVec;

/// Unique identifier for a card in a game.
///
/// Card names are unique, so the id names exactly one physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into per-card tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Predicates over global state that a goal token can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Exotic {
    /// Holds more food Keepers than the inflation bonus.
    AnyFood,
    /// 5+ Keepers with strict plurality.
    FiveKeepers,
    /// Nobody keeps Television.
    NoTelevision,
    /// 10+ cards in hand with strict plurality.
    TenCards,
}

/// One requirement token on a Goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Requirement {
    /// The named Keeper must be in the player's Keep.
    Keeper(&'static str),
    /// A predicate over global state.
    Exotic(Exotic),
}

/// Payload of a Goal card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GoalCard {
    pub reqs: SmallVec<[Requirement; 2]>,
}

/// Base numeral of a Play rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PlayRule {
    /// Play N cards.
    Count(u8),
    /// Play all but N cards of the hand.
    AllBut(u8),
    /// Play the whole hand.
    All,
}

/// Which container a Limit caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LimitTarget {
    Hand,
    Keep,
}

/// Effect rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EffectRule {
    PartyBonus,
    RichBonus,
    PoorBonus,
    Inflation,
    DoubleAgenda,
}

/// Rules with a start-of-turn hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StartRule {
    FirstPlayRandom,
    NoHandBonus,
}

/// Rules granting an extra action during a normal turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FreeAction {
    SwapPlaysForDraws,
    MysteryPlay,
    GoalMill,
    GetOnWithIt,
    Recycling,
}

/// Rule sub-kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RuleKind {
    Draw(u8),
    Play(PlayRule),
    Limit { max: u8, target: LimitTarget },
    Effect(EffectRule),
    Start(StartRule),
    FreeAction(FreeAction),
}

impl RuleKind {
    /// Whether two rules compete for the same slot and replace each other.
    ///
    /// Draw rules replace Draw rules, Play rules replace Play rules, and Limits
    /// replace Limits on the same container.
    #[must_use]
    pub fn replaces(&self, other: &RuleKind) -> bool {
        match (self, other) {
            (RuleKind::Draw(_), RuleKind::Draw(_)) => true,
            (RuleKind::Play(_), RuleKind::Play(_)) => true,
            (RuleKind::Limit { target: a, .. }, RuleKind::Limit { target: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// One-shot Action effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    ShareTheWealth,
    DiscardAndDraw,
    Draw3Play2,
    Draw2UseEm,
    EverybodyGets1,
    Zap,
    Jackpot,
    AnotherTurn,
    RotateHands,
    DoThatAgain,
    Steal,
    Simplify,
    TrashKeeper,
    ExchangeKeepers,
    TradeHands,
    RulesReset,
    RandomTax,
    UseWhatYouTake,
    NoLimits,
    EmptyTheTrash,
}

/// Card kinds with their static payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CardKind {
    Keeper,
    Goal(GoalCard),
    Action(ActionKind),
    Rule(RuleKind),
}

impl CardKind {
    /// Short label for display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Keeper => "Keeper",
            CardKind::Goal(_) => "Goal",
            CardKind::Action(_) => "Action",
            CardKind::Rule(RuleKind::Draw(_)) => "Draw",
            CardKind::Rule(RuleKind::Play(_)) => "Play",
            CardKind::Rule(RuleKind::Limit { .. }) => "Limit",
            CardKind::Rule(RuleKind::Effect(_)) => "Effect",
            CardKind::Rule(RuleKind::Start(_)) => "Start",
            CardKind::Rule(RuleKind::FreeAction(_)) => "Free Action",
        }
    }

    /// The rule payload, if this is a Rule.
    #[must_use]
    pub fn rule(&self) -> Option<RuleKind> {
        match self {
            CardKind::Rule(r) => Some(*r),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_keeper(&self) -> bool {
        matches!(self, CardKind::Keeper)
    }

    #[must_use]
    pub fn is_goal(&self) -> bool {
        matches!(self, CardKind::Goal(_))
    }

    #[must_use]
    pub fn is_action(&self) -> bool {
        matches!(self, CardKind::Action(_))
    }

    #[must_use]
    pub fn is_rule(&self) -> bool {
        matches!(self, CardKind::Rule(_))
    }
}

/// Static card definition.
///
/// ```
/// use fluxx_engine::cards::{CardDefinition, CardId, CardKind, RuleKind};
///
/// let draw3 = CardDefinition::new(CardId::new(0), "Draw 3", CardKind::Rule(RuleKind::Draw(3)));
/// assert!(draw3.kind.is_rule());
/// assert_eq!(draw3.kind.label(), "Draw");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardDefinition {
    /// Unique identifier for this card.
    pub id: CardId,

    /// Card name, unique within a game.
    pub name: &'static str,

    /// Kind and payload.
    pub kind: CardKind,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, name: &'static str, kind: CardKind) -> Self {
        Self { id, name, kind }
    }

    /// Goal requirements, empty for every other kind.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        match &self.kind {
            CardKind::Goal(goal) => &goal.reqs,
            _ => &[],
        }
    }
}
