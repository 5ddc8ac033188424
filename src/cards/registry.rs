//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition in a game, indexed densely
//! by `CardId`, with a name index on the side. [`CardRegistry::standard`]
//! builds the stock 96-card set.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::definition::{
    ActionKind, CardDefinition, CardId, CardKind, EffectRule, Exotic, FreeAction, GoalCard,
    LimitTarget, PlayRule, Requirement, RuleKind, StartRule,
};

/// Keepers that count as food for Party Snacks.
pub const FOODS: [&str; 4] = ["Milk", "Cookies", "Chocolate", "Bread"];

const KEEPERS: [&str; 19] = [
    "Sleep", "Money", "Time", "Music", "Sun", "Toaster", "Eye", "Brain", "Moon", "Love", "Peace",
    "Rocket", "Television", "Milk", "Cookies", "Chocolate", "Dreams", "Party", "Bread",
];

const fn k(name: &'static str) -> Requirement {
    Requirement::Keeper(name)
}

const fn x(exotic: Exotic) -> Requirement {
    Requirement::Exotic(exotic)
}

const GOALS: [(&str, &[Requirement]); 30] = [
    ("Milk & Cookies", &[k("Milk"), k("Cookies")]),
    ("Party Snacks", &[k("Party"), x(Exotic::AnyFood)]),
    ("Night & Day", &[k("Sun"), k("Moon")]),
    ("Turn Up Volume", &[k("Music"), k("Party")]),
    ("Great Theme Song", &[k("Music"), k("Television")]),
    ("Winning Lottery", &[k("Dreams"), k("Money")]),
    ("Toast", &[k("Bread"), k("Toaster")]),
    ("Eye of Beholder", &[k("Eye"), k("Love")]),
    ("Dreamland", &[k("Sleep"), k("Dreams")]),
    ("Squishy Chocolate", &[k("Sun"), k("Chocolate")]),
    ("Chocolate Cookies", &[k("Chocolate"), k("Cookies")]),
    ("Rocket to Moon", &[k("Rocket"), k("Moon")]),
    ("World Peace", &[k("Dreams"), k("Peace")]),
    ("Chocolate Milk", &[k("Chocolate"), k("Milk")]),
    ("Rocket Science", &[k("Rocket"), k("Brain")]),
    ("Time is Money", &[k("Time"), k("Money")]),
    ("Bread & Chocolate", &[k("Bread"), k("Chocolate")]),
    ("Party Time", &[k("Party"), k("Time")]),
    ("Five Keepers", &[x(Exotic::FiveKeepers)]),
    ("The Brain (No TV)", &[k("Brain"), x(Exotic::NoTelevision)]),
    ("Ten Cards in Hand", &[x(Exotic::TenCards)]),
    ("Bed Time", &[k("Sleep"), k("Time")]),
    ("Cant Buy Me Love", &[k("Money"), k("Love")]),
    ("Hearts & Minds", &[k("Love"), k("Brain")]),
    ("Baked Goods", &[k("Bread"), k("Cookies")]),
    ("The Minds Eye", &[k("Eye"), k("Brain")]),
    ("The Appliances", &[k("Toaster"), k("Television")]),
    ("Day Dreams", &[k("Dreams"), k("Sun")]),
    ("Hippyism", &[k("Peace"), k("Love")]),
    ("Lullaby", &[k("Sleep"), k("Music")]),
];

const RULES: [(&str, RuleKind); 27] = [
    ("Draw 2", RuleKind::Draw(2)),
    ("Draw 3", RuleKind::Draw(3)),
    ("Draw 4", RuleKind::Draw(4)),
    ("Draw 5", RuleKind::Draw(5)),
    ("Play 2", RuleKind::Play(PlayRule::Count(2))),
    ("Play 3", RuleKind::Play(PlayRule::Count(3))),
    ("Play 4", RuleKind::Play(PlayRule::Count(4))),
    ("Play All But 1", RuleKind::Play(PlayRule::AllBut(1))),
    ("Play All", RuleKind::Play(PlayRule::All)),
    ("Hand Limit 2", RuleKind::Limit { max: 2, target: LimitTarget::Hand }),
    ("Hand Limit 1", RuleKind::Limit { max: 1, target: LimitTarget::Hand }),
    ("Hand Limit 0", RuleKind::Limit { max: 0, target: LimitTarget::Hand }),
    ("Keeper Limit 4", RuleKind::Limit { max: 4, target: LimitTarget::Keep }),
    ("Keeper Limit 3", RuleKind::Limit { max: 3, target: LimitTarget::Keep }),
    ("Keeper Limit 2", RuleKind::Limit { max: 2, target: LimitTarget::Keep }),
    ("Party Bonus", RuleKind::Effect(EffectRule::PartyBonus)),
    ("Rich Bonus", RuleKind::Effect(EffectRule::RichBonus)),
    ("Poor Bonus", RuleKind::Effect(EffectRule::PoorBonus)),
    ("Inflation", RuleKind::Effect(EffectRule::Inflation)),
    ("Double Agenda", RuleKind::Effect(EffectRule::DoubleAgenda)),
    ("First Play Random", RuleKind::Start(StartRule::FirstPlayRandom)),
    ("No-Hand Bonus", RuleKind::Start(StartRule::NoHandBonus)),
    ("Swap Plays For Draws", RuleKind::FreeAction(FreeAction::SwapPlaysForDraws)),
    ("Mystery Play", RuleKind::FreeAction(FreeAction::MysteryPlay)),
    ("Goal Mill", RuleKind::FreeAction(FreeAction::GoalMill)),
    ("Get On With It!", RuleKind::FreeAction(FreeAction::GetOnWithIt)),
    ("Recycling", RuleKind::FreeAction(FreeAction::Recycling)),
];

const ACTIONS: [(&str, ActionKind); 20] = [
    ("Share the Wealth", ActionKind::ShareTheWealth),
    ("Discard and Draw", ActionKind::DiscardAndDraw),
    ("Draw 3, Play 2 of Them", ActionKind::Draw3Play2),
    ("Everybody Gets 1", ActionKind::EverybodyGets1),
    ("Zap a Card", ActionKind::Zap),
    ("Jackpot!", ActionKind::Jackpot),
    ("Take Another Turn", ActionKind::AnotherTurn),
    ("Rotate Hands", ActionKind::RotateHands),
    ("Let's Do That Again!", ActionKind::DoThatAgain),
    ("Steal a Keeper", ActionKind::Steal),
    ("Let's Simplify", ActionKind::Simplify),
    ("Trash a Keeper", ActionKind::TrashKeeper),
    ("Exchange Keepers", ActionKind::ExchangeKeepers),
    ("Trade Hands", ActionKind::TradeHands),
    ("Rules Reset", ActionKind::RulesReset),
    ("Draw 2 and Use 'Em", ActionKind::Draw2UseEm),
    ("Random Tax", ActionKind::RandomTax),
    ("Use What You Take", ActionKind::UseWhatYouTake),
    ("No Limits", ActionKind::NoLimits),
    ("Empty the Trash", ActionKind::EmptyTheTrash),
];

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use fluxx_engine::cards::{CardRegistry, CardKind};
///
/// let mut registry = CardRegistry::new();
/// let milk = registry.register("Milk", CardKind::Keeper);
///
/// assert_eq!(registry.get(milk).map(|c| c.name), Some("Milk"));
/// assert_eq!(registry.find_by_name("Milk"), Some(milk));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardDefinition>,
    by_name: FxHashMap<&'static str, CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock card set: 19 Keepers, 30 Goals, 27 Rules and 20 Actions.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        for name in KEEPERS {
            registry.register(name, CardKind::Keeper);
        }
        for (name, reqs) in GOALS {
            let goal = GoalCard { reqs: SmallVec::from_slice(reqs) };
            registry.register(name, CardKind::Goal(goal));
        }
        for (name, rule) in RULES {
            registry.register(name, CardKind::Rule(rule));
        }
        for (name, action) in ACTIONS {
            registry.register(name, CardKind::Action(action));
        }

        registry
    }

    /// Register a card with the next free ID.
    ///
    /// Panics if a card with the same name already exists.
    pub fn register(&mut self, name: &'static str, kind: CardKind) -> CardId {
        if self.by_name.contains_key(name) {
            panic!("Card named {:?} already registered", name);
        }

        let id = CardId::new(self.cards.len() as u16);
        self.cards.push(CardDefinition::new(id, name, kind));
        self.by_name.insert(name, id);
        id
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.index())
    }

    /// Look a card up by its unique name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        id.index() < self.cards.len()
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}

/// Whether the named Keeper is a food.
#[must_use]
pub fn is_food(name: &str) -> bool {
    FOODS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_counts() {
        let registry = CardRegistry::standard();
        assert_eq!(registry.len(), 96);

        assert_eq!(registry.find(|c| c.kind.is_keeper()).count(), 19);
        assert_eq!(registry.find(|c| c.kind.is_goal()).count(), 30);
        assert_eq!(registry.find(|c| c.kind.is_rule()).count(), 27);
        assert_eq!(registry.find(|c| c.kind.is_action()).count(), 20);
    }

    #[test]
    fn test_ids_are_dense() {
        let registry = CardRegistry::standard();
        for (i, card) in registry.iter().enumerate() {
            assert_eq!(card.id.index(), i);
            assert_eq!(registry.find_by_name(card.name), Some(card.id));
        }
    }

    #[test]
    fn test_goal_keepers_exist() {
        let registry = CardRegistry::standard();
        for goal in registry.find(|c| c.kind.is_goal()) {
            for req in goal.requirements() {
                if let Requirement::Keeper(name) = req {
                    let id = registry.find_by_name(name);
                    assert!(id.is_some(), "{} needs unknown keeper {}", goal.name, name);
                }
            }
        }
    }

    #[test]
    fn test_find_by_name_missing() {
        let registry = CardRegistry::standard();
        assert_eq!(registry.find_by_name("Creeper"), None);
        assert!(!registry.contains(CardId::new(96)));
        assert!(registry.contains(CardId::new(95)));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_name_panics() {
        let mut registry = CardRegistry::new();
        registry.register("Milk", CardKind::Keeper);
        registry.register("Milk", CardKind::Keeper);
    }

    #[test]
    fn test_foods() {
        assert!(is_food("Bread"));
        assert!(!is_food("Toaster"));
    }
}
