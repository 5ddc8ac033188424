//! The board: a finite-state machine over the whole game.
//!
//! `Board` owns every container, the bonus ledger, the turn counters and the
//! sub-state stack. A presentation layer talks to it through exactly two
//! calls: [`Board::snapshot`] to see the table and [`Board::apply`] to make a
//! selection.
//!
//! ## Apply
//!
//! 1. Re-run the rule check: recompute every Rule's contribution, catch up
//!    draws owed to the turn player, re-derive Limit sub-turns.
//! 2. Dispatch the selection on the current sub-state.
//! 3. Settle: evaluate goals, re-check rules, end the turn if the play limit
//!    is reached or the hand is empty, repeat until stable.
//!
//! Every `apply` is transactional. The board is cloned before dispatch (the
//! containers are `im` vectors, so this is cheap) and restored on any error.
//!
//! ```
//! use fluxx_engine::board::Board;
//!
//! let mut board = Board::new_game(2).unwrap();
//! let view = board.snapshot();
//! assert_eq!(view.hand.len(), 4);
//! assert_eq!(view.action_type, "normal");
//!
//! match board.apply(0) {
//!     Ok(_) => assert_eq!(board.history().len(), 1),
//!     Err(err) => {
//!         assert!(err.is_recoverable());
//!         assert!(board.history().is_empty());
//!     }
//! }
//! ```

mod action_type;
mod play;
mod substates;
mod view;

pub use action_type::{ActionType, Choice, Direction};
pub use view::{CardView, GameView, OptionView};

use std::sync::Arc;

use im::Vector;
use smallvec::SmallVec;

use crate::cards::{
    CardDefinition, CardId, CardInstance, CardRegistry, EffectRule, LimitTarget, PlayRule,
    Requirement, RuleKind, StartRule,
};
use crate::core::action::{ActionRecord, Selection};
use crate::core::config::GameConfig;
use crate::core::error::{ApplyOutcome, EngineError};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::rules::aggregator::{contribution, BonusLedger, RuleContext};
use crate::rules::engine::RulesEngine;
use crate::rules::goals::{find_winner, GoalContext};
use crate::zones::{Zone, ZoneManager, ZonePosition};

/// Upper bound on turn rollovers within one settle.
///
/// Each rollover draws at least one card, so a well-formed game settles long
/// before this.
const SETTLE_LIMIT: usize = 64;

/// Complete game state.
#[derive(Clone, Debug)]
pub struct Board {
    config: GameConfig,
    registry: Arc<CardRegistry>,
    instances: Vec<CardInstance>,
    zones: ZoneManager,
    rng: GameRng,
    ledger: BonusLedger,

    turn_counter: u32,
    cards_played: usize,
    cards_drawn: usize,
    /// Set by Free Actions that end the turn outright.
    turn_over: bool,

    /// Sub-state stack; empty means `Normal`.
    pending: Vec<ActionType>,

    /// Take Another Turn waiting to be honoured.
    free_turn: Option<CardId>,
    free_actions_used: SmallVec<[CardId; 4]>,
    mystery: Option<CardId>,
    goal_capacity: usize,

    winner: Option<PlayerId>,
    history: Vector<ActionRecord>,
}

impl Board {
    /// Start a game with the stock card set and default hand sizes.
    ///
    /// Seats are `u8`, so 1 to 255 players are supported; anything else is
    /// [`EngineError::InvalidConfig`].
    pub fn new_game(player_count: usize) -> Result<Self, EngineError> {
        check_player_count(player_count)?;
        Self::with_config(GameConfig::new(player_count))
    }

    /// Start a game from an explicit configuration.
    pub fn with_config(config: GameConfig) -> Result<Self, EngineError> {
        Self::with_registry(config, CardRegistry::standard())
    }

    /// Start a game with a custom card set.
    ///
    /// Shuffles every card into the Deck, deals `hand_size` to each player in
    /// seat order and gives the first player `opening_draw` more.
    pub fn with_registry(config: GameConfig, registry: CardRegistry) -> Result<Self, EngineError> {
        check_player_count(config.player_count)?;

        let mut zones = ZoneManager::new();
        let mut instances = Vec::with_capacity(registry.len());
        for card in registry.iter() {
            zones.add_to_zone(card.id, Zone::Deck, ZonePosition::Top)?;
            instances.push(CardInstance::new(card.id));
        }

        let mut rng = GameRng::new(config.seed);
        zones.shuffle_zone(Zone::Deck, &mut rng);

        let mut board = Self {
            registry: Arc::new(registry),
            instances,
            zones,
            rng,
            ledger: BonusLedger::new(),
            turn_counter: 0,
            cards_played: 0,
            cards_drawn: 0,
            turn_over: false,
            pending: Vec::new(),
            free_turn: None,
            free_actions_used: SmallVec::new(),
            mystery: None,
            goal_capacity: 1,
            winner: None,
            history: Vector::new(),
            config,
        };

        for player in PlayerId::all(board.player_count()) {
            board.draw_to_hand(player, board.config.hand_size);
        }
        board.draw_to_hand(PlayerId::new(0), board.config.opening_draw);
        board.cards_drawn = board.draw_count();

        Ok(board)
    }

    // === Lookup ===

    /// The configuration this game started from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// The card set.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Definition of a card.
    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&CardDefinition> {
        self.registry.get(card)
    }

    /// Find a card by its unique name.
    #[must_use]
    pub fn card_by_name(&self, name: &str) -> Option<CardId> {
        self.registry.find_by_name(name)
    }

    /// Per-game state of a card.
    #[must_use]
    pub fn instance(&self, card: CardId) -> Option<&CardInstance> {
        self.instances.get(card.index())
    }

    /// Card locations.
    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    /// Where a card is.
    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        self.zones.get_zone(card)
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Vec<CardId> {
        self.zones.cards_vec(Zone::Hand(player))
    }

    #[must_use]
    pub fn keep(&self, player: PlayerId) -> Vec<CardId> {
        self.zones.cards_vec(Zone::Keep(player))
    }

    #[must_use]
    pub fn goals(&self) -> Vec<CardId> {
        self.zones.cards_vec(Zone::Goals)
    }

    #[must_use]
    pub fn rules(&self) -> Vec<CardId> {
        self.zones.cards_vec(Zone::Rules)
    }

    #[must_use]
    pub fn discard(&self) -> Vec<CardId> {
        self.zones.cards_vec(Zone::Discard)
    }

    // === Turn State ===

    /// Turn counter; the turn player is `turn_counter mod player_count`.
    #[must_use]
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    /// Whose normal turn is in progress.
    #[must_use]
    pub fn turn_player(&self) -> PlayerId {
        PlayerId::new((self.turn_counter as usize % self.player_count()) as u8)
    }

    /// The player who must make the next selection.
    ///
    /// The limit violator during a limit sub-turn, the turn player otherwise.
    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        self.limit_state().unwrap_or_else(|| self.turn_player())
    }

    /// Current sub-state.
    #[must_use]
    pub fn action_type(&self) -> &ActionType {
        self.pending.last().unwrap_or(&ActionType::Normal)
    }

    /// The player resolving a limit, if any.
    #[must_use]
    pub fn limit_state(&self) -> Option<PlayerId> {
        self.action_type().limit_player()
    }

    #[must_use]
    pub fn cards_played(&self) -> usize {
        self.cards_played
    }

    #[must_use]
    pub fn cards_drawn(&self) -> usize {
        self.cards_drawn
    }

    /// Effective draw count.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        let has_draw = self.has_rule(|r| matches!(r, RuleKind::Draw(_)));
        self.ledger.effective_draw(has_draw)
    }

    /// Effective play limit.
    #[must_use]
    pub fn play_limit(&self) -> usize {
        let has_play = self.has_rule(|r| matches!(r, RuleKind::Play(_)));
        self.ledger.effective_play(has_play)
    }

    /// Plays left this turn.
    #[must_use]
    pub fn remaining_plays(&self) -> usize {
        self.play_limit().saturating_sub(self.cards_played)
    }

    /// How many Goals may be in play (2 under Double Agenda).
    #[must_use]
    pub fn goal_capacity(&self) -> usize {
        self.goal_capacity
    }

    /// The bonus ledger.
    #[must_use]
    pub fn ledger(&self) -> &BonusLedger {
        &self.ledger
    }

    /// The card last played by Mystery Play.
    #[must_use]
    pub fn mystery(&self) -> Option<CardId> {
        self.mystery
    }

    /// Whether a Take Another Turn is waiting.
    #[must_use]
    pub fn free_turn_pending(&self) -> bool {
        self.free_turn.is_some()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Every successfully applied selection, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Apply ===

    /// Apply a selection to the current sub-state.
    ///
    /// On error the board is exactly as it was before the call.
    pub fn apply(&mut self, selection: impl Into<Selection>) -> Result<ApplyOutcome, EngineError> {
        if let Some(winner) = self.winner {
            return Err(EngineError::GameOver(winner));
        }

        let selection = selection.into();
        let checkpoint = self.clone();

        match self.step(&selection) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                *self = checkpoint;
                Err(err)
            }
        }
    }

    fn step(&mut self, selection: &Selection) -> Result<ApplyOutcome, EngineError> {
        self.check_rules()?;
        if let Some(winner) = self.declare_winner() {
            return Ok(ApplyOutcome::Won(winner));
        }

        let record = ActionRecord {
            player: self.acting_player(),
            action_type: self.action_type().name().to_string(),
            selection: selection.clone(),
            turn: self.turn_counter,
            sequence: self.history.len() as u32,
        };

        self.dispatch(selection)?;
        let outcome = self.settle()?;
        self.history.push_back(record);
        Ok(outcome)
    }

    /// Evaluate goals, re-check rules and roll turns over until stable.
    fn settle(&mut self) -> Result<ApplyOutcome, EngineError> {
        for _ in 0..SETTLE_LIMIT {
            if let Some(winner) = self.declare_winner() {
                return Ok(ApplyOutcome::Won(winner));
            }
            self.check_rules()?;
            if let Some(winner) = self.declare_winner() {
                return Ok(ApplyOutcome::Won(winner));
            }

            self.drop_exhausted();

            if !self.turn_should_end() {
                return Ok(ApplyOutcome::Continue);
            }
            self.end_turn()?;
        }
        Ok(ApplyOutcome::Continue)
    }

    fn declare_winner(&mut self) -> Option<PlayerId> {
        let winner = self.evaluate_goals()?;
        self.winner = Some(winner);
        Some(winner)
    }

    /// Pop sub-turns that have nothing left to choose from, and goal removals
    /// that are no longer needed.
    fn drop_exhausted(&mut self) {
        while let Some(&top) = self.pending.last() {
            let settled = top == ActionType::GoalRemove
                && self.zones.zone_size(Zone::Goals) <= self.goal_capacity;
            if !settled && !self.options().is_empty() {
                break;
            }
            self.pending.pop();
        }
    }

    fn turn_should_end(&self) -> bool {
        self.pending.is_empty()
            && (self.turn_over
                || self.cards_played >= self.play_limit()
                || self.zones.zone_size(Zone::Hand(self.turn_player())) == 0)
    }

    // === Rule Check ===

    /// Recompute every Rule, catch up owed draws and re-derive limits.
    pub fn check_rules(&mut self) -> Result<(), EngineError> {
        self.recompute();

        let owed = self.draw_count();
        if owed > self.cards_drawn {
            let player = self.turn_player();
            self.draw_to_hand(player, owed - self.cards_drawn);
            self.cards_drawn = owed;
            self.recompute();
        }

        self.check_limits();
        Ok(())
    }

    /// Re-derive every active Rule's contribution from live state.
    fn recompute(&mut self) {
        self.recompute_grants(true);
    }

    /// With `honour_hand` off, Play All But N only re-grants and never
    /// tops the hand up. Used until the turn's draw is in.
    fn recompute_grants(&mut self, honour_hand: bool) {
        for card in self.zones.cards_vec(Zone::Rules) {
            let Some(rule) = self.rule_of(card) else {
                continue;
            };
            if honour_hand {
                if let RuleKind::Play(PlayRule::AllBut(keep_back)) = rule {
                    self.honour_all_but(card, keep_back);
                }
            }
            self.recompute_rule(card, rule);
        }
    }

    fn recompute_rule(&mut self, card: CardId, rule: RuleKind) {
        let ctx = self.rule_context();
        let inflation = self.inflation_of(card);
        self.ledger.grant(card, contribution(rule, &ctx, inflation));
    }

    /// With nothing played yet and no more cards than Play All But N holds
    /// back, top the hand up so one play is possible.
    fn honour_all_but(&mut self, card: CardId, keep_back: u8) {
        if self.cards_played > 0 || !self.pending.is_empty() {
            return;
        }
        let player = self.turn_player();
        let held = self.zones.zone_size(Zone::Hand(player));
        let keep_back = usize::from(keep_back) + self.inflation_of(card) as usize;
        if held > 0 && held <= keep_back {
            self.draw_to_hand(player, keep_back + 1 - held);
        }
    }

    /// Drop any stale limit sub-turn and push one for the first violator.
    ///
    /// The turn player is exempt, even while resolving a nested sub-turn.
    fn check_limits(&mut self) {
        while self.action_type().limit_player().is_some() {
            self.pending.pop();
        }

        let turn_player = self.turn_player();
        for card in self.zones.cards_vec(Zone::Rules) {
            let Some(RuleKind::Limit { max, target }) = self.rule_of(card) else {
                continue;
            };
            let cap = usize::from(max) + self.inflation_of(card) as usize;

            let violator = PlayerId::all(self.player_count()).find(|&p| {
                let zone = match target {
                    LimitTarget::Hand => Zone::Hand(p),
                    LimitTarget::Keep => Zone::Keep(p),
                };
                p != turn_player && self.zones.zone_size(zone) > cap
            });

            if let Some(player) = violator {
                self.pending.push(match target {
                    LimitTarget::Hand => ActionType::HandLimit { player },
                    LimitTarget::Keep => ActionType::KeeperLimit { player },
                });
                return;
            }
        }
    }

    /// The current winner per the active Goals, without recording it.
    #[must_use]
    pub fn evaluate_goals(&self) -> Option<PlayerId> {
        let goals: Vec<(&[Requirement], usize)> = self
            .zones
            .cards(Zone::Goals)
            .filter_map(|card| {
                let def = self.registry.get(card)?;
                Some((def.requirements(), self.inflation_of(card) as usize))
            })
            .collect();
        if goals.is_empty() {
            return None;
        }
        find_winner(&goals, &self.goal_context())
    }

    fn goal_context(&self) -> GoalContext {
        let n = self.player_count();
        GoalContext {
            keeps: PlayerMap::new(n, |p| {
                self.zones
                    .cards(Zone::Keep(p))
                    .filter_map(|c| self.registry.get(c).map(|d| d.name))
                    .collect()
            }),
            hand_sizes: PlayerMap::new(n, |p| self.zones.zone_size(Zone::Hand(p))),
        }
    }

    fn rule_context(&self) -> RuleContext {
        let n = self.player_count();
        let party_in_play = self
            .card_by_name("Party")
            .and_then(|party| self.zones.get_zone(party))
            .is_some_and(|zone| matches!(zone, Zone::Keep(_)));

        RuleContext {
            hand_len: self.zones.zone_size(Zone::Hand(self.turn_player())),
            cards_played: self.cards_played,
            keep_sizes: PlayerMap::new(n, |p| self.zones.zone_size(Zone::Keep(p))),
            turn_player: self.turn_player(),
            party_in_play,
        }
    }

    // === Turn Flow ===

    fn end_turn(&mut self) -> Result<(), EngineError> {
        self.cards_played = 0;
        self.turn_over = false;
        self.free_actions_used.clear();

        if self.free_turn.take().is_none() {
            self.turn_counter += 1;
        }
        self.begin_turn()
    }

    /// Start-of-turn hooks and the turn's draw.
    fn begin_turn(&mut self) -> Result<(), EngineError> {
        self.recompute_grants(false);
        let player = self.turn_player();

        if let Some(bonus) = self.start_rule(StartRule::NoHandBonus) {
            if self.zones.zone_size(Zone::Hand(player)) == 0 {
                let n = self.no_hand_bonus(bonus);
                self.draw_to_hand(player, n);
            }
        }

        self.recompute_grants(false);
        let draws = self.draw_count();
        self.draw_to_hand(player, draws);
        self.cards_drawn = draws;
        self.recompute();

        if self.start_rule(StartRule::FirstPlayRandom).is_some() && self.play_limit() > 1 {
            let hand = self.hand(player);
            if let Some(card) = self.rng.pick(&hand) {
                self.cards_played += 1;
                self.play_card(card, false)?;
            }
        }
        Ok(())
    }

    // === Cards and Containers ===

    fn definition(&self, card: CardId) -> Result<&CardDefinition, EngineError> {
        self.registry
            .get(card)
            .ok_or_else(|| EngineError::invariant(format!("{} is not in the card set", card)))
    }

    fn rule_of(&self, card: CardId) -> Option<RuleKind> {
        self.registry.get(card).and_then(|d| d.kind.rule())
    }

    fn inflation_of(&self, card: CardId) -> i32 {
        self.instances.get(card.index()).map_or(0, CardInstance::bonus)
    }

    fn has_rule(&self, pred: impl Fn(RuleKind) -> bool) -> bool {
        self.zones
            .cards(Zone::Rules)
            .any(|c| self.rule_of(c).is_some_and(&pred))
    }

    fn start_rule(&self, start: StartRule) -> Option<CardId> {
        self.zones
            .cards(Zone::Rules)
            .find(|&c| self.rule_of(c) == Some(RuleKind::Start(start)))
    }

    /// Draw one card from the Deck into `zone`, reshuffling the Discard in
    /// when the Deck runs out.
    fn draw_into(&mut self, zone: Zone) -> Option<CardId> {
        if self.zones.zone_size(Zone::Deck) == 0 {
            if self.zones.move_all(Zone::Discard, Zone::Deck) == 0 {
                return None;
            }
            self.zones.shuffle_zone(Zone::Deck, &mut self.rng);
        }
        self.zones.move_top(Zone::Deck, zone)
    }

    /// Draw up to `n` cards; stops early only when Deck and Discard are both
    /// empty.
    fn draw_many(&mut self, zone: Zone, n: usize) -> usize {
        (0..n).take_while(|_| self.draw_into(zone).is_some()).count()
    }

    fn draw_to_hand(&mut self, player: PlayerId, n: usize) -> usize {
        self.draw_many(Zone::Hand(player), n)
    }

    /// Move a card, enforcing kind membership and running Rule hooks.
    fn transfer(&mut self, card: CardId, to: Zone) -> Result<Zone, EngineError> {
        let registry = Arc::clone(&self.registry);
        let def = registry
            .get(card)
            .ok_or_else(|| EngineError::invariant(format!("{} is not in the card set", card)))?;

        if !to.accepts(&def.kind) {
            return Err(EngineError::invariant(format!(
                "{} cannot hold {} ({})",
                to,
                def.name,
                def.kind.label()
            )));
        }

        let from = self.zones.move_to_zone(card, to, ZonePosition::Top)?;
        if let Some(rule) = def.kind.rule() {
            if from == Zone::Rules && to != Zone::Rules {
                self.retire(card, rule);
            }
            if to == Zone::Rules && from != Zone::Rules {
                self.enact(card, rule)?;
            }
        }
        Ok(from)
    }

    /// Discard a card that is in play.
    ///
    /// Actions are never in play, so trashing one is a contract bug.
    pub(crate) fn trash(&mut self, card: CardId) -> Result<(), EngineError> {
        let def = self.definition(card)?;
        if def.kind.is_action() {
            return Err(EngineError::invariant(format!(
                "tried to trash Action {}; Actions are never in play",
                def.name
            )));
        }
        self.transfer(card, Zone::Discard).map(|_| ())
    }

    /// A Rule enters the rule space.
    fn enact(&mut self, card: CardId, rule: RuleKind) -> Result<(), EngineError> {
        let rivals: Vec<CardId> = self
            .zones
            .cards(Zone::Rules)
            .filter(|&c| c != card && self.rule_of(c).is_some_and(|r| rule.replaces(&r)))
            .collect();
        for rival in rivals {
            self.transfer(rival, Zone::Discard)?;
        }

        if let Some(instance) = self.instances.get_mut(card.index()) {
            instance.active = true;
        }
        match rule {
            RuleKind::Effect(EffectRule::Inflation) => self.set_inflation(1),
            RuleKind::Effect(EffectRule::DoubleAgenda) => self.goal_capacity = 2,
            _ => {}
        }

        self.recompute_rule(card, rule);
        Ok(())
    }

    /// A Rule leaves the rule space: undo exactly what it contributed.
    fn retire(&mut self, card: CardId, rule: RuleKind) {
        if let Some(instance) = self.instances.get_mut(card.index()) {
            instance.active = false;
        }
        self.ledger.revoke(card);

        match rule {
            RuleKind::Effect(EffectRule::Inflation) => self.set_inflation(0),
            RuleKind::Effect(EffectRule::DoubleAgenda) => {
                self.goal_capacity = 1;
                if self.zones.zone_size(Zone::Goals) > 1
                    && !self.pending.contains(&ActionType::GoalRemove)
                {
                    self.pending.push(ActionType::GoalRemove);
                }
            }
            _ => {}
        }
    }

    /// Switch every card's inflation bonus and re-grant every rule with it.
    fn set_inflation(&mut self, bonus: u8) {
        for instance in &mut self.instances {
            instance.inflation_bonus = bonus;
        }
        self.ledger.set_numeral(i32::from(bonus));

        for card in self.zones.cards_vec(Zone::Rules) {
            if let Some(rule) = self.rule_of(card) {
                self.recompute_rule(card, rule);
            }
        }
    }

    /// Put a card anywhere, for setting up positions.
    ///
    /// Kind membership is still enforced and Rules still enact or retire,
    /// but no goal overflow or turn logic runs.
    pub fn relocate(&mut self, card: CardId, zone: Zone) -> Result<(), EngineError> {
        self.transfer(card, zone).map(|_| ())
    }

    // === Options ===

    /// Legal selections for random drivers.
    ///
    /// Multi-select states also offer the empty selection or one consecutive
    /// window of the required size.
    #[must_use]
    pub fn legal_selections(&self) -> Vec<Selection> {
        let n = self.options().len();
        let singles = (0..n).map(Selection::One);

        match *self.action_type() {
            ActionType::GoalMill | ActionType::Simplify => {
                std::iter::once(Selection::many(&[])).chain(singles).collect()
            }
            ActionType::Everybody1 { per_player, .. } if per_player > 1 && n > 1 => {
                let take = per_player.min(n);
                (0..=n - take)
                    .map(|start| (start..start + take).collect::<Vec<_>>().into())
                    .collect()
            }
            _ => singles.collect(),
        }
    }
}

fn check_player_count(player_count: usize) -> Result<(), EngineError> {
    if player_count == 0 || player_count > 255 {
        return Err(EngineError::InvalidConfig(format!(
            "{} players requested, 1-255 supported",
            player_count
        )));
    }
    Ok(())
}

impl RulesEngine for Board {
    type View = GameView;
    type Choice = Choice;

    fn snapshot(&self) -> GameView {
        Board::snapshot(self)
    }

    fn options(&self) -> Vec<Choice> {
        Board::options(self)
    }

    fn acting_player(&self) -> PlayerId {
        Board::acting_player(self)
    }

    fn apply(&mut self, selection: Selection) -> Result<ApplyOutcome, EngineError> {
        Board::apply(self, selection)
    }

    fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    fn legal_selections(&self) -> Vec<Selection> {
        Board::legal_selections(self)
    }
}
