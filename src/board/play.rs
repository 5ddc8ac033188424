//! Playing cards: where each kind lands, what Actions do, Free Actions.
//!
//! Every play belongs to the turn player, including plays out of a temp hand
//! or a Do That Again. Only plays straight from the hand are strict: an
//! Action with nothing to act on is refused there while the hand holds
//! something else worth playing. Anywhere else it silently fizzles.

use crate::cards::{ActionKind, CardId, CardKind, FreeAction, RuleKind};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::zones::Zone;

use super::{ActionType, Board, Choice};

/// Base size of Jackpot, Get On With It, Recycling and the No-Hand Bonus.
const BIG_DRAW: usize = 3;

impl Board {
    /// A selection made in the `Normal` state.
    pub(super) fn play_normal(&mut self, choice: Choice) -> Result<(), EngineError> {
        match choice {
            Choice::Card(card) => {
                let strict = self.has_alternative(card);
                self.cards_played += 1;
                self.play_card(card, strict).map_err(|err| match err {
                    EngineError::IllegalMove(msg) => EngineError::IllegalPlay(msg),
                    other => other,
                })
            }
            Choice::FreeAction(rule) => self.use_free_action(rule),
            other => Err(EngineError::invariant(format!(
                "{:?} offered in the normal state",
                other
            ))),
        }
    }

    /// Whether the hand holds something other than `card` that would not
    /// fizzle. A hand of nothing but targetless Actions must still be
    /// playable.
    fn has_alternative(&self, card: CardId) -> bool {
        self.zones
            .cards(Zone::Hand(self.turn_player()))
            .any(|c| c != card && !self.lacks_target(c))
    }

    /// Whether `card` is an Action that would be refused for want of a target.
    fn lacks_target(&self, card: CardId) -> bool {
        let Some(CardKind::Action(action)) = self.registry.get(card).map(|d| &d.kind) else {
            return false;
        };
        match action {
            ActionKind::DoThatAgain => !self.zones.cards(Zone::Discard).any(|c| {
                c != card
                    && self
                        .registry
                        .get(c)
                        .is_some_and(|d| d.kind.is_action() || d.kind.is_rule())
            }),
            ActionKind::Steal => !self
                .others()
                .any(|p| self.zones.zone_size(Zone::Keep(p)) > 0),
            _ => false,
        }
    }

    /// Put a card into play for the turn player.
    pub(super) fn play_card(&mut self, card: CardId, strict: bool) -> Result<(), EngineError> {
        let kind = self.definition(card)?.kind.clone();
        let player = self.turn_player();

        match kind {
            CardKind::Keeper => {
                self.transfer(card, Zone::Keep(player))?;
            }
            CardKind::Goal(_) => {
                self.transfer(card, Zone::Goals)?;
                self.overflow_goals()?;
            }
            CardKind::Rule(_) => {
                self.transfer(card, Zone::Rules)?;
            }
            CardKind::Action(action) => {
                self.transfer(card, Zone::Discard)?;
                self.resolve_action(card, action, strict)?;
            }
        }
        Ok(())
    }

    /// Too many Goals: the oldest goes with one slot, the player picks with two.
    fn overflow_goals(&mut self) -> Result<(), EngineError> {
        if self.zones.zone_size(Zone::Goals) <= self.goal_capacity {
            return Ok(());
        }
        if self.goal_capacity == 1 {
            while self.zones.zone_size(Zone::Goals) > 1 {
                let Some(oldest) = self.zones.bottom_card(Zone::Goals) else {
                    break;
                };
                self.trash(oldest)?;
            }
        } else if !self.pending.contains(&ActionType::GoalRemove) {
            self.pending.push(ActionType::GoalRemove);
        }
        Ok(())
    }

    /// Push a sub-turn if it has at least one option.
    fn open(&mut self, state: ActionType) -> bool {
        self.pending.push(state);
        if self.options().is_empty() {
            self.pending.pop();
            false
        } else {
            true
        }
    }

    /// Draw into a fresh temp hand; returns its depth and how many arrived.
    fn open_temp_hand(&mut self, draw: usize) -> Option<(u8, usize)> {
        let depth = self
            .pending
            .iter()
            .filter(|state| state.temp_depth().is_some())
            .count() as u8;
        let drawn = self.draw_many(Zone::TempHand(depth), draw);
        (drawn > 0).then_some((depth, drawn))
    }

    fn others(&self) -> impl Iterator<Item = PlayerId> {
        let turn_player = self.turn_player();
        let n = self.player_count();
        (1..n).map(move |i| turn_player.offset(i as i32, n))
    }

    /// Carry out an Action already moved to the Discard.
    ///
    /// Do That Again and Steal with nothing to act on fail with
    /// [`EngineError::IllegalPlay`] only when `strict`; otherwise, like every
    /// other targetless Action, they are spent with no effect.
    fn resolve_action(
        &mut self,
        source: CardId,
        action: ActionKind,
        strict: bool,
    ) -> Result<(), EngineError> {
        let player = self.turn_player();
        let n = self.player_count();
        let bonus = self.inflation_of(source) as usize;

        match action {
            ActionKind::Jackpot => {
                self.draw_to_hand(player, BIG_DRAW + bonus);
            }
            ActionKind::ShareTheWealth => {
                let mut keepers: Vec<CardId> = PlayerId::all(n)
                    .flat_map(|p| self.keep(p))
                    .collect();
                self.rng.shuffle(&mut keepers);
                for (i, card) in keepers.into_iter().enumerate() {
                    let recipient = player.offset(i as i32, n);
                    self.transfer(card, Zone::Keep(recipient))?;
                }
            }
            ActionKind::DiscardAndDraw => {
                let hand = self.hand(player);
                for &card in &hand {
                    self.transfer(card, Zone::Discard)?;
                }
                self.draw_to_hand(player, hand.len());
            }
            ActionKind::Draw3Play2 => {
                if let Some((depth, drawn)) = self.open_temp_hand(3 + bonus) {
                    let remaining = (2 + bonus).min(drawn);
                    self.pending.push(ActionType::Play2 { depth, remaining });
                }
            }
            ActionKind::Draw2UseEm => {
                if let Some((depth, drawn)) = self.open_temp_hand(2 + bonus) {
                    self.pending.push(ActionType::Play2 { depth, remaining: drawn });
                }
            }
            ActionKind::EverybodyGets1 => {
                let per_player = 1 + bonus;
                if let Some((depth, _)) = self.open_temp_hand(n * per_player) {
                    self.pending.push(ActionType::Everybody1 {
                        depth,
                        per_player,
                        given: 0,
                    });
                }
            }
            ActionKind::Zap => {
                self.open(ActionType::Zap);
            }
            ActionKind::AnotherTurn => {
                self.free_turn = Some(source);
            }
            ActionKind::RotateHands => {
                if n > 1 {
                    self.pending.push(ActionType::Rotate);
                }
            }
            ActionKind::DoThatAgain => {
                if !self.open(ActionType::DoItAgain { source }) && strict {
                    return Err(EngineError::IllegalPlay(
                        "There are no Actions or New Rules to play.".into(),
                    ));
                }
            }
            ActionKind::Steal => {
                if !self.open(ActionType::Steal) && strict {
                    return Err(EngineError::IllegalPlay("There are no Keepers to steal.".into()));
                }
            }
            ActionKind::Simplify => {
                self.open(ActionType::Simplify);
            }
            ActionKind::TrashKeeper => {
                self.open(ActionType::Trash);
            }
            ActionKind::ExchangeKeepers => {
                if self.zones.zone_size(Zone::Keep(player)) > 0 {
                    self.open(ActionType::Exchange1);
                }
            }
            ActionKind::TradeHands => {
                self.open(ActionType::Trade);
            }
            ActionKind::UseWhatYouTake => {
                self.open(ActionType::UseTake);
            }
            ActionKind::RulesReset => {
                for rule in self.rules() {
                    self.trash(rule)?;
                }
            }
            ActionKind::RandomTax => {
                let tax = 1 + bonus;
                let payers: Vec<PlayerId> = self.others().collect();
                for payer in payers {
                    for _ in 0..tax {
                        let hand = self.hand(payer);
                        let Some(card) = self.rng.pick(&hand) else {
                            break;
                        };
                        self.transfer(card, Zone::Hand(player))?;
                    }
                }
            }
            ActionKind::NoLimits => {
                for rule in self.rules() {
                    if matches!(self.rule_of(rule), Some(RuleKind::Limit { .. })) {
                        self.trash(rule)?;
                    }
                }
            }
            ActionKind::EmptyTheTrash => {
                for card in self.discard() {
                    if card != source {
                        self.transfer(card, Zone::Deck)?;
                    }
                }
                self.zones.shuffle_zone(Zone::Deck, &mut self.rng);
            }
        }
        Ok(())
    }

    fn use_free_action(&mut self, rule: CardId) -> Result<(), EngineError> {
        let Some(RuleKind::FreeAction(free)) = self.rule_of(rule) else {
            return Err(EngineError::invariant(format!("{} is not a Free Action", rule)));
        };
        if self.free_actions_used.contains(&rule) {
            return Err(EngineError::illegal("That Free Action was already used this turn."));
        }
        self.free_actions_used.push(rule);

        let player = self.turn_player();
        let bonus = self.inflation_of(rule) as usize;

        match free {
            FreeAction::SwapPlaysForDraws => {
                let left = self.remaining_plays();
                self.draw_to_hand(player, left);
                self.cards_played += left;
                self.turn_over = true;
            }
            FreeAction::MysteryPlay => {
                let card = self
                    .draw_into(Zone::Hand(player))
                    .ok_or_else(|| EngineError::illegal("There are no cards left to draw."))?;
                self.mystery = Some(card);
                self.play_card(card, false)?;
            }
            FreeAction::GoalMill => {
                let has_goal = self
                    .zones
                    .cards(Zone::Hand(player))
                    .any(|c| self.registry.get(c).is_some_and(|d| d.kind.is_goal()));
                if !has_goal {
                    return Err(EngineError::illegal("You have no goals."));
                }
                self.pending.push(ActionType::GoalMill);
            }
            FreeAction::GetOnWithIt => {
                let hand = self.hand(player);
                if hand.is_empty() {
                    return Err(EngineError::illegal("You have no cards to discard."));
                }
                for card in hand {
                    self.transfer(card, Zone::Discard)?;
                }
                self.draw_to_hand(player, BIG_DRAW + bonus);
                self.turn_over = true;
            }
            FreeAction::Recycling => {
                if self.zones.zone_size(Zone::Keep(player)) == 0 {
                    return Err(EngineError::illegal("You have no Keepers."));
                }
                self.pending.push(ActionType::Recycling { source: rule });
            }
        }
        Ok(())
    }

    /// Keepers drawn for Recycling.
    pub(super) fn recycling_draw(&self, source: CardId) -> usize {
        BIG_DRAW + self.inflation_of(source) as usize
    }

    /// Cards drawn for the No-Hand Bonus.
    pub(super) fn no_hand_bonus(&self, source: CardId) -> usize {
        BIG_DRAW + self.inflation_of(source) as usize
    }
}
