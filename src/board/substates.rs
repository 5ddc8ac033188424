//! Option lists and selection handling for every sub-state.
//!
//! Options are positional: a selection is an index into exactly the list
//! [`Board::options`] returns for the current state. Each handler validates
//! the selection against that list, pops its state, then acts.

use crate::cards::{CardId, RuleKind};
use crate::core::action::Selection;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::zones::Zone;

use super::{ActionType, Board, Choice, Direction};

impl Board {
    /// The current option list.
    #[must_use]
    pub fn options(&self) -> Vec<Choice> {
        let turn_player = self.turn_player();
        let n = self.player_count();
        let others = || PlayerId::all(n).filter(move |&p| p != turn_player);

        match *self.action_type() {
            ActionType::Normal => {
                let mut options: Vec<Choice> = self.card_choices(Zone::Hand(turn_player)).collect();
                options.extend(
                    self.zones
                        .cards(Zone::Rules)
                        .filter(|c| self.is_free_action(*c) && !self.free_actions_used.contains(c))
                        .map(Choice::FreeAction),
                );
                options
            }
            ActionType::HandLimit { player } => self.card_choices(Zone::Hand(player)).collect(),
            ActionType::KeeperLimit { player } => self.card_choices(Zone::Keep(player)).collect(),
            ActionType::GoalMill => self
                .zones
                .cards(Zone::Hand(turn_player))
                .filter(|&c| self.registry.get(c).is_some_and(|d| d.kind.is_goal()))
                .map(Choice::Card)
                .collect(),
            ActionType::Recycling { .. } | ActionType::Exchange2 { .. } => {
                self.card_choices(Zone::Keep(turn_player)).collect()
            }
            ActionType::Play2 { depth, .. } | ActionType::Everybody1 { depth, .. } => {
                self.card_choices(Zone::TempHand(depth)).collect()
            }
            ActionType::Zap => PlayerId::all(n)
                .flat_map(|p| self.card_choices(Zone::Keep(p)))
                .chain(self.card_choices(Zone::Goals))
                .chain(self.card_choices(Zone::Rules))
                .collect(),
            ActionType::GoalRemove => self.card_choices(Zone::Goals).collect(),
            ActionType::Rotate => vec![
                Choice::Direction(Direction::Left),
                Choice::Direction(Direction::Right),
            ],
            ActionType::DoItAgain { source } => self
                .zones
                .cards(Zone::Discard)
                .filter(|&c| {
                    c != source
                        && self
                            .registry
                            .get(c)
                            .is_some_and(|d| d.kind.is_action() || d.kind.is_rule())
                })
                .map(Choice::Card)
                .collect(),
            ActionType::Steal | ActionType::Exchange1 => others()
                .flat_map(|p| self.card_choices(Zone::Keep(p)))
                .collect(),
            ActionType::Simplify => self.card_choices(Zone::Rules).collect(),
            ActionType::Trash => PlayerId::all(n)
                .flat_map(|p| self.card_choices(Zone::Keep(p)))
                .collect(),
            ActionType::Trade | ActionType::UseTake => others().map(Choice::Player).collect(),
        }
    }

    fn card_choices(&self, zone: Zone) -> impl Iterator<Item = Choice> + '_ {
        self.zones.cards(zone).map(Choice::Card)
    }

    fn is_free_action(&self, card: CardId) -> bool {
        matches!(self.rule_of(card), Some(RuleKind::FreeAction(_)))
    }

    // === Selection Decoding ===

    fn chosen(&self, selection: &Selection) -> Result<Choice, EngineError> {
        let index = selection
            .single()
            .ok_or_else(|| EngineError::illegal("Choose exactly one option."))?;
        let options = self.options();
        options
            .get(index)
            .copied()
            .ok_or(EngineError::SelectionOutOfRange {
                index,
                available: options.len(),
            })
    }

    fn chosen_card(&self, selection: &Selection) -> Result<CardId, EngineError> {
        let choice = self.chosen(selection)?;
        choice
            .card()
            .ok_or_else(|| EngineError::invariant(format!("expected a card, got {:?}", choice)))
    }

    fn chosen_player(&self, selection: &Selection) -> Result<PlayerId, EngineError> {
        let choice = self.chosen(selection)?;
        choice
            .player()
            .ok_or_else(|| EngineError::invariant(format!("expected a player, got {:?}", choice)))
    }

    /// Several distinct cards from the option list.
    fn chosen_cards(&self, selection: &Selection) -> Result<Vec<CardId>, EngineError> {
        let options = self.options();
        let mut cards = Vec::new();
        for index in selection.indices() {
            let card = options.get(index).and_then(|c| c.card()).ok_or(
                EngineError::SelectionOutOfRange {
                    index,
                    available: options.len(),
                },
            )?;
            if cards.contains(&card) {
                return Err(EngineError::illegal("Each option may only be chosen once."));
            }
            cards.push(card);
        }
        Ok(cards)
    }

    // === Dispatch ===

    pub(super) fn dispatch(&mut self, selection: &Selection) -> Result<(), EngineError> {
        let turn_player = self.turn_player();
        let n = self.player_count();
        let state = *self.action_type();

        match state {
            ActionType::Normal => {
                let choice = self.chosen(selection)?;
                self.play_normal(choice)
            }
            ActionType::HandLimit { .. } | ActionType::KeeperLimit { .. } => {
                let card = self.chosen_card(selection)?;
                self.pending.pop();
                self.transfer(card, Zone::Discard).map(|_| ())
            }
            ActionType::GoalMill => {
                let goals = self.chosen_cards(selection)?;
                self.pending.pop();
                for &goal in &goals {
                    self.transfer(goal, Zone::Discard)?;
                }
                self.draw_to_hand(turn_player, goals.len());
                Ok(())
            }
            ActionType::Recycling { source } => {
                let keeper = self.chosen_card(selection)?;
                self.pending.pop();
                self.trash(keeper)?;
                let draw = self.recycling_draw(source);
                self.draw_to_hand(turn_player, draw);
                Ok(())
            }
            ActionType::Play2 { depth, remaining } => {
                let card = self.chosen_card(selection)?;
                self.pending.pop();

                let temp = Zone::TempHand(depth);
                if remaining > 1 && self.zones.zone_size(temp) > 1 {
                    self.pending.push(ActionType::Play2 {
                        depth,
                        remaining: remaining - 1,
                    });
                } else {
                    self.discard_temp_hand(depth, Some(card))?;
                }
                self.play_card(card, false)
            }
            ActionType::Everybody1 {
                depth,
                per_player,
                given,
            } => {
                let temp = Zone::TempHand(depth);
                let need = per_player.min(self.zones.zone_size(temp));
                let cards = self.chosen_cards(selection)?;
                if cards.len() != need {
                    return Err(EngineError::illegal(format!("Choose {} cards.", need)));
                }
                self.pending.pop();

                let recipient = turn_player.offset((given / per_player) as i32, n);
                for &card in &cards {
                    self.transfer(card, Zone::Hand(recipient))?;
                }

                let given = given + need;
                if self.zones.zone_size(temp) == 0 || given >= n * per_player {
                    self.discard_temp_hand(depth, None)?;
                } else {
                    self.pending.push(ActionType::Everybody1 {
                        depth,
                        per_player,
                        given,
                    });
                }
                Ok(())
            }
            ActionType::Zap => {
                let card = self.chosen_card(selection)?;
                self.pending.pop();
                self.transfer(card, Zone::Hand(turn_player)).map(|_| ())
            }
            ActionType::GoalRemove => {
                let goal = self.chosen_card(selection)?;
                self.pending.pop();
                self.trash(goal)?;
                if self.zones.zone_size(Zone::Goals) > self.goal_capacity {
                    self.pending.push(ActionType::GoalRemove);
                }
                Ok(())
            }
            ActionType::Rotate => {
                let Choice::Direction(direction) = self.chosen(selection)? else {
                    return Err(EngineError::invariant("rotate options are directions"));
                };
                self.pending.pop();

                let hands: Vec<(PlayerId, Vec<CardId>)> =
                    PlayerId::all(n).map(|p| (p, self.hand(p))).collect();
                for (player, hand) in hands {
                    let dest = player.offset(direction.steps(), n);
                    for card in hand {
                        self.transfer(card, Zone::Hand(dest))?;
                    }
                }
                Ok(())
            }
            ActionType::DoItAgain { .. } => {
                let card = self.chosen_card(selection)?;
                self.pending.pop();
                self.play_card(card, false)
            }
            ActionType::Steal => {
                let keeper = self.chosen_card(selection)?;
                self.pending.pop();
                self.transfer(keeper, Zone::Keep(turn_player)).map(|_| ())
            }
            ActionType::Simplify => {
                let rules = self.chosen_cards(selection)?;
                let allowed = (self.zones.zone_size(Zone::Rules) + 1) / 2;
                if rules.len() > allowed {
                    return Err(EngineError::illegal(format!(
                        "You may discard at most {} Rules.",
                        allowed
                    )));
                }
                self.pending.pop();
                for rule in rules {
                    self.trash(rule)?;
                }
                Ok(())
            }
            ActionType::Trash => {
                let keeper = self.chosen_card(selection)?;
                self.pending.pop();
                self.trash(keeper)
            }
            ActionType::Exchange1 => {
                let card = self.chosen_card(selection)?;
                let Some(Zone::Keep(from)) = self.zones.get_zone(card) else {
                    return Err(EngineError::invariant(format!("{} is not a kept Keeper", card)));
                };
                self.pending.pop();
                self.pending.push(ActionType::Exchange2 { from, card });
                Ok(())
            }
            ActionType::Exchange2 { from, card } => {
                let mine = self.chosen_card(selection)?;
                self.pending.pop();
                if self.zones.is_in_zone(card, Zone::Keep(from)) {
                    self.transfer(card, Zone::Keep(turn_player))?;
                    self.transfer(mine, Zone::Keep(from))?;
                }
                Ok(())
            }
            ActionType::Trade => {
                let other = self.chosen_player(selection)?;
                self.pending.pop();

                let mine = self.hand(turn_player);
                let theirs = self.hand(other);
                for card in mine {
                    self.transfer(card, Zone::Hand(other))?;
                }
                for card in theirs {
                    self.transfer(card, Zone::Hand(turn_player))?;
                }
                Ok(())
            }
            ActionType::UseTake => {
                let victim = self.chosen_player(selection)?;
                self.pending.pop();

                let hand = self.hand(victim);
                match self.rng.pick(&hand) {
                    Some(card) => self.play_card(card, false),
                    None => Ok(()),
                }
            }
        }
    }

    /// Discard whatever is left in a temp hand, except `keep`.
    fn discard_temp_hand(&mut self, depth: u8, keep: Option<CardId>) -> Result<(), EngineError> {
        for card in self.zones.cards_vec(Zone::TempHand(depth)) {
            if Some(card) != keep {
                self.transfer(card, Zone::Discard)?;
            }
        }
        Ok(())
    }
}
