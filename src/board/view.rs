//! Read-only snapshot for presentation layers.
//!
//! A `GameView` holds everything the acting player may see: public
//! containers, their own hand, the counters and the labelled option list.
//! Other players' hands are reduced to their sizes. It serializes with serde
//! so a front end can ship it over any wire format.

use serde::Serialize;

use crate::cards::CardId;
use crate::core::player::PlayerId;
use crate::zones::Zone;

use super::{Board, Choice, Direction};

/// A card as shown to a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub name: &'static str,
    pub kind: &'static str,
}

/// One labelled option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub choice: Choice,
    pub label: String,
}

/// Snapshot of the table from the acting player's seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Effective draw count.
    pub draws: usize,
    /// Effective play limit.
    pub plays: usize,
    /// The acting player.
    pub player: PlayerId,
    pub turn_player: PlayerId,
    pub turn: u32,
    /// Every player's Keepers, in seat order.
    pub keeps: Vec<Vec<CardView>>,
    /// Every player's hand size, in seat order.
    pub hand_sizes: Vec<usize>,
    pub goals: Vec<CardView>,
    pub rules: Vec<CardView>,
    pub discard: Vec<CardView>,
    pub deck_size: usize,
    /// The acting player's hand.
    pub hand: Vec<CardView>,
    pub options: Vec<OptionView>,
    /// Sub-state name, e.g. `"normal"` or `"keeperlimit"`.
    pub action_type: &'static str,
    /// Plays left this turn.
    pub remaining: usize,
    /// Cards drawn this turn.
    pub drawn: usize,
    pub mystery: Option<CardView>,
    pub winner: Option<PlayerId>,
    pub limit_state: Option<PlayerId>,
}

impl Board {
    /// Snapshot of the table for the acting player.
    #[must_use]
    pub fn snapshot(&self) -> GameView {
        let n = self.player_count();
        let player = self.acting_player();
        let views = |zone: Zone| -> Vec<CardView> {
            self.zones
                .cards(zone)
                .filter_map(|c| self.card_view(c))
                .collect()
        };

        GameView {
            draws: self.draw_count(),
            plays: self.play_limit(),
            player,
            turn_player: self.turn_player(),
            turn: self.turn_counter,
            keeps: PlayerId::all(n).map(|p| views(Zone::Keep(p))).collect(),
            hand_sizes: PlayerId::all(n)
                .map(|p| self.zones.zone_size(Zone::Hand(p)))
                .collect(),
            goals: views(Zone::Goals),
            rules: views(Zone::Rules),
            discard: views(Zone::Discard),
            deck_size: self.zones.zone_size(Zone::Deck),
            hand: views(Zone::Hand(player)),
            options: self
                .options()
                .into_iter()
                .map(|choice| OptionView {
                    choice,
                    label: self.label(choice),
                })
                .collect(),
            action_type: self.action_type().name(),
            remaining: self.remaining_plays(),
            drawn: self.cards_drawn,
            mystery: self.mystery.and_then(|c| self.card_view(c)),
            winner: self.winner,
            limit_state: self.limit_state(),
        }
    }

    fn card_view(&self, card: CardId) -> Option<CardView> {
        let def = self.registry.get(card)?;
        Some(CardView {
            id: card,
            name: def.name,
            kind: def.kind.label(),
        })
    }

    /// Human-readable text for an option.
    #[must_use]
    pub fn label(&self, choice: Choice) -> String {
        let name = |card: CardId| self.registry.get(card).map_or("?", |d| d.name);
        match choice {
            Choice::Card(card) => name(card).to_string(),
            Choice::FreeAction(rule) => format!("Use {}", name(rule)),
            Choice::Player(player) => player.to_string(),
            Choice::Direction(Direction::Left) => "Left".to_string(),
            Choice::Direction(Direction::Right) => "Right".to_string(),
        }
    }
}
