//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` records, for every card, which container owns it, and
//! keeps each container's cards in order. The end of a zone's order is its
//! top: the next card drawn from the Deck, the newest card in a Hand, the most
//! recently played Goal.
//!
//! A card is in exactly one zone. `move_to_zone` is the only way to change
//! that and it either fully succeeds or leaves everything untouched.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::cards::{CardId, CardKind};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// Every container a card can be owned by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    Deck,
    Discard,
    Hand(PlayerId),
    Keep(PlayerId),
    Goals,
    Rules,
    /// Scratch hand for Draw 3 Play 2, Draw 2 and Use 'Em and Everybody Gets 1,
    /// indexed by nesting depth.
    TempHand(u8),
}

impl Zone {
    /// Whether a card of this kind may live here.
    ///
    /// Keeps take only Keepers, the goal space only Goals and the rule space
    /// only Rules. Every other zone takes anything.
    #[must_use]
    pub fn accepts(self, kind: &CardKind) -> bool {
        match self {
            Zone::Keep(_) => kind.is_keeper(),
            Zone::Goals => kind.is_goal(),
            Zone::Rules => kind.is_rule(),
            Zone::Deck | Zone::Discard | Zone::Hand(_) | Zone::TempHand(_) => true,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Deck => write!(f, "Deck"),
            Zone::Discard => write!(f, "Discard"),
            Zone::Hand(p) => write!(f, "Hand of {}", p),
            Zone::Keep(p) => write!(f, "Keep of {}", p),
            Zone::Goals => write!(f, "Goals"),
            Zone::Rules => write!(f, "Rules"),
            Zone::TempHand(depth) => write!(f, "Temp hand {}", depth),
        }
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ZonePosition {
    /// Add to top of zone (end of the order).
    Top,
    /// Add to bottom of zone.
    Bottom,
}

/// Manages card locations across zones.
///
/// ## Usage
///
/// ```
/// use fluxx_engine::cards::CardId;
/// use fluxx_engine::core::PlayerId;
/// use fluxx_engine::zones::{Zone, ZoneManager, ZonePosition};
///
/// let mut manager = ZoneManager::new();
/// manager.add_to_zone(CardId::new(10), Zone::Deck, ZonePosition::Top).unwrap();
/// manager.add_to_zone(CardId::new(11), Zone::Deck, ZonePosition::Top).unwrap();
///
/// let hand = Zone::Hand(PlayerId::new(0));
/// assert_eq!(manager.move_top(Zone::Deck, hand), Some(CardId::new(11)));
/// assert_eq!(manager.get_zone(CardId::new(11)), Some(hand));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: card_id -> zone
    locations: FxHashMap<CardId, Zone>,

    /// Ordered card lists per zone, bottom first.
    zone_order: FxHashMap<Zone, Vector<CardId>>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a card.
    ///
    /// Fails if the card is already tracked.
    pub fn add_to_zone(
        &mut self,
        card: CardId,
        zone: Zone,
        position: ZonePosition,
    ) -> Result<(), EngineError> {
        if let Some(existing) = self.locations.get(&card) {
            return Err(EngineError::invariant(format!(
                "{} already tracked in {}",
                card, existing
            )));
        }

        self.locations.insert(card, zone);
        self.insert_ordered(card, zone, position);
        Ok(())
    }

    /// Move a card from wherever it is to `new_zone`.
    ///
    /// Returns the old zone. Moving a card into the zone it already occupies
    /// re-inserts it at `position`.
    pub fn move_to_zone(
        &mut self,
        card: CardId,
        new_zone: Zone,
        position: ZonePosition,
    ) -> Result<Zone, EngineError> {
        let old_zone = self
            .locations
            .get(&card)
            .copied()
            .ok_or_else(|| EngineError::invariant(format!("{} is not tracked", card)))?;

        if let Some(order) = self.zone_order.get_mut(&old_zone) {
            order.retain(|&c| c != card);
        }

        self.locations.insert(card, new_zone);
        self.insert_ordered(card, new_zone, position);
        Ok(old_zone)
    }

    fn insert_ordered(&mut self, card: CardId, zone: Zone, position: ZonePosition) {
        let order = self.zone_order.entry(zone).or_default();
        match position {
            ZonePosition::Top => order.push_back(card),
            ZonePosition::Bottom => order.push_front(card),
        }
    }

    /// Move the top card of `from` to the top of `to`.
    ///
    /// Returns `None` when `from` is empty.
    pub fn move_top(&mut self, from: Zone, to: Zone) -> Option<CardId> {
        let card = self.zone_order.get_mut(&from)?.pop_back()?;
        self.locations.insert(card, to);
        self.insert_ordered(card, to, ZonePosition::Top);
        Some(card)
    }

    /// Move every card of `from` onto the top of `to`, keeping their order.
    ///
    /// Returns how many cards moved.
    pub fn move_all(&mut self, from: Zone, to: Zone) -> usize {
        if from == to {
            return 0;
        }
        let moved = match self.zone_order.get_mut(&from) {
            Some(order) => std::mem::take(order),
            None => return 0,
        };
        let count = moved.len();
        for card in moved {
            self.locations.insert(card, to);
            self.insert_ordered(card, to, ZonePosition::Top);
        }
        count
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn get_zone(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in_zone(&self, card: CardId, zone: Zone) -> bool {
        self.locations.get(&card) == Some(&zone)
    }

    /// Cards in a zone, bottom first.
    pub fn cards(&self, zone: Zone) -> impl Iterator<Item = CardId> + '_ {
        self.zone_order.get(&zone).into_iter().flat_map(|v| v.iter().copied())
    }

    /// Cards in a zone collected into a `Vec`, bottom first.
    #[must_use]
    pub fn cards_vec(&self, zone: Zone) -> Vec<CardId> {
        self.cards(zone).collect()
    }

    /// Get the number of cards in a zone.
    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.zone_order.get(&zone).map_or(0, Vector::len)
    }

    /// Get the top card of a zone.
    #[must_use]
    pub fn top_card(&self, zone: Zone) -> Option<CardId> {
        self.zone_order.get(&zone)?.back().copied()
    }

    /// Get the bottom (oldest) card of a zone.
    #[must_use]
    pub fn bottom_card(&self, zone: Zone) -> Option<CardId> {
        self.zone_order.get(&zone)?.front().copied()
    }

    /// Shuffle a zone's order.
    pub fn shuffle_zone(&mut self, zone: Zone, rng: &mut GameRng) {
        if let Some(order) = self.zone_order.get_mut(&zone) {
            let mut cards: Vec<CardId> = order.iter().copied().collect();
            rng.shuffle(&mut cards);
            *order = cards.into_iter().collect();
        }
    }

    /// Get total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Check if the manager tracks a card.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.locations.contains_key(&card)
    }

    /// Every (zone, size) pair with at least one card.
    pub fn occupied(&self) -> impl Iterator<Item = (Zone, usize)> + '_ {
        self.zone_order
            .iter()
            .filter(|(_, order)| !order.is_empty())
            .map(|(zone, order)| (*zone, order.len()))
    }
}
