//! Rule effect aggregation: how many cards are drawn and played this turn.
//!
//! Every active Rule contributes a draw bonus, a play bonus, both or neither.
//! The effective counts are
//!
//! ```text
//! draw = 1 + Σ draw bonuses + numeral · [no Draw rule in play]
//! play = 1 + Σ play bonuses + numeral · [no Play rule in play]
//! ```
//!
//! clamped at zero. Contributions are derived fresh from live state on every
//! rule-check pass ([`contribution`]), but the [`BonusLedger`] remembers the
//! value each rule last contributed, so retiring a rule removes exactly what
//! was granted even if the state has moved on since.
//!
//! ```
//! use fluxx_engine::cards::{CardId, RuleKind};
//! use fluxx_engine::core::PlayerMap;
//! use fluxx_engine::rules::aggregator::{contribution, BonusLedger, RuleContext};
//!
//! let ctx = RuleContext {
//!     hand_len: 4,
//!     cards_played: 0,
//!     keep_sizes: PlayerMap::new(2, |_| 0),
//!     turn_player: fluxx_engine::core::PlayerId::new(0),
//!     party_in_play: false,
//! };
//!
//! let mut ledger = BonusLedger::new();
//! ledger.grant(CardId::new(3), contribution(RuleKind::Draw(3), &ctx, 0));
//! assert_eq!(ledger.effective_draw(true), 3);
//!
//! ledger.revoke(CardId::new(3));
//! assert_eq!(ledger.effective_draw(false), 1);
//! ```

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::cards::{CardId, EffectRule, PlayRule, RuleKind};
use crate::core::player::{PlayerId, PlayerMap};

/// Live state a rule's contribution depends on.
#[derive(Clone, Debug)]
pub struct RuleContext {
    /// Size of the turn player's hand.
    pub hand_len: usize,
    /// Cards the turn player has played this turn.
    pub cards_played: usize,
    /// Keepers held by each player.
    pub keep_sizes: PlayerMap<usize>,
    /// Whose normal turn it is.
    pub turn_player: PlayerId,
    /// Whether anyone keeps Party.
    pub party_in_play: bool,
}

impl RuleContext {
    fn turn_keep(&self) -> usize {
        self.keep_sizes[self.turn_player]
    }

    fn others(&self) -> impl Iterator<Item = usize> + '_ {
        self.keep_sizes
            .iter()
            .filter(move |(p, _)| *p != self.turn_player)
            .map(|(_, n)| *n)
    }

    /// Turn player has strictly fewer Keepers than every other player.
    /// Never true without another player to compare against.
    #[must_use]
    pub fn turn_player_poorest(&self) -> bool {
        let mine = self.turn_keep();
        let mut others = self.others().peekable();
        others.peek().is_some() && others.all(|n| mine < n)
    }

    /// Turn player has strictly more Keepers than every other player.
    /// Never true without another player to compare against.
    #[must_use]
    pub fn turn_player_richest(&self) -> bool {
        let mine = self.turn_keep();
        let mut others = self.others().peekable();
        others.peek().is_some() && others.all(|n| mine > n)
    }
}

/// What a single rule adds to the draw and play counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub draw: Option<i32>,
    pub play: Option<i32>,
}

impl Contribution {
    /// No contribution.
    pub const NONE: Contribution = Contribution { draw: None, play: None };

    #[must_use]
    pub fn draw(n: i32) -> Self {
        Self { draw: Some(n), play: None }
    }

    #[must_use]
    pub fn play(n: i32) -> Self {
        Self { draw: None, play: Some(n) }
    }

    #[must_use]
    pub fn both(n: i32) -> Self {
        Self { draw: Some(n), play: Some(n) }
    }
}

/// Derive a rule's contribution from live state.
///
/// `inflation` is the rule card's own inflation bonus (0 or 1).
#[must_use]
pub fn contribution(rule: RuleKind, ctx: &RuleContext, inflation: i32) -> Contribution {
    match rule {
        RuleKind::Draw(n) => Contribution::draw(i32::from(n) - 1 + inflation),
        RuleKind::Play(PlayRule::Count(n)) => Contribution::play(i32::from(n) - 1 + inflation),
        RuleKind::Play(PlayRule::All) => {
            let limit = (ctx.cards_played + ctx.hand_len) as i32;
            Contribution::play(limit - 1)
        }
        RuleKind::Play(PlayRule::AllBut(k)) => {
            let limit = (ctx.cards_played + ctx.hand_len) as i32 - (i32::from(k) + inflation);
            Contribution::play(limit - 1)
        }
        RuleKind::Effect(EffectRule::PartyBonus) if ctx.party_in_play => {
            Contribution::both(1 + inflation)
        }
        RuleKind::Effect(EffectRule::PoorBonus) if ctx.turn_player_poorest() => {
            Contribution::draw(1 + inflation)
        }
        RuleKind::Effect(EffectRule::RichBonus) if ctx.turn_player_richest() => {
            Contribution::play(1 + inflation)
        }
        RuleKind::Effect(_)
        | RuleKind::Limit { .. }
        | RuleKind::Start(_)
        | RuleKind::FreeAction(_) => Contribution::NONE,
    }
}

/// Per-rule record of granted bonuses plus the global inflation numeral.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusLedger {
    draw: FxHashMap<CardId, i32>,
    play: FxHashMap<CardId, i32>,
    numeral: i32,
}

impl BonusLedger {
    /// Empty ledger, no inflation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `card`'s current contribution, replacing whatever it granted
    /// before.
    pub fn grant(&mut self, card: CardId, contribution: Contribution) {
        match contribution.draw {
            Some(n) => self.draw.insert(card, n),
            None => self.draw.remove(&card),
        };
        match contribution.play {
            Some(n) => self.play.insert(card, n),
            None => self.play.remove(&card),
        };
    }

    /// Remove exactly what `card` last contributed and return it.
    pub fn revoke(&mut self, card: CardId) -> Contribution {
        Contribution {
            draw: self.draw.remove(&card),
            play: self.play.remove(&card),
        }
    }

    /// What `card` currently contributes.
    #[must_use]
    pub fn granted(&self, card: CardId) -> Contribution {
        Contribution {
            draw: self.draw.get(&card).copied(),
            play: self.play.get(&card).copied(),
        }
    }

    /// Sum of every draw bonus.
    #[must_use]
    pub fn draw_total(&self) -> i32 {
        self.draw.values().sum()
    }

    /// Sum of every play bonus.
    #[must_use]
    pub fn play_total(&self) -> i32 {
        self.play.values().sum()
    }

    /// The inflation numeral (0 or 1).
    #[must_use]
    pub fn numeral(&self) -> i32 {
        self.numeral
    }

    pub fn set_numeral(&mut self, numeral: i32) {
        self.numeral = numeral;
    }

    /// Effective draw count.
    #[must_use]
    pub fn effective_draw(&self, has_draw_rule: bool) -> usize {
        let fallback = if has_draw_rule { 0 } else { self.numeral };
        (1 + self.draw_total() + fallback).max(0) as usize
    }

    /// Effective play limit.
    #[must_use]
    pub fn effective_play(&self, has_play_rule: bool) -> usize {
        let fallback = if has_play_rule { 0 } else { self.numeral };
        (1 + self.play_total() + fallback).max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(hand_len: usize, cards_played: usize, keeps: &[usize]) -> RuleContext {
        RuleContext {
            hand_len,
            cards_played,
            keep_sizes: PlayerMap::new(keeps.len(), |p| keeps[p.index()]),
            turn_player: PlayerId::new(0),
            party_in_play: false,
        }
    }

    #[test]
    fn test_draw_and_play_counts() {
        let c = ctx(3, 0, &[0, 0]);
        assert_eq!(contribution(RuleKind::Draw(3), &c, 0), Contribution::draw(2));
        assert_eq!(contribution(RuleKind::Draw(3), &c, 1), Contribution::draw(3));
        assert_eq!(
            contribution(RuleKind::Play(PlayRule::Count(4)), &c, 0),
            Contribution::play(3)
        );
    }

    #[test]
    fn test_play_all_tracks_hand() {
        let mut ledger = BonusLedger::new();
        let card = CardId::new(1);

        ledger.grant(card, contribution(RuleKind::Play(PlayRule::All), &ctx(5, 0, &[0, 0]), 0));
        assert_eq!(ledger.effective_play(true), 5);

        // Two played, three left: the limit does not move.
        ledger.grant(card, contribution(RuleKind::Play(PlayRule::All), &ctx(3, 2, &[0, 0]), 0));
        assert_eq!(ledger.effective_play(true), 5);
    }

    #[test]
    fn test_play_all_but_one() {
        let rule = RuleKind::Play(PlayRule::AllBut(1));
        let mut ledger = BonusLedger::new();

        ledger.grant(CardId::new(1), contribution(rule, &ctx(4, 0, &[0, 0]), 0));
        assert_eq!(ledger.effective_play(true), 3);

        ledger.grant(CardId::new(1), contribution(rule, &ctx(4, 0, &[0, 0]), 1));
        assert_eq!(ledger.effective_play(true), 2);

        ledger.grant(CardId::new(1), contribution(rule, &ctx(0, 0, &[0, 0]), 1));
        assert_eq!(ledger.effective_play(true), 0);
    }

    #[test]
    fn test_party_bonus_needs_party() {
        let rule = RuleKind::Effect(EffectRule::PartyBonus);
        let mut c = ctx(3, 0, &[0, 0]);
        assert_eq!(contribution(rule, &c, 0), Contribution::NONE);

        c.party_in_play = true;
        assert_eq!(contribution(rule, &c, 0), Contribution::both(1));
        assert_eq!(contribution(rule, &c, 1), Contribution::both(2));
    }

    #[test]
    fn test_poor_and_rich_are_strict() {
        let poor = RuleKind::Effect(EffectRule::PoorBonus);
        let rich = RuleKind::Effect(EffectRule::RichBonus);

        assert_eq!(contribution(poor, &ctx(0, 0, &[1, 2, 3]), 0), Contribution::draw(1));
        assert_eq!(contribution(poor, &ctx(0, 0, &[2, 2, 3]), 0), Contribution::NONE);
        assert_eq!(contribution(rich, &ctx(0, 0, &[4, 2, 3]), 0), Contribution::play(1));
        assert_eq!(contribution(rich, &ctx(0, 0, &[3, 2, 3]), 0), Contribution::NONE);
    }

    #[test]
    fn test_poor_and_rich_need_a_rival() {
        let poor = RuleKind::Effect(EffectRule::PoorBonus);
        let rich = RuleKind::Effect(EffectRule::RichBonus);

        let alone = ctx(2, 0, &[3]);
        assert!(!alone.turn_player_poorest());
        assert!(!alone.turn_player_richest());
        assert_eq!(contribution(poor, &alone, 0), Contribution::NONE);
        assert_eq!(contribution(rich, &alone, 0), Contribution::NONE);
    }

    #[test]
    fn test_numeral_fallback() {
        let mut ledger = BonusLedger::new();
        ledger.set_numeral(1);

        assert_eq!(ledger.effective_draw(false), 2);
        assert_eq!(ledger.effective_draw(true), 1);
        assert_eq!(ledger.effective_play(false), 2);
    }

    #[test]
    fn test_revoke_restores_sums() {
        let mut ledger = BonusLedger::new();
        ledger.grant(CardId::new(1), Contribution::draw(2));
        ledger.grant(CardId::new(2), Contribution::both(1));
        let before = (ledger.draw_total(), ledger.play_total());

        ledger.grant(CardId::new(3), Contribution::both(4));
        let revoked = ledger.revoke(CardId::new(3));

        assert_eq!(revoked, Contribution::both(4));
        assert_eq!((ledger.draw_total(), ledger.play_total()), before);
        assert_eq!(ledger.revoke(CardId::new(3)), Contribution::NONE);
    }

    #[test]
    fn test_regrant_replaces() {
        let mut ledger = BonusLedger::new();
        let card = CardId::new(1);

        ledger.grant(card, Contribution::both(2));
        ledger.grant(card, Contribution::play(1));

        assert_eq!(ledger.granted(card), Contribution::play(1));
        assert_eq!(ledger.draw_total(), 0);
        assert_eq!(ledger.play_total(), 1);
    }
}
