//! The `action_type` sub-state machine vocabulary.
//!
//! The board is in `Normal` unless a card has opened a bounded sub-turn.
//! Sub-turns nest: a Steal played out of a Draw 3, Play 2 temp hand opens
//! `Steal` on top of `Play2`, and `Play2` resumes once the steal resolves.
//! Limit sub-turns are re-derived on every rule check and always sit on top.

use serde::Serialize;

use crate::cards::CardId;
use crate::core::player::PlayerId;

/// Sub-state of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ActionType {
    /// Play from hand or use a Free Action.
    Normal,
    /// `player` discards from hand down to the Hand Limit.
    HandLimit { player: PlayerId },
    /// `player` discards Keepers down to the Keeper Limit.
    KeeperLimit { player: PlayerId },
    /// Discard any Goals from hand, draw one per Goal.
    GoalMill,
    /// Trash one of your Keepers; `source` is the Recycling rule.
    Recycling { source: CardId },
    /// Play `remaining` more cards out of temp hand `depth`.
    Play2 { depth: u8, remaining: usize },
    /// Hand out temp hand `depth`, `per_player` cards to each player.
    Everybody1 { depth: u8, per_player: usize, given: usize },
    /// Take a Keeper, Goal or Rule in play into your hand.
    Zap,
    /// Too many Goals: discard one.
    GoalRemove,
    /// Pick a direction to pass every hand.
    Rotate,
    /// Replay an Action or Rule from the Discard other than `source`.
    DoItAgain { source: CardId },
    /// Take another player's Keeper.
    Steal,
    /// Discard up to half (rounded up) of the Rules.
    Simplify,
    /// Discard any Keeper in play.
    Trash,
    /// Pick another player's Keeper to swap for.
    Exchange1,
    /// Pick one of your Keepers to give `from` in return for `card`.
    Exchange2 { from: PlayerId, card: CardId },
    /// Pick a player to swap hands with.
    Trade,
    /// Pick a player to take a random card from and play it.
    UseTake,
}

impl ActionType {
    /// Stable lowercase name shown to the presentation layer.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ActionType::Normal => "normal",
            ActionType::HandLimit { .. } => "handlimit",
            ActionType::KeeperLimit { .. } => "keeperlimit",
            ActionType::GoalMill => "goalmill",
            ActionType::Recycling { .. } => "recycling",
            ActionType::Play2 { .. } => "play2",
            ActionType::Everybody1 { .. } => "everybody1",
            ActionType::Zap => "zap",
            ActionType::GoalRemove => "goalremove",
            ActionType::Rotate => "rotate",
            ActionType::DoItAgain { .. } => "doitagain",
            ActionType::Steal => "steal",
            ActionType::Simplify => "simplify",
            ActionType::Trash => "trash",
            ActionType::Exchange1 => "exchange1",
            ActionType::Exchange2 { .. } => "exchange2",
            ActionType::Trade => "trade",
            ActionType::UseTake => "usetake",
        }
    }

    /// The player resolving a limit, if this is a limit sub-turn.
    #[must_use]
    pub fn limit_player(&self) -> Option<PlayerId> {
        match self {
            ActionType::HandLimit { player } | ActionType::KeeperLimit { player } => Some(*player),
            _ => None,
        }
    }

    /// The temp hand this sub-turn works from.
    #[must_use]
    pub fn temp_depth(&self) -> Option<u8> {
        match self {
            ActionType::Play2 { depth, .. } | ActionType::Everybody1 { depth, .. } => Some(*depth),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction hands travel for Rotate Hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Each hand passes to the next seat.
    Left,
    /// Each hand passes to the previous seat.
    Right,
}

impl Direction {
    /// Seat offset a hand moves by.
    #[must_use]
    pub fn steps(self) -> i32 {
        match self {
            Direction::Left => 1,
            Direction::Right => -1,
        }
    }
}

/// One entry in the option list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Choice {
    /// A card: in hand, in play or in the Discard depending on the sub-state.
    Card(CardId),
    /// An active Free Action rule.
    FreeAction(CardId),
    /// Another player.
    Player(PlayerId),
    /// A rotation direction.
    Direction(Direction),
}

impl Choice {
    #[must_use]
    pub fn card(self) -> Option<CardId> {
        match self {
            Choice::Card(card) => Some(card),
            _ => None,
        }
    }

    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Choice::Player(player) => Some(player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(ActionType::Normal.name(), "normal");
        assert_eq!(
            ActionType::KeeperLimit { player: PlayerId::new(1) }.to_string(),
            "keeperlimit"
        );
        assert_eq!(
            ActionType::Exchange2 { from: PlayerId::new(1), card: CardId::new(0) }.name(),
            "exchange2"
        );
        assert_eq!(ActionType::Play2 { depth: 0, remaining: 2 }.name(), "play2");
    }

    #[test]
    fn test_limit_player() {
        let state = ActionType::HandLimit { player: PlayerId::new(2) };
        assert_eq!(state.limit_player(), Some(PlayerId::new(2)));
        assert_eq!(ActionType::Steal.limit_player(), None);
    }

    #[test]
    fn test_temp_depth() {
        let state = ActionType::Everybody1 { depth: 1, per_player: 1, given: 0 };
        assert_eq!(state.temp_depth(), Some(1));
        assert_eq!(ActionType::Zap.temp_depth(), None);
    }

    #[test]
    fn test_choice_accessors() {
        assert_eq!(Choice::Card(CardId::new(4)).card(), Some(CardId::new(4)));
        assert_eq!(Choice::FreeAction(CardId::new(4)).card(), None);
        assert_eq!(Choice::Player(PlayerId::new(1)).player(), Some(PlayerId::new(1)));
        assert_eq!(Direction::Right.steps(), -1);
    }
}
