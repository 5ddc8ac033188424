//! Goal evaluation.
//!
//! A goal is met by a player when every one of its requirement tokens holds
//! for that player. Plain tokens name a Keeper; exotic tokens are predicates
//! over the whole table:
//!
//! | Token | Holds when |
//! |---|---|
//! | `AnyFood` | the player keeps more food than the goal's inflation bonus |
//! | `FiveKeepers` | the player has the most Keepers, at least 5 (+inflation) |
//! | `NoTelevision` | nobody keeps Television |
//! | `TenCards` | the player has the most cards in hand, at least 10 (+inflation) |
//!
//! "Most" is the plurality rule of [`most_of`]: a lone qualifier wins
//! outright; among several, only a unique maximum wins, and a tie means
//! nobody does.
//!
//! Evaluation is pure: the same [`GoalContext`] always yields the same winner.

use crate::cards::{is_food, Exotic, Requirement};
use crate::core::player::{PlayerId, PlayerMap};

const FIVE_KEEPERS: usize = 5;
const TEN_CARDS: usize = 10;

/// The parts of the table goals look at.
#[derive(Clone, Debug)]
pub struct GoalContext {
    /// Keeper names held by each player.
    pub keeps: PlayerMap<Vec<&'static str>>,
    /// Hand size of each player.
    pub hand_sizes: PlayerMap<usize>,
}

impl GoalContext {
    fn keeps_named(&self, player: PlayerId, name: &str) -> bool {
        self.keeps[player].iter().any(|k| *k == name)
    }

    fn anyone_keeps(&self, name: &str) -> bool {
        self.keeps
            .values()
            .any(|keep| keep.iter().any(|k| *k == name))
    }
}

/// Whether `target` holds the most of something.
///
/// `stats` is the per-player quantity; a player qualifies when its quantity
/// reaches `threshold`.
///
/// ```
/// use fluxx_engine::core::{PlayerId, PlayerMap};
/// use fluxx_engine::rules::goals::most_of;
///
/// let stats = PlayerMap::new(3, |p| [6, 6, 2][p.index()]);
/// assert!(!most_of(PlayerId::new(0), &stats, 5));
///
/// let stats = PlayerMap::new(3, |p| [6, 5, 2][p.index()]);
/// assert!(most_of(PlayerId::new(0), &stats, 5));
/// assert!(!most_of(PlayerId::new(1), &stats, 5));
/// ```
#[must_use]
pub fn most_of(target: PlayerId, stats: &PlayerMap<usize>, threshold: usize) -> bool {
    let qualifiers = stats.values().filter(|&&s| s >= threshold).count();
    match qualifiers {
        0 => false,
        1 => stats[target] >= threshold,
        _ => {
            let Some(max) = stats.max() else {
                return false;
            };
            let at_max = stats.values().filter(|&&s| s >= max).count();
            at_max == 1 && stats[target] == max
        }
    }
}

fn exotic_holds(exotic: Exotic, player: PlayerId, ctx: &GoalContext, inflation: usize) -> bool {
    match exotic {
        Exotic::AnyFood => {
            let foods = ctx.keeps[player].iter().filter(|name| is_food(name)).count();
            foods > inflation
        }
        Exotic::FiveKeepers => {
            let sizes = PlayerMap::new(ctx.keeps.player_count(), |p| ctx.keeps[p].len());
            most_of(player, &sizes, FIVE_KEEPERS + inflation)
        }
        Exotic::NoTelevision => !ctx.anyone_keeps("Television"),
        Exotic::TenCards => most_of(player, &ctx.hand_sizes, TEN_CARDS + inflation),
    }
}

/// Whether `player` meets every requirement.
#[must_use]
pub fn satisfies(
    reqs: &[Requirement],
    player: PlayerId,
    ctx: &GoalContext,
    inflation: usize,
) -> bool {
    !reqs.is_empty()
        && reqs.iter().all(|req| match req {
            Requirement::Keeper(name) => ctx.keeps_named(player, name),
            Requirement::Exotic(exotic) => exotic_holds(*exotic, player, ctx, inflation),
        })
}

/// The winner among the active goals, if any.
///
/// `goals` yields each goal's requirements with its inflation bonus. Players
/// are scanned in seat order and the first one to meet any goal wins.
#[must_use]
pub fn find_winner(goals: &[(&[Requirement], usize)], ctx: &GoalContext) -> Option<PlayerId> {
    let player_count = ctx.keeps.player_count();
    PlayerId::all(player_count).find(|&player| {
        goals
            .iter()
            .any(|(reqs, inflation)| satisfies(reqs, player, ctx, *inflation))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(keeps: &[&[&'static str]], hands: &[usize]) -> GoalContext {
        GoalContext {
            keeps: PlayerMap::new(keeps.len(), |p| keeps[p.index()].to_vec()),
            hand_sizes: PlayerMap::new(hands.len(), |p| hands[p.index()]),
        }
    }

    const MILK_COOKIES: &[Requirement] =
        &[Requirement::Keeper("Milk"), Requirement::Keeper("Cookies")];
    const PARTY_SNACKS: &[Requirement] =
        &[Requirement::Keeper("Party"), Requirement::Exotic(Exotic::AnyFood)];
    const BRAIN_NO_TV: &[Requirement] =
        &[Requirement::Keeper("Brain"), Requirement::Exotic(Exotic::NoTelevision)];
    const FIVE: &[Requirement] = &[Requirement::Exotic(Exotic::FiveKeepers)];
    const TEN: &[Requirement] = &[Requirement::Exotic(Exotic::TenCards)];

    #[test]
    fn test_plain_goal() {
        let ctx = table(&[&["Milk", "Cookies"], &["Milk"]], &[0, 0]);
        assert_eq!(find_winner(&[(MILK_COOKIES, 0)], &ctx), Some(PlayerId::new(0)));

        let ctx = table(&[&["Milk"], &["Cookies"]], &[0, 0]);
        assert_eq!(find_winner(&[(MILK_COOKIES, 0)], &ctx), None);
    }

    #[test]
    fn test_any_food_with_inflation() {
        let ctx = table(&[&["Party", "Bread"], &[]], &[0, 0]);
        assert!(satisfies(PARTY_SNACKS, PlayerId::new(0), &ctx, 0));
        assert!(!satisfies(PARTY_SNACKS, PlayerId::new(0), &ctx, 1));

        let ctx = table(&[&["Party", "Bread", "Milk"], &[]], &[0, 0]);
        assert!(satisfies(PARTY_SNACKS, PlayerId::new(0), &ctx, 1));
    }

    #[test]
    fn test_brain_no_tv() {
        let ctx = table(&[&["Brain"], &["Television"]], &[0, 0]);
        assert_eq!(find_winner(&[(BRAIN_NO_TV, 0)], &ctx), None);

        let ctx = table(&[&["Sun"], &["Brain"]], &[0, 0]);
        assert_eq!(find_winner(&[(BRAIN_NO_TV, 0)], &ctx), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_five_keepers_plurality() {
        let five = ["Sun", "Moon", "Milk", "Time", "Eye"];
        let six = ["Sun", "Moon", "Milk", "Time", "Eye", "Love"];

        let ctx = table(&[&five, &five], &[0, 0]);
        assert_eq!(find_winner(&[(FIVE, 0)], &ctx), None);

        let ctx = table(&[&five, &six], &[0, 0]);
        assert_eq!(find_winner(&[(FIVE, 0)], &ctx), Some(PlayerId::new(1)));

        let ctx = table(&[&five, &["Sun"]], &[0, 0]);
        assert_eq!(find_winner(&[(FIVE, 0)], &ctx), Some(PlayerId::new(0)));
        assert_eq!(find_winner(&[(FIVE, 1)], &ctx), None);
    }

    #[test]
    fn test_ten_cards() {
        let ctx = table(&[&[], &[], &[]], &[10, 4, 12]);
        assert_eq!(find_winner(&[(TEN, 0)], &ctx), Some(PlayerId::new(2)));

        let ctx = table(&[&[], &[], &[]], &[12, 4, 12]);
        assert_eq!(find_winner(&[(TEN, 0)], &ctx), None);
    }

    #[test]
    fn test_first_seat_wins_across_goals() {
        let ctx = table(&[&["Brain"], &["Milk", "Cookies"]], &[0, 0]);
        let goals = [(MILK_COOKIES, 0), (BRAIN_NO_TV, 0)];
        assert_eq!(find_winner(&goals, &ctx), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_deterministic() {
        let ctx = table(&[&["Milk", "Cookies"], &["Milk", "Cookies"]], &[0, 0]);
        let first = find_winner(&[(MILK_COOKIES, 0)], &ctx);
        for _ in 0..10 {
            assert_eq!(find_winner(&[(MILK_COOKIES, 0)], &ctx), first);
        }
    }
}
