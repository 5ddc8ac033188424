//! End-to-end scenarios through the public driver surface.
//!
//! Positions are set up with `Board::relocate`, then played with `apply`
//! exactly as a front end would.

use fluxx_engine::board::Board;
use fluxx_engine::cards::CardId;
use fluxx_engine::core::{ApplyOutcome, EngineError, GameConfig, PlayerId, Selection};
use fluxx_engine::rules::RulesEngine;
use fluxx_engine::zones::Zone;
use fluxx_engine::{Choice, GameView};

fn empty_table(players: usize, seed: u64) -> Board {
    let config = GameConfig::new(players)
        .with_seed(seed)
        .with_hand_size(0)
        .with_opening_draw(0);
    Board::with_config(config).unwrap()
}

fn card(board: &Board, name: &str) -> CardId {
    board.card_by_name(name).unwrap()
}

fn put(board: &mut Board, name: &str, zone: Zone) -> CardId {
    let id = card(board, name);
    board.relocate(id, zone).unwrap();
    id
}

fn option_index(board: &Board, id: CardId) -> usize {
    board
        .options()
        .iter()
        .position(|c| *c == Choice::Card(id))
        .unwrap()
}

fn p(i: u8) -> PlayerId {
    PlayerId::new(i)
}

// =============================================================================
// Goals
// =============================================================================

#[test]
fn test_milk_and_cookies_wins() {
    let mut board = empty_table(2, 1);
    put(&mut board, "Milk & Cookies", Zone::Goals);
    put(&mut board, "Milk", Zone::Keep(p(1)));
    assert_eq!(board.evaluate_goals(), None);

    put(&mut board, "Cookies", Zone::Keep(p(1)));
    assert_eq!(board.evaluate_goals(), Some(p(1)));
}

#[test]
fn test_win_mid_turn_from_play() {
    let mut board = empty_table(3, 2);
    put(&mut board, "Milk & Cookies", Zone::Goals);
    put(&mut board, "Milk", Zone::Keep(p(0)));
    let cookies = put(&mut board, "Cookies", Zone::Hand(p(0)));

    let outcome = board.apply(option_index(&board, cookies)).unwrap();
    assert_eq!(outcome, ApplyOutcome::Won(p(0)));
    assert_eq!(outcome.winner(), Some(p(0)));
    assert!(board.is_terminal());
    assert_eq!(board.snapshot().winner, Some(p(0)));
}

#[test]
fn test_five_keepers_tie_has_no_winner() {
    let mut board = empty_table(2, 3);
    put(&mut board, "Five Keepers", Zone::Goals);
    for name in ["Sun", "Moon", "Time", "Eye", "Love"] {
        put(&mut board, name, Zone::Keep(p(0)));
    }
    assert_eq!(board.evaluate_goals(), Some(p(0)));

    for name in ["Sleep", "Money", "Music", "Toaster", "Brain"] {
        put(&mut board, name, Zone::Keep(p(1)));
    }
    assert_eq!(board.evaluate_goals(), None);

    put(&mut board, "Peace", Zone::Keep(p(1)));
    assert_eq!(board.evaluate_goals(), Some(p(1)));
}

#[test]
fn test_brain_loses_to_television() {
    let mut board = empty_table(2, 4);
    put(&mut board, "The Brain (No TV)", Zone::Goals);
    put(&mut board, "Brain", Zone::Keep(p(0)));
    let tv = put(&mut board, "Television", Zone::Keep(p(1)));
    assert_eq!(board.evaluate_goals(), None);

    board.relocate(tv, Zone::Discard).unwrap();
    assert_eq!(board.evaluate_goals(), Some(p(0)));
}

// =============================================================================
// Limits
// =============================================================================

#[test]
fn test_keeper_limit_two() {
    let mut board = empty_table(2, 5);
    put(&mut board, "Keeper Limit 2", Zone::Rules);
    put(&mut board, "Sun", Zone::Hand(p(0)));
    for name in ["Milk", "Bread", "Moon"] {
        put(&mut board, name, Zone::Keep(p(1)));
    }

    board.check_rules().unwrap();
    let view = board.snapshot();
    assert_eq!(view.action_type, "keeperlimit");
    assert_eq!(view.limit_state, Some(p(1)));
    assert_eq!(view.player, p(1));
    assert_eq!(view.options.len(), 3);

    board.apply(0).unwrap();
    assert_eq!(board.keep(p(1)).len(), 2);
    assert_eq!(board.snapshot().action_type, "normal");
    assert_eq!(board.limit_state(), None);
}

#[test]
fn test_hand_limit_resolves_in_seat_order() {
    let mut board = empty_table(3, 6);
    put(&mut board, "Hand Limit 0", Zone::Rules);
    put(&mut board, "Sun", Zone::Hand(p(0)));
    put(&mut board, "Milk", Zone::Hand(p(1)));
    put(&mut board, "Bread", Zone::Hand(p(2)));

    board.check_rules().unwrap();
    assert_eq!(board.limit_state(), Some(p(1)));
    board.apply(0).unwrap();
    assert_eq!(board.limit_state(), Some(p(2)));
    board.apply(0).unwrap();
    assert_eq!(board.limit_state(), None);
    assert_eq!(board.turn_player(), p(0));
}

// =============================================================================
// Rule Aggregation
// =============================================================================

#[test]
fn test_inflation_with_draw_three() {
    let mut board = empty_table(2, 7);
    put(&mut board, "Draw 3", Zone::Rules);
    let before = board.draw_count();

    let inflation = put(&mut board, "Inflation", Zone::Rules);
    assert_eq!(board.draw_count(), before + 1);

    board.relocate(inflation, Zone::Discard).unwrap();
    assert_eq!(board.draw_count(), before);
}

#[test]
fn test_play_all_rolls_turn_over() {
    let mut board = empty_table(2, 8);
    put(&mut board, "Play All", Zone::Rules);
    let hand = [
        put(&mut board, "Sun", Zone::Hand(p(0))),
        put(&mut board, "Moon", Zone::Hand(p(0))),
    ];
    board.check_rules().unwrap();
    assert_eq!(board.play_limit(), 2);

    for id in hand {
        board.apply(option_index(&board, id)).unwrap();
    }
    assert_eq!(board.turn_player(), p(1));
    assert_eq!(board.turn_counter(), 1);
    assert_eq!(board.cards_played(), 0);
}

#[test]
fn test_replacing_play_rule_mid_turn() {
    let mut board = empty_table(2, 9);
    put(&mut board, "Play 3", Zone::Rules);
    let sun = put(&mut board, "Sun", Zone::Hand(p(0)));
    let moon = put(&mut board, "Moon", Zone::Hand(p(0)));
    let play2 = put(&mut board, "Play 2", Zone::Hand(p(0)));

    board.apply(option_index(&board, sun)).unwrap();
    assert_eq!(board.turn_player(), p(0));

    // Play 2 replaces Play 3; two plays made, so the turn ends.
    board.apply(option_index(&board, play2)).unwrap();
    assert_eq!(board.rules(), vec![play2]);
    assert_eq!(board.turn_player(), p(1));
    assert_eq!(board.zone_of(moon), Some(Zone::Hand(p(0))));
}

// =============================================================================
// Transactions
// =============================================================================

#[test]
fn test_rejected_selection_changes_nothing() {
    let mut board = Board::with_config(GameConfig::new(3).with_seed(10)).unwrap();
    let before: GameView = board.snapshot();
    let options = board.options().len();

    assert_eq!(
        board.apply(options + 1),
        Err(EngineError::SelectionOutOfRange {
            index: options + 1,
            available: options
        })
    );
    assert!(board.apply(Selection::many(&[0, 1])).is_err());

    assert_eq!(board.snapshot(), before);
    assert!(board.history().is_empty());
}

#[test]
fn test_refused_play_restores_counters() {
    let mut board = empty_table(2, 11);
    let again = put(&mut board, "Let's Do That Again!", Zone::Hand(p(0)));
    put(&mut board, "Sun", Zone::Hand(p(0)));
    let before = board.snapshot();

    let err = board.apply(option_index(&board, again)).unwrap_err();
    assert!(matches!(err, EngineError::IllegalPlay(_)));
    assert!(err.is_recoverable());
    assert_eq!(board.cards_played(), 0);
    assert_eq!(board.snapshot(), before);
}

// =============================================================================
// N Players
// =============================================================================

#[test]
fn test_any_table_size_starts() {
    for players in 1..=8 {
        let board = Board::new_game(players).unwrap();
        let view = board.snapshot();
        assert_eq!(view.keeps.len(), players);
        assert_eq!(view.hand_sizes.len(), players);
        assert_eq!(view.hand.len(), 4);
        assert!(!view.options.is_empty());
    }
}

#[test]
fn test_turns_cycle_through_every_seat() {
    let players = 4;
    let mut board = empty_table(players, 12);
    let keepers = ["Sun", "Moon", "Time", "Eye"];

    for (seat, name) in keepers.iter().enumerate() {
        assert_eq!(board.turn_player(), p(seat as u8));
        let id = put(&mut board, name, Zone::Hand(p(seat as u8)));
        board.apply(option_index(&board, id)).unwrap();
    }
    assert_eq!(board.turn_player(), p(0));
    assert_eq!(board.turn_counter(), 4);
}

// =============================================================================
// Driver Trait
// =============================================================================

/// Play the first accepted selection until the game ends or `steps` run out.
fn drive<E: RulesEngine>(engine: &mut E, steps: usize) -> usize {
    let mut applied = 0;
    for _ in 0..steps {
        if engine.is_terminal() {
            break;
        }
        let accepted = engine
            .legal_selections()
            .into_iter()
            .any(|selection| engine.apply(selection).is_ok());
        if !accepted {
            break;
        }
        applied += 1;
    }
    applied
}

#[test]
fn test_generic_driver() {
    let mut board = Board::with_config(GameConfig::new(2).with_seed(13)).unwrap();
    let applied = drive(&mut board, 50);

    assert_eq!(board.history().len(), applied);
    if board.is_terminal() {
        assert!(board.winner().is_some());
        assert!(board.apply(0).is_err());
    }
}
