//! Integration tests for the Saboteur game engine.
//!
//! These tests drive complete games through the public command surface.

use pretty_assertions::assert_eq;
use saboteur_core::*;
use std::cell::RefCell;
use std::rc::Rc;

fn straight_tile() -> PathTile {
    use saboteur_core::Opening::{Path as P, Rock as R};
    PathTile::new(R, P, R, P, TileCategory::Pathway)
}

fn straight(id: u32) -> Card {
    Card::path(id, straight_tile())
}

fn seat(id: PlayerId, role: Role, hand: Vec<Card>) -> Player {
    let mut player = Player::new(id, format!("P{}", id + 1), role);
    for card in hand {
        player.give_card(card);
    }
    player
}

/// Play one legal move for the current player: the first card with a
/// target that the engine accepts, otherwise a discard
fn play_any(game: &mut GameState) {
    let player = game.player(game.current_player()).unwrap();
    let hand: Vec<CardId> = player.hand().iter().map(|c| c.id).collect();

    for card in &hand {
        for target in game.legal_targets(*card).unwrap() {
            let result = match target {
                Target::Cell(cell) => game.play_card_on_board(*card, cell),
                Target::Player(other) => game.play_card_on_player(*card, other),
            };
            if result.is_ok() {
                return;
            }
        }
    }
    game.discard_card(hand[0]).unwrap();
}

#[test]
fn test_deck_exhaustion_is_saboteur_win() {
    let mut game = GameState::new(GameConfig::new(4).with_seed(2024));
    let log = Rc::new(RefCell::new(EventLog::new()));
    game.subscribe(Box::new(log.clone()));

    assert_eq!(game.draw_pile_len(), 43);
    let mut turns = 0;
    while !game.is_finished() {
        let card = game.card_at(0).unwrap();
        game.discard_card(card).unwrap();
        turns += 1;
    }

    // 43 replacement draws succeed, the 44th finds the deck empty
    assert_eq!(turns, 44);
    assert_eq!(game.winner(), Some(Role::Saboteur));
    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.reason, EndReason::DeckExhausted);
    assert!(matches!(outcome.gold, Some(1..=3)));
    assert_eq!(game.phase(), GamePhase::GameOver);

    let events = log.borrow().events().to_vec();
    assert_eq!(events.len(), 44);
    assert_eq!(events.last(), Some(&GameEvent::GameEnded(outcome.clone())));
}

#[test]
fn test_winning_placement_ends_game_without_draw() {
    let mut board = Board::with_gold_at(1);
    let row = START.row;
    let last = GOALS[1].col - 1;
    for col in 2..last {
        board
            .place_tile(Coord::new(row, col), straight_tile(), Orientation::Upright)
            .unwrap();
    }

    let players = vec![
        seat(0, Role::GoldMiner, vec![straight(1), straight(2)]),
        seat(1, Role::Saboteur, vec![straight(3)]),
        seat(2, Role::GoldMiner, vec![straight(4)]),
        seat(3, Role::GoldMiner, vec![straight(5)]),
    ];
    let deck = Deck::stacked(vec![straight(10), straight(11)]);
    let mut game = GameState::from_parts(
        board,
        players,
        deck,
        Deck::stacked(vec![GoldCard(2)]),
        0,
    )
    .unwrap();
    let log = Rc::new(RefCell::new(EventLog::new()));
    game.subscribe(Box::new(log.clone()));

    game.play_card_on_board(CardId(1), Coord::new(row, last)).unwrap();

    assert!(game.is_finished());
    assert_eq!(
        game.outcome(),
        Some(&GameOutcome {
            winner: Role::GoldMiner,
            reason: EndReason::GoldReached,
            gold: Some(2),
        })
    );
    // No draw and no rotation
    assert_eq!(game.current_player(), 0);
    assert_eq!(game.draw_pile_len(), 2);
    assert_eq!(game.player(0).unwrap().hand().len(), 1);
    assert!(game.board().goal(GOALS[1]).unwrap().revealed);
    assert_eq!(
        log.borrow().events(),
        &[GameEvent::GameEnded(game.outcome().unwrap().clone())]
    );

    assert_eq!(
        game.play_card_on_board(CardId(2), Coord::new(row - 1, 2)),
        Err(GameError::GameOver)
    );
}

#[test]
fn test_rockfall_on_empty_cell_changes_nothing() {
    let players = vec![
        seat(0, Role::Saboteur, vec![Card::new(1, CardKind::Rockfall)]),
        seat(1, Role::GoldMiner, vec![]),
        seat(2, Role::GoldMiner, vec![]),
        seat(3, Role::GoldMiner, vec![]),
    ];
    let mut game = GameState::from_parts(
        Board::with_gold_at(0),
        players,
        Deck::stacked(vec![straight(10)]),
        Deck::stacked(vec![GoldCard(1)]),
        0,
    )
    .unwrap();
    let board_before = game.board().clone();

    assert_eq!(game.legal_targets(CardId(1)), Ok(vec![]));
    assert_eq!(
        game.play_card_on_board(CardId(1), Coord::new(START.row, START.col + 1)),
        Err(GameError::IllegalTarget)
    );
    assert_eq!(game.board(), &board_before);
    assert_eq!(game.player(0).unwrap().hand().len(), 1);
    assert_eq!(game.current_player(), 0);
    assert_eq!(game.draw_pile_len(), 1);
}

#[test]
fn test_rockfall_removes_laid_tile() {
    let players = vec![
        seat(0, Role::GoldMiner, vec![straight(1)]),
        seat(1, Role::Saboteur, vec![Card::new(2, CardKind::Rockfall)]),
        seat(2, Role::GoldMiner, vec![]),
        seat(3, Role::GoldMiner, vec![]),
    ];
    let mut game = GameState::from_parts(
        Board::with_gold_at(0),
        players,
        Deck::stacked(vec![straight(10), straight(11)]),
        Deck::stacked(vec![GoldCard(1)]),
        0,
    )
    .unwrap();
    let cell = Coord::new(START.row, START.col + 1);

    game.play_card_on_board(CardId(1), cell).unwrap();
    assert_eq!(game.legal_targets(CardId(2)), Ok(vec![Target::Cell(cell)]));
    game.play_card_on_board(CardId(2), cell).unwrap();

    assert!(game.board().filled_cells().is_empty());
    assert!(game.board().playable_cells().contains(&cell));
}

#[test]
fn test_role_counts_over_many_seeds() {
    for seed in 0..200 {
        let game = GameState::new(GameConfig::new(4).with_seed(seed));
        let saboteurs = game
            .players()
            .iter()
            .filter(|p| p.role() == Role::Saboteur)
            .count();
        assert_eq!(saboteurs, 1, "seed {seed}");

        let game = GameState::new(GameConfig::new(7).with_seed(seed));
        let saboteurs = game
            .players()
            .iter()
            .filter(|p| p.role() == Role::Saboteur)
            .count();
        assert_eq!(saboteurs, 2, "seed {seed}");
    }
}

#[test]
fn test_every_seat_can_be_a_saboteur() {
    let mut seen = [false; 4];
    for seed in 0..200 {
        let game = GameState::new(GameConfig::new(4).with_seed(seed));
        for player in game.players() {
            if player.role() == Role::Saboteur {
                seen[player.id] = true;
            }
        }
    }
    assert_eq!(seen, [true; 4]);
}

#[test]
fn test_observer_sees_turns_in_seat_order() {
    let mut game = GameState::new(GameConfig::new(5).with_seed(8));
    let log = Rc::new(RefCell::new(EventLog::new()));
    game.subscribe(Box::new(log.clone()));

    let first = game.current_player();
    for _ in 0..6 {
        let card = game.card_at(0).unwrap();
        game.discard_card(card).unwrap();
    }

    let seats: Vec<PlayerId> = log
        .borrow()
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::TurnChanged { player } => Some(*player),
            _ => None,
        })
        .collect();
    let expected: Vec<PlayerId> = (1..=6).map(|i| (first + i) % 5).collect();
    assert_eq!(seats, expected);
    assert_eq!(game.turn_number(), 6);
}

#[test]
fn test_random_game_simulation() {
    for seed in 0..20 {
        let mut game = GameState::new(GameConfig::new(4 + (seed as usize % 7)).with_seed(seed));
        let mut turns = 0;

        while !game.is_finished() && turns < 200 {
            play_any(&mut game);
            turns += 1;

            let current = game.current_player();
            for player in game.players() {
                if !game.is_finished() {
                    assert_eq!(player.is_hand_open(), player.id == current);
                }
            }
        }

        assert!(
            game.is_finished(),
            "seed {} should finish within 200 turns",
            seed
        );
        let outcome = game.outcome().unwrap();
        match outcome.reason {
            EndReason::GoldReached => {
                assert_eq!(outcome.winner, Role::GoldMiner);
                assert!(game.board().is_gold_goal_reached());
            }
            EndReason::DeckExhausted => {
                assert_eq!(outcome.winner, Role::Saboteur);
                assert_eq!(game.draw_pile_len(), 0);
            }
        }
    }
}

#[test]
fn test_game_state_json_roundtrip() {
    let mut game = GameState::new(GameConfig::new(6).with_seed(31));
    for _ in 0..5 {
        play_any(&mut game);
    }

    let json = serde_json::to_string(&game).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.players(), game.players());
    assert_eq!(restored.current_player(), game.current_player());
    assert_eq!(restored.draw_pile_len(), game.draw_pile_len());
    assert_eq!(restored.seed(), 31);
}
