use tictactoe_mcts::{
    board::SIZE, Board, GameState, MCTSError, Outcome, Player, Position, TerminalState,
};

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

fn board_with_line(line: &[(usize, usize); 3], player: Player) -> Board {
    let mut board = Board::new();
    for &(row, col) in line {
        board = board.apply(Position::new(row, col), player).unwrap();
    }
    board
}

#[test]
fn test_every_line_wins_for_either_player() {
    for line in &LINES {
        for player in [Player::X, Player::O] {
            let board = board_with_line(line, player);
            assert_eq!(
                board.classify(),
                TerminalState::Won(player),
                "line {:?} should win for {}",
                line,
                player
            );
            assert_eq!(board.winner(), Some(player));
            assert_eq!(board.outcome(), Outcome::Win(player));
            assert!(board.is_terminal());
        }
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X
    // X O O
    // O X X
    let board = Board::from_grid([[1, 2, 1], [1, 2, 2], [2, 1, 1]]).unwrap();
    assert_eq!(board.classify(), TerminalState::Draw);
    assert_eq!(board.outcome(), Outcome::Draw);
    assert!(board.legal_moves().is_empty());
}

#[test]
fn test_win_on_full_board_beats_draw() {
    // X X X
    // O O X
    // X O O
    let board = Board::from_grid([[1, 1, 1], [2, 2, 1], [1, 2, 2]]).unwrap();
    assert_eq!(board.classify(), TerminalState::Won(Player::X));
}

#[test]
fn test_empty_and_partial_boards_are_in_progress() {
    assert_eq!(Board::new().classify(), TerminalState::InProgress);

    let board = Board::from_grid([[1, 1, 0], [2, 2, 0], [0, 0, 0]]).unwrap();
    assert_eq!(board.classify(), TerminalState::InProgress);
    assert!(!board.is_terminal());
}

#[test]
fn test_turn_inference() {
    assert_eq!(Board::new().turn_to_move(), Player::X);

    let one_x = Board::from_grid([[0, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
    assert_eq!(one_x.turn_to_move(), Player::O);

    let equal = Board::from_grid([[2, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
    assert_eq!(equal.turn_to_move(), Player::X);
}

#[test]
fn test_legal_moves_are_empty_cells_in_row_major_order() {
    let board = Board::from_grid([[1, 1, 0], [2, 2, 0], [0, 0, 0]]).unwrap();
    assert_eq!(
        board.legal_moves(),
        vec![
            Position::new(0, 2),
            Position::new(1, 2),
            Position::new(2, 0),
            Position::new(2, 1),
            Position::new(2, 2),
        ]
    );
    assert_eq!(Board::new().legal_moves().len(), SIZE * SIZE);
}

#[test]
fn test_apply_to_occupied_cell_fails() {
    let board = Board::new().apply(Position::new(1, 1), Player::X).unwrap();
    let result = board.apply(Position::new(1, 1), Player::O);
    assert!(matches!(result, Err(MCTSError::IllegalMove(_))));

    let off_board = board.apply(Position::new(3, 0), Player::O);
    assert!(matches!(off_board, Err(MCTSError::IllegalMove(_))));
}

#[test]
fn test_apply_changes_exactly_one_cell_and_leaves_receiver_alone() {
    let before = Board::from_grid([[1, 0, 0], [0, 2, 0], [0, 0, 0]]).unwrap();
    let target = Position::new(2, 1);
    let after = before.apply(target, Player::X).unwrap();

    for row in 0..SIZE {
        for col in 0..SIZE {
            let position = Position::new(row, col);
            if position == target {
                assert_eq!(before.get(position), None);
                assert_eq!(after.get(position), Some(Player::X));
            } else {
                assert_eq!(before.get(position), after.get(position));
            }
        }
    }
}

#[test]
fn test_from_grid_rejects_bad_values_and_counts() {
    let bad_value = Board::from_grid([[3, 0, 0], [0, 0, 0], [0, 0, 0]]);
    assert!(matches!(bad_value, Err(MCTSError::InvalidBoard(_))));

    let o_first = Board::from_grid([[2, 0, 0], [0, 0, 0], [0, 0, 0]]);
    assert!(matches!(o_first, Err(MCTSError::InvalidBoard(_))));

    let two_ahead = Board::from_grid([[1, 1, 0], [0, 0, 0], [0, 0, 0]]);
    assert!(matches!(two_ahead, Err(MCTSError::InvalidBoard(_))));
}

#[test]
fn test_position_parsing() {
    assert_eq!("0, 2".parse::<Position>().unwrap(), Position::new(0, 2));
    assert_eq!(" 2 1 ".parse::<Position>().unwrap(), Position::new(2, 1));
    assert_eq!("1,1".parse::<Position>().unwrap(), Position::new(1, 1));

    for bad in ["", "1", "1, 2, 0", "a, b", "3, 0", "-1, 0"] {
        assert!(
            matches!(bad.parse::<Position>(), Err(MCTSError::InvalidPosition(_))),
            "{:?} should not parse",
            bad
        );
    }
}

#[test]
fn test_display() {
    let board = Board::from_grid([[1, 0, 0], [0, 2, 0], [0, 0, 0]]).unwrap();
    assert_eq!(board.to_string(), "  0 1 2\n0 X . . \n1 . O . \n2 . . . \n");
    assert_eq!(Position::new(0, 2).to_string(), "(0, 2)");
    assert_eq!(Player::O.opponent(), Player::X);
}
