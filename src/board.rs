//! The tic-tac-toe board model
//!
//! A [`Board`] is an immutable 3x3 snapshot. Whose turn it is never gets
//! stored: X always moves first, so the player to move follows from the
//! number of marks of each kind.

use std::fmt;
use std::str::FromStr;

use crate::{
    game_state::{self, GameState, Outcome},
    MCTSError, Result,
};

/// Side length of the board
pub const SIZE: usize = 3;

/// Every winning line: rows, then columns, then the two diagonals
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Players in tic-tac-toe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first, written as `1` in a grid
    X,
    /// Moves second, written as `2` in a grid
    O,
}

impl Player {
    /// Returns the other player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl game_state::Player for Player {}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A cell on the board, addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Row-major index into the board, or `None` when off the board
    pub fn index(&self) -> Option<usize> {
        (self.row < SIZE && self.col < SIZE).then(|| self.row * SIZE + self.col)
    }

    fn from_index(index: usize) -> Self {
        Position::new(index / SIZE, index % SIZE)
    }
}

impl game_state::Action for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = MCTSError;

    /// Parses `"r, c"` or `"r c"`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(MCTSError::InvalidPosition(format!(
                "expected `row, col`, got {:?}",
                s.trim()
            )));
        }

        let parse = |part: &str| {
            part.parse::<usize>()
                .map_err(|e| MCTSError::InvalidPosition(format!("{:?}: {}", part, e)))
        };

        let position = Position::new(parse(parts[0])?, parse(parts[1])?);
        if position.index().is_none() {
            return Err(MCTSError::InvalidPosition(format!(
                "{} is off the board",
                position
            )));
        }
        Ok(position)
    }
}

/// Terminal classification of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    InProgress,
    Won(Player),
    Draw,
}

/// Tic-Tac-Toe game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// Row-major cells (None = empty, Some(Player) = occupied)
    cells: [Option<Player>; SIZE * SIZE],
}

impl Board {
    /// Creates a new empty board
    pub fn new() -> Self {
        Board::default()
    }

    /// Builds a board from a grid of `0` (empty), `1` (X) and `2` (O)
    ///
    /// # Errors
    ///
    /// Returns [`MCTSError::InvalidBoard`] for any other cell value, or when
    /// the mark counts could not have come from alternating play with X first.
    pub fn from_grid(grid: [[u8; SIZE]; SIZE]) -> Result<Self> {
        let mut cells = [None; SIZE * SIZE];

        for (row, values) in grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                cells[row * SIZE + col] = match value {
                    0 => None,
                    1 => Some(Player::X),
                    2 => Some(Player::O),
                    other => {
                        return Err(MCTSError::InvalidBoard(format!(
                            "cell {} holds {}, expected 0, 1 or 2",
                            Position::new(row, col),
                            other
                        )))
                    }
                };
            }
        }

        let board = Board { cells };
        let (x, o) = board.counts();
        if x != o && x != o + 1 {
            return Err(MCTSError::InvalidBoard(format!(
                "{} X marks and {} O marks cannot arise from alternating play",
                x, o
            )));
        }
        Ok(board)
    }

    /// Returns the mark at `position`, or `None` if empty or off the board
    pub fn get(&self, position: Position) -> Option<Player> {
        position.index().and_then(|i| self.cells[i])
    }

    fn counts(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(x, o), cell| match cell {
            Some(Player::X) => (x + 1, o),
            Some(Player::O) => (x, o + 1),
            None => (x, o),
        })
    }

    /// Returns the winner of the game, if any
    ///
    /// Lines are scanned rows first, then columns, then diagonals; the first
    /// complete line decides.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Some(player) if self.cells[b] == Some(player) && self.cells[c] == Some(player) => {
                Some(player)
            }
            _ => None,
        })
    }

    /// Classifies the board as won, drawn or in progress
    pub fn classify(&self) -> TerminalState {
        match self.winner() {
            Some(player) => TerminalState::Won(player),
            None if self.cells.iter().all(Option::is_some) => TerminalState::Draw,
            None => TerminalState::InProgress,
        }
    }

    /// Returns the player to move: X when the counts are equal, O otherwise
    pub fn turn_to_move(&self) -> Player {
        let (x, o) = self.counts();
        debug_assert!(x == o || x == o + 1, "mark counts out of balance: {x} X, {o} O");
        if x == o {
            Player::X
        } else {
            Player::O
        }
    }

    /// Returns every empty cell in row-major order
    pub fn legal_moves(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Position::from_index(i))
            .collect()
    }

    /// Returns a new board with `position` marked by `player`
    ///
    /// # Errors
    ///
    /// Returns [`MCTSError::IllegalMove`] if the cell is occupied or off the
    /// board. The receiver is never modified.
    pub fn apply(&self, position: Position, player: Player) -> Result<Board> {
        let index = position
            .index()
            .ok_or_else(|| MCTSError::IllegalMove(format!("{} is off the board", position)))?;

        if let Some(occupant) = self.cells[index] {
            return Err(MCTSError::IllegalMove(format!(
                "{} is already taken by {}",
                position, occupant
            )));
        }

        let mut next = *self;
        next.cells[index] = Some(player);
        Ok(next)
    }
}

impl GameState for Board {
    type Action = Position;
    type Player = Player;

    fn legal_moves(&self) -> Vec<Position> {
        Board::legal_moves(self)
    }

    fn turn_to_move(&self) -> Player {
        Board::turn_to_move(self)
    }

    fn apply(&self, action: &Position, player: &Player) -> Result<Self> {
        Board::apply(self, *action, *player)
    }

    fn outcome(&self) -> Outcome<Player> {
        match self.classify() {
            TerminalState::InProgress => Outcome::InProgress,
            TerminalState::Won(player) => Outcome::Win(player),
            TerminalState::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2")?;
        for row in 0..SIZE {
            write!(f, "{} ", row)?;
            for col in 0..SIZE {
                let symbol = match self.cells[row * SIZE + col] {
                    Some(Player::X) => "X",
                    Some(Player::O) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
