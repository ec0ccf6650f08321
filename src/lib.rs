//! # tictactoe-mcts
//!
//! A Monte Carlo Tree Search (MCTS) engine that picks moves in tic-tac-toe.
//!
//! The engine is generic over the [`GameState`] contract, and the crate ships a
//! 3x3 [`Board`] implementing it. Each search builds a fresh tree, runs a fixed
//! iteration budget and returns the move of the statistically best child of
//! the root.
//!
//! ## Basic Usage
//!
//! ```
//! use tictactoe_mcts::{Board, MCTSConfig, Position, MCTS};
//!
//! fn main() -> Result<(), tictactoe_mcts::MCTSError> {
//!     // X has two in a row and can win at (0, 2)
//!     let board = Board::from_grid([[1, 1, 0], [2, 2, 0], [0, 0, 0]])?;
//!
//!     let config = MCTSConfig::default()
//!         .with_max_iterations(500)
//!         .with_seed(7);
//!
//!     let mut mcts = MCTS::new(config);
//!     let best = mcts.search(&board)?;
//!
//!     assert_eq!(best, Position::new(0, 2));
//!     println!("{}", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Every iteration runs four phases:
//!
//! 1. **Selection**: from the root, descend through fully expanded,
//!    non-terminal nodes by picking the child with the highest UCT score.
//!
//! 2. **Expansion**: if the reached node still has untried moves, create one
//!    child for the last untried move.
//!
//! 3. **Simulation**: play uniformly random moves from that node's board
//!    until the game ends and turn the result into a reward.
//!
//! 4. **Backpropagation**: walk parent links back to the root, adding the
//!    reward to each node and negating it at every ply.
//!
//! Once the budget is spent, the same UCT routine runs once more on the root
//! with an exploration constant of zero, which picks the child with the
//! highest average reward.
//!
//! ## Playing Against the Engine
//!
//! ```bash
//! cargo run --example play
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;

pub use board::{Board, Player, Position, TerminalState};
pub use config::MCTSConfig;
pub use game_state::{Action, GameState, Outcome};
pub use mcts::MCTS;
pub use policy::{RewardScheme, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{MCTSNode, NodeId, SearchTree};

/// Error types for the MCTS engine and the board model
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MCTSError {
    /// A search was requested on a board that is already won or drawn
    #[error("Game is already over")]
    GameAlreadyOver,

    /// A move targeted a cell that is occupied or off the board
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    /// Selection ran on a node with no children or on an unvisited child
    #[error("Exhausted expansion: {0}")]
    ExhaustedExpansion(String),

    /// A grid could not be turned into a board
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// Text could not be parsed as a board position
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
