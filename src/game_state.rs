//! Traits defining the game contract required by the MCTS engine.
//!
//! The engine never looks inside a game. It only asks for legal moves, whose
//! turn it is, how a move transforms the state and whether the game is over.

use std::fmt::Debug;

use crate::Result;

/// Trait for moves that can be made in a game
pub trait Action: Clone + Debug + PartialEq {}

/// Trait for players in a game
pub trait Player: Clone + Debug + PartialEq {}

/// Classification of a game state as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<P> {
    /// Moves remain and nobody has won
    InProgress,
    /// The given player has won
    Win(P),
    /// No moves remain and nobody has won
    Draw,
}

impl<P> Outcome<P> {
    /// Returns true unless the game is still in progress
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns true if some player has won
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Win(_))
    }
}

/// Trait defining the game state interface required for MCTS
///
/// States are immutable snapshots: [`GameState::apply`] returns a new state and
/// leaves the receiver untouched, so sibling nodes of the search tree never
/// observe each other's moves.
pub trait GameState: Clone {
    /// The type of moves that can be made in this game
    type Action: Action;

    /// The type of players in this game
    type Player: Player;

    /// Returns every legal move from this state
    ///
    /// The order is the order in which the search tree expands children; it
    /// affects tie-breaking but not correctness.
    fn legal_moves(&self) -> Vec<Self::Action>;

    /// Returns the player who moves next
    fn turn_to_move(&self) -> Self::Player;

    /// Returns a new state with `action` played by `player`
    ///
    /// # Errors
    ///
    /// Returns [`crate::MCTSError::IllegalMove`] if the move is not playable.
    fn apply(&self, action: &Self::Action, player: &Self::Player) -> Result<Self>;

    /// Classifies the state as won, drawn or still in progress
    fn outcome(&self) -> Outcome<Self::Player>;

    /// Returns true if the game is over
    fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }
}
