//! Simulation policies for the MCTS engine
//!
//! A simulation policy plays a game out from a node's state and scores the
//! finished game as a reward for backpropagation.

use rand::{seq::SliceRandom, RngCore};

use crate::{
    game_state::{GameState, Outcome},
    Result,
};

/// How a finished rollout is turned into a reward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardScheme {
    /// `+1` if anyone won, `0` on a draw
    ///
    /// The reward says nothing about who won; backpropagation alone assigns
    /// it a sign. This is exact whenever the simulated node is itself
    /// terminal, because the winner of a finished game is always the player
    /// who moved last.
    Decisive,

    /// `+1` if the player who moved into the simulated state won, `-1` if
    /// that player lost, `0` on a draw
    MoverRelative,
}

impl RewardScheme {
    /// Scores `outcome`, reached by playing out from `start`
    pub fn reward<S: GameState>(&self, start: &S, outcome: &Outcome<S::Player>) -> f64 {
        match (self, outcome) {
            (_, Outcome::InProgress) | (_, Outcome::Draw) => 0.0,
            (RewardScheme::Decisive, Outcome::Win(_)) => 1.0,
            (RewardScheme::MoverRelative, Outcome::Win(winner)) => {
                // The player to move at `start` is the one who did not move into it
                if *winner == start.turn_to_move() {
                    -1.0
                } else {
                    1.0
                }
            }
        }
    }
}

/// Trait for policies that simulate games
pub trait SimulationPolicy<S: GameState> {
    /// Plays out a game from `state` and returns its reward
    ///
    /// `state` itself is not modified.
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64>;
}

/// Random simulation policy
///
/// Plays uniformly random legal moves, each by the player to move, until
/// the game ends or no move is left.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    pub scheme: RewardScheme,
}

impl RandomPolicy {
    /// Creates a new random policy scoring with `scheme`
    pub fn new(scheme: RewardScheme) -> Self {
        RandomPolicy { scheme }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new(RewardScheme::Decisive)
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        let mut current = state.clone();

        while !current.is_terminal() {
            let legal_moves = current.legal_moves();
            let Some(action) = legal_moves.choose(&mut *rng) else {
                break;
            };
            let player = current.turn_to_move();
            current = current.apply(action, &player)?;
        }

        Ok(self.scheme.reward(state, &current.outcome()))
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        (**self).simulate(state, rng)
    }
}
