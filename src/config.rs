//! Configuration options for the MCTS engine
//!
//! This module defines the parameters that control a search: the UCT
//! exploration constant, the iteration and time budgets, the rollout seed and
//! how rollout results are turned into rewards.

use std::time::Duration;

use crate::{policy::simulation::RewardScheme, MCTSError, Result};

/// Configuration for the MCTS engine
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use tictactoe_mcts::{MCTSConfig, RewardScheme};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.0)
///     .with_max_iterations(5_000)
///     .with_max_time(Duration::from_millis(250))
///     .with_seed(42)
///     .with_reward_scheme(RewardScheme::MoverRelative);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MCTSConfig {
    /// Exploration constant for UCT during descent
    ///
    /// Higher values favor exploration of less-visited nodes. The final move
    /// choice always uses zero regardless of this value.
    pub exploration_constant: f64,

    /// Number of iterations to run per search
    pub max_iterations: usize,

    /// Optional wall-clock budget
    ///
    /// Checked between iterations only, so an iteration that has started
    /// always finishes its backpropagation.
    pub max_time: Option<Duration>,

    /// Seed for the rollout RNG; `None` seeds from entropy
    pub seed: Option<u64>,

    /// How a finished rollout is scored
    pub reward_scheme: RewardScheme,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: std::f64::consts::SQRT_2,
            max_iterations: 2_000,
            max_time: None,
            seed: None,
            reward_scheme: RewardScheme::Decisive,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the number of iterations
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the maximum time to run the search
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    /// Sets the rollout seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the reward scheme used by the default rollout policy
    pub fn with_reward_scheme(mut self, scheme: RewardScheme) -> Self {
        self.reward_scheme = scheme;
        self
    }

    /// Checks that the configuration can drive a search on its own budget
    pub fn validate(&self) -> Result<()> {
        self.validate_exploration()?;
        if self.max_iterations == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks only the exploration constant
    ///
    /// Searches given an explicit iteration count ignore `max_iterations`, so
    /// this is all they need.
    pub fn validate_exploration(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
