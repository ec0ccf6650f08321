//! Main implementation of the Monte Carlo Tree Search engine
//!
//! This module orchestrates the four phases of selection, expansion,
//! simulation and backpropagation over an iteration budget, then picks the
//! move to play.

use std::time::Instant;

use log::{debug, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{
    config::MCTSConfig,
    game_state::GameState,
    policy::{
        backpropagation::backpropagate,
        selection::select,
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// The Monte Carlo Tree Search engine
///
/// An engine can run any number of searches. Each search works on its own
/// tree, so nothing learned in one search carries over to the next.
pub struct MCTS<S: GameState> {
    /// Configuration for the search
    config: MCTSConfig,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy<S>>,

    /// Randomness for rollouts
    rng: ChaCha20Rng,
}

impl<S: GameState + 'static> MCTS<S> {
    /// Creates a new engine with the given configuration
    ///
    /// Rollouts use [`RandomPolicy`] with the configured reward scheme.
    pub fn new(config: MCTSConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!("Seeding rollout RNG with {}", seed);

        let simulation_policy: Box<dyn SimulationPolicy<S>> =
            Box::new(RandomPolicy::new(config.reward_scheme));

        MCTS {
            config,
            statistics: SearchStatistics::new(),
            simulation_policy,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Runs a search from `state` with the configured budget and returns the
    /// best action
    pub fn search(&mut self, state: &S) -> Result<S::Action> {
        self.search_for_iterations(state, self.config.max_iterations)
    }

    /// Runs a search from `state` for the specified number of iterations
    pub fn search_for_iterations(&mut self, state: &S, iterations: usize) -> Result<S::Action> {
        let mut tree = SearchTree::new(state.clone());
        self.search_tree(&mut tree, iterations)
    }

    /// Runs `iterations` iterations on `tree` and returns the action of the
    /// root's child with the highest average reward
    ///
    /// # Errors
    ///
    /// - [`MCTSError::GameAlreadyOver`] if the root state is terminal; the
    ///   tree is left untouched. This is checked before anything else.
    /// - [`MCTSError::InvalidConfiguration`] for a zero `iterations` or an
    ///   unusable exploration constant. `config.max_iterations` is not
    ///   consulted here.
    /// - [`MCTSError::ExhaustedExpansion`] if the tree invariants are broken.
    pub fn search_tree(&mut self, tree: &mut SearchTree<S>, iterations: usize) -> Result<S::Action> {
        let root = tree.root();
        if tree.get(root).is_terminal() {
            return Err(MCTSError::GameAlreadyOver);
        }

        self.config.validate_exploration()?;
        if iterations == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "a search needs at least one iteration".to_string(),
            ));
        }

        self.statistics = SearchStatistics::new();
        let start_time = Instant::now();
        debug!(
            "Starting search: {} iterations, exploration constant {}",
            iterations, self.config.exploration_constant
        );

        for i in 0..iterations {
            // Only between iterations, and never before the first one
            if let Some(max_duration) = self.config.max_time {
                if i > 0 && start_time.elapsed() >= max_duration {
                    self.statistics.stopped_early = true;
                    debug!("Search stopped early due to time limit after {} iterations", i);
                    break;
                }
            }

            self.execute_iteration(tree)?;
            self.statistics.iterations = i + 1;
        }

        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = tree.len();

        // Final choice: the same UCT routine, without exploration
        let best_child = select(tree, root, 0.0)?;
        let best = tree.get(best_child);
        self.statistics.best_visits = best.visits();
        self.statistics.best_value = best.value();
        debug!(
            "Search finished: {:?} with value {:.3} over {} visits, {} nodes",
            best.action,
            best.value(),
            best.visits(),
            tree.len()
        );

        best.action.clone().ok_or_else(|| {
            MCTSError::ExhaustedExpansion(format!("child {} of the root has no action", best_child))
        })
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self, tree: &mut SearchTree<S>) -> Result<()> {
        // 1. Selection phase
        let selected = self.selection(tree)?;

        // 2. Expansion phase
        let leaf = self.expansion(tree, selected)?;

        // 3. Simulation phase
        let reward = self
            .simulation_policy
            .simulate(&tree.get(leaf).state, &mut self.rng)?;

        // 4. Backpropagation phase
        backpropagate(tree, leaf, reward);

        trace!("Iteration reached node {} with reward {}", leaf, reward);
        Ok(())
    }

    /// Selection phase: descend while the node is non-terminal and fully expanded
    fn selection(&self, tree: &SearchTree<S>) -> Result<NodeId> {
        let mut current = tree.root();

        loop {
            let node = tree.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                break;
            }
            current = select(tree, current, self.config.exploration_constant)?;
        }

        Ok(current)
    }

    /// Expansion phase: replace a non-terminal, partly expanded node with a new child
    fn expansion(&mut self, tree: &mut SearchTree<S>, id: NodeId) -> Result<NodeId> {
        let node = tree.get(id);
        let leaf = if !node.is_terminal() && !node.is_fully_expanded() {
            tree.expand(id)?
        } else {
            id
        };

        self.statistics.max_depth = self.statistics.max_depth.max(tree.get(leaf).depth);
        Ok(leaf)
    }
}
