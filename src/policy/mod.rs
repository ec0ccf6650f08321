//! Policies for the phases of the MCTS engine
//!
//! - Selection: UCT scoring of children
//! - Simulation: random playouts and their rewards
//! - Backpropagation: pushing rewards up to the root

pub mod backpropagation;
pub mod selection;
pub mod simulation;

pub use backpropagation::backpropagate;
pub use selection::{select, uct_score};
pub use simulation::{RandomPolicy, RewardScheme, SimulationPolicy};
