//! Backpropagation for the MCTS engine
//!
//! Results travel from the simulated node up to the root, switching
//! perspective at every ply: a result that favors the player who moved into
//! a node disfavors the player who moved into its parent.

use crate::{
    game_state::GameState,
    tree::{NodeId, SearchTree},
};

/// Adds `reward` to `from` and each of its ancestors, negating it per level
///
/// Every node on the path gets exactly one more visit. The root is included.
pub fn backpropagate<S: GameState>(tree: &mut SearchTree<S>, from: NodeId, reward: f64) {
    let mut current = Some(from);
    let mut reward = reward;

    while let Some(id) = current {
        let node = tree.get_mut(id);
        node.update(reward);

        // switch perspective
        reward = -reward;
        current = node.parent;
    }
}
