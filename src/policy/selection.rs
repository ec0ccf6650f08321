//! UCT selection
//!
//! The same routine serves the descent through the tree, with a positive
//! exploration constant, and the final move choice, with a constant of zero.
//! The constant is always passed in by the caller.

use crate::{
    game_state::GameState,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// Calculates the UCT score of a child
///
/// ```text
/// UCT = total_reward / visits + c * sqrt(ln(parent_visits) / visits)
/// ```
///
/// # Errors
///
/// [`MCTSError::ExhaustedExpansion`] if either visit count is zero, since the
/// score would divide by zero or take the log of zero.
pub fn uct_score(
    total_reward: f64,
    visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
) -> Result<f64> {
    if visits == 0 || parent_visits == 0 {
        return Err(MCTSError::ExhaustedExpansion(format!(
            "UCT needs visited nodes, got child visits {} and parent visits {}",
            visits, parent_visits
        )));
    }

    let exploitation = total_reward / visits as f64;
    let exploration =
        exploration_constant * ((parent_visits as f64).ln() / visits as f64).sqrt();

    Ok(exploitation + exploration)
}

/// Returns the child of `id` with the highest UCT score
///
/// Ties go to the child expanded first.
///
/// # Errors
///
/// [`MCTSError::ExhaustedExpansion`] if the node has no children or any
/// child (or the node itself) has never been visited.
pub fn select<S: GameState>(
    tree: &SearchTree<S>,
    id: NodeId,
    exploration_constant: f64,
) -> Result<NodeId> {
    let node = tree.get(id);
    if node.children.is_empty() {
        return Err(MCTSError::ExhaustedExpansion(format!(
            "cannot select from node {} with no children",
            id
        )));
    }

    let parent_visits = node.visits();
    let mut best: Option<(NodeId, f64)> = None;

    for &child_id in &node.children {
        let child = tree.get(child_id);
        let score = uct_score(
            child.total_reward(),
            child.visits(),
            parent_visits,
            exploration_constant,
        )?;

        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((child_id, score)),
        }
    }

    best.map(|(child_id, _)| child_id).ok_or_else(|| {
        MCTSError::ExhaustedExpansion(format!("no child of node {} could be scored", id))
    })
}
