//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes live in an arena owned by [`SearchTree`] and refer to each other by
//! [`NodeId`]. A node lists its children by id and keeps a plain id of its
//! parent, which is only used to walk back up during backpropagation.

use std::fmt;

use crate::{game_state::GameState, MCTSError, Result};

/// Index of a node inside a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a node in the MCTS tree
///
/// Each node holds its own snapshot of the game, the move that produced it,
/// visit and reward statistics, and the moves not yet turned into children.
/// `children.len() + unexpanded_actions.len()` always equals the number of
/// legal moves the state had when the node was created.
pub struct MCTSNode<S: GameState> {
    /// The game state at this node
    pub state: S,

    /// The action that led to this state (None for root)
    pub action: Option<S::Action>,

    /// Parent node (None for root)
    pub parent: Option<NodeId>,

    /// Children in the order they were expanded
    pub children: Vec<NodeId>,

    /// Actions that have not yet been expanded into child nodes
    pub unexpanded_actions: Vec<S::Action>,

    /// Number of times this node has been visited
    pub visits: u64,

    /// Total reward accumulated from simulations through this node
    pub total_reward: f64,

    /// Depth of this node in the tree (root = 0)
    pub depth: usize,
}

impl<S: GameState> MCTSNode<S> {
    /// Creates a new node with the given state and action
    pub fn new(state: S, action: Option<S::Action>, parent: Option<NodeId>, depth: usize) -> Self {
        let unexpanded_actions = state.legal_moves();

        MCTSNode {
            state,
            action,
            parent,
            children: Vec::new(),
            unexpanded_actions,
            visits: 0,
            total_reward: 0.0,
            depth,
        }
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Returns the total reward accumulated at this node
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Returns the average reward of this node, or 0 if never visited
    pub fn value(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.total_reward / self.visits as f64
    }

    /// Records one visit carrying `reward`
    pub fn update(&mut self, reward: f64) {
        self.visits += 1;
        self.total_reward += reward;
    }

    /// Returns true if every legal move has a child
    pub fn is_fully_expanded(&self) -> bool {
        self.unexpanded_actions.is_empty()
    }

    /// Returns true if the game is over at this node
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns true if this node has no children yet
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A search tree rooted at one game state
///
/// A tree is built for a single search and dropped afterwards.
pub struct SearchTree<S: GameState> {
    nodes: Vec<MCTSNode<S>>,
    root: NodeId,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree holding only a root for `state`
    pub fn new(state: S) -> Self {
        SearchTree {
            nodes: vec![MCTSNode::new(state, None, None, 0)],
            root: NodeId(0),
        }
    }

    /// Returns the root node id
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node with the given id
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree. Use [`SearchTree::try_get`]
    /// for ids of unknown origin.
    pub fn get(&self, id: NodeId) -> &MCTSNode<S> {
        &self.nodes[id.0]
    }

    /// Returns the node with the given id mutably
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S> {
        &mut self.nodes[id.0]
    }

    /// Returns the node with the given id, or `None` if this tree has no
    /// such node
    pub fn try_get(&self, id: NodeId) -> Option<&MCTSNode<S>> {
        self.nodes.get(id.0)
    }

    /// Returns the total number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the ids of the children of `id`
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Returns the id of the child reached by `action`, if expanded
    pub fn child_for(&self, id: NodeId, action: &S::Action) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.get(child).action.as_ref() == Some(action))
    }

    /// Expands the last unexpanded action of `id` into a new child
    ///
    /// The move is played by whoever is to move in the node's state. On
    /// success the node has exactly one fewer unexpanded action and one more
    /// child, and the child's id is returned.
    ///
    /// # Errors
    ///
    /// [`MCTSError::ExhaustedExpansion`] if no unexpanded action is left, or
    /// the game's own error if the action cannot be applied. Either way the
    /// node is left unchanged.
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let node = self.get(id);
        let action = node.unexpanded_actions.last().cloned().ok_or_else(|| {
            MCTSError::ExhaustedExpansion(format!("node {} has no unexpanded actions", id))
        })?;

        let player = node.state.turn_to_move();
        let next_state = node.state.apply(&action, &player)?;
        let depth = node.depth + 1;

        let child_id = NodeId(self.nodes.len());
        self.nodes
            .push(MCTSNode::new(next_state, Some(action), Some(id), depth));

        let node = self.get_mut(id);
        node.unexpanded_actions.pop();
        node.children.push(child_id);

        Ok(child_id)
    }
}

impl<S: GameState> SearchTree<S>
where
    S::Action: fmt::Display,
{
    /// Returns a visualization of the search tree
    pub fn visualize(&self) -> String {
        let mut result = String::new();
        self.visualize_node(self.root, &mut result);
        result
    }

    fn visualize_node(&self, id: NodeId, output: &mut String) {
        let node = self.get(id);
        let indent = "  ".repeat(node.depth);
        let action_str = match &node.action {
            Some(action) => action.to_string(),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (visits: {}, value: {:.3})\n",
            indent,
            action_str,
            node.visits(),
            node.value()
        ));

        for &child in &node.children {
            self.visualize_node(child, output);
        }
    }
}
