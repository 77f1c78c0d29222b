//! UCT Monte Carlo Tree Search for two-player, turn-based, perfect-information games.
//!
//! A game is described by implementing [`Board`]. [`think`] then builds a
//! search tree for the current state by repeating four phases until the
//! configured [`Budget`] is spent:
//!
//! 1. **Selection**: descend with UCT until a node with untried actions or a leaf
//! 2. **Expansion**: turn one untried action into a new child
//! 3. **Simulation**: play random moves from the child and score the result
//! 4. **Backpropagation**: add the reward to every node back up to the root
//!
//! The action of the most visited root child is returned.
//!
//! ```rust,ignore
//! let config = MctsConfig::default().with_iterations(500).with_seed(7);
//! let action = mcts::think(&board, &state, &config)?;
//! ```

mod config;
mod error;
mod graph;
mod mcts;

#[cfg(test)]
mod testing;

pub use config::{
    Budget, CutoffScoring, ExpansionOrder, FinalSelection, MctsConfig, DEFAULT_EXPLORATION_CONSTANT,
    DEFAULT_ROLLOUT_DEPTH_LIMIT,
};
pub use error::MctsError;
pub use graph::{to_dot, to_graph, GraphEdge, GraphNode};

pub use mcts::expansion::expand;
pub use mcts::rollout::{rollout, simulate, RolloutLimits};
pub use mcts::selection::{best_uct_child, select, uct_score};
pub use mcts::{
    think, think_with, Board, Decision, Evaluation, Node, NodeId, Outcome, RolloutPolicy, Search, SearchTree,
    Termination, TreeStats, UniformRollout,
};
