pub mod board;
pub mod expansion;
pub mod node;
pub mod rollout;
pub mod search;
pub mod selection;
pub mod termination;
pub mod tree;

pub use board::Board;
pub use node::{Node, NodeId};
pub use rollout::{RolloutPolicy, UniformRollout};
pub use search::{think, think_with, Decision, Search};
pub use termination::{Evaluation, Outcome, Termination};
pub use tree::{SearchTree, TreeStats};
