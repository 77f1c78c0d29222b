//! Arena-backed search tree.
//!
//! All nodes are stored in one `Vec` and addressed by [`NodeId`]. The root is
//! always `NodeId(0)`. Dropping the tree drops every node at once.

use std::hash::Hash;

use crate::config::FinalSelection;
use crate::mcts::node::{Node, NodeId};
use crate::mcts::termination::Evaluation;

/// Rewards live in `[0, 1]`, so `wins` can drift past `visits` only by rounding.
const WINS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct SearchTree<A, P> {
    nodes: Vec<Node<A, P>>,
}

impl<A, P> SearchTree<A, P> {
    pub fn new(root_actions: Vec<A>, mover: P) -> Self {
        Self {
            nodes: vec![Node::new_root(root_actions, mover)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<A, P> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<A, P> {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root exists from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<A, P>)> {
        self.nodes.iter().zip(0u32..).map(|(node, i)| (NodeId(i), node))
    }

    /// Walks from the root and returns the deepest level reached.
    pub fn stats(&self) -> TreeStats {
        let mut max_depth = 0;
        let mut stack = vec![(self.root(), 0u32)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.get(id).children.iter().map(|(_, child)| (*child, depth + 1)));
        }

        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: self.get(self.root()).visits,
            max_depth,
        }
    }

    /// Child of `id` to recommend, ties going to the earliest expanded child.
    pub fn best_child(&self, id: NodeId, selection: FinalSelection) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for (_, child_id) in &self.get(id).children {
            let child = self.get(*child_id);
            let better = match best.map(|b| self.get(b)) {
                None => true,
                Some(current) => match selection {
                    FinalSelection::MostVisited => child.visits > current.visits,
                    FinalSelection::BestWinRatio => child.win_ratio() > current.win_ratio(),
                },
            };
            if better {
                best = Some(*child_id);
            }
        }
        best
    }
}

impl<A: Clone + PartialEq, P> SearchTree<A, P> {
    /// Creates the child reached by `action` and registers it under `parent`.
    ///
    /// Panics if `parent` already has a child for `action` or still lists it as untried.
    pub(crate) fn add_child(&mut self, parent: NodeId, action: A, action_list: Vec<A>, mover: P) -> NodeId {
        let parent_node = self.get(parent);
        assert!(
            parent_node.child(&action).is_none(),
            "action expanded twice at node {:?}",
            parent
        );
        assert!(
            !parent_node.untried_actions.contains(&action),
            "expanded action still listed as untried at node {:?}",
            parent
        );

        let child_id = NodeId(u32::try_from(self.nodes.len()).expect("search tree exceeds u32::MAX nodes"));
        self.nodes.push(Node::new_child(parent, action.clone(), action_list, mover));
        self.get_mut(parent).children.push((action, child_id));
        child_id
    }

    /// Panics on the first broken structural or statistical invariant.
    pub fn check_invariants(&self) {
        let root = self.get(self.root());
        assert!(root.parent.is_none(), "root has a parent");
        assert!(root.parent_action.is_none(), "root has a parent action");

        for (id, node) in self.iter() {
            assert!(
                node.wins >= -WINS_EPSILON && node.wins <= node.visits as f64 + WINS_EPSILON,
                "node {:?} has wins {} outside [0, {}]",
                id,
                node.wins,
                node.visits
            );

            let mut child_visits: u64 = 0;
            for (i, (action, child_id)) in node.children.iter().enumerate() {
                assert!(
                    !node.untried_actions.contains(action),
                    "node {:?} lists an expanded action as untried",
                    id
                );
                assert!(
                    node.children[..i].iter().all(|(a, _)| a != action),
                    "node {:?} has two children for one action",
                    id
                );

                let child = self.get(*child_id);
                assert_eq!(child.parent, Some(id), "child {:?} does not point back to {:?}", child_id, id);
                assert!(
                    child.parent_action.as_ref() == Some(action),
                    "child {:?} was reached by a different action",
                    child_id
                );
                child_visits += child.visits as u64;
            }

            assert!(
                child_visits <= node.visits as u64,
                "children of {:?} have more visits than the node itself",
                id
            );
        }
    }
}

impl<A, P: Eq + Hash> SearchTree<A, P> {
    /// Folds one evaluation into every node from `leaf` up to and including the root.
    pub fn backpropagate(&mut self, leaf: NodeId, evaluation: &Evaluation<P>) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.wins += evaluation.reward_for(&node.mover);
            current = node.parent;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}
