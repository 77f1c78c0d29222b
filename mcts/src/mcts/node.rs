//! Search tree vertices.
//!
//! Nodes live in the [`SearchTree`](crate::SearchTree) arena and refer to each
//! other through [`NodeId`] handles, so a parent link is never an ownership edge.

/// Index into the node arena. Only a [`SearchTree`](crate::SearchTree) hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One explored game state, reached from the root by a specific action history.
#[derive(Debug, Clone)]
pub struct Node<A, P> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) parent_action: Option<A>,

    /// Expanded children in expansion order. Selection ties resolve to the earliest entry.
    pub(crate) children: Vec<(A, NodeId)>,

    pub(crate) untried_actions: Vec<A>,
    pub(crate) visits: u32,

    /// Sum of rewards in `[0, 1]`, seen from `mover`.
    pub(crate) wins: f64,

    /// Player whose decision led here. For the root, the player to move.
    pub(crate) mover: P,
}

impl<A, P> Node<A, P> {
    pub fn new_root(action_list: Vec<A>, mover: P) -> Self {
        Self {
            parent: None,
            parent_action: None,
            children: Vec::new(),
            untried_actions: action_list,
            visits: 0,
            wins: 0.0,
            mover,
        }
    }

    /// Builds an unlinked child. The caller is responsible for registering it
    /// with the parent.
    pub fn new_child(parent: NodeId, action: A, action_list: Vec<A>, mover: P) -> Self {
        Self {
            parent: Some(parent),
            parent_action: Some(action),
            children: Vec::new(),
            untried_actions: action_list,
            visits: 0,
            wins: 0.0,
            mover,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn parent_action(&self) -> Option<&A> {
        self.parent_action.as_ref()
    }

    pub fn children(&self) -> &[(A, NodeId)] {
        &self.children
    }

    pub fn untried_actions(&self) -> &[A] {
        &self.untried_actions
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn wins(&self) -> f64 {
        self.wins
    }

    pub fn mover(&self) -> &P {
        &self.mover
    }

    /// `wins / visits`, or 0 for an unvisited node.
    #[inline]
    pub fn win_ratio(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    /// No untried actions and no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.untried_actions.is_empty() && self.children.is_empty()
    }
}

impl<A: PartialEq, P> Node<A, P> {
    pub fn child(&self, action: &A) -> Option<NodeId> {
        self.children.iter().find(|(a, _)| a == action).map(|(_, id)| *id)
    }
}
