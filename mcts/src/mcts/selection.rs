use crate::mcts::{Board, NodeId, SearchTree};

/// Upper confidence bound of a child as seen by the player choosing it.
///
/// `wins / visits + c * sqrt(ln(parent_visits) / visits)`. Unvisited children
/// score `+inf` so they are always tried before any comparison.
#[inline]
pub fn uct_score(wins: f64, visits: u32, parent_visits: u32, c: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let visits = visits as f64;
    let exploration = (parent_visits.max(1) as f64).ln() / visits;
    wins / visits + c * exploration.sqrt()
}

/// Child of `id` with the highest UCT score. Ties go to the earliest
/// expanded child.
pub fn best_uct_child<A, P>(tree: &SearchTree<A, P>, id: NodeId, c: f64) -> Option<NodeId> {
    let node = tree.get(id);
    let mut best: Option<(NodeId, f64)> = None;

    for (_, child_id) in node.children() {
        let child = tree.get(*child_id);
        let score = uct_score(child.wins(), child.visits(), node.visits(), c);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((*child_id, score)),
        }
    }

    best.map(|(child_id, _)| child_id)
}

/// Descends from the root until it reaches a node with untried actions or a
/// node without children, replaying the chosen actions on a copy of `root_state`.
pub fn select<B: Board>(
    tree: &SearchTree<B::Action, B::Player>,
    board: &B,
    root_state: &B::State,
    c: f64,
) -> (NodeId, B::State) {
    let mut id = tree.root();
    let mut state = root_state.clone();

    loop {
        let node = tree.get(id);
        if !node.is_fully_expanded() || node.children().is_empty() {
            return (id, state);
        }

        let Some(next) = best_uct_child(tree, id, c) else {
            return (id, state);
        };

        let Some(action) = tree.get(next).parent_action() else {
            unreachable!("child {:?} has no parent action", next);
        };
        state = board.next_state(&state, action);
        id = next;
    }
}
