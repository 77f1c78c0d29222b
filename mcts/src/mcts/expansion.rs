use rand::Rng;

use crate::config::ExpansionOrder;
use crate::mcts::{Board, NodeId, SearchTree};

/// Turns one untried action of `id` into a new child and returns it with its state.
///
/// The child's untried actions are the legal actions of the new state, or none
/// if the board reports that state as ended.
///
/// Panics if `id` has no untried action left.
pub fn expand<B: Board, R: Rng + ?Sized>(
    tree: &mut SearchTree<B::Action, B::Player>,
    id: NodeId,
    board: &B,
    state: &B::State,
    order: ExpansionOrder,
    rng: &mut R,
) -> (NodeId, B::State) {
    let untried = &mut tree.get_mut(id).untried_actions;
    assert!(!untried.is_empty(), "expand called on fully expanded node {:?}", id);

    let index = match order {
        ExpansionOrder::Random => rng.gen_range(0..untried.len()),
        ExpansionOrder::FirstUntried => 0,
    };
    let action = untried.remove(index);

    let next = board.next_state(state, &action);
    let action_list = if board.is_ended(&next) {
        Vec::new()
    } else {
        board.legal_actions(&next)
    };
    let mover = board.current_player(state);

    let child = tree.add_child(id, action, action_list, mover);
    (child, next)
}
