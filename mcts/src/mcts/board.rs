use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Rules of a two-player, turn-based, perfect-information game.
///
/// The search never mutates a state; every transition goes through
/// [`next_state`](Board::next_state).
pub trait Board {
    type State: Clone;
    type Action: Clone + Eq + Hash + Debug;
    type Player: Clone + Eq + Hash + Debug;

    /// Actions available in `state`, in a stable order. Empty for ended states.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn next_state(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    fn is_ended(&self, state: &Self::State) -> bool;

    fn current_player(&self, state: &Self::State) -> Self::Player;

    /// Final scores, or `None` while the game is still running.
    fn points_values(&self, state: &Self::State) -> Option<HashMap<Self::Player, f64>>;

    /// Score estimate for a position a rollout was cut off at.
    fn heuristic_values(&self, _state: &Self::State) -> Option<HashMap<Self::Player, f64>> {
        None
    }
}
