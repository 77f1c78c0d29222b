//! Tiny subtraction game used by the unit tests.

use std::collections::HashMap;

use crate::Board;

/// Players alternately take 1 to 3 stones; whoever takes the last stone wins.
#[derive(Debug, Clone)]
pub struct Countdown {
    pile: u32,
    heuristic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    pub pile: u32,
    pub to_move: u8,
}

impl Countdown {
    pub fn new(pile: u32) -> Self {
        Self { pile, heuristic: false }
    }

    /// Cut-off positions are scored as a win for the player to move.
    pub fn with_heuristic(mut self) -> Self {
        self.heuristic = true;
        self
    }

    pub fn start(&self) -> CountdownState {
        CountdownState { pile: self.pile, to_move: 0 }
    }
}

impl Board for Countdown {
    type State = CountdownState;
    type Action = u32;
    type Player = u8;

    fn legal_actions(&self, state: &CountdownState) -> Vec<u32> {
        (1..=3).filter(|take| *take <= state.pile).collect()
    }

    fn next_state(&self, state: &CountdownState, action: &u32) -> CountdownState {
        CountdownState {
            pile: state.pile - action,
            to_move: 1 - state.to_move,
        }
    }

    fn is_ended(&self, state: &CountdownState) -> bool {
        state.pile == 0
    }

    fn current_player(&self, state: &CountdownState) -> u8 {
        state.to_move
    }

    fn points_values(&self, state: &CountdownState) -> Option<HashMap<u8, f64>> {
        if state.pile > 0 {
            return None;
        }
        let winner = 1 - state.to_move;
        Some(HashMap::from([(winner, 1.0), (state.to_move, 0.0)]))
    }

    fn heuristic_values(&self, state: &CountdownState) -> Option<HashMap<u8, f64>> {
        self.heuristic
            .then(|| HashMap::from([(state.to_move, 1.0), (1 - state.to_move, 0.0)]))
    }
}
