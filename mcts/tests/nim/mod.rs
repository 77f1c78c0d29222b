use std::collections::HashMap;

use mcts::Board;

/// Single pile, take 1 to 3 stones, taking the last stone wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nim {
    /// Score cut-off positions by pile parity.
    pub heuristic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NimState {
    pub pile: u32,
    pub to_move: u8,
}

impl NimState {
    pub fn new(pile: u32) -> Self {
        Self { pile, to_move: 0 }
    }
}

impl Board for Nim {
    type State = NimState;
    type Action = u32;
    type Player = u8;

    fn legal_actions(&self, state: &NimState) -> Vec<u32> {
        (1..=3).filter(|n| *n <= state.pile).collect()
    }

    fn next_state(&self, state: &NimState, action: &u32) -> NimState {
        NimState {
            pile: state.pile - action,
            to_move: 1 - state.to_move,
        }
    }

    fn is_ended(&self, state: &NimState) -> bool {
        state.pile == 0
    }

    fn current_player(&self, state: &NimState) -> u8 {
        state.to_move
    }

    fn points_values(&self, state: &NimState) -> Option<HashMap<u8, f64>> {
        (state.pile == 0).then(|| HashMap::from([(1 - state.to_move, 1.0), (state.to_move, 0.0)]))
    }

    fn heuristic_values(&self, state: &NimState) -> Option<HashMap<u8, f64>> {
        if !self.heuristic {
            return None;
        }
        // A multiple of four is lost for the player to move.
        let mover_wins = state.pile % 4 != 0;
        let (mover, other) = if mover_wins { (1.0, 0.0) } else { (0.0, 1.0) };
        Some(HashMap::from([(state.to_move, mover), (1 - state.to_move, other)]))
    }
}
