use std::collections::HashMap;

use mcts::Board;

pub const X: u8 = 1;
pub const O: u8 = 2;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TicTacToeState {
    cells: [Option<u8>; 9],
}

impl TicTacToeState {
    /// Builds a position from a 9 character string of `x`, `o` and `.`.
    pub fn parse(s: &str) -> Self {
        let mut cells = [None; 9];
        for (cell, c) in cells.iter_mut().zip(s.chars()) {
            *cell = match c {
                'x' => Some(X),
                'o' => Some(O),
                _ => None,
            };
        }
        Self { cells }
    }

    pub fn winner(&self) -> Option<u8> {
        LINES.iter().find_map(|[a, b, c]| match (self.cells[*a], self.cells[*b], self.cells[*c]) {
            (Some(p), Some(q), Some(r)) if p == q && q == r => Some(p),
            _ => None,
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl Board for TicTacToe {
    type State = TicTacToeState;
    type Action = usize;
    type Player = u8;

    fn legal_actions(&self, state: &TicTacToeState) -> Vec<usize> {
        if self.is_ended(state) {
            return Vec::new();
        }
        (0..9).filter(|i| state.cells[*i].is_none()).collect()
    }

    fn next_state(&self, state: &TicTacToeState, action: &usize) -> TicTacToeState {
        let mut next = *state;
        next.cells[*action] = Some(self.current_player(state));
        next
    }

    fn is_ended(&self, state: &TicTacToeState) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn current_player(&self, state: &TicTacToeState) -> u8 {
        let placed = state.cells.iter().filter(|c| c.is_some()).count();
        if placed % 2 == 0 {
            X
        } else {
            O
        }
    }

    fn points_values(&self, state: &TicTacToeState) -> Option<HashMap<u8, f64>> {
        if !self.is_ended(state) {
            return None;
        }
        let points = match state.winner() {
            Some(X) => [(X, 1.0), (O, -1.0)],
            Some(_) => [(X, -1.0), (O, 1.0)],
            None => [(X, 0.0), (O, 0.0)],
        };
        Some(points.into_iter().collect())
    }
}
