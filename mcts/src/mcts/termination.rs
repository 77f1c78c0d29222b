use std::collections::HashMap;
use std::hash::Hash;

use crate::config::CutoffScoring;
use crate::error::MctsError;
use crate::mcts::Board;

/// Why a playout stopped, with the number of moves it played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Ended(usize),
    DepthLimit(usize),
    /// No legal action left although the board does not report the game as ended.
    DeadEnd(usize),
}

impl Termination {
    pub fn depth(&self) -> usize {
        match *self {
            Termination::Ended(depth) | Termination::DepthLimit(depth) | Termination::DeadEnd(depth) => depth,
        }
    }
}

/// Result of a single playout.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<P: Eq + Hash> {
    Scored(HashMap<P, f64>),
    Draw,
}

impl<P: Eq + Hash> Outcome<P> {
    /// Win/draw/loss reward in `[0, 1]` for `player`.
    ///
    /// A player wins when its score is strictly above every other score and
    /// draws when it ties the best of them. Missing players score 0.
    pub fn reward_for(&self, player: &P) -> f64 {
        match self {
            Outcome::Draw => 0.5,
            Outcome::Scored(scores) => {
                let own = scores.get(player).copied().unwrap_or(0.0);
                let best_other = scores
                    .iter()
                    .filter(|(p, _)| *p != player)
                    .map(|(_, score)| *score)
                    .reduce(f64::max)
                    .unwrap_or(0.0);

                if own > best_other {
                    1.0
                } else if own == best_other {
                    0.5
                } else {
                    0.0
                }
            }
        }
    }
}

/// Averaged outcome of the playouts run for one leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<P: Eq + Hash> {
    outcomes: Vec<Outcome<P>>,
}

impl<P: Eq + Hash> Evaluation<P> {
    pub fn single(outcome: Outcome<P>) -> Self {
        Self { outcomes: vec![outcome] }
    }

    pub fn from_outcomes(outcomes: Vec<Outcome<P>>) -> Self {
        assert!(!outcomes.is_empty(), "an evaluation needs at least one outcome");
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[Outcome<P>] {
        &self.outcomes
    }

    /// Mean reward for `player` over every playout.
    pub fn reward_for(&self, player: &P) -> f64 {
        let total: f64 = self.outcomes.iter().map(|o| o.reward_for(player)).sum();
        total / self.outcomes.len() as f64
    }
}

/// Scores the position a playout stopped at.
pub fn score<B: Board>(
    board: &B,
    state: &B::State,
    termination: Termination,
    cutoff: CutoffScoring,
) -> Result<Outcome<B::Player>, MctsError> {
    if let Termination::Ended(_) = termination {
        if let Some(points) = board.points_values(state) {
            return Ok(Outcome::Scored(points));
        }
    }

    match cutoff {
        CutoffScoring::Heuristic => board
            .heuristic_values(state)
            .map(Outcome::Scored)
            .ok_or(MctsError::RolloutNonTermination { depth: termination.depth() }),
        CutoffScoring::Draw => Ok(Outcome::Draw),
        CutoffScoring::Disabled => Err(MctsError::RolloutNonTermination { depth: termination.depth() }),
    }
}
