use rand::Rng;

use crate::config::CutoffScoring;
use crate::error::MctsError;
use crate::mcts::termination::{score, Evaluation, Outcome, Termination};
use crate::mcts::Board;

/// Picks the moves played during a rollout.
pub trait RolloutPolicy<B: Board> {
    /// Index into `actions` (never empty) of the move to play from `state`.
    fn choose<R: Rng + ?Sized>(&self, board: &B, state: &B::State, actions: &[B::Action], rng: &mut R) -> usize;
}

/// Plays uniformly random legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRollout;

impl<B: Board> RolloutPolicy<B> for UniformRollout {
    fn choose<R: Rng + ?Sized>(&self, _board: &B, _state: &B::State, actions: &[B::Action], rng: &mut R) -> usize {
        rng.gen_range(0..actions.len())
    }
}

/// Limits applied to every rollout of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutLimits {
    pub depth_limit: Option<usize>,
    pub cutoff: CutoffScoring,
}

/// Plays from `state` until the game ends, the depth limit is reached or no
/// legal move is left, and scores the final position.
pub fn rollout<B, P, R>(
    board: &B,
    state: &B::State,
    policy: &P,
    limits: RolloutLimits,
    rng: &mut R,
) -> Result<Outcome<B::Player>, MctsError>
where
    B: Board,
    P: RolloutPolicy<B>,
    R: Rng + ?Sized,
{
    let mut state = state.clone();
    let mut depth = 0usize;

    let termination = loop {
        if board.is_ended(&state) {
            break Termination::Ended(depth);
        }
        if limits.depth_limit.is_some_and(|limit| depth >= limit) {
            break Termination::DepthLimit(depth);
        }

        let actions = board.legal_actions(&state);
        if actions.is_empty() {
            break Termination::DeadEnd(depth);
        }

        let index = policy.choose(board, &state, &actions, rng);
        state = board.next_state(&state, &actions[index]);
        depth += 1;
    };

    score(board, &state, termination, limits.cutoff)
}

/// Runs `count` rollouts from the same state and averages them.
pub fn simulate<B, P, R>(
    board: &B,
    state: &B::State,
    policy: &P,
    limits: RolloutLimits,
    count: u32,
    rng: &mut R,
) -> Result<Evaluation<B::Player>, MctsError>
where
    B: Board,
    P: RolloutPolicy<B>,
    R: Rng + ?Sized,
{
    let outcomes = (0..count.max(1))
        .map(|_| rollout(board, state, policy, limits, rng))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Evaluation::from_outcomes(outcomes))
}
