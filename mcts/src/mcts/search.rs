//! The search loop and the `think` entry point.

use std::time::Instant;

use log::{debug, trace, warn};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::config::{Budget, MctsConfig};
use crate::error::MctsError;
use crate::mcts::expansion::expand;
use crate::mcts::rollout::{simulate, RolloutLimits, RolloutPolicy, UniformRollout};
use crate::mcts::selection::select;
use crate::mcts::termination::{score, Evaluation, Termination};
use crate::mcts::tree::TreeStats;
use crate::mcts::{Board, SearchTree};

/// The action chosen for one decision, with a summary of the search behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    pub action: A,
    /// Completed select/expand/simulate/backpropagate cycles.
    pub iterations: u32,
    /// `None` when the action was forced and no tree was built.
    pub stats: Option<TreeStats>,
}

/// One decision in progress. Owns its tree exclusively; the tree is dropped
/// with the search.
pub struct Search<'b, B: Board, P, R> {
    board: &'b B,
    root_state: B::State,
    config: MctsConfig,
    policy: P,
    rng: R,
    tree: SearchTree<B::Action, B::Player>,
    fallback: B::Action,
    iterations: u32,
}

impl<'b, B, P, R> Search<'b, B, P, R>
where
    B: Board,
    P: RolloutPolicy<B>,
    R: Rng,
{
    pub fn new(board: &'b B, state: &B::State, config: &MctsConfig, policy: P, rng: R) -> Result<Self, MctsError> {
        config.validate()?;
        let actions = root_actions(board, state)?;
        let fallback = actions[0].clone();
        let tree = SearchTree::new(actions, board.current_player(state));

        Ok(Self {
            board,
            root_state: state.clone(),
            config: config.clone(),
            policy,
            rng,
            tree,
            fallback,
            iterations: 0,
        })
    }

    pub fn tree(&self) -> &SearchTree<B::Action, B::Player> {
        &self.tree
    }

    pub fn into_tree(self) -> SearchTree<B::Action, B::Player> {
        self.tree
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    fn limits(&self) -> RolloutLimits {
        RolloutLimits {
            depth_limit: self.config.rollout_depth_limit,
            cutoff: self.config.cutoff_scoring,
        }
    }

    /// Runs one full select/expand/simulate/backpropagate cycle.
    pub fn step(&mut self) -> Result<(), MctsError> {
        let (selected, state) = select(&self.tree, self.board, &self.root_state, self.config.exploration_constant);

        let (leaf, evaluation) = if self.board.is_ended(&state) {
            (selected, self.score_directly(&state, Termination::Ended(0))?)
        } else if !self.tree.get(selected).is_fully_expanded() {
            let (child, child_state) = expand(
                &mut self.tree,
                selected,
                self.board,
                &state,
                self.config.expansion_order,
                &mut self.rng,
            );
            let limits = self.limits();
            let evaluation = if self.board.is_ended(&child_state) {
                self.score_directly(&child_state, Termination::Ended(0))?
            } else {
                simulate(
                    self.board,
                    &child_state,
                    &self.policy,
                    limits,
                    self.config.rollouts_per_leaf,
                    &mut self.rng,
                )?
            };
            (child, evaluation)
        } else {
            // Not ended, yet nothing to play: score it like a cut-off rollout.
            (selected, self.score_directly(&state, Termination::DeadEnd(0))?)
        };

        self.tree.backpropagate(leaf, &evaluation);
        #[cfg(debug_assertions)]
        self.tree.check_invariants();
        self.iterations += 1;
        trace!("iteration {} backpropagated from node {:?}", self.iterations, leaf);
        Ok(())
    }

    fn score_directly(&self, state: &B::State, termination: Termination) -> Result<Evaluation<B::Player>, MctsError> {
        let outcome = score(self.board, state, termination, self.config.cutoff_scoring)?;
        Ok(Evaluation::single(outcome))
    }

    /// Steps until the budget is spent. The budget is only checked between cycles.
    pub fn run(&mut self) -> Result<(), MctsError> {
        let started = Instant::now();
        while !self.budget_exhausted(started) {
            self.step()?;
        }
        Ok(())
    }

    fn budget_exhausted(&self, started: Instant) -> bool {
        match self.config.budget {
            Budget::Iterations(n) => self.iterations >= n,
            Budget::Duration(d) => started.elapsed() >= d,
        }
    }

    /// Recommended action: the best root child under the configured final
    /// selection, or the first legal action if the root was never expanded.
    pub fn best_action(&self) -> B::Action {
        let root = self.tree.root();
        match self.tree.best_child(root, self.config.final_selection) {
            Some(child) => self
                .tree
                .get(child)
                .parent_action()
                .cloned()
                .unwrap_or_else(|| self.fallback.clone()),
            None => {
                warn!("search finished without expanding the root, playing the first legal action");
                self.fallback.clone()
            }
        }
    }

    pub fn decision(&self) -> Decision<B::Action> {
        Decision {
            action: self.best_action(),
            iterations: self.iterations,
            stats: Some(self.tree.stats()),
        }
    }

    /// Visits and win ratio of each root child, in expansion order.
    pub fn root_statistics(&self) -> Vec<(B::Action, u32, f64)> {
        self.tree
            .get(self.tree.root())
            .children()
            .iter()
            .map(|(action, id)| {
                let child = self.tree.get(*id);
                (action.clone(), child.visits(), child.win_ratio())
            })
            .collect()
    }
}

fn root_actions<B: Board>(board: &B, state: &B::State) -> Result<Vec<B::Action>, MctsError> {
    if board.is_ended(state) {
        return Err(MctsError::NoLegalActions);
    }
    let actions = board.legal_actions(state);
    if actions.is_empty() {
        return Err(MctsError::NoLegalActions);
    }
    Ok(actions)
}

/// Picks an action for the player to move in `state` using uniform rollouts.
///
/// The generator is `Pcg64` seeded from `config.rng_seed`, or from entropy
/// when no seed is set.
pub fn think<B: Board>(board: &B, state: &B::State, config: &MctsConfig) -> Result<B::Action, MctsError> {
    let rng = match config.rng_seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_entropy(),
    };
    think_with(board, state, config, UniformRollout, rng).map(|decision| decision.action)
}

/// [`think`] with an explicit rollout policy and generator.
///
/// A state with a single legal action returns it immediately without building a tree.
pub fn think_with<B, P, R>(
    board: &B,
    state: &B::State,
    config: &MctsConfig,
    policy: P,
    rng: R,
) -> Result<Decision<B::Action>, MctsError>
where
    B: Board,
    P: RolloutPolicy<B>,
    R: Rng,
{
    config.validate()?;
    let mut actions = root_actions(board, state)?;
    if actions.len() == 1 {
        debug!("only one legal action, skipping search");
        return Ok(Decision {
            action: actions.remove(0),
            iterations: 0,
            stats: None,
        });
    }

    debug!("searching {} root actions with budget {:?}", actions.len(), config.budget);
    let mut search = Search::new(board, state, config, policy, rng)?;
    search.run()?;

    let decision = search.decision();
    debug!(
        "chose {:?} after {} iterations ({} nodes)",
        decision.action,
        decision.iterations,
        search.tree().len()
    );
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Countdown;

    fn config() -> MctsConfig {
        MctsConfig::for_testing().with_iterations(300)
    }

    #[test]
    fn terminal_children_are_scored_without_rollout() {
        let board = Countdown::new(2);
        let mut search = Search::new(&board, &board.start(), &config(), UniformRollout, Pcg64::seed_from_u64(1)).unwrap();
        search.run().unwrap();

        let tree = search.tree();
        let winning = tree.get(tree.root()).child(&2).unwrap();
        let node = tree.get(winning);
        assert!(node.is_leaf());
        assert!(node.visits() > 1);
        assert_eq!(node.wins(), node.visits() as f64);
        assert_eq!(search.best_action(), 2);
    }

    #[test]
    fn root_statistics_follow_expansion_order() {
        let board = Countdown::new(10);
        let config = config().with_expansion_order(crate::ExpansionOrder::FirstUntried);
        let mut search = Search::new(&board, &board.start(), &config, UniformRollout, Pcg64::seed_from_u64(2)).unwrap();
        search.run().unwrap();

        let actions: Vec<u32> = search.root_statistics().iter().map(|(a, _, _)| *a).collect();
        assert_eq!(actions, vec![1, 2, 3]);
        let visits: u32 = search.root_statistics().iter().map(|(_, v, _)| *v).sum();
        assert_eq!(visits, 300);
    }

    #[test]
    fn ended_root_is_rejected() {
        let board = Countdown::new(0);
        let result = Search::new(&board, &board.start(), &config(), UniformRollout, Pcg64::seed_from_u64(0));
        assert!(matches!(result, Err(MctsError::NoLegalActions)));
    }

    #[test]
    fn unexpanded_root_falls_back_to_the_first_legal_action() {
        let board = Countdown::new(10);
        let search = Search::new(&board, &board.start(), &config(), UniformRollout, Pcg64::seed_from_u64(0)).unwrap();

        assert_eq!(search.best_action(), 1);
        let decision = search.decision();
        assert_eq!(decision.action, 1);
        assert_eq!(decision.iterations, 0);
        assert_eq!(decision.stats.map(|s| s.root_visits), Some(0));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "outside")]
    fn corrupted_statistics_stop_the_search() {
        let board = Countdown::new(10);
        let mut search = Search::new(&board, &board.start(), &config(), UniformRollout, Pcg64::seed_from_u64(0)).unwrap();
        let root = search.tree.root();
        search.tree.get_mut(root).wins = 1000.0;

        let _ = search.step();
    }

    #[test]
    fn decision_reports_search_size() {
        let board = Countdown::new(8);
        let decision = think_with(&board, &board.start(), &config(), UniformRollout, Pcg64::seed_from_u64(3)).unwrap();

        assert_eq!(decision.iterations, 300);
        let stats = decision.stats.unwrap();
        assert_eq!(stats.root_visits, 300);
        assert!(stats.total_nodes > 1);
    }
}
