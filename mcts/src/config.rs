//! Search configuration.
//!
//! Every tuning knob of a decision lives in [`MctsConfig`] and is handed to the
//! search explicitly, so two searches never share hidden state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MctsError;

/// UCB1 constant for rewards in `[0, 1]`.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// Rollouts longer than this are cut off and scored with [`CutoffScoring`].
pub const DEFAULT_ROLLOUT_DEPTH_LIMIT: usize = 1000;

/// How long a single decision may search. Checked between cycles only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    Iterations(u32),
    Duration(Duration),
}

/// Scoring used when a rollout stops before the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffScoring {
    /// Ask the board for [`heuristic_values`](crate::Board::heuristic_values).
    #[default]
    Heuristic,
    /// Score the cut-off position as a draw.
    Draw,
    /// Treat a cut-off as an error.
    Disabled,
}

/// Which untried action the expansion phase picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionOrder {
    /// Uniformly at random from the untried actions.
    #[default]
    Random,
    /// The first untried action in the order the board listed them.
    FirstUntried,
}

/// How the recommended action is read off the root's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalSelection {
    /// Most visited child.
    #[default]
    MostVisited,
    /// Child with the highest `wins / visits`.
    BestWinRatio,
}

/// Configuration for one call to [`think`](crate::think).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Iteration count or wall-clock limit for the whole decision.
    pub budget: Budget,

    /// `C` in `wins/visits + C * sqrt(ln(N) / visits)`. Must be finite and non-negative.
    pub exploration_constant: f64,

    /// Seed for the default `Pcg64` generator. `None` seeds from entropy.
    pub rng_seed: Option<u64>,

    /// Maximum number of moves a rollout may play before it is cut off. `None` never cuts off.
    pub rollout_depth_limit: Option<usize>,

    /// Independent rollouts run from each new leaf; their rewards are averaged.
    pub rollouts_per_leaf: u32,

    pub cutoff_scoring: CutoffScoring,

    pub expansion_order: ExpansionOrder,

    pub final_selection: FinalSelection,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            budget: Budget::Iterations(1000),
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            rng_seed: None,
            rollout_depth_limit: Some(DEFAULT_ROLLOUT_DEPTH_LIMIT),
            rollouts_per_leaf: 1,
            cutoff_scoring: CutoffScoring::default(),
            expansion_order: ExpansionOrder::default(),
            final_selection: FinalSelection::default(),
        }
    }
}

impl MctsConfig {
    /// Small, seeded, deterministic config for tests.
    pub fn for_testing() -> Self {
        Self {
            budget: Budget::Iterations(200),
            rng_seed: Some(0),
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, n: u32) -> Self {
        self.budget = Budget::Iterations(n);
        self
    }

    pub fn with_duration(mut self, d: Duration) -> Self {
        self.budget = Budget::Duration(d);
        self
    }

    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_depth_limit(mut self, depth: usize) -> Self {
        self.rollout_depth_limit = Some(depth);
        self
    }

    /// Lets rollouts run until the board reports the game as ended.
    pub fn without_depth_limit(mut self) -> Self {
        self.rollout_depth_limit = None;
        self
    }

    pub fn with_rollouts_per_leaf(mut self, n: u32) -> Self {
        self.rollouts_per_leaf = n;
        self
    }

    pub fn with_cutoff_scoring(mut self, scoring: CutoffScoring) -> Self {
        self.cutoff_scoring = scoring;
        self
    }

    pub fn with_expansion_order(mut self, order: ExpansionOrder) -> Self {
        self.expansion_order = order;
        self
    }

    pub fn with_final_selection(mut self, selection: FinalSelection) -> Self {
        self.final_selection = selection;
        self
    }

    /// Rejects configurations a search cannot run with.
    pub fn validate(&self) -> Result<(), MctsError> {
        match self.budget {
            Budget::Iterations(0) => {
                return Err(MctsError::Configuration("iteration budget must be positive".to_string()));
            }
            Budget::Duration(d) if d.is_zero() => {
                return Err(MctsError::Configuration("time budget must be positive".to_string()));
            }
            _ => {}
        }

        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MctsError::Configuration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }

        if self.rollouts_per_leaf == 0 {
            return Err(MctsError::Configuration("rollouts_per_leaf must be at least 1".to_string()));
        }

        if self.rollout_depth_limit == Some(0) {
            return Err(MctsError::Configuration("rollout depth limit must be at least 1".to_string()));
        }

        Ok(())
    }
}
