use thiserror::Error;

/// Errors surfaced by a search. Broken tree invariants are not represented
/// here: they panic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MctsError {
    #[error("invalid search configuration: {0}")]
    Configuration(String),

    #[error("the root state has no legal actions")]
    NoLegalActions,

    #[error("rollout stopped after {depth} moves without reaching a terminal state and no fallback scoring is available")]
    RolloutNonTermination { depth: usize },
}
