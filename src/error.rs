//! Errors reported by the validating entry points.
//!
//! Note that "not found" outcomes (empty queue, unreachable goal, cyclic graph) are not errors
//! and are reported as `None` instead.

use thiserror::Error;

/// Precondition violations detected by the `try_*` variants of the algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An edge with a cost below zero was enumerated by a weighted search
    #[error("edge with negative cost encountered")]
    NegativeCost,

    /// `h(u) > cost(u, v) + h(v)` for an edge explored by A*
    #[error("heuristic is inconsistent across an explored edge")]
    InconsistentHeuristic,

    /// The heuristic does not vanish at the goal
    #[error("heuristic is non-zero at the goal")]
    NonZeroGoalHeuristic,

    /// No state repeated within the configured number of transitions
    #[error("no repeated state found within {limit} steps")]
    StepLimitExceeded {
        /// The configured limit
        limit: usize,
    },

    /// A character that does not name a grid direction
    #[error("invalid direction: {0:?}")]
    InvalidDirection(char),
}

/// `Result` alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::StepLimitExceeded { limit: 10 }.to_string(),
            "no repeated state found within 10 steps"
        );
        assert_eq!(Error::InvalidDirection('x').to_string(), "invalid direction: 'x'");
    }
}
