use thiserror::Error;

use crate::stats::Score;

/// Failures raised by the statistics engine.
///
/// Only malformed input and bad configuration are errors. Sparse or degenerate
/// rating sets are valid and are reported through the statistics themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("score {score} is outside the valid range [{min}, {max}]")]
    InvalidScore { score: Score, min: Score, max: Score },

    #[error("unknown demographic dimension: {0}")]
    UnknownDimension(String),

    #[error("invalid statistics configuration: {0}")]
    InvalidConfig(String),
}

pub type StatsResult<T> = Result<T, StatsError>;
