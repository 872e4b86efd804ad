//! Thresholds and rules shared by the aggregator and the segmenter.

use std::ops::RangeInclusive;

use super::types::Score;
use crate::config::settings::{DEFAULT_MIN_SAMPLE_FOR_DISPLAY, DEFAULT_SCORE_MAX, DEFAULT_SCORE_MIN};
use crate::errors::{StatsError, StatsResult};

/// Label reserved for missing demographic data
pub const UNKNOWN_LABEL: &str = "unknown";

/// Closed interval of valid scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    min: Score,
    max: Score,
}

impl ScoreRange {
    pub fn new(min: Score, max: Score) -> StatsResult<Self> {
        if min > max {
            return Err(StatsError::InvalidConfig(format!(
                "score range [{}, {}] is empty",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Score {
        self.min
    }

    pub fn max(&self) -> Score {
        self.max
    }

    pub fn contains(&self, score: Score) -> bool {
        (self.min..=self.max).contains(&score)
    }

    pub fn values(&self) -> RangeInclusive<Score> {
        self.min..=self.max
    }

    pub fn validate(&self, score: Score) -> StatsResult<Score> {
        if self.contains(score) {
            Ok(score)
        } else {
            Err(StatsError::InvalidScore {
                score,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Fails on the first out-of-range score
    pub fn validate_all<I>(&self, scores: I) -> StatsResult<()>
    where
        I: IntoIterator<Item = Score>,
    {
        scores.into_iter().try_for_each(|score| self.validate(score).map(|_| ()))
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_SCORE_MIN,
            max: DEFAULT_SCORE_MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCasePolicy {
    pub score_range: ScoreRange,
    pub min_sample_for_display: usize,
}

impl EdgeCasePolicy {
    pub fn new(score_range: ScoreRange, min_sample_for_display: usize) -> StatsResult<Self> {
        if min_sample_for_display == 0 {
            return Err(StatsError::InvalidConfig(
                "minimum sample for display must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            score_range,
            min_sample_for_display,
        })
    }

    pub fn is_suppressed(&self, count: usize) -> bool {
        count < self.min_sample_for_display
    }
}

impl Default for EdgeCasePolicy {
    fn default() -> Self {
        Self {
            score_range: ScoreRange::default(),
            min_sample_for_display: DEFAULT_MIN_SAMPLE_FOR_DISPLAY,
        }
    }
}

/// Central-tendency values only exist for non-empty groups
pub fn undefined_on_empty<T>(count: usize, compute: impl FnOnce() -> T) -> Option<T> {
    if count == 0 { None } else { Some(compute()) }
}
