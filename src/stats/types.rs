use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::policy::UNKNOWN_LABEL;

/// Stored ratings are SQLite integers, read without narrowing
pub type Score = i64;
pub type Histogram = BTreeMap<Score, usize>;

/// Bucket label per demographic dimension, as captured when the rating was read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicAttributes(BTreeMap<String, String>);

impl DemographicAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: &str, label: &str) -> Self {
        self.set(dimension, Some(label));
        self
    }

    /// `None` clears the dimension, which then reads as unknown
    pub fn set(&mut self, dimension: &str, label: Option<&str>) {
        match label {
            Some(label) => {
                self.0.insert(dimension.to_string(), label.to_string());
            }
            None => {
                self.0.remove(dimension);
            }
        }
    }

    /// Known label for `dimension`, or `None` when missing or explicitly unknown
    pub fn label(&self, dimension: &str) -> Option<&str> {
        self.0
            .get(dimension)
            .map(String::as_str)
            .filter(|label| *label != UNKNOWN_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub score: Score,
    pub demographics: DemographicAttributes,
    pub submitted_at: NaiveDateTime,
}

/// Descriptive statistics over one group of scores.
///
/// Central-tendency and spread fields are `None` when `count == 0`; callers
/// must check `count` (or the option) before using them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<Score>,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    /// Every score in the configured range, zero-count entries included
    pub histogram: Histogram,
}

impl AggregateStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "stats", rename_all = "snake_case")]
pub enum SegmentOutcome {
    /// No records carried this label
    Omitted,
    /// Computed, but below the display threshold
    Suppressed(AggregateStats),
    Reported(AggregateStats),
}

static OMITTED: SegmentOutcome = SegmentOutcome::Omitted;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStats {
    pub dimension: String,
    pub label: String,
    pub outcome: SegmentOutcome,
}

impl SegmentStats {
    pub fn suppressed(&self) -> bool {
        matches!(self.outcome, SegmentOutcome::Suppressed(_))
    }

    pub fn stats(&self) -> Option<&AggregateStats> {
        match &self.outcome {
            SegmentOutcome::Suppressed(stats) | SegmentOutcome::Reported(stats) => Some(stats),
            SegmentOutcome::Omitted => None,
        }
    }

    pub fn count(&self) -> usize {
        self.stats().map_or(0, |stats| stats.count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionBreakdown {
    pub dimension: String,
    pub segments: Vec<SegmentStats>,
    /// Records with a missing, `unknown` or unrecognised label for this dimension
    pub unknown_count: usize,
}

impl DimensionBreakdown {
    /// Outcome for one bucket; labels with no segment read as `Omitted`
    pub fn outcome_for(&self, label: &str) -> &SegmentOutcome {
        self.segments
            .iter()
            .find(|segment| segment.label == label)
            .map_or(&OMITTED, |segment| &segment.outcome)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.label.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub movie_id: String,
    pub overall: AggregateStats,
    pub segments: Vec<DimensionBreakdown>,
    /// Raters per country; free-form, so counted rather than segmented
    pub country_counts: BTreeMap<String, usize>,
}

impl StatisticsReport {
    pub fn dimension(&self, name: &str) -> Option<&DimensionBreakdown> {
        self.segments.iter().find(|d| d.dimension == name)
    }
}
