use serde::Serialize;
use std::collections::BTreeMap;

use super::types::{AggregateStats, DimensionBreakdown, Histogram, Score, SegmentOutcome, SegmentStats, StatisticsReport};

/// Decimal digits kept for display
pub const DISPLAY_PRECISION: i32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<Score>,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    pub histogram: Histogram,
}

/// Segment body: full numbers, or a marker standing in for them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PresentedSegmentData {
    Reported(PresentedStats),
    InsufficientData { sample_size: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedSegment {
    pub label: String,
    #[serde(flatten)]
    pub data: PresentedSegmentData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedDimension {
    pub dimension: String,
    pub segments: Vec<PresentedSegment>,
    pub unknown_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedReport {
    pub movie_id: String,
    pub overall: PresentedStats,
    pub dimensions: Vec<PresentedDimension>,
    pub country_counts: BTreeMap<String, usize>,
}

pub fn present(report: &StatisticsReport) -> PresentedReport {
    PresentedReport {
        movie_id: report.movie_id.clone(),
        overall: present_stats(&report.overall),
        dimensions: report.segments.iter().map(present_dimension).collect(),
        country_counts: report.country_counts.clone(),
    }
}

pub fn present_dimension(breakdown: &DimensionBreakdown) -> PresentedDimension {
    PresentedDimension {
        dimension: breakdown.dimension.clone(),
        segments: breakdown.segments.iter().filter_map(present_segment).collect(),
        unknown_count: breakdown.unknown_count,
    }
}

fn present_segment(segment: &SegmentStats) -> Option<PresentedSegment> {
    let data = match &segment.outcome {
        SegmentOutcome::Omitted => return None,
        SegmentOutcome::Suppressed(stats) => PresentedSegmentData::InsufficientData {
            sample_size: stats.count,
        },
        SegmentOutcome::Reported(stats) => PresentedSegmentData::Reported(present_stats(stats)),
    };

    Some(PresentedSegment {
        label: segment.label.clone(),
        data,
    })
}

fn present_stats(stats: &AggregateStats) -> PresentedStats {
    PresentedStats {
        count: stats.count,
        mean: stats.mean.map(round_for_display),
        median: stats.median.map(round_for_display),
        mode: stats.mode,
        variance: stats.variance.map(round_for_display),
        std_dev: stats.std_dev.map(round_for_display),
        histogram: stats.histogram.clone(),
    }
}

fn round_for_display(value: f64) -> f64 {
    let factor = 10_f64.powi(DISPLAY_PRECISION);
    (value * factor).round() / factor
}
