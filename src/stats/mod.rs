pub mod aggregator;
pub mod engine;
pub mod policy;
pub mod presenter;
pub mod segmenter;
pub mod types;

pub use aggregator::aggregate;
pub use engine::StatsEngine;
pub use policy::{EdgeCasePolicy, ScoreRange, UNKNOWN_LABEL};
pub use presenter::{present, present_dimension, PresentedDimension, PresentedReport};
pub use segmenter::segment;
pub use types::{
    AggregateStats, DemographicAttributes, DimensionBreakdown, RatingRecord, Score, SegmentOutcome,
    SegmentStats, StatisticsReport,
};
