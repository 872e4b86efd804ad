use log::info;
use std::collections::HashSet;

use super::aggregator::aggregate;
use super::policy::{EdgeCasePolicy, ScoreRange, UNKNOWN_LABEL};
use super::segmenter::{breakdown, count_by_attribute, segment};
use super::types::{AggregateStats, DimensionBreakdown, RatingRecord, Score, SegmentStats, StatisticsReport};
use crate::config::dimensions::{DimensionDefinition, COUNTRY};
use crate::config::settings::StatsSettings;
use crate::errors::{StatsError, StatsResult};

/// Rating statistics for one configuration.
///
/// Holds only validated, immutable settings; every method is a pure function
/// of its arguments, so one engine can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    policy: EdgeCasePolicy,
    dimensions: Vec<DimensionDefinition>,
}

impl StatsEngine {
    pub fn new(settings: &StatsSettings) -> StatsResult<Self> {
        let range = ScoreRange::new(settings.score_min, settings.score_max)?;
        let policy = EdgeCasePolicy::new(range, settings.min_sample_for_display)?;
        validate_dimensions(&settings.dimensions)?;

        info!(
            "Statistics engine ready: scores [{}, {}], min sample {}, {} dimensions",
            range.min(),
            range.max(),
            policy.min_sample_for_display,
            settings.dimensions.len()
        );

        Ok(Self {
            policy,
            dimensions: settings.dimensions.clone(),
        })
    }

    pub fn aggregate(&self, scores: &[Score]) -> StatsResult<AggregateStats> {
        aggregate(scores, &self.policy.score_range)
    }

    pub fn segment(&self, records: &[RatingRecord], dimension: &str) -> StatsResult<Vec<SegmentStats>> {
        let definition = self.find_dimension(dimension)?;
        segment(records, definition, &self.policy)
    }

    pub fn breakdown(&self, records: &[RatingRecord], dimension: &str) -> StatsResult<DimensionBreakdown> {
        let definition = self.find_dimension(dimension)?;
        breakdown(records, definition, &self.policy)
    }

    /// Overall statistics, one breakdown per configured dimension and the
    /// per-country rater counts
    pub fn report(&self, movie_id: &str, records: &[RatingRecord]) -> StatsResult<StatisticsReport> {
        let scores: Vec<Score> = records.iter().map(|r| r.score).collect();
        let overall = self.aggregate(&scores)?;

        let segments = self
            .dimensions
            .iter()
            .map(|definition| breakdown(records, definition, &self.policy))
            .collect::<StatsResult<Vec<_>>>()?;

        Ok(StatisticsReport {
            movie_id: movie_id.to_string(),
            overall,
            segments,
            country_counts: count_by_attribute(records, COUNTRY),
        })
    }

    fn find_dimension(&self, name: &str) -> StatsResult<&DimensionDefinition> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| StatsError::UnknownDimension(name.to_string()))
    }
}

fn validate_dimensions(dimensions: &[DimensionDefinition]) -> StatsResult<()> {
    let mut names = HashSet::new();
    for dimension in dimensions {
        if !names.insert(dimension.name.as_str()) {
            return Err(invalid_config(format!("dimension {} is defined twice", dimension.name)));
        }
        if dimension.labels.is_empty() {
            return Err(invalid_config(format!("dimension {} has no labels", dimension.name)));
        }

        let mut labels = HashSet::new();
        for label in &dimension.labels {
            if label == UNKNOWN_LABEL {
                return Err(invalid_config(format!(
                    "dimension {} uses the reserved label {}",
                    dimension.name, UNKNOWN_LABEL
                )));
            }
            if !labels.insert(label.as_str()) {
                return Err(invalid_config(format!(
                    "dimension {} repeats label {}",
                    dimension.name, label
                )));
            }
        }
    }
    Ok(())
}

fn invalid_config(reason: String) -> StatsError {
    StatsError::InvalidConfig(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::dimensions::{AGE_BRACKET, GENDER};
    use crate::stats::types::{DemographicAttributes, SegmentOutcome};
    use chrono::NaiveDate;

    fn record(score: Score, age: &str, gender: Option<&str>) -> RatingRecord {
        let mut demographics = DemographicAttributes::new().with(AGE_BRACKET, age);
        demographics.set(GENDER, gender);
        RatingRecord {
            score,
            demographics,
            submitted_at: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    fn engine() -> StatsEngine {
        StatsEngine::new(&StatsSettings::default()).unwrap()
    }

    #[test]
    fn test_report_covers_every_dimension_in_order() {
        let records = vec![
            record(4, "25-34", Some("male")),
            record(5, "25-34", Some("female")),
            record(3, "25-34", None),
        ];

        let report = engine().report("movie-1", &records).unwrap();

        assert_eq!(report.movie_id, "movie-1");
        assert_eq!(report.overall.count, 3);
        assert_eq!(report.overall.mean, Some(4.0));

        let dimensions: Vec<&str> = report.segments.iter().map(|d| d.dimension.as_str()).collect();
        assert_eq!(dimensions, vec!["age_bracket", "gender", "tenure", "continent"]);

        let age = report.dimension(AGE_BRACKET).unwrap();
        assert_eq!(age.labels(), vec!["25-34"]);
        assert!(matches!(age.outcome_for("25-34"), SegmentOutcome::Reported(_)));
        assert_eq!(age.outcome_for("55+"), &SegmentOutcome::Omitted);

        // The record without a gender counts overall but not per gender
        let gender = report.dimension(GENDER).unwrap();
        let gender_total: usize = gender.segments.iter().map(|s| s.count()).sum();
        assert_eq!(gender_total, 2);
        assert_eq!(gender.unknown_count, 1);
        assert!(gender.segments.iter().all(|s| s.suppressed()));

        let tenure = report.dimension("tenure").unwrap();
        assert!(tenure.segments.is_empty());
        assert_eq!(tenure.unknown_count, 3);
        assert!(report.country_counts.is_empty());
    }

    #[test]
    fn test_report_counts_countries() {
        let mut records = vec![
            record(4, "25-34", Some("male")),
            record(5, "25-34", Some("female")),
            record(3, "35-44", None),
        ];
        records[0].demographics.set(COUNTRY, Some("Poland"));
        records[1].demographics.set(COUNTRY, Some("Poland"));

        let report = engine().report("movie-4", &records).unwrap();

        assert_eq!(report.country_counts.len(), 1);
        assert_eq!(report.country_counts["Poland"], 2);
    }

    #[test]
    fn test_report_for_unrated_movie() {
        let report = engine().report("movie-2", &[]).unwrap();

        assert_eq!(report.overall.count, 0);
        assert_eq!(report.overall.mean, None);
        assert!(report.segments.iter().all(|d| d.segments.is_empty()));
    }

    #[test]
    fn test_report_rejects_corrupt_score() {
        let records = vec![record(4, "18-24", None), record(0, "18-24", None)];
        assert_eq!(
            engine().report("movie-3", &records),
            Err(StatsError::InvalidScore { score: 0, min: 1, max: 5 })
        );
    }

    #[test]
    fn test_unknown_dimension() {
        assert_eq!(
            engine().segment(&[], "shoe_size"),
            Err(StatsError::UnknownDimension("shoe_size".to_string()))
        );
    }

    #[test]
    fn test_breakdown_for_single_dimension() {
        let records = vec![record(2, "45-54", Some("other")); 3];
        let breakdown = engine().breakdown(&records, GENDER).unwrap();

        assert_eq!(breakdown.dimension, GENDER);
        assert_eq!(breakdown.labels(), vec!["other"]);
        assert!(!breakdown.segments[0].suppressed());
    }

    #[test]
    fn test_engines_with_different_scales_coexist() {
        let five = engine();
        let ten = StatsEngine::new(&StatsSettings::default().with_score_range(1, 10)).unwrap();

        assert!(five.aggregate(&[8]).is_err());
        assert_eq!(ten.aggregate(&[8]).unwrap().mean, Some(8.0));
    }

    #[test]
    fn test_invalid_configuration() {
        let mut settings = StatsSettings::default();
        settings.score_min = 6;
        assert!(matches!(StatsEngine::new(&settings), Err(StatsError::InvalidConfig(_))));

        let mut settings = StatsSettings::default();
        settings.min_sample_for_display = 0;
        assert!(StatsEngine::new(&settings).is_err());

        let mut settings = StatsSettings::default();
        settings.dimensions.push(DimensionDefinition::new(GENDER, &["x"]));
        assert!(StatsEngine::new(&settings).is_err());

        let mut settings = StatsSettings::default();
        settings.dimensions = vec![DimensionDefinition::new("region", &["north", UNKNOWN_LABEL])];
        assert!(StatsEngine::new(&settings).is_err());

        let mut settings = StatsSettings::default();
        settings.dimensions = vec![DimensionDefinition::new("region", &["north", "north"])];
        assert!(StatsEngine::new(&settings).is_err());

        let mut settings = StatsSettings::default();
        settings.dimensions = vec![DimensionDefinition::new("region", &[])];
        assert!(StatsEngine::new(&settings).is_err());
    }
}
