use anyhow::{Context, Result};
use log::info;

use crate::domain::RatingSource;
use crate::stats::{present, present_dimension, PresentedDimension, PresentedReport, StatisticsReport, StatsEngine};

/// Loads a movie's ratings and runs them through the engine.
///
/// Lookups return `Ok(None)` when the movie does not exist. Engine failures
/// keep their `StatsError` so callers can `downcast_ref` it.
pub struct StatisticsService {
    engine: StatsEngine,
    source: Box<dyn RatingSource>,
}

impl StatisticsService {
    pub fn new(engine: StatsEngine, source: Box<dyn RatingSource>) -> Self {
        Self { engine, source }
    }

    pub fn movie_report(&self, movie_id: &str) -> Result<Option<StatisticsReport>> {
        if !self.source.movie_exists(movie_id)? {
            return Ok(None);
        }

        let records = self.source.ratings_for_movie(movie_id)?;
        let report = self
            .engine
            .report(movie_id, &records)
            .with_context(|| format!("Failed to compute statistics for movie {}", movie_id))?;

        info!(
            "Computed statistics for movie {}: {} ratings",
            movie_id, report.overall.count
        );
        Ok(Some(report))
    }

    pub fn presented_report(&self, movie_id: &str) -> Result<Option<PresentedReport>> {
        Ok(self.movie_report(movie_id)?.as_ref().map(present))
    }

    pub fn presented_dimension(&self, movie_id: &str, dimension: &str) -> Result<Option<PresentedDimension>> {
        if !self.source.movie_exists(movie_id)? {
            return Ok(None);
        }

        let records = self.source.ratings_for_movie(movie_id)?;
        let breakdown = self
            .engine
            .breakdown(&records, dimension)
            .with_context(|| format!("Failed to segment movie {} by {}", movie_id, dimension))?;

        Ok(Some(present_dimension(&breakdown)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::dimensions::{AGE_BRACKET, GENDER};
    use crate::config::StatsSettings;
    use crate::errors::StatsError;
    use crate::stats::{DemographicAttributes, RatingRecord, Score};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    /// Fixed in-memory ratings keyed by movie id
    struct FixedSource(HashMap<String, Vec<RatingRecord>>);

    impl RatingSource for FixedSource {
        fn movie_exists(&self, movie_id: &str) -> Result<bool> {
            Ok(self.0.contains_key(movie_id))
        }

        fn ratings_for_movie(&self, movie_id: &str) -> Result<Vec<RatingRecord>> {
            Ok(self.0.get(movie_id).cloned().unwrap_or_default())
        }
    }

    fn record(score: Score, age: &str) -> RatingRecord {
        RatingRecord {
            score,
            demographics: DemographicAttributes::new().with(AGE_BRACKET, age),
            submitted_at: NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        }
    }

    fn service(movies: Vec<(&str, Vec<RatingRecord>)>) -> StatisticsService {
        let source = FixedSource(
            movies
                .into_iter()
                .map(|(id, records)| (id.to_string(), records))
                .collect(),
        );
        let engine = StatsEngine::new(&StatsSettings::default()).unwrap();
        StatisticsService::new(engine, Box::new(source))
    }

    #[test]
    fn test_missing_movie_yields_none() {
        let service = service(vec![]);
        assert!(service.movie_report("nope").unwrap().is_none());
        assert!(service.presented_dimension("nope", GENDER).unwrap().is_none());
    }

    #[test]
    fn test_presented_report() {
        let service = service(vec![(
            "m1",
            vec![record(4, "18-24"), record(5, "18-24"), record(3, "18-24"), record(1, "55+")],
        )]);

        let presented = service.presented_report("m1").unwrap().unwrap();
        assert_eq!(presented.overall.count, 4);
        assert_eq!(presented.overall.mean, Some(3.25));
        assert_eq!(presented.dimensions[0].dimension, AGE_BRACKET);
        assert_eq!(presented.dimensions[0].segments.len(), 2);
    }

    #[test]
    fn test_engine_error_is_downcastable() {
        let service = service(vec![("m1", vec![record(7, "18-24")])]);

        let err = service.movie_report("m1").unwrap_err();
        assert_eq!(
            err.downcast_ref::<StatsError>(),
            Some(&StatsError::InvalidScore { score: 7, min: 1, max: 5 })
        );

        let err = service.presented_dimension("m1", "height").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StatsError>(),
            Some(StatsError::UnknownDimension(_))
        ));
    }
}
