use anyhow::Result;

use crate::stats::RatingRecord;

/// Where rating records for a movie come from.
///
/// Implementations return at most one record per (user, movie) pair; the
/// statistics engine does not deduplicate.
pub trait RatingSource: Send + Sync {
    fn movie_exists(&self, movie_id: &str) -> Result<bool>;

    fn ratings_for_movie(&self, movie_id: &str) -> Result<Vec<RatingRecord>>;
}
