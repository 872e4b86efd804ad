use anyhow::Result;
use log::debug;

use super::connection::{get_connection, DbPool};
use super::models::RatingWithAuthor;
use super::{movies, ratings};
use crate::domain::demographics::{self, AuthorProfile};
use crate::domain::RatingSource;
use crate::stats::RatingRecord;

/// Rating source backed by the application's SQLite database
#[derive(Clone)]
pub struct SqliteRatingSource {
    pool: DbPool,
}

impl SqliteRatingSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RatingSource for SqliteRatingSource {
    fn movie_exists(&self, movie_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        movies::movie_exists(&mut conn, movie_id)
    }

    fn ratings_for_movie(&self, movie_id: &str) -> Result<Vec<RatingRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = ratings::list_for_movie_with_authors(&mut conn, movie_id)?;
        debug!("Loaded {} ratings for movie {}", rows.len(), movie_id);

        Ok(rows.into_iter().map(to_rating_record).collect())
    }
}

fn to_rating_record(row: RatingWithAuthor) -> RatingRecord {
    let profile = AuthorProfile {
        age: row.age,
        gender: row.gender,
        continent: row.continent,
        country: row.country,
        account_created_at: row.account_created_at,
    };

    RatingRecord {
        score: row.score,
        demographics: demographics::snapshot(&profile, row.submitted_at),
        submitted_at: row.submitted_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::dimensions::{AGE_BRACKET, CONTINENT, COUNTRY, GENDER, TENURE};
    use crate::database::connection::create_memory_pool;
    use crate::database::models::{Movie, User};
    use crate::database::{setup, users};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn seeded_source() -> SqliteRatingSource {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::ensure_schema(&mut conn).unwrap();

        movies::insert_movie(
            &mut conn,
            &Movie {
                id: "movie-1".to_string(),
                title: "Test Movie".to_string(),
                release_year: Some(2023),
                created_at: at(2023, 1, 1),
            },
        )
        .unwrap();

        users::insert_user(
            &mut conn,
            &User {
                id: "user-1".to_string(),
                username: "single_user".to_string(),
                age: Some(30),
                gender: Some("male".to_string()),
                continent: Some("europe".to_string()),
                country: Some("Poland".to_string()),
                created_at: at(2023, 1, 1),
            },
        )
        .unwrap();
        users::insert_user(
            &mut conn,
            &User {
                id: "user-2".to_string(),
                username: "nodemo_user".to_string(),
                age: None,
                gender: None,
                continent: None,
                country: None,
                created_at: at(2023, 3, 1),
            },
        )
        .unwrap();

        ratings::insert_rating(&mut conn, "movie-1", "user-1", 5, at(2023, 1, 10)).unwrap();
        ratings::insert_rating(&mut conn, "movie-1", "user-2", 3, at(2024, 6, 1)).unwrap();

        drop(conn);
        SqliteRatingSource::new(pool)
    }

    #[test]
    fn test_movie_exists() {
        let source = seeded_source();
        assert!(source.movie_exists("movie-1").unwrap());
        assert!(!source.movie_exists("00000000-0000-0000-0000-000000000000").unwrap());
    }

    #[test]
    fn test_ratings_carry_demographic_snapshot() {
        let source = seeded_source();
        let records = source.ratings_for_movie("movie-1").unwrap();

        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.score, 5);
        assert_eq!(first.submitted_at, at(2023, 1, 10));
        assert_eq!(first.demographics.label(AGE_BRACKET), Some("25-34"));
        assert_eq!(first.demographics.label(GENDER), Some("male"));
        assert_eq!(first.demographics.label(CONTINENT), Some("europe"));
        assert_eq!(first.demographics.label(TENURE), Some("under_1_month"));
        assert_eq!(first.demographics.label(COUNTRY), Some("Poland"));

        let second = &records[1];
        assert_eq!(second.demographics.label(AGE_BRACKET), None);
        assert_eq!(second.demographics.label(GENDER), None);
        assert_eq!(second.demographics.label(TENURE), Some("1-2_years"));
        assert_eq!(second.demographics.label(COUNTRY), None);
    }

    #[test]
    fn test_scores_beyond_i32_are_read_unchanged() {
        let source = seeded_source();
        let mut conn = get_connection(&source.pool).unwrap();
        conn.execute("UPDATE ratings SET score = ?1 WHERE user_id = 'user-2'", [1_i64 << 40])
            .unwrap();
        drop(conn);

        let records = source.ratings_for_movie("movie-1").unwrap();
        assert_eq!(records[1].score, 1 << 40);
    }

    #[test]
    fn test_unrated_movie_has_no_records() {
        let source = seeded_source();
        assert!(source.ratings_for_movie("movie-404").unwrap().is_empty());
    }

    #[test]
    fn test_one_rating_per_user_per_movie() {
        let source = seeded_source();
        let mut conn = get_connection(&source.pool).unwrap();
        assert!(ratings::insert_rating(&mut conn, "movie-1", "user-1", 2, at(2024, 1, 1)).is_err());
    }
}
