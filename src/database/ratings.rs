use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::params;

use super::connection::DbConn;
use super::models::RatingWithAuthor;

pub fn insert_rating(
    conn: &mut DbConn,
    movie_id: &str,
    user_id: &str,
    score: i64,
    created_at: NaiveDateTime,
) -> Result<()> {
    let sql = "INSERT INTO ratings (movie_id, user_id, score, created_at) VALUES (?1, ?2, ?3, ?4)";

    conn.execute(sql, params![movie_id, user_id, score, created_at])
        .with_context(|| format!("Failed to insert rating of movie {} by user {}", movie_id, user_id))?;

    Ok(())
}

/// Every rating of a movie joined with its author's profile
pub fn list_for_movie_with_authors(conn: &mut DbConn, movie_id: &str) -> Result<Vec<RatingWithAuthor>> {
    let sql = "SELECT r.score, r.created_at, u.age, u.gender, u.continent, u.country, u.created_at FROM ratings r JOIN users u ON u.id = r.user_id WHERE r.movie_id = ?1 ORDER BY r.id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![movie_id], parse_rating_with_author_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list ratings for movie")?;

    Ok(rows)
}

fn parse_rating_with_author_row(row: &rusqlite::Row) -> rusqlite::Result<RatingWithAuthor> {
    Ok(RatingWithAuthor {
        score: row.get(0)?,
        submitted_at: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        continent: row.get(4)?,
        country: row.get(5)?,
        account_created_at: row.get(6)?,
    })
}
