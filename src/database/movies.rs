use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::Movie;

pub fn insert_movie(conn: &mut DbConn, movie: &Movie) -> Result<()> {
    let sql = "INSERT INTO movies (id, title, release_year, created_at) VALUES (?1, ?2, ?3, ?4)";

    conn.execute(
        sql,
        params![movie.id, movie.title, movie.release_year, movie.created_at],
    )
    .with_context(|| format!("Failed to insert movie {}", movie.id))?;

    Ok(())
}

pub fn movie_exists(conn: &mut DbConn, movie_id: &str) -> Result<bool> {
    let sql = "SELECT EXISTS(SELECT 1 FROM movies WHERE id = ?1)";

    conn.query_row(sql, params![movie_id], |row| row.get(0))
        .context("Failed to check movie existence")
}
