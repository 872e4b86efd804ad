use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::User;

pub fn insert_user(conn: &mut DbConn, user: &User) -> Result<()> {
    let sql = "INSERT INTO users (id, username, age, gender, continent, country, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

    conn.execute(
        sql,
        params![
            user.id,
            user.username,
            user.age,
            user.gender,
            user.continent,
            user.country,
            user.created_at
        ],
    )
    .with_context(|| format!("Failed to insert user {}", user.username))?;

    Ok(())
}
