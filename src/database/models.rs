use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub continent: Option<String>,
    pub country: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub release_year: Option<i32>,
    pub created_at: NaiveDateTime,
}

// DTO for the ratings/users join
#[derive(Debug, Clone)]
pub struct RatingWithAuthor {
    pub score: i64,
    pub submitted_at: NaiveDateTime,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub continent: Option<String>,
    pub country: Option<String>,
    pub account_created_at: NaiveDateTime,
}
