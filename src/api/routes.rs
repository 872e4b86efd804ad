use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{get_dimension_statistics, get_movie_statistics, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/statistics/movie/:movie_id", get(get_movie_statistics))
        .route(
            "/api/v1/statistics/movie/:movie_id/:dimension",
            get(get_dimension_statistics),
        )
        .with_state(state)
}
