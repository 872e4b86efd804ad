use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, info, warn};
use std::sync::Arc;

use crate::api::models::ErrorResponse;
use crate::errors::StatsError;
use crate::services::statistics::StatisticsService;

pub struct AppState {
    pub statistics: StatisticsService,
}

pub async fn get_movie_statistics(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<String>,
) -> Response {
    info!("Statistics requested for movie {}", movie_id);

    let lookup_id = movie_id.clone();
    let result = tokio::task::spawn_blocking(move || state.statistics.presented_report(&lookup_id)).await;

    match result {
        Ok(Ok(Some(report))) => Json(report).into_response(),
        Ok(Ok(None)) => movie_not_found(&movie_id),
        Ok(Err(e)) => error_response(&movie_id, e),
        Err(e) => task_failed(&movie_id, e),
    }
}

pub async fn get_dimension_statistics(
    State(state): State<Arc<AppState>>,
    Path((movie_id, dimension)): Path<(String, String)>,
) -> Response {
    info!("{} statistics requested for movie {}", dimension, movie_id);

    let lookup_id = movie_id.clone();
    let result = tokio::task::spawn_blocking(move || {
        state.statistics.presented_dimension(&lookup_id, &dimension)
    })
    .await;

    match result {
        Ok(Ok(Some(breakdown))) => Json(breakdown).into_response(),
        Ok(Ok(None)) => movie_not_found(&movie_id),
        Ok(Err(e)) => error_response(&movie_id, e),
        Err(e) => task_failed(&movie_id, e),
    }
}

fn movie_not_found(movie_id: &str) -> Response {
    warn!("Movie not found: {}", movie_id);
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Movie not found"))).into_response()
}

fn error_response(movie_id: &str, err: anyhow::Error) -> Response {
    let stats_err = err.downcast_ref::<StatsError>();
    let status = match stats_err {
        Some(StatsError::UnknownDimension(_)) => StatusCode::NOT_FOUND,
        Some(StatsError::InvalidScore { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(StatsError::InvalidConfig(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Statistics failed for movie {}: {:?}", movie_id, err);
    } else {
        warn!("Statistics rejected for movie {}: {:#}", movie_id, err);
    }

    let detail = match stats_err {
        Some(stats_err) if status != StatusCode::INTERNAL_SERVER_ERROR => stats_err.to_string(),
        _ => "Internal server error".to_string(),
    };
    (status, Json(ErrorResponse::new(detail))).into_response()
}

fn task_failed(movie_id: &str, err: tokio::task::JoinError) -> Response {
    error!("Statistics task for movie {} panicked: {}", movie_id, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
        .into_response()
}
