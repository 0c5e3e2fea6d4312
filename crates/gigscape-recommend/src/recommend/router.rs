use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::directory::ProposalDirectory;
use super::service::{RecommendationError, RecommendationService};

/// Router builder exposing the recommendation query endpoint.
pub fn recommendation_router<D>(service: Arc<RecommendationService<D>>) -> Router
where
    D: ProposalDirectory + 'static,
{
    Router::new()
        .route(
            "/api/v1/recommendations/jobs/:job_id",
            get(recommend_handler::<D>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendQuery {
    pub(crate) top_n: Option<usize>,
}

pub(crate) async fn recommend_handler<D>(
    State(service): State<Arc<RecommendationService<D>>>,
    Path(job_id): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Response
where
    D: ProposalDirectory + 'static,
{
    match service.recommend_for_job(&job_id, query.top_n) {
        Ok(ranked) => (StatusCode::OK, axum::Json(ranked)).into_response(),
        Err(err @ RecommendationError::InvalidJobId { .. }) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(err @ RecommendationError::JobNotFound { .. }) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            error!(error = %other, "recommendation lookup failed");
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
