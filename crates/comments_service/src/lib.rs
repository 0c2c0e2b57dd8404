use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use domain::{Comment, VIDEO_ID_LEN};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use youtube_client::CommentFetcher;

/// Largest page size a caller may request.
const MAX_RESULTS_LIMIT: u32 = 100;

/// Query parameters for `/comments`.
#[derive(Debug, Deserialize)]
pub struct CommentsParams {
    /// YouTube video URL or bare video ID.
    pub url: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// Query parameters for `/video/{video_id}/comments`.
#[derive(Debug, Deserialize)]
pub struct MaxResultsParams {
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_results() -> u32 {
    MAX_RESULTS_LIMIT
}

/// Successful comments listing.
#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub video_id: String,
    pub comment_count: usize,
    pub comments: Vec<Comment>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

fn bad_request(detail: &str) -> Response {
    let error = ErrorResponse {
        detail: detail.to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

/// Handler for the root endpoint: static service metadata.
async fn service_info() -> Json<Value> {
    Json(json!({
        "name": "YouTube Comments API",
        "version": "1.0.0",
        "endpoints": {
            "/comments": "GET - Fetch YouTube comments",
            "/health": "GET - Health check"
        },
        "example": "/comments?url=https://www.youtube.com/watch?v=dQw4w9WgXcQ&max_results=50"
    }))
}

/// Handler for the health check endpoint.
async fn health(State(fetcher): State<Arc<CommentFetcher>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "api_key_configured": fetcher.api_key_configured()
    }))
}

/// Handler for fetching comments by video URL or bare ID.
async fn comments_by_url(
    State(fetcher): State<Arc<CommentFetcher>>,
    Query(params): Query<CommentsParams>,
) -> Response {
    if !(1..=MAX_RESULTS_LIMIT).contains(&params.max_results) {
        return bad_request("max_results must be between 1 and 100.");
    }

    let Some(video_id) = resolver::resolve_video_id(&params.url) else {
        return bad_request(
            "Invalid YouTube URL or video ID. Please provide a valid YouTube video URL.",
        );
    };

    list_comments(fetcher, video_id, params.max_results).await
}

/// Handler for fetching comments by path-supplied video ID.
async fn comments_by_video_id(
    State(fetcher): State<Arc<CommentFetcher>>,
    Path(video_id): Path<String>,
    Query(params): Query<MaxResultsParams>,
) -> Response {
    if !(1..=MAX_RESULTS_LIMIT).contains(&params.max_results) {
        return bad_request("max_results must be between 1 and 100.");
    }

    // Length only, matching the lookup contract; existence is left to the
    // upstream API.
    if video_id.chars().count() != VIDEO_ID_LEN {
        return bad_request("Invalid video ID format. YouTube video IDs are 11 characters long.");
    }

    list_comments(fetcher, video_id, params.max_results).await
}

async fn list_comments(fetcher: Arc<CommentFetcher>, video_id: String, max_results: u32) -> Response {
    match fetcher.fetch_comments(&video_id, max_results).await {
        Ok(comments) => {
            let response = CommentsResponse {
                video_id,
                comment_count: comments.len(),
                comments,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            let error = ErrorResponse {
                detail: err.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}

/// Create the router for the comments API
pub fn create_router(fetcher: Arc<CommentFetcher>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/comments", get(comments_by_url))
        .route("/video/{video_id}/comments", get(comments_by_video_id))
        .with_state(fetcher)
}
