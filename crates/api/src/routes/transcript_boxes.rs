//! Route definitions for the `/transcript-boxes` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::transcript_box;
use crate::state::AppState;

/// Routes mounted at `/transcript-boxes`.
///
/// ```text
/// POST   /              -> create
/// POST   /generate      -> generate
/// PATCH  /{id}          -> update
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(transcript_box::create))
        .route("/generate", post(transcript_box::generate))
        .route(
            "/{id}",
            patch(transcript_box::update).delete(transcript_box::delete),
        )
}
