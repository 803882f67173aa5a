//! Route definitions for the `/pages` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::page;
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (multipart upload)
/// GET    /{id}          -> get_by_id
/// PATCH  /{id}          -> update_position
/// PATCH  /{id}/size     -> update_size
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::list).post(page::create))
        .route("/{id}", get(page::get_by_id).patch(page::update_position))
        .route("/{id}/size", patch(page::update_size))
}
