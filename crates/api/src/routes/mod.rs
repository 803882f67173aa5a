pub mod health;
pub mod pages;
pub mod transcript_boxes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /pages                                  list, upload
/// /pages/{id}                             get, move
/// /pages/{id}/size                        resize
///
/// /transcript-boxes                       create
/// /transcript-boxes/generate              extract text from a region
/// /transcript-boxes/{id}                  patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pages", pages::router())
        .nest("/transcript-boxes", transcript_boxes::router())
}
