//! Handlers for the `/transcript-boxes` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::geometry::Rect;
use folio_core::language::LanguageTag;
use folio_core::types::DbId;
use folio_db::models::page::Page;
use folio_db::models::transcript_box::{
    CreateTranscriptBox, TranscriptBoxWithTranslations, UpdateTranscriptBox,
};
use folio_db::repositories::{PageRepo, TranscriptBoxRepo};
use folio_pipeline::GenerateRegion;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Request body for `POST /api/transcript-boxes/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub page_id: DbId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Target language tag for the translation, e.g. `en` or `pt-BR`.
    pub language: String,
}

async fn find_page(state: &AppState, id: DbId) -> AppResult<Page> {
    PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))
}

fn ensure_on_page(rect: &Rect, page: &Page) -> AppResult<()> {
    rect.ensure_within(f64::from(page.width), f64::from(page.height))?;
    Ok(())
}

/// POST /api/transcript-boxes
///
/// Create a box with no text and no translations.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTranscriptBox>,
) -> AppResult<(StatusCode, Json<TranscriptBoxWithTranslations>)> {
    let page = find_page(&state, input.page_id).await?;
    ensure_on_page(&input.rect(), &page)?;

    let transcript_box = TranscriptBoxRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(TranscriptBoxWithTranslations {
            transcript_box,
            translations: Vec::new(),
        }),
    ))
}

/// PATCH /api/transcript-boxes/{id}
///
/// Applies only the fields present in the body. Moving or resizing a box
/// off its page is rejected.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTranscriptBox>,
) -> AppResult<Json<TranscriptBoxWithTranslations>> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "TranscriptBox", id });

    let current = TranscriptBoxRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let moves = input.x.is_some() || input.y.is_some();
    let resizes = input.width.is_some() || input.height.is_some();
    if moves || resizes {
        let page = find_page(&state, current.page_id).await?;
        ensure_on_page(&input.merged_rect(&current), &page)?;
    }

    TranscriptBoxRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(not_found)?;
    let updated = TranscriptBoxRepo::find_with_translations(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(updated))
}

/// DELETE /api/transcript-boxes/{id}
///
/// Removes the box and its translations together.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if TranscriptBoxRepo::delete(&state.pool, id).await? {
        Ok(Json(SuccessResponse::ok()))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "TranscriptBox",
            id,
        }))
    }
}

/// POST /api/transcript-boxes/generate
///
/// Crop the selected region from the page image, transcribe and translate
/// it, and persist the result as a new box.
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<(StatusCode, Json<TranscriptBoxWithTranslations>)> {
    let language = LanguageTag::parse(&input.language)?;
    let request = GenerateRegion {
        page_id: input.page_id,
        rect: Rect::new(input.x, input.y, input.width, input.height),
        language,
    };

    let created = state.pipeline().generate(&request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
