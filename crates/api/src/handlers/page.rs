//! Handlers for the `/pages` resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::object_key;
use folio_core::types::DbId;
use folio_db::models::page::{
    CreatePage, PageWithBoxes, UpdatePagePosition, UpdatePageSize, DEFAULT_PAGE_HEIGHT,
    DEFAULT_PAGE_WIDTH,
};
use folio_db::repositories::PageRepo;

use crate::error::{AppError, AppResult};
use crate::response::PageView;
use crate::state::AppState;

/// Fields collected from the page upload form.
#[derive(Debug, Default)]
struct PageUpload {
    file: Option<(String, Vec<u8>)>,
    name: Option<String>,
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
}

impl PageUpload {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut upload = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or("upload").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    upload.file = Some((filename, data.to_vec()));
                }
                "name" | "x" | "y" | "width" | "height" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    match field_name.as_str() {
                        "name" => upload.name = Some(value.trim().to_string()),
                        "x" => upload.x = Some(parse_int("x", &value)?),
                        "y" => upload.y = Some(parse_int("y", &value)?),
                        "width" => upload.width = Some(parse_int("width", &value)?),
                        _ => upload.height = Some(parse_int("height", &value)?),
                    }
                }
                other => tracing::debug!(field = other, "Ignoring unknown upload field"),
            }
        }

        Ok(upload)
    }
}

fn parse_int(field: &str, value: &str) -> AppResult<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Field '{field}' must be an integer")))
}

/// Sniff the upload's image format. Only formats with a compiled-in
/// decoder are accepted, so every stored page can be cropped.
fn decodable_format(data: &[u8]) -> AppResult<image::ImageFormat> {
    let format = image::guess_format(data).map_err(|_| {
        AppError::Core(CoreError::Validation(
            "Uploaded file is not a recognised image".to_string(),
        ))
    })?;
    if !format.reading_enabled() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unsupported page image format {}; upload PNG, JPEG or WebP",
            format.to_mime_type()
        ))));
    }
    Ok(format)
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing required field '{field}'"))
}

/// Load a page with its boxes, or 404.
async fn load_page(state: &AppState, id: DbId) -> AppResult<PageView> {
    let page = PageRepo::find_with_boxes(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(PageView::new(page, state.store.as_ref()))
}

/// GET /api/pages
///
/// Every page with its boxes and their translations, in creation order.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<PageView>>> {
    let pages = PageRepo::list_with_boxes(&state.pool).await?;
    Ok(Json(PageView::many(pages, state.store.as_ref())))
}

/// POST /api/pages
///
/// Multipart form with `file`, `name`, `x`, `y` and optional `width` and
/// `height`. The file is stored byte-for-byte under a fresh `pages/` key.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<PageView>)> {
    let upload = PageUpload::read(multipart).await?;

    let (filename, data) = upload.file.ok_or_else(|| missing("file"))?;
    let name = upload
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| missing("name"))?;
    let x = upload.x.ok_or_else(|| missing("x"))?;
    let y = upload.y.ok_or_else(|| missing("y"))?;
    let width = upload.width.unwrap_or(DEFAULT_PAGE_WIDTH);
    let height = upload.height.unwrap_or(DEFAULT_PAGE_HEIGHT);
    if width <= 0 || height <= 0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Page size must be positive, got {width}x{height}"
        ))));
    }

    let format = decodable_format(&data)?;

    let file_key = object_key::page_key(&filename);
    state
        .store
        .put(data, &file_key, format.to_mime_type())
        .await?;

    let input = CreatePage {
        name,
        file_key,
        x,
        y,
        width,
        height,
    };
    let page = match PageRepo::create(&state.pool, &input).await {
        Ok(page) => page,
        Err(err) => {
            tracing::warn!(key = %input.file_key, error = %err, "Page image left orphaned after failed insert");
            return Err(err.into());
        }
    };
    tracing::info!(page_id = page.id, key = %page.file_key, "Page uploaded");

    let view = PageView::new(
        PageWithBoxes {
            page,
            transcript_boxes: Vec::new(),
        },
        state.store.as_ref(),
    );
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/pages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PageView>> {
    Ok(Json(load_page(&state, id).await?))
}

/// PATCH /api/pages/{id}
///
/// Move a page. Returns the page with its boxes.
pub async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePagePosition>,
) -> AppResult<Json<PageView>> {
    PageRepo::update_position(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(load_page(&state, id).await?))
}

/// PATCH /api/pages/{id}/size
///
/// Resize a page. Existing boxes keep their coordinates.
pub async fn update_size(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePageSize>,
) -> AppResult<Json<PageView>> {
    if input.width <= 0 || input.height <= 0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Page size must be positive, got {}x{}",
            input.width, input.height
        ))));
    }
    PageRepo::update_size(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(load_page(&state, id).await?))
}
