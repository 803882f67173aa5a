//! Page entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::transcript_box::TranscriptBoxWithTranslations;

/// Display size given to a freshly uploaded page.
pub const DEFAULT_PAGE_WIDTH: i32 = 400;
pub const DEFAULT_PAGE_HEIGHT: i32 = 600;

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: DbId,
    pub name: String,
    /// Object store key of the uploaded source image.
    pub file_key: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub created_at: Timestamp,
}

/// A page together with its boxes and each box's translations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWithBoxes {
    #[serde(flatten)]
    pub page: Page,
    pub transcript_boxes: Vec<TranscriptBoxWithTranslations>,
}

/// DTO for creating a new page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePage {
    pub name: String,
    pub file_key: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// DTO for moving a page on the canvas.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdatePagePosition {
    pub x: i32,
    pub y: i32,
}

/// DTO for resizing a page on the canvas.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdatePageSize {
    pub width: i32,
    pub height: i32,
}
