//! Transcript box entity model and DTOs.

use folio_core::geometry::Rect;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::translation::Translation;

/// A row from the `transcript_boxes` table.
///
/// Geometry is in the display coordinate space of the owning page.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptBox {
    pub id: DbId,
    pub page_id: DbId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: Option<String>,
    /// Object store key of the cropped region image, set by generation.
    pub part_file_key: Option<String>,
    pub created_at: Timestamp,
}

impl TranscriptBox {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A box together with its translations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptBoxWithTranslations {
    #[serde(flatten)]
    pub transcript_box: TranscriptBox,
    pub translations: Vec<Translation>,
}

/// DTO for creating a new transcript box.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranscriptBox {
    pub page_id: DbId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub part_file_key: Option<String>,
}

impl CreateTranscriptBox {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// DTO for patching a transcript box. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTranscriptBox {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub text: Option<String>,
}

impl UpdateTranscriptBox {
    /// Geometry after applying this patch on top of `current`.
    pub fn merged_rect(&self, current: &TranscriptBox) -> Rect {
        Rect::new(
            self.x.unwrap_or(current.x),
            self.y.unwrap_or(current.y),
            self.width.unwrap_or(current.width),
            self.height.unwrap_or(current.height),
        )
    }
}
