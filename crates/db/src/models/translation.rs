//! Translation entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `transcript_box_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: DbId,
    pub transcript_box_id: DbId,
    pub language: String,
    pub translation_text: String,
    pub created_at: Timestamp,
}

/// DTO for creating (or replacing) a box's translation in one language.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranslation {
    pub transcript_box_id: DbId,
    pub language: String,
    pub translation_text: String,
}
