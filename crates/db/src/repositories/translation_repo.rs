//! Repository for the `transcript_box_translations` table.

use folio_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::translation::{CreateTranslation, Translation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, transcript_box_id, language, translation_text, created_at";

/// Provides CRUD operations for translations.
pub struct TranslationRepo;

impl TranslationRepo {
    /// Insert a translation, replacing the text of any existing translation
    /// for the same box and language.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTranslation,
    ) -> Result<Translation, sqlx::Error> {
        let query = format!(
            "INSERT INTO transcript_box_translations (transcript_box_id, language, translation_text) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_translations_box_language \
             DO UPDATE SET translation_text = EXCLUDED.translation_text \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(input.transcript_box_id)
            .bind(&input.language)
            .bind(&input.translation_text)
            .fetch_one(executor)
            .await
    }

    /// List the translations of one box, oldest first.
    pub async fn list_by_box<'e>(
        executor: impl PgExecutor<'e>,
        transcript_box_id: DbId,
    ) -> Result<Vec<Translation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transcript_box_translations \
             WHERE transcript_box_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(transcript_box_id)
            .fetch_all(executor)
            .await
    }

    /// List the translations of many boxes in one query.
    pub async fn list_by_boxes<'e>(
        executor: impl PgExecutor<'e>,
        transcript_box_ids: &[DbId],
    ) -> Result<Vec<Translation>, sqlx::Error> {
        if transcript_box_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM transcript_box_translations \
             WHERE transcript_box_id = ANY($1) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(transcript_box_ids)
            .fetch_all(executor)
            .await
    }

    /// Delete every translation of a box. Returns the number of rows removed.
    pub async fn delete_by_box<'e>(
        executor: impl PgExecutor<'e>,
        transcript_box_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM transcript_box_translations WHERE transcript_box_id = $1")
                .bind(transcript_box_id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }
}
