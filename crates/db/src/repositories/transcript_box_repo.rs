//! Repository for the `transcript_boxes` table.

use std::collections::HashMap;

use folio_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::transcript_box::{
    CreateTranscriptBox, TranscriptBox, TranscriptBoxWithTranslations, UpdateTranscriptBox,
};
use crate::models::translation::{CreateTranslation, Translation};
use crate::repositories::TranslationRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, page_id, x, y, width, height, text, part_file_key, created_at";

/// Provides CRUD operations for transcript boxes.
pub struct TranscriptBoxRepo;

impl TranscriptBoxRepo {
    /// Insert a new box, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTranscriptBox,
    ) -> Result<TranscriptBox, sqlx::Error> {
        let query = format!(
            "INSERT INTO transcript_boxes (page_id, x, y, width, height, text, part_file_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TranscriptBox>(&query)
            .bind(input.page_id)
            .bind(input.x)
            .bind(input.y)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.text)
            .bind(&input.part_file_key)
            .fetch_one(executor)
            .await
    }

    /// Insert a box and its translation in one transaction.
    ///
    /// Either both rows exist afterwards or neither does.
    pub async fn create_with_translation(
        pool: &PgPool,
        input: &CreateTranscriptBox,
        language: &str,
        translation_text: &str,
    ) -> Result<TranscriptBoxWithTranslations, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let transcript_box = Self::create(&mut *tx, input).await?;
        let translation = TranslationRepo::upsert(
            &mut *tx,
            &CreateTranslation {
                transcript_box_id: transcript_box.id,
                language: language.to_string(),
                translation_text: translation_text.to_string(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(TranscriptBoxWithTranslations {
            transcript_box,
            translations: vec![translation],
        })
    }

    /// Find a box by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TranscriptBox>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transcript_boxes WHERE id = $1");
        sqlx::query_as::<_, TranscriptBox>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a box by ID together with its translations.
    pub async fn find_with_translations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TranscriptBoxWithTranslations>, sqlx::Error> {
        let Some(transcript_box) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let translations = TranslationRepo::list_by_box(pool, id).await?;
        Ok(Some(TranscriptBoxWithTranslations {
            transcript_box,
            translations,
        }))
    }

    /// List the boxes of many pages, with translations attached.
    pub async fn list_by_pages_with_translations(
        pool: &PgPool,
        page_ids: &[DbId],
    ) -> Result<Vec<TranscriptBoxWithTranslations>, sqlx::Error> {
        if page_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM transcript_boxes \
             WHERE page_id = ANY($1) \
             ORDER BY id"
        );
        let boxes = sqlx::query_as::<_, TranscriptBox>(&query)
            .bind(page_ids)
            .fetch_all(pool)
            .await?;

        let box_ids: Vec<DbId> = boxes.iter().map(|b| b.id).collect();
        let translations = TranslationRepo::list_by_boxes(pool, &box_ids).await?;
        Ok(attach_translations(boxes, translations))
    }

    /// Update a box. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTranscriptBox,
    ) -> Result<Option<TranscriptBox>, sqlx::Error> {
        let query = format!(
            "UPDATE transcript_boxes SET \
                x = COALESCE($2, x), \
                y = COALESCE($3, y), \
                width = COALESCE($4, width), \
                height = COALESCE($5, height), \
                text = COALESCE($6, text) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TranscriptBox>(&query)
            .bind(id)
            .bind(input.x)
            .bind(input.y)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.text)
            .fetch_optional(pool)
            .await
    }

    /// Delete a box and its translations atomically.
    ///
    /// Returns `true` if the box existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let deleted = Self::delete_in(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    /// The two deletion steps (translations, then the box) on a connection
    /// the caller controls, normally an open transaction.
    pub async fn delete_in(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let translations = TranslationRepo::delete_by_box(&mut *conn, id).await?;
        let result = sqlx::query("DELETE FROM transcript_boxes WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!(box_id = id, translations, "Deleted transcript box");
        Ok(result.rows_affected() > 0)
    }
}

/// Group translations under their boxes, preserving box order.
fn attach_translations(
    boxes: Vec<TranscriptBox>,
    translations: Vec<Translation>,
) -> Vec<TranscriptBoxWithTranslations> {
    let mut by_box: HashMap<DbId, Vec<Translation>> = HashMap::new();
    for translation in translations {
        by_box
            .entry(translation.transcript_box_id)
            .or_default()
            .push(translation);
    }
    boxes
        .into_iter()
        .map(|transcript_box| TranscriptBoxWithTranslations {
            translations: by_box.remove(&transcript_box.id).unwrap_or_default(),
            transcript_box,
        })
        .collect()
}
