//! Repository for the `pages` table.

use std::collections::HashMap;

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::page::{CreatePage, Page, PageWithBoxes, UpdatePagePosition, UpdatePageSize};
use crate::models::transcript_box::TranscriptBoxWithTranslations;
use crate::repositories::TranscriptBoxRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, file_key, x, y, width, height, created_at";

/// Provides CRUD operations for pages.
pub struct PageRepo;

impl PageRepo {
    /// Insert a new page, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePage) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages (name, file_key, x, y, width, height) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.name)
            .bind(&input.file_key)
            .bind(input.x)
            .bind(input.y)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(pool)
            .await
    }

    /// Find a page by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a page with its boxes and their translations.
    pub async fn find_with_boxes(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PageWithBoxes>, sqlx::Error> {
        let Some(page) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Self::attach_boxes(pool, vec![page]).await?.pop())
    }

    /// List every page with its boxes and their translations, in creation
    /// order.
    ///
    /// Runs one query per level (pages, boxes, translations) rather than
    /// one per page.
    pub async fn list_with_boxes(pool: &PgPool) -> Result<Vec<PageWithBoxes>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages ORDER BY id");
        let pages = sqlx::query_as::<_, Page>(&query).fetch_all(pool).await?;
        Self::attach_boxes(pool, pages).await
    }

    /// Move a page. Returns `None` if no row with the given `id` exists.
    pub async fn update_position(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePagePosition,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET x = $2, y = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(input.x)
            .bind(input.y)
            .fetch_optional(pool)
            .await
    }

    /// Resize a page. Returns `None` if no row with the given `id` exists.
    pub async fn update_size(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePageSize,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!(
            "UPDATE pages SET width = $2, height = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(input.width)
            .bind(input.height)
            .fetch_optional(pool)
            .await
    }

    async fn attach_boxes(
        pool: &PgPool,
        pages: Vec<Page>,
    ) -> Result<Vec<PageWithBoxes>, sqlx::Error> {
        let page_ids: Vec<DbId> = pages.iter().map(|p| p.id).collect();
        let boxes = TranscriptBoxRepo::list_by_pages_with_translations(pool, &page_ids).await?;

        let mut by_page: HashMap<DbId, Vec<TranscriptBoxWithTranslations>> = HashMap::new();
        for b in boxes {
            by_page.entry(b.transcript_box.page_id).or_default().push(b);
        }

        Ok(pages
            .into_iter()
            .map(|page| PageWithBoxes {
                transcript_boxes: by_page.remove(&page.id).unwrap_or_default(),
                page,
            })
            .collect())
    }
}
