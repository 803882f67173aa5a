use std::sync::Arc;

use folio_core::error::CoreError;
use folio_core::geometry::Rect;
use folio_core::language::LanguageTag;
use folio_core::object_key;
use folio_core::types::DbId;
use folio_db::models::transcript_box::{CreateTranscriptBox, TranscriptBoxWithTranslations};
use folio_db::repositories::{PageRepo, TranscriptBoxRepo};
use folio_db::DbPool;
use folio_extraction::TextExtractor;
use folio_storage::ObjectStore;

use crate::crop::{crop_region, CroppedRegion};
use crate::PipelineError;

/// A request to extract the text under `rect` on page `page_id`.
#[derive(Debug, Clone)]
pub struct GenerateRegion {
    pub page_id: DbId,
    /// Selection in the page's display coordinate space.
    pub rect: Rect,
    /// Language the transcript is translated into.
    pub language: LanguageTag,
}

/// Orchestrates store, image processing, model calls and persistence for
/// one region at a time. Cheap to clone.
#[derive(Clone)]
pub struct RegionPipeline {
    pool: DbPool,
    store: Arc<dyn ObjectStore>,
    extractor: Arc<dyn TextExtractor>,
}

impl RegionPipeline {
    pub fn new(pool: DbPool, store: Arc<dyn ObjectStore>, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            pool,
            store,
            extractor,
        }
    }

    /// Run the full extraction for one selection.
    ///
    /// All external work (image fetch, crop, transcription, translation,
    /// crop upload) happens before anything is written to the database, and
    /// the box and its translation are inserted in one transaction. A failure
    /// at any step therefore leaves no rows behind.
    pub async fn generate(
        &self,
        request: &GenerateRegion,
    ) -> Result<TranscriptBoxWithTranslations, PipelineError> {
        let page = PageRepo::find_by_id(&self.pool, request.page_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Page",
                id: request.page_id,
            })?;

        let display_width = f64::from(page.width);
        let display_height = f64::from(page.height);
        request.rect.ensure_within(display_width, display_height)?;

        let source = self.store.get(&page.file_key).await?;
        let rect = request.rect;
        let region = tokio::task::spawn_blocking(move || {
            crop_region(&source.bytes, &rect, display_width, display_height)
        })
        .await
        .map_err(|e| CoreError::Internal(format!("crop task failed: {e}")))??;

        tracing::info!(
            page_id = page.id,
            source_width = region.source_width,
            source_height = region.source_height,
            crop_x = region.pixels.x,
            crop_y = region.pixels.y,
            crop_width = region.pixels.width,
            crop_height = region.pixels.height,
            "Cropped region"
        );

        let transcript = self
            .extractor
            .transcribe(&region.bytes, region.content_type())
            .await?;

        let translation = if transcript.is_empty() {
            String::new()
        } else {
            self.extractor
                .translate(&transcript, &request.language)
                .await?
        };

        let part_key = self.upload_region(region, &page.file_key).await?;

        let input = CreateTranscriptBox {
            page_id: page.id,
            x: request.rect.x,
            y: request.rect.y,
            width: request.rect.width,
            height: request.rect.height,
            text: (!transcript.is_empty()).then_some(transcript),
            part_file_key: Some(part_key.clone()),
        };

        match TranscriptBoxRepo::create_with_translation(
            &self.pool,
            &input,
            request.language.as_str(),
            &translation,
        )
        .await
        {
            Ok(created) => {
                tracing::info!(
                    page_id = page.id,
                    box_id = created.transcript_box.id,
                    language = %request.language,
                    "Generated transcript box"
                );
                Ok(created)
            }
            Err(err) => {
                tracing::warn!(
                    page_id = page.id,
                    key = %part_key,
                    error = %err,
                    "Region image left orphaned after failed persist"
                );
                Err(err.into())
            }
        }
    }

    async fn upload_region(
        &self,
        region: CroppedRegion,
        source_key: &str,
    ) -> Result<String, PipelineError> {
        let key = object_key::page_part_key(region.extension(source_key).as_deref());
        let content_type = region.content_type();
        self.store.put(region.bytes, &key, content_type).await?;
        Ok(key)
    }
}
