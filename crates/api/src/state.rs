use std::sync::Arc;

use folio_extraction::TextExtractor;
use folio_pipeline::RegionPipeline;
use folio_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Blob store holding page images and cropped regions.
    pub store: Arc<dyn ObjectStore>,
    /// Model used to transcribe and translate regions.
    pub extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    /// Region pipeline sharing this state's pool, store and extractor.
    pub fn pipeline(&self) -> RegionPipeline {
        RegionPipeline::new(
            self.pool.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.extractor),
        )
    }
}
