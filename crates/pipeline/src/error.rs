use folio_core::error::CoreError;
use folio_core::geometry::CropError;
use folio_extraction::ExtractionError;
use folio_storage::StorageError;

/// Everything that can stop a region extraction.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Missing page, invalid selection.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The selection does not map onto the source image.
    #[error("Crop failed: {0}")]
    Crop(#[from] CropError),

    /// The stored page image could not be decoded or the crop re-encoded.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
}
