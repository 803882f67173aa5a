use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_extraction::ExtractionError;
use folio_pipeline::PipelineError;
use folio_storage::StorageError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An object store failure outside the pipeline (page upload).
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A failure from the region extraction pipeline.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type Classified = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Storage(err) => classify_storage_error(err),
            AppError::Pipeline(err) => classify_pipeline_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> Classified {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Upstream object store failures are a bad gateway; the key and backend
/// message go to the log only.
fn classify_storage_error(err: &StorageError) -> Classified {
    tracing::error!(error = %err, "Object store error");
    (
        StatusCode::BAD_GATEWAY,
        "STORAGE_ERROR",
        "The object store request failed".to_string(),
    )
}

fn classify_extraction_error(err: &ExtractionError) -> Classified {
    tracing::error!(error = %err, "Extraction error");
    (
        StatusCode::BAD_GATEWAY,
        "EXTRACTION_ERROR",
        "Text extraction failed".to_string(),
    )
}

fn classify_pipeline_error(err: &PipelineError) -> Classified {
    match err {
        PipelineError::Core(core) => classify_core_error(core),
        PipelineError::Database(db) => classify_sqlx_error(db),
        PipelineError::Storage(storage) => classify_storage_error(storage),
        PipelineError::Extraction(extraction) => classify_extraction_error(extraction),
        PipelineError::Crop(crop) => (StatusCode::BAD_REQUEST, "CROP_ERROR", crop.to_string()),
        PipelineError::Image(image) => {
            tracing::warn!(error = %image, "Page image could not be decoded");
            (
                StatusCode::BAD_REQUEST,
                "IMAGE_ERROR",
                "Page image could not be processed".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Check constraint violations (`ck_`) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique_violation
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // PostgreSQL check_violation
                Some("23514") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                // PostgreSQL foreign_key_violation
                Some("23503") => {
                    return (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        "Referenced resource not found".to_string(),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core::geometry::CropError;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn core_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(AppError::Core(CoreError::NotFound { entity: "Page", id: 7 })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Validation("bad".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Conflict("dup".into()))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        assert_eq!(
            status_of(AppError::Storage(StorageError::NotFound { key: "pages/x.png".into() })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Pipeline(PipelineError::Extraction(ExtractionError::Api {
                status: 503,
                body: "down".into()
            }))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn pipeline_wraps_core_and_crop_errors() {
        assert_eq!(
            status_of(AppError::Pipeline(PipelineError::Core(CoreError::NotFound {
                entity: "Page",
                id: 1
            }))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Pipeline(PipelineError::Crop(CropError::Empty))),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn image_errors_hide_decoder_detail() {
        let decode = image::load_from_memory(b"not an image").unwrap_err();
        let detail = decode.to_string();

        let response = AppError::Pipeline(PipelineError::Image(decode)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "IMAGE_ERROR");
        assert_eq!(json["error"], "Page image could not be processed");
        assert!(!json["error"].as_str().unwrap().contains(&detail));
    }

    #[test]
    fn internal_messages_are_sanitized() {
        assert_eq!(
            status_of(AppError::InternalError("secret detail".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Database(sqlx::Error::PoolTimedOut)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
