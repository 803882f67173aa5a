//! HTTP-level integration tests for box create/patch/delete.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, upload_page};
use folio_core::canvas::BoxSnapshot;
use folio_db::models::translation::CreateTranslation;
use folio_db::repositories::TranslationRepo;
use serde_json::json;
use sqlx::PgPool;

async fn seed_page(pool: &PgPool) -> i64 {
    let page = upload_page(common::build_test_app(pool.clone()), "Page", &common::page_png(4, 4)).await;
    page["id"].as_i64().unwrap()
}

async fn seed_box(pool: &PgPool, page_id: i64) -> i64 {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/transcript-boxes",
        json!({"pageId": page_id, "x": 10, "y": 10, "width": 100, "height": 40}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_box_returns_201_with_empty_text(pool: PgPool) {
    let page_id = seed_page(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/transcript-boxes",
        json!({"pageId": page_id, "x": 12.5, "y": 30, "width": 100, "height": 40}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["pageId"], page_id);
    assert_eq!(json["x"], 12.5);
    assert_eq!(json["text"], serde_json::Value::Null);
    assert_eq!(json["translations"], json!([]));

    let snapshot: BoxSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(snapshot.display_text("fr"), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_box_on_missing_page_is_404(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/transcript-boxes",
        json!({"pageId": 999999, "x": 0, "y": 0, "width": 10, "height": 10}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_box_outside_page_is_400(pool: PgPool) {
    let page_id = seed_page(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/transcript-boxes",
        json!({"pageId": page_id, "x": 380, "y": 0, "width": 50, "height": 10}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_box_with_zero_width_is_400(pool: PgPool) {
    let page_id = seed_page(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/transcript-boxes",
        json!({"pageId": page_id, "x": 0, "y": 0, "width": 0, "height": 10}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_box_missing_field_is_rejected(pool: PgPool) {
    let page_id = seed_page(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/transcript-boxes",
        json!({"pageId": page_id, "x": 0, "y": 0, "width": 10}),
    )
    .await;
    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_round_trips_and_leaves_other_fields(pool: PgPool) {
    let page_id = seed_page(&pool).await;
    let box_id = seed_box(&pool, page_id).await;

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/transcript-boxes/{box_id}"),
        json!({"text": "Corrected", "x": 20}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await;
    assert_eq!(patched["text"], "Corrected");
    assert_eq!(patched["x"], 20.0);
    assert_eq!(patched["y"], 10.0);
    assert_eq!(patched["width"], 100.0);

    let page = body_json(get(common::build_test_app(pool), &format!("/api/pages/{page_id}")).await).await;
    let stored = &page["transcriptBoxes"][0];
    assert_eq!(stored["text"], "Corrected");
    assert_eq!(stored["x"], 20.0);
    assert_eq!(stored["height"], 40.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_identical_patch_is_idempotent(pool: PgPool) {
    let page_id = seed_page(&pool).await;
    let box_id = seed_box(&pool, page_id).await;
    let uri = format!("/api/transcript-boxes/{box_id}");
    let body = json!({"width": 120, "height": 60, "text": "Same"});

    let first = body_json(patch_json(common::build_test_app(pool.clone()), &uri, body.clone()).await).await;
    let second = body_json(patch_json(common::build_test_app(pool), &uri, body).await).await;

    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_keeps_translations(pool: PgPool) {
    let page_id = seed_page(&pool).await;
    let box_id = seed_box(&pool, page_id).await;
    TranslationRepo::upsert(
        &pool,
        &CreateTranslation {
            transcript_box_id: box_id,
            language: "fr".into(),
            translation_text: "Bonjour".into(),
        },
    )
    .await
    .unwrap();

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/transcript-boxes/{box_id}"),
        json!({"text": "Hello"}),
    )
    .await;
    let json = body_json(response).await;
    let snapshot: BoxSnapshot = serde_json::from_value(json).unwrap();

    assert_eq!(snapshot.translations.len(), 1);
    assert_eq!(snapshot.display_text("fr"), Some("Bonjour"));
    assert_eq!(snapshot.display_text("de"), Some("Hello"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_moving_box_off_page_is_400(pool: PgPool) {
    let page_id = seed_page(&pool).await;
    let box_id = seed_box(&pool, page_id).await;

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/transcript-boxes/{box_id}"),
        json!({"y": 590}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let page = body_json(get(common::build_test_app(pool), &format!("/api/pages/{page_id}")).await).await;
    assert_eq!(page["transcriptBoxes"][0]["y"], 10.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_unknown_field_is_rejected(pool: PgPool) {
    let page_id = seed_page(&pool).await;
    let box_id = seed_box(&pool, page_id).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/transcript-boxes/{box_id}"),
        json!({"pageId": 1}),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_missing_box_is_404(pool: PgPool) {
    let response = patch_json(
        common::build_test_app(pool),
        "/api/transcript-boxes/999999",
        json!({"text": "nobody"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_box_and_translations(pool: PgPool) {
    let page_id = seed_page(&pool).await;
    let box_id = seed_box(&pool, page_id).await;
    for language in ["fr", "de"] {
        TranslationRepo::upsert(
            &pool,
            &CreateTranslation {
                transcript_box_id: box_id,
                language: language.into(),
                translation_text: "x".into(),
            },
        )
        .await
        .unwrap();
    }

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/transcript-boxes/{box_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let remaining = TranslationRepo::list_by_box(&pool, box_id).await.unwrap();
    assert!(remaining.is_empty());

    let page = body_json(get(common::build_test_app(pool), &format!("/api/pages/{page_id}")).await).await;
    assert_eq!(page["transcriptBoxes"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_box_is_404(pool: PgPool) {
    let response = delete(common::build_test_app(pool), "/api/transcript-boxes/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
