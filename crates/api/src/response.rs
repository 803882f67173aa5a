//! Shared response types for API handlers.

use folio_db::models::page::PageWithBoxes;
use folio_storage::ObjectStore;
use serde::Serialize;

/// `{ "success": true }` acknowledgement for operations without a payload.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// A page as the canvas consumes it: the nested record plus a browser
/// URL for its image when the store is publicly reachable.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    #[serde(flatten)]
    pub page: PageWithBoxes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PageView {
    pub fn new(page: PageWithBoxes, store: &dyn ObjectStore) -> Self {
        let image_url = store.public_url(&page.page.file_key);
        Self { page, image_url }
    }

    pub fn many(pages: Vec<PageWithBoxes>, store: &dyn ObjectStore) -> Vec<Self> {
        pages.into_iter().map(|p| Self::new(p, store)).collect()
    }
}
