//! Client-side canvas state.
//!
//! The canvas keeps a cache of pages (with their boxes and translations)
//! keyed by id. The cache only changes when the server confirms a write:
//! every mutating endpoint returns the authoritative entity, which is fed
//! back in here. There are no placeholder entities with client-invented
//! ids.
//!
//! The snapshot types mirror the JSON the record API returns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::types::DbId;

/// A pointer position relative to the page panel's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Turn a drag gesture into a selection rectangle.
///
/// The drag may go in any direction; the rectangle is anchored at the
/// smaller corner. A drag with no area (a click) selects nothing.
pub fn selection_from_drag(start: Point, end: Point) -> Option<Rect> {
    let rect = Rect {
        x: start.x.min(end.x),
        y: start.y.min(end.y),
        width: (end.x - start.x).abs(),
        height: (end.y - start.y).abs(),
    };
    if rect.width > 0.0 && rect.height > 0.0 {
        Some(rect)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationSnapshot {
    pub id: DbId,
    pub transcript_box_id: DbId,
    pub language: String,
    pub translation_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSnapshot {
    pub id: DbId,
    pub page_id: DbId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: Option<String>,
    #[serde(default)]
    pub translations: Vec<TranslationSnapshot>,
}

impl BoxSnapshot {
    /// Text to draw inside the box: the translation for `language` when
    /// one exists and is non-empty, otherwise the raw transcript.
    pub fn display_text(&self, language: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.language == language && !t.translation_text.is_empty())
            .map(|t| t.translation_text.as_str())
            .or(self.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub id: DbId,
    pub name: String,
    pub file_key: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub transcript_boxes: Vec<BoxSnapshot>,
}

/// Pages currently on the canvas, keyed by id.
#[derive(Debug, Default)]
pub struct CanvasCache {
    pages: BTreeMap<DbId, PageSnapshot>,
}

impl CanvasCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache with a fresh `GET /pages` listing.
    pub fn load(&mut self, pages: Vec<PageSnapshot>) {
        self.pages = pages.into_iter().map(|p| (p.id, p)).collect();
    }

    pub fn page(&self, id: DbId) -> Option<&PageSnapshot> {
        self.pages.get(&id)
    }

    pub fn pages(&self) -> impl Iterator<Item = &PageSnapshot> {
        self.pages.values()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Store a page returned by create/move/resize, replacing any cached copy.
    pub fn apply_page(&mut self, page: PageSnapshot) {
        self.pages.insert(page.id, page);
    }

    /// Insert or replace a box returned by create/patch/generate.
    ///
    /// Returns `false` if the owning page is not cached, in which case the
    /// caller should reload.
    pub fn apply_box(&mut self, transcript_box: BoxSnapshot) -> bool {
        let Some(page) = self.pages.get_mut(&transcript_box.page_id) else {
            return false;
        };
        match page
            .transcript_boxes
            .iter_mut()
            .find(|b| b.id == transcript_box.id)
        {
            Some(existing) => *existing = transcript_box,
            None => page.transcript_boxes.push(transcript_box),
        }
        true
    }

    /// Drop a box after the server confirmed its deletion.
    pub fn remove_box(&mut self, box_id: DbId) -> Option<BoxSnapshot> {
        for page in self.pages.values_mut() {
            if let Some(pos) = page.transcript_boxes.iter().position(|b| b.id == box_id) {
                return Some(page.transcript_boxes.remove(pos));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: DbId) -> PageSnapshot {
        PageSnapshot {
            id,
            name: format!("page {id}"),
            file_key: format!("pages/{id}.png"),
            x: 0,
            y: 0,
            width: 400,
            height: 600,
            image_url: None,
            transcript_boxes: Vec::new(),
        }
    }

    fn transcript_box(id: DbId, page_id: DbId, text: Option<&str>) -> BoxSnapshot {
        BoxSnapshot {
            id,
            page_id,
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
            text: text.map(str::to_string),
            translations: Vec::new(),
        }
    }

    #[test]
    fn drag_in_any_direction_normalises() {
        let rect = selection_from_drag(Point { x: 50.0, y: 80.0 }, Point { x: 10.0, y: 20.0 });
        assert_eq!(rect, Some(Rect::new(10.0, 20.0, 40.0, 60.0)));
    }

    #[test]
    fn click_selects_nothing() {
        let p = Point { x: 5.0, y: 5.0 };
        assert_eq!(selection_from_drag(p, p), None);
        assert_eq!(selection_from_drag(p, Point { x: 9.0, y: 5.0 }), None);
    }

    #[test]
    fn display_text_prefers_matching_translation() {
        let mut b = transcript_box(1, 1, Some("Guten Tag"));
        b.translations.push(TranslationSnapshot {
            id: 1,
            transcript_box_id: 1,
            language: "fr".into(),
            translation_text: "Bonjour".into(),
        });
        assert_eq!(b.display_text("fr"), Some("Bonjour"));
        assert_eq!(b.display_text("en"), Some("Guten Tag"));
    }

    #[test]
    fn display_text_skips_empty_translation() {
        let mut b = transcript_box(1, 1, Some("raw"));
        b.translations.push(TranslationSnapshot {
            id: 1,
            transcript_box_id: 1,
            language: "fr".into(),
            translation_text: String::new(),
        });
        assert_eq!(b.display_text("fr"), Some("raw"));
        assert_eq!(transcript_box(2, 1, None).display_text("fr"), None);
    }

    #[test]
    fn apply_box_upserts_into_owning_page() {
        let mut cache = CanvasCache::new();
        cache.load(vec![page(1), page(2)]);

        assert!(cache.apply_box(transcript_box(10, 2, None)));
        assert!(cache.apply_box(transcript_box(10, 2, Some("edited"))));

        let boxes = &cache.page(2).unwrap().transcript_boxes;
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].text.as_deref(), Some("edited"));
        assert!(cache.page(1).unwrap().transcript_boxes.is_empty());
    }

    #[test]
    fn apply_box_for_unknown_page_is_refused() {
        let mut cache = CanvasCache::new();
        assert!(!cache.apply_box(transcript_box(10, 99, None)));
    }

    #[test]
    fn remove_box_finds_it_on_any_page() {
        let mut cache = CanvasCache::new();
        cache.load(vec![page(1), page(2)]);
        cache.apply_box(transcript_box(7, 2, None));

        assert_eq!(cache.remove_box(7).map(|b| b.id), Some(7));
        assert!(cache.remove_box(7).is_none());
    }

    #[test]
    fn apply_page_replaces_cached_copy() {
        let mut cache = CanvasCache::new();
        cache.load(vec![page(1)]);
        let mut moved = page(1);
        moved.x = 250;
        cache.apply_page(moved);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.page(1).unwrap().x, 250);
    }
}
