//! Selection geometry.
//!
//! Boxes are stored in the display coordinate space of their page (the
//! size the page is currently drawn at on the canvas). Cropping needs the
//! same rectangle in the pixel space of the original upload, which is
//! usually larger or smaller than the displayed size.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A rectangle in a page's display coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A rectangle in source-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Reasons a selection cannot be turned into a pixel crop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CropError {
    #[error("display size must be positive, got {width}x{height}")]
    InvalidDisplaySize { width: f64, height: f64 },

    #[error("source image has no pixels")]
    EmptyImage,

    #[error("crop at ({x}, {y}) lies outside the {image_width}x{image_height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("crop rectangle is empty after scaling")]
    Empty,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check the rectangle is finite, anchored at a non-negative origin and
    /// has a positive area.
    pub fn validate(&self) -> Result<(), CoreError> {
        let values = [self.x, self.y, self.width, self.height];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::Validation(
                "Box coordinates must be finite numbers".into(),
            ));
        }
        if self.x < 0.0 || self.y < 0.0 {
            return Err(CoreError::Validation(format!(
                "Box origin must be non-negative, got ({}, {})",
                self.x, self.y
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Box size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Validate the rectangle and check that it lies within a page drawn at
    /// `bounds_width` x `bounds_height`.
    pub fn ensure_within(&self, bounds_width: f64, bounds_height: f64) -> Result<(), CoreError> {
        self.validate()?;
        if self.x + self.width > bounds_width || self.y + self.height > bounds_height {
            return Err(CoreError::Validation(format!(
                "Box ({}, {}, {}x{}) extends beyond the page bounds {}x{}",
                self.x, self.y, self.width, self.height, bounds_width, bounds_height
            )));
        }
        Ok(())
    }
}

/// Round half up, matching how browsers round pixel coordinates.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Map a display-space selection into the pixel space of the source image.
///
/// `scale = image / display` per axis; every component is multiplied by
/// its axis scale and rounded half up. The result is clipped to the image
/// bounds. A crop whose origin falls outside the image, or which ends up
/// with zero area, is an error.
///
/// ```
/// use folio_core::geometry::{map_to_pixels, PixelRect, Rect};
///
/// let crop = map_to_pixels(&Rect::new(100.0, 100.0, 50.0, 50.0), 400.0, 600.0, 800, 1200);
/// assert_eq!(
///     crop,
///     Ok(PixelRect { x: 200, y: 200, width: 100, height: 100 })
/// );
/// ```
pub fn map_to_pixels(
    selection: &Rect,
    display_width: f64,
    display_height: f64,
    image_width: u32,
    image_height: u32,
) -> Result<PixelRect, CropError> {
    if !(display_width > 0.0 && display_height > 0.0) {
        return Err(CropError::InvalidDisplaySize {
            width: display_width,
            height: display_height,
        });
    }
    if image_width == 0 || image_height == 0 {
        return Err(CropError::EmptyImage);
    }

    let scale_x = f64::from(image_width) / display_width;
    let scale_y = f64::from(image_height) / display_height;

    let x = round_half_up(selection.x * scale_x).max(0.0);
    let y = round_half_up(selection.y * scale_y).max(0.0);
    let width = round_half_up(selection.width * scale_x).max(0.0);
    let height = round_half_up(selection.height * scale_y).max(0.0);

    if x >= f64::from(image_width) || y >= f64::from(image_height) {
        return Err(CropError::OutOfBounds {
            x: x.min(f64::from(u32::MAX)) as u32,
            y: y.min(f64::from(u32::MAX)) as u32,
            image_width,
            image_height,
        });
    }

    // Origin is inside the image, so the casts below cannot overflow.
    let x = x as u32;
    let y = y as u32;
    let width = width.min(f64::from(image_width - x)) as u32;
    let height = height.min(f64::from(image_height - y)) as u32;

    if width == 0 || height == 0 {
        return Err(CropError::Empty);
    }

    Ok(PixelRect {
        x,
        y,
        width,
        height,
    })
}
