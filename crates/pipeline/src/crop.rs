//! Cropping a display-space selection out of a stored page image.

use std::io::Cursor;

use folio_core::geometry::{map_to_pixels, PixelRect, Rect};
use image::{DynamicImage, ImageFormat};

use crate::PipelineError;

/// A cropped region, encoded and ready to upload.
#[derive(Debug, Clone)]
pub struct CroppedRegion {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    /// Pixel rectangle cut from the source image.
    pub pixels: PixelRect,
    /// True pixel size of the source image.
    pub source_width: u32,
    pub source_height: u32,
    /// Whether the crop kept the source image's format.
    pub same_format_as_source: bool,
}

impl CroppedRegion {
    pub fn content_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// File extension for the crop's object key: the source key's own
    /// extension when the format was kept, else the encoder's canonical one.
    pub fn extension(&self, source_key: &str) -> Option<String> {
        let kept = self
            .same_format_as_source
            .then(|| folio_core::object_key::file_extension(source_key))
            .flatten();
        kept.or_else(|| self.format.extensions_str().first().map(|e| e.to_string()))
    }
}

/// Decode `source`, map `selection` from a page displayed at
/// `display_width` x `display_height` into pixel space, and crop.
///
/// The crop is re-encoded in the source format when an encoder for it is
/// available, otherwise as PNG.
pub fn crop_region(
    source: &[u8],
    selection: &Rect,
    display_width: f64,
    display_height: f64,
) -> Result<CroppedRegion, PipelineError> {
    let source_format = image::guess_format(source)?;
    let image = image::load_from_memory_with_format(source, source_format)?;
    let (source_width, source_height) = (image.width(), image.height());

    let pixels = map_to_pixels(
        selection,
        display_width,
        display_height,
        source_width,
        source_height,
    )?;
    let cropped = image.crop_imm(pixels.x, pixels.y, pixels.width, pixels.height);

    let (bytes, format) = encode(&cropped, source_format)?;
    Ok(CroppedRegion {
        bytes,
        format,
        pixels,
        source_width,
        source_height,
        same_format_as_source: format == source_format,
    })
}

fn encode(image: &DynamicImage, preferred: ImageFormat) -> Result<(Vec<u8>, ImageFormat), PipelineError> {
    if matches!(preferred, ImageFormat::Jpeg | ImageFormat::WebP) {
        if let Ok(bytes) = write(image, preferred) {
            return Ok((bytes, preferred));
        }
    }
    Ok((write(image, ImageFormat::Png)?, ImageFormat::Png))
}

fn write(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}
