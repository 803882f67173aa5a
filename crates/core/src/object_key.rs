//! Object store key policy.
//!
//! Every blob gets a fresh UUID name so keys never collide; the original
//! file extension is preserved so the key still says what it holds.
//!
//! | Object               | Key                          |
//! |----------------------|------------------------------|
//! | Uploaded page image  | `pages/{uuid}.{ext}`         |
//! | Cropped region image | `pages-parts/{uuid}.{ext}`   |

use uuid::Uuid;

/// Prefix for uploaded page images.
pub const PAGE_PREFIX: &str = "pages";

/// Prefix for cropped region images.
pub const PAGE_PART_PREFIX: &str = "pages-parts";

/// Extension of a file name or key, lower-cased, without the dot.
///
/// Returns `None` for names without an extension, dot-files (`.env`) and
/// extensions containing anything other than ASCII alphanumerics.
pub fn file_extension(name: &str) -> Option<String> {
    let basename = name.rsplit('/').next().unwrap_or(name);
    let (stem, ext) = basename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn unique_key(prefix: &str, extension: Option<String>) -> String {
    let id = Uuid::new_v4();
    match extension {
        Some(ext) => format!("{prefix}/{id}.{ext}"),
        None => format!("{prefix}/{id}"),
    }
}

/// Fresh key for an uploaded page image named `original_filename`.
pub fn page_key(original_filename: &str) -> String {
    unique_key(PAGE_PREFIX, file_extension(original_filename))
}

/// Fresh key for a cropped region encoded with `extension`.
pub fn page_part_key(extension: Option<&str>) -> String {
    unique_key(PAGE_PART_PREFIX, extension.map(str::to_ascii_lowercase))
}
