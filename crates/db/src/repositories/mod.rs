//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or any Postgres executor, for the pieces that
//! take part in a larger transaction) as the first argument.

pub mod page_repo;
pub mod transcript_box_repo;
pub mod translation_repo;

pub use page_repo::PageRepo;
pub use transcript_box_repo::TranscriptBoxRepo;
pub use translation_repo::TranslationRepo;
