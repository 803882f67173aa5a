pub mod page;
pub mod transcript_box;
