//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - `Deserialize` update DTOs for patches
//!
//! Entities serialize with camelCase keys, which is what the canvas client
//! consumes.

pub mod page;
pub mod transcript_box;
pub mod translation;
