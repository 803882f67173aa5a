//! Domain primitives shared by every Folio crate.
//!
//! Nothing in here touches the network, the database or the object store;
//! the modules are plain data and pure functions so they can be unit tested
//! in isolation and reused by clients.

pub mod canvas;
pub mod error;
pub mod geometry;
pub mod language;
pub mod object_key;
pub mod types;
