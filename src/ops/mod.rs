//! Editing operators built on the mesh kernel.
//!
//! Currently this is the cascading deletion engine; operators flag elements
//! and pick a [`delete::DeleteContext`] policy for how far removal
//! propagates.

pub mod delete;

pub use delete::{DeleteContext, remove_tagged};
