//! Top-level module for mesh topology.
//!
//! This module provides the boundary-representation data model:
//! - Strong handles per element kind (vertex, edge, face, loop)
//! - The [`PolyMesh`](mesh::PolyMesh) kernel with construction, adjacency
//!   queries, and the cascading kill primitives
//! - Validation helpers for the structural invariants
//!
//! Most users will build a [`PolyMesh`](mesh::PolyMesh), flag elements via
//! [`crate::flags::FlagPool`], and hand both to
//! [`crate::ops::delete::remove_tagged`].

pub mod handle;
pub mod mesh;
pub mod validation;

pub use handle::{EdgeId, FaceId, LoopId, VertId};
pub use mesh::PolyMesh;
