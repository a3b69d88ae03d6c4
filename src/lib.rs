//! # mesh-prune
//!
//! mesh-prune is a boundary-representation polygon mesh kernel with a
//! cascading tagged-deletion engine. It provides arena-backed mesh storage
//! addressed by strong handles, a per-call operator flag store, six
//! deletion-context policies for removing exactly the right closure of
//! flagged elements, and validation of the structural invariants.
//!
//! ## Features
//! - [`PolyMesh`](topology::mesh::PolyMesh): vertices, edges, faces, and
//!   face-boundary loops connected by handle-based adjacency, with kill
//!   primitives that cascade through dependent structures
//! - [`FlagPool`](flags::FlagPool): transient per-element flag bits scoped
//!   to one operator run, allocated and released explicitly
//! - [`remove_tagged`](ops::delete::remove_tagged): the deletion engine,
//!   driven by a closed [`DeleteContext`](ops::delete::DeleteContext)
//!   enumeration (no silent fall-through on unknown modes)
//! - Invariant validation with configurable strictness, plus debug-build
//!   assertions after every engine call
//!
//! ## Determinism
//!
//! All full-mesh sweeps iterate elements in sorted handle order, so removal
//! order and log output are reproducible run to run.
//!
//! ## Usage
//! ```rust
//! use mesh_prune::prelude::*;
//!
//! let mut mesh = PolyMesh::new();
//! let vs: Vec<_> = (0..4).map(|_| mesh.add_vert()).collect();
//! let face = mesh.add_face(&vs)?;
//!
//! let mut flags = FlagPool::new();
//! let flag = flags.alloc();
//! flags.enable(flag, face)?;
//! remove_tagged(&mut mesh, &mut flags, flag, DeleteContext::Faces)?;
//!
//! assert_eq!(mesh.face_count(), 0);
//! assert_eq!(mesh.vert_count(), 0);
//! # Ok::<(), mesh_prune::mesh_error::MeshPruneError>(())
//! ```

pub mod debug_invariants;
pub mod flags;
pub mod mesh_error;
pub mod ops;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::flags::{FlagElement, FlagId, FlagPool};
    pub use crate::mesh_error::MeshPruneError;
    pub use crate::ops::delete::{DeleteContext, remove_tagged};
    pub use crate::topology::handle::{EdgeId, FaceId, LoopId, VertId};
    pub use crate::topology::mesh::PolyMesh;
    pub use crate::topology::validation::{
        IsolatedVertexHandling, TopologyValidationOptions, validate_mesh_topology,
    };
}
