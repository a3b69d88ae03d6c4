//! MeshPruneError: unified error type for mesh-prune public APIs
//!
//! This error type is used throughout the mesh-prune library to provide
//! robust, non-panicking error handling for all public APIs.

use thiserror::Error;

use crate::topology::handle::{EdgeId, FaceId, LoopId, VertId};

/// Unified error type for mesh-prune operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshPruneError {
    /// Attempted to construct a handle with a zero value (invalid).
    #[error("element handle must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidHandle,
    /// A vertex handle did not resolve to a live vertex.
    #[error("unknown or removed vertex `{0}`")]
    UnknownVert(VertId),
    /// An edge handle did not resolve to a live edge.
    #[error("unknown or removed edge `{0}`")]
    UnknownEdge(EdgeId),
    /// A face handle did not resolve to a live face.
    #[error("unknown or removed face `{0}`")]
    UnknownFace(FaceId),
    /// A loop handle did not resolve to a live loop.
    #[error("unknown or removed loop `{0}`")]
    UnknownLoop(LoopId),
    /// A flag identifier did not resolve to an allocated flag layer.
    #[error("unknown or released flag id `{0}`")]
    UnknownFlag(usize),
    /// Edge construction with both endpoints on the same vertex.
    #[error("degenerate edge: both endpoints are vertex `{0}`")]
    DegenerateEdge(VertId),
    /// Face construction with fewer than three boundary vertices.
    #[error("face boundary needs at least 3 vertices, got {0}")]
    FaceTooSmall(usize),
    /// Face construction with a repeated boundary vertex.
    #[error("face boundary repeats vertex `{0}`")]
    DuplicateBoundaryVert(VertId),
    /// Topology error: an edge endpoint is not a live vertex.
    #[error("edge `{edge}` references missing vertex `{vert}`")]
    DanglingEndpoint { edge: EdgeId, vert: VertId },
    /// Topology error: a loop references an element that is missing or
    /// inconsistent with its face boundary.
    #[error("loop `{lp}` of face `{face}` is inconsistent: {reason}")]
    CorruptLoop {
        lp: LoopId,
        face: FaceId,
        reason: &'static str,
    },
    /// Topology error: walking a face boundary did not return to the first
    /// loop within the recorded boundary length.
    #[error("face `{face}` boundary cycle does not close (recorded length {len})")]
    OpenBoundaryCycle { face: FaceId, len: usize },
    /// Topology error: loops exist that no live face boundary accounts for.
    #[error("{found} live loops but face boundaries account for {expected}")]
    OrphanLoops { found: usize, expected: usize },
    /// Topology error: vertex/edge incidence lists do not mirror each other.
    #[error("vertex `{vert}` and edge `{edge}` disagree on incidence")]
    IncidenceMismatch { vert: VertId, edge: EdgeId },
    /// An isolated vertex was found and the validator was configured to
    /// treat that as an error.
    #[error("isolated vertex `{0}` (no incident edges)")]
    IsolatedVertex(VertId),
}
