//! Cascading deletion of flagged elements.
//!
//! Editing operators flag a subset of elements in a [`FlagPool`] layer and
//! call [`remove_tagged`] with a [`DeleteContext`]. The engine propagates the
//! flag according to the selected policy, then sweeps the mesh and invokes
//! the kernel kill primitives on the closure of elements that must go, in
//! dependency order: faces before edges, edges before vertices.
//!
//! The engine never touches adjacency links itself; it only iterates, tests
//! and sets flag bits, and calls
//! [`kill_face`](crate::topology::mesh::PolyMesh::kill_face) /
//! [`kill_edge`](crate::topology::mesh::PolyMesh::kill_edge) /
//! [`kill_vert`](crate::topology::mesh::PolyMesh::kill_vert).

use crate::debug_invariants::DebugInvariants;
use crate::flags::{FlagId, FlagPool};
use crate::mesh_error::MeshPruneError;
use crate::topology::mesh::PolyMesh;

/// Deletion-context policy selecting which closure of elements is removed
/// relative to the flagged set.
///
/// The set is closed and dispatch is exhaustive, so there is no "unknown
/// mode" to fall through silently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeleteContext {
    /// Remove every flagged vertex; the kernel cascade tears down incident
    /// edges and faces.
    Verts,
    /// Remove flagged edges, then every endpoint vertex left without any
    /// incident edge. Vertices still connected to surviving edges are kept.
    Edges,
    /// Remove flagged edges; the kernel cascade tears down dependent faces.
    /// Vertices are never touched.
    EdgesFaces,
    /// Remove flagged faces only; boundary edges and vertices are kept even
    /// if they become unused.
    OnlyFaces,
    /// Remove flagged faces, then flagged edges, then flagged vertices, with
    /// no propagation between kinds. The caller flags exactly the closure it
    /// wants gone.
    OnlyTagged,
    /// Remove flagged faces together with every edge and vertex used
    /// exclusively by them. Edges and vertices still used by a surviving
    /// face, or by a surviving wire edge, are kept.
    Faces,
}

/// Removes elements selected, directly or by propagation, from those
/// currently holding `flag`, according to `context`.
///
/// The caller must own `flag` exclusively for the duration of the call:
/// several policies reuse the same bit as both "candidate" and "confirmed"
/// state across phases, so bits set on unrelated elements beforehand will
/// corrupt the result. The `Edges` policy additionally allocates a private
/// scratch layer from `flags`, scoped to this call.
///
/// # Errors
/// [`MeshPruneError::UnknownFlag`] if `flag` is not an allocated layer of
/// `flags`; kernel errors are propagated as-is and indicate a
/// kernel-contract violation, fatal to the caller.
pub fn remove_tagged(
    mesh: &mut PolyMesh,
    flags: &mut FlagPool,
    flag: FlagId,
    context: DeleteContext,
) -> Result<(), MeshPruneError> {
    if !flags.contains(flag) {
        return Err(MeshPruneError::UnknownFlag(flag.index()));
    }

    match context {
        DeleteContext::Verts => {
            let nv = remove_tagged_verts(mesh, flags, flag)?;
            log::debug!("remove_tagged(Verts): removed {nv} verts");
        }
        DeleteContext::Edges => {
            // Flush the edge flags down to both endpoints.
            for e in mesh.edges() {
                if flags.test(flag, e)? {
                    let [v1, v2] = mesh.edge_verts(e)?;
                    flags.enable(flag, v1)?;
                    flags.enable(flag, v2)?;
                }
            }
            let ne = remove_tagged_edges(mesh, flags, flag)?;
            // Of the flushed vertices, only those left wireless go; a
            // private scratch layer keeps this from re-reading caller bits
            // on vertices that were flagged for other reasons.
            let scratch = flags.alloc();
            for v in mesh.verts() {
                if flags.test(flag, v)? && mesh.is_isolated_vert(v)? {
                    flags.enable(scratch, v)?;
                }
            }
            let nv = remove_tagged_verts(mesh, flags, scratch)?;
            flags.release(scratch)?;
            log::debug!("remove_tagged(Edges): removed {ne} edges, {nv} loose verts");
        }
        DeleteContext::EdgesFaces => {
            let ne = remove_tagged_edges(mesh, flags, flag)?;
            log::debug!("remove_tagged(EdgesFaces): removed {ne} edges");
        }
        DeleteContext::OnlyFaces => {
            let nf = remove_tagged_faces(mesh, flags, flag)?;
            log::debug!("remove_tagged(OnlyFaces): removed {nf} faces");
        }
        DeleteContext::OnlyTagged => {
            let nf = remove_tagged_faces(mesh, flags, flag)?;
            let ne = remove_tagged_edges(mesh, flags, flag)?;
            let nv = remove_tagged_verts(mesh, flags, flag)?;
            log::debug!("remove_tagged(OnlyTagged): removed {nf} faces, {ne} edges, {nv} verts");
        }
        DeleteContext::Faces => {
            // Mark all edges and all verts on the boundary of every doomed
            // face as removal candidates.
            for f in mesh.faces() {
                if flags.test(flag, f)? {
                    for l in mesh.face_loops(f)? {
                        let rec = mesh.lp(l)?;
                        flags.enable(flag, rec.vert())?;
                        flags.enable(flag, rec.edge())?;
                    }
                }
            }
            // Rescue everything still on the boundary of a surviving face.
            // Must run after all candidates are marked: a vertex or edge may
            // be touched by both a doomed and a surviving face.
            for f in mesh.faces() {
                if !flags.test(flag, f)? {
                    for l in mesh.face_loops(f)? {
                        let rec = mesh.lp(l)?;
                        flags.disable(flag, rec.vert())?;
                        flags.disable(flag, rec.edge())?;
                    }
                }
            }
            // Rescue the endpoints of every surviving edge, wire edges
            // included; the face pass above only sees edges with a face.
            for e in mesh.edges() {
                if !flags.test(flag, e)? {
                    let [v1, v2] = mesh.edge_verts(e)?;
                    flags.disable(flag, v1)?;
                    flags.disable(flag, v2)?;
                }
            }
            // Ordered sweep: dependents before dependencies.
            let nf = remove_tagged_faces(mesh, flags, flag)?;
            let ne = remove_tagged_edges(mesh, flags, flag)?;
            let nv = remove_tagged_verts(mesh, flags, flag)?;
            log::debug!("remove_tagged(Faces): removed {nf} faces, {ne} edges, {nv} verts");
        }
    }

    mesh.debug_assert_invariants();
    Ok(())
}

// The sweeps iterate a snapshot of live handles and re-test liveness before
// the flag, so elements a kill cascaded away earlier in the same sweep are
// skipped rather than revisited.

fn remove_tagged_faces(
    mesh: &mut PolyMesh,
    flags: &FlagPool,
    flag: FlagId,
) -> Result<usize, MeshPruneError> {
    let mut removed = 0;
    for f in mesh.faces() {
        if mesh.contains_face(f) && flags.test(flag, f)? {
            mesh.kill_face(f)?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn remove_tagged_edges(
    mesh: &mut PolyMesh,
    flags: &FlagPool,
    flag: FlagId,
) -> Result<usize, MeshPruneError> {
    let mut removed = 0;
    for e in mesh.edges() {
        if mesh.contains_edge(e) && flags.test(flag, e)? {
            mesh.kill_edge(e)?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn remove_tagged_verts(
    mesh: &mut PolyMesh,
    flags: &FlagPool,
    flag: FlagId,
) -> Result<usize, MeshPruneError> {
    let mut removed = 0;
    for v in mesh.verts() {
        if mesh.contains_vert(v) && flags.test(flag, v)? {
            mesh.kill_vert(v)?;
            removed += 1;
        }
    }
    Ok(removed)
}
