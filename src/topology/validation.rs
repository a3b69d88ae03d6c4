//! Topology validation helpers.
//!
//! Checks that the mutual adjacency references of a [`PolyMesh`] are
//! consistent: edge endpoints exist, loop records agree with their face's
//! boundary cycle and their edge's radial list, and vertex/edge incidence
//! lists mirror each other. The deletion engine runs these checks after
//! every call in debug builds (see [`crate::debug_invariants`]).

use itertools::Itertools;

use crate::mesh_error::MeshPruneError;
use crate::topology::handle::VertId;
use crate::topology::mesh::PolyMesh;

/// Optional validation toggles for mesh topology checks.
#[derive(Debug, Clone, Copy)]
pub struct TopologyValidationOptions {
    /// Check loop records against their face, edge, and corner vertex.
    pub check_loops: bool,
    /// Check that every face boundary cycle closes at its recorded length.
    pub check_cycle_closure: bool,
    /// Check that vertex and edge incidence lists mirror each other.
    pub check_incidence_mirrors: bool,
    /// How to handle vertices with no incident edges.
    pub isolated_verts: IsolatedVertexHandling,
}

impl TopologyValidationOptions {
    /// Enable all checks; isolated vertices are reported as errors.
    pub fn all() -> Self {
        Self {
            check_loops: true,
            check_cycle_closure: true,
            check_incidence_mirrors: true,
            isolated_verts: IsolatedVertexHandling::Error,
        }
    }
}

impl Default for TopologyValidationOptions {
    /// All structural checks on; isolated vertices are valid topology in
    /// wire meshes and ignored.
    fn default() -> Self {
        Self {
            check_loops: true,
            check_cycle_closure: true,
            check_incidence_mirrors: true,
            isolated_verts: IsolatedVertexHandling::Ignore,
        }
    }
}

/// Behavior for isolated-vertex detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolatedVertexHandling {
    /// Isolated vertices are valid; skip the check.
    Ignore,
    /// Log a warning per isolated vertex.
    Warn,
    /// Return an error on the first isolated vertex.
    Error,
}

/// Validate the structural invariants of a mesh.
///
/// Returns the first violation found. A violation after a kernel kill call
/// indicates a kernel-contract bug, not a recoverable condition.
pub fn validate_mesh_topology(
    mesh: &PolyMesh,
    options: TopologyValidationOptions,
) -> Result<(), MeshPruneError> {
    for e in mesh.edges() {
        let verts = mesh.edge_verts(e)?;
        for v in verts {
            if !mesh.contains_vert(v) {
                return Err(MeshPruneError::DanglingEndpoint { edge: e, vert: v });
            }
            if options.check_incidence_mirrors && !mesh.vert_edges(v)?.contains(&e) {
                return Err(MeshPruneError::IncidenceMismatch { vert: v, edge: e });
            }
        }
    }

    if options.check_incidence_mirrors {
        for v in mesh.verts() {
            for &e in mesh.vert_edges(v)? {
                if !mesh.contains_edge(e) || !mesh.edge_verts(e)?.contains(&v) {
                    return Err(MeshPruneError::IncidenceMismatch { vert: v, edge: e });
                }
            }
        }
    }

    for f in mesh.faces() {
        // face_loops itself reports an open cycle or a dead loop handle.
        let boundary = mesh.face_loops(f)?;
        if options.check_cycle_closure && boundary.iter().duplicates().next().is_some() {
            return Err(MeshPruneError::OpenBoundaryCycle {
                face: f,
                len: mesh.face_len(f)?,
            });
        }
        if !options.check_loops {
            continue;
        }
        for (i, &l) in boundary.iter().enumerate() {
            let rec = mesh.lp(l)?;
            if rec.face() != f {
                return Err(MeshPruneError::CorruptLoop {
                    lp: l,
                    face: f,
                    reason: "loop does not point back to its face",
                });
            }
            if !mesh.contains_vert(rec.vert()) || !mesh.contains_edge(rec.edge()) {
                return Err(MeshPruneError::CorruptLoop {
                    lp: l,
                    face: f,
                    reason: "loop references a removed vertex or edge",
                });
            }
            let ev = mesh.edge_verts(rec.edge())?;
            let next_vert = mesh.lp(boundary[(i + 1) % boundary.len()])?.vert();
            if !ev.contains(&rec.vert()) || !ev.contains(&next_vert) {
                return Err(MeshPruneError::CorruptLoop {
                    lp: l,
                    face: f,
                    reason: "loop edge does not connect consecutive corners",
                });
            }
            if !mesh.edge_faces(rec.edge())?.contains(&f) {
                return Err(MeshPruneError::CorruptLoop {
                    lp: l,
                    face: f,
                    reason: "edge radial list misses this face",
                });
            }
        }
    }

    if options.check_loops {
        let expected: usize = mesh
            .faces()
            .into_iter()
            .map(|f| mesh.face_len(f))
            .fold_ok(0, |acc, len| acc + len)?;
        if mesh.loop_count() != expected {
            return Err(MeshPruneError::OrphanLoops {
                found: mesh.loop_count(),
                expected,
            });
        }
    }

    match options.isolated_verts {
        IsolatedVertexHandling::Ignore => {}
        IsolatedVertexHandling::Warn => {
            for v in mesh.verts() {
                if mesh.is_isolated_vert(v)? {
                    log::warn!("isolated vertex {v} (no incident edges)");
                }
            }
        }
        IsolatedVertexHandling::Error => {
            if let Some(v) = isolated_verts(mesh)?.first() {
                return Err(MeshPruneError::IsolatedVertex(*v));
            }
        }
    }

    Ok(())
}

/// All isolated vertices of a mesh, sorted.
pub fn isolated_verts(mesh: &PolyMesh) -> Result<Vec<VertId>, MeshPruneError> {
    mesh.verts()
        .into_iter()
        .filter_map(|v| match mesh.is_isolated_vert(v) {
            Ok(true) => Some(Ok(v)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_meshes_validate() {
        let mut mesh = PolyMesh::new();
        let vs: Vec<_> = (0..4).map(|_| mesh.add_vert()).collect();
        mesh.add_face(&vs).unwrap();
        validate_mesh_topology(&mesh, TopologyValidationOptions::default()).unwrap();
        validate_mesh_topology(&mesh, TopologyValidationOptions::all()).unwrap();
    }

    #[test]
    fn isolated_vertex_handling_levels() {
        let mut mesh = PolyMesh::new();
        let v = mesh.add_vert();

        validate_mesh_topology(&mesh, TopologyValidationOptions::default()).unwrap();
        let strict = TopologyValidationOptions::all();
        assert_eq!(
            validate_mesh_topology(&mesh, strict),
            Err(MeshPruneError::IsolatedVertex(v))
        );
    }

    #[test]
    fn mesh_validates_after_each_kill() {
        let mut mesh = PolyMesh::new();
        let vs: Vec<_> = (0..4).map(|_| mesh.add_vert()).collect();
        let f1 = mesh.add_face(&[vs[0], vs[1], vs[2]]).unwrap();
        mesh.add_face(&[vs[0], vs[2], vs[3]]).unwrap();

        mesh.kill_face(f1).unwrap();
        validate_mesh_topology(&mesh, TopologyValidationOptions::default()).unwrap();

        let shared = mesh.edge_between(vs[0], vs[2]).unwrap();
        mesh.kill_edge(shared).unwrap();
        validate_mesh_topology(&mesh, TopologyValidationOptions::default()).unwrap();

        mesh.kill_vert(vs[0]).unwrap();
        validate_mesh_topology(&mesh, TopologyValidationOptions::default()).unwrap();
    }

    #[test]
    fn isolated_verts_lists_them_sorted() {
        let mut mesh = PolyMesh::new();
        let a = mesh.add_vert();
        let b = mesh.add_vert();
        let c = mesh.add_vert();
        mesh.add_edge(a, b).unwrap();
        assert_eq!(isolated_verts(&mesh).unwrap(), vec![c]);
    }
}
