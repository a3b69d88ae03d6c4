//! In-memory boundary-representation mesh kernel.
//!
//! This module provides [`PolyMesh`], an arena of vertices, edges, faces and
//! face-boundary loops keyed by the strong handles of
//! [`handle`](crate::topology::handle). Adjacency is stored as handles rather
//! than owning references, so the cyclic vertex–edge–loop–face structure
//! never forms an ownership cycle.
//!
//! The kernel owns element creation and the three kill primitives. Each kill
//! primitive tears down dependent structures before the element itself
//! (loops before their face, faces before an edge of their boundary, edges
//! before an endpoint vertex), so invariants hold after every single call:
//! no surviving element references a removed one.
//!
//! Handle values are never reused by a mesh; see
//! [`handle`](crate::topology::handle) for why this matters to callers that
//! keep element sets across removals.

use std::num::NonZeroU32;

use hashbrown::HashMap;
use itertools::Itertools;

use crate::mesh_error::MeshPruneError;
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertId};

/// Vertex record: incident edges, in no particular order.
///
/// The first entry, when present, is the representative edge; an empty list
/// means the vertex is isolated (wire-isolated).
#[derive(Clone, Debug, Default)]
pub struct Vertex {
    pub(crate) edges: Vec<EdgeId>,
}

/// Edge record: two endpoint vertices plus the radial list of loops whose
/// face boundary runs through this edge. An empty radial list makes this a
/// wire edge.
#[derive(Clone, Debug)]
pub struct Edge {
    pub(crate) verts: [VertId; 2],
    pub(crate) loops: Vec<LoopId>,
}

/// Face record: entry loop of the cyclic boundary and the boundary length.
#[derive(Clone, Debug)]
pub struct Face {
    pub(crate) first: LoopId,
    pub(crate) len: usize,
}

/// Face-boundary loop: one corner of a face, referencing the corner vertex,
/// the edge leading to the next corner, the owning face, and the cycle links.
#[derive(Clone, Debug)]
pub struct Loop {
    pub(crate) vert: VertId,
    pub(crate) edge: EdgeId,
    pub(crate) face: FaceId,
    pub(crate) next: LoopId,
    pub(crate) prev: LoopId,
}

impl Loop {
    /// Corner vertex of this loop.
    #[inline]
    pub fn vert(&self) -> VertId {
        self.vert
    }
    /// Edge from this corner to the next one along the boundary.
    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }
    /// Face owning this loop.
    #[inline]
    pub fn face(&self) -> FaceId {
        self.face
    }
    /// Next loop along the face boundary cycle.
    #[inline]
    pub fn next(&self) -> LoopId {
        self.next
    }
    /// Previous loop along the face boundary cycle.
    #[inline]
    pub fn prev(&self) -> LoopId {
        self.prev
    }
}

/// An in-memory boundary-representation polygon mesh.
///
/// Elements live in per-kind hash maps keyed by handle; handles are minted
/// from monotonically increasing counters and never reused.
#[derive(Clone, Debug)]
pub struct PolyMesh {
    verts: HashMap<VertId, Vertex>,
    edges: HashMap<EdgeId, Edge>,
    faces: HashMap<FaceId, Face>,
    loops: HashMap<LoopId, Loop>,
    next_vert: NonZeroU32,
    next_edge: NonZeroU32,
    next_face: NonZeroU32,
    next_loop: NonZeroU32,
}

impl Default for PolyMesh {
    fn default() -> Self {
        Self {
            verts: HashMap::new(),
            edges: HashMap::new(),
            faces: HashMap::new(),
            loops: HashMap::new(),
            next_vert: NonZeroU32::MIN,
            next_edge: NonZeroU32::MIN,
            next_face: NonZeroU32::MIN,
            next_loop: NonZeroU32::MIN,
        }
    }
}

fn mint(counter: &mut NonZeroU32) -> NonZeroU32 {
    let id = *counter;
    *counter = counter
        .checked_add(1)
        .expect("element id space exhausted (u32)");
    id
}

impl PolyMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- construction ------------------------------------------------------

    /// Adds an isolated vertex.
    pub fn add_vert(&mut self) -> VertId {
        let v = VertId::from_nonzero(mint(&mut self.next_vert));
        self.verts.insert(v, Vertex::default());
        v
    }

    /// Adds an edge between two existing, distinct vertices.
    ///
    /// If an edge between the pair already exists it is returned instead of
    /// creating a parallel edge.
    ///
    /// # Errors
    /// [`MeshPruneError::DegenerateEdge`] if `v1 == v2`,
    /// [`MeshPruneError::UnknownVert`] if either endpoint is not live.
    pub fn add_edge(&mut self, v1: VertId, v2: VertId) -> Result<EdgeId, MeshPruneError> {
        if v1 == v2 {
            return Err(MeshPruneError::DegenerateEdge(v1));
        }
        for v in [v1, v2] {
            if !self.verts.contains_key(&v) {
                return Err(MeshPruneError::UnknownVert(v));
            }
        }
        if let Some(e) = self.edge_between(v1, v2) {
            return Ok(e);
        }
        let e = EdgeId::from_nonzero(mint(&mut self.next_edge));
        self.edges.insert(
            e,
            Edge {
                verts: [v1, v2],
                loops: Vec::new(),
            },
        );
        for v in [v1, v2] {
            if let Some(rec) = self.verts.get_mut(&v) {
                rec.edges.push(e);
            }
        }
        Ok(e)
    }

    /// Adds a face over the given boundary vertices, creating any missing
    /// boundary edges. Loops are created in boundary order and linked into
    /// the cyclic `next`/`prev` chain.
    ///
    /// # Errors
    /// [`MeshPruneError::FaceTooSmall`] for fewer than 3 vertices,
    /// [`MeshPruneError::DuplicateBoundaryVert`] on a repeated vertex,
    /// [`MeshPruneError::UnknownVert`] if any vertex is not live.
    pub fn add_face(&mut self, boundary: &[VertId]) -> Result<FaceId, MeshPruneError> {
        if boundary.len() < 3 {
            return Err(MeshPruneError::FaceTooSmall(boundary.len()));
        }
        if let Some(dup) = boundary.iter().duplicates().next() {
            return Err(MeshPruneError::DuplicateBoundaryVert(*dup));
        }
        for &v in boundary {
            if !self.verts.contains_key(&v) {
                return Err(MeshPruneError::UnknownVert(v));
            }
        }

        let len = boundary.len();
        let mut boundary_edges = Vec::with_capacity(len);
        for i in 0..len {
            let e = self.add_edge(boundary[i], boundary[(i + 1) % len])?;
            boundary_edges.push(e);
        }

        let f = FaceId::from_nonzero(mint(&mut self.next_face));
        let lids: Vec<LoopId> = (0..len)
            .map(|_| LoopId::from_nonzero(mint(&mut self.next_loop)))
            .collect();
        for i in 0..len {
            let l = Loop {
                vert: boundary[i],
                edge: boundary_edges[i],
                face: f,
                next: lids[(i + 1) % len],
                prev: lids[(i + len - 1) % len],
            };
            self.loops.insert(lids[i], l);
            if let Some(rec) = self.edges.get_mut(&boundary_edges[i]) {
                rec.loops.push(lids[i]);
            }
        }
        self.faces.insert(
            f,
            Face {
                first: lids[0],
                len,
            },
        );
        Ok(f)
    }

    // ---- liveness and counts -----------------------------------------------

    /// True if `v` is a live vertex of this mesh.
    #[inline]
    pub fn contains_vert(&self, v: VertId) -> bool {
        self.verts.contains_key(&v)
    }
    /// True if `e` is a live edge of this mesh.
    #[inline]
    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.edges.contains_key(&e)
    }
    /// True if `f` is a live face of this mesh.
    #[inline]
    pub fn contains_face(&self, f: FaceId) -> bool {
        self.faces.contains_key(&f)
    }
    /// True if `l` is a live loop of this mesh.
    #[inline]
    pub fn contains_loop(&self, l: LoopId) -> bool {
        self.loops.contains_key(&l)
    }

    /// Number of live vertices.
    pub fn vert_count(&self) -> usize {
        self.verts.len()
    }
    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    /// Number of live faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
    /// Number of live loops.
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    // ---- iteration ---------------------------------------------------------
    //
    // Snapshots are sorted for deterministic order and are safe to iterate
    // while removing: re-test liveness (`contains_*`) before touching an
    // element, since a kill earlier in the pass may have cascaded into it.

    /// Sorted snapshot of all live vertex handles.
    pub fn verts(&self) -> Vec<VertId> {
        self.verts.keys().copied().sorted_unstable().collect()
    }

    /// Sorted snapshot of all live edge handles.
    pub fn edges(&self) -> Vec<EdgeId> {
        self.edges.keys().copied().sorted_unstable().collect()
    }

    /// Sorted snapshot of all live face handles.
    pub fn faces(&self) -> Vec<FaceId> {
        self.faces.keys().copied().sorted_unstable().collect()
    }

    // ---- adjacency queries -------------------------------------------------

    fn vert(&self, v: VertId) -> Result<&Vertex, MeshPruneError> {
        self.verts.get(&v).ok_or(MeshPruneError::UnknownVert(v))
    }

    fn edge(&self, e: EdgeId) -> Result<&Edge, MeshPruneError> {
        self.edges.get(&e).ok_or(MeshPruneError::UnknownEdge(e))
    }

    fn face(&self, f: FaceId) -> Result<&Face, MeshPruneError> {
        self.faces.get(&f).ok_or(MeshPruneError::UnknownFace(f))
    }

    /// Loop record lookup.
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownLoop`] if `l` is not live.
    pub fn lp(&self, l: LoopId) -> Result<&Loop, MeshPruneError> {
        self.loops.get(&l).ok_or(MeshPruneError::UnknownLoop(l))
    }

    /// Incident edges of a vertex, in insertion order.
    pub fn vert_edges(&self, v: VertId) -> Result<&[EdgeId], MeshPruneError> {
        Ok(&self.vert(v)?.edges)
    }

    /// Representative edge of a vertex, or `None` for an isolated vertex.
    pub fn rep_edge(&self, v: VertId) -> Result<Option<EdgeId>, MeshPruneError> {
        Ok(self.vert(v)?.edges.first().copied())
    }

    /// True if the vertex has no incident edges.
    pub fn is_isolated_vert(&self, v: VertId) -> Result<bool, MeshPruneError> {
        Ok(self.vert(v)?.edges.is_empty())
    }

    /// The two endpoint vertices of an edge.
    pub fn edge_verts(&self, e: EdgeId) -> Result<[VertId; 2], MeshPruneError> {
        Ok(self.edge(e)?.verts)
    }

    /// The live edge between two vertices, if one exists.
    pub fn edge_between(&self, v1: VertId, v2: VertId) -> Option<EdgeId> {
        let rec = self.verts.get(&v1)?;
        rec.edges.iter().copied().find(|&e| {
            self.edges
                .get(&e)
                .is_some_and(|er| er.verts.contains(&v2))
        })
    }

    /// Number of faces whose boundary uses this edge.
    pub fn edge_face_count(&self, e: EdgeId) -> Result<usize, MeshPruneError> {
        Ok(self.edge(e)?.loops.len())
    }

    /// True if no face boundary uses this edge.
    pub fn is_wire_edge(&self, e: EdgeId) -> Result<bool, MeshPruneError> {
        Ok(self.edge(e)?.loops.is_empty())
    }

    /// Boundary length of a face.
    pub fn face_len(&self, f: FaceId) -> Result<usize, MeshPruneError> {
        Ok(self.face(f)?.len)
    }

    /// Loops of a face's boundary cycle, starting at the entry loop.
    pub fn face_loops(&self, f: FaceId) -> Result<Vec<LoopId>, MeshPruneError> {
        let rec = self.face(f)?;
        let mut out = Vec::with_capacity(rec.len);
        let mut l = rec.first;
        for _ in 0..rec.len {
            out.push(l);
            l = self.lp(l)?.next;
        }
        if l != rec.first {
            return Err(MeshPruneError::OpenBoundaryCycle {
                face: f,
                len: rec.len,
            });
        }
        Ok(out)
    }

    /// Boundary vertices of a face, in cycle order.
    pub fn face_verts(&self, f: FaceId) -> Result<Vec<VertId>, MeshPruneError> {
        self.face_loops(f)?
            .into_iter()
            .map(|l| Ok(self.lp(l)?.vert))
            .collect()
    }

    /// Faces whose boundary uses this edge, in radial order.
    pub fn edge_faces(&self, e: EdgeId) -> Result<Vec<FaceId>, MeshPruneError> {
        self.edge(e)?
            .loops
            .iter()
            .map(|&l| Ok(self.lp(l)?.face))
            .collect()
    }

    // ---- kill primitives ---------------------------------------------------

    /// Removes a face and its boundary loops. Boundary edges and vertices
    /// are untouched, even if this leaves them wire/isolated.
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownFace`] if `f` is not live.
    pub fn kill_face(&mut self, f: FaceId) -> Result<(), MeshPruneError> {
        let boundary = self.face_loops(f)?;
        for l in boundary {
            if let Some(rec) = self.loops.remove(&l) {
                if let Some(er) = self.edges.get_mut(&rec.edge) {
                    er.loops.retain(|&rl| rl != l);
                }
            }
        }
        self.faces.remove(&f);
        Ok(())
    }

    /// Removes an edge, first cascading into every face whose boundary uses
    /// it. Endpoint vertices are untouched, even if this leaves them
    /// isolated.
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownEdge`] if `e` is not live.
    pub fn kill_edge(&mut self, e: EdgeId) -> Result<(), MeshPruneError> {
        if !self.edges.contains_key(&e) {
            return Err(MeshPruneError::UnknownEdge(e));
        }
        // Radial cascade: killing a face drains its loops from our list.
        while let Some(l) = self
            .edges
            .get(&e)
            .and_then(|rec| rec.loops.first().copied())
        {
            let f = self.lp(l)?.face;
            self.kill_face(f)?;
        }
        if let Some(rec) = self.edges.remove(&e) {
            for v in rec.verts {
                if let Some(vr) = self.verts.get_mut(&v) {
                    vr.edges.retain(|&ve| ve != e);
                }
            }
        }
        Ok(())
    }

    /// Removes a vertex, first cascading into every incident edge (and,
    /// through them, every face using those edges).
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownVert`] if `v` is not live.
    pub fn kill_vert(&mut self, v: VertId) -> Result<(), MeshPruneError> {
        if !self.verts.contains_key(&v) {
            return Err(MeshPruneError::UnknownVert(v));
        }
        while let Some(e) = self
            .verts
            .get(&v)
            .and_then(|rec| rec.edges.first().copied())
        {
            self.kill_edge(e)?;
        }
        self.verts.remove(&v);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(mesh: &mut PolyMesh) -> (Vec<VertId>, FaceId) {
        let vs: Vec<_> = (0..3).map(|_| mesh.add_vert()).collect();
        let f = mesh.add_face(&vs).unwrap();
        (vs, f)
    }

    #[test]
    fn face_creation_builds_cycle_and_radial() {
        let mut mesh = PolyMesh::new();
        let (vs, f) = triangle(&mut mesh);
        assert_eq!(mesh.face_len(f).unwrap(), 3);
        assert_eq!(mesh.loop_count(), 3);
        assert_eq!(mesh.edge_count(), 3);

        let loops = mesh.face_loops(f).unwrap();
        assert_eq!(loops.len(), 3);
        assert_eq!(mesh.face_verts(f).unwrap(), vs);
        // Cycle closes both ways.
        let first = loops[0];
        assert_eq!(mesh.lp(mesh.lp(first).unwrap().prev).unwrap().next, first);

        for i in 0..3 {
            let e = mesh.edge_between(vs[i], vs[(i + 1) % 3]).unwrap();
            assert_eq!(mesh.edge_face_count(e).unwrap(), 1);
        }
    }

    #[test]
    fn add_edge_rejects_degenerate_and_unknown() {
        let mut mesh = PolyMesh::new();
        let a = mesh.add_vert();
        let b = mesh.add_vert();
        assert_eq!(
            mesh.add_edge(a, a),
            Err(MeshPruneError::DegenerateEdge(a))
        );
        mesh.kill_vert(b).unwrap();
        assert_eq!(
            mesh.add_edge(a, b),
            Err(MeshPruneError::UnknownVert(b))
        );
    }

    #[test]
    fn add_edge_reuses_existing() {
        let mut mesh = PolyMesh::new();
        let a = mesh.add_vert();
        let b = mesh.add_vert();
        let e1 = mesh.add_edge(a, b).unwrap();
        let e2 = mesh.add_edge(b, a).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(mesh.edge_count(), 1);
        assert_eq!(mesh.rep_edge(a).unwrap(), Some(e1));
    }

    #[test]
    fn add_face_validates_boundary() {
        let mut mesh = PolyMesh::new();
        let a = mesh.add_vert();
        let b = mesh.add_vert();
        assert_eq!(
            mesh.add_face(&[a, b]),
            Err(MeshPruneError::FaceTooSmall(2))
        );
        assert_eq!(
            mesh.add_face(&[a, b, a]),
            Err(MeshPruneError::DuplicateBoundaryVert(a))
        );
    }

    #[test]
    fn shared_edge_has_two_radial_faces() {
        let mut mesh = PolyMesh::new();
        let vs: Vec<_> = (0..4).map(|_| mesh.add_vert()).collect();
        let f1 = mesh.add_face(&[vs[0], vs[1], vs[2]]).unwrap();
        let f2 = mesh.add_face(&[vs[0], vs[2], vs[3]]).unwrap();
        let shared = mesh.edge_between(vs[0], vs[2]).unwrap();
        assert_eq!(mesh.edge_face_count(shared).unwrap(), 2);
        let faces = mesh.edge_faces(shared).unwrap();
        assert!(faces.contains(&f1) && faces.contains(&f2));
    }

    #[test]
    fn kill_face_keeps_edges_and_verts() {
        let mut mesh = PolyMesh::new();
        let (vs, f) = triangle(&mut mesh);
        mesh.kill_face(f).unwrap();
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.loop_count(), 0);
        assert_eq!(mesh.edge_count(), 3);
        for v in vs {
            assert!(mesh.contains_vert(v));
        }
    }

    #[test]
    fn kill_edge_cascades_into_faces() {
        let mut mesh = PolyMesh::new();
        let (vs, f) = triangle(&mut mesh);
        let e = mesh.edge_between(vs[0], vs[1]).unwrap();
        mesh.kill_edge(e).unwrap();
        assert!(!mesh.contains_face(f));
        assert!(!mesh.contains_edge(e));
        // The other two edges survive as wire.
        assert_eq!(mesh.edge_count(), 2);
        for e in mesh.edges() {
            assert!(mesh.is_wire_edge(e).unwrap());
        }
    }

    #[test]
    fn kill_vert_cascades_into_edges_and_faces() {
        let mut mesh = PolyMesh::new();
        let (vs, f) = triangle(&mut mesh);
        mesh.kill_vert(vs[0]).unwrap();
        assert!(!mesh.contains_face(f));
        assert_eq!(mesh.vert_count(), 2);
        // Only the edge opposite the killed vertex survives.
        assert_eq!(mesh.edge_count(), 1);
        let e = mesh.edges()[0];
        assert_eq!(
            {
                let mut got = mesh.edge_verts(e).unwrap();
                got.sort_unstable();
                got
            },
            {
                let mut want = [vs[1], vs[2]];
                want.sort_unstable();
                want
            }
        );
    }

    #[test]
    fn handles_are_not_reused() {
        let mut mesh = PolyMesh::new();
        let a = mesh.add_vert();
        mesh.kill_vert(a).unwrap();
        let b = mesh.add_vert();
        assert_ne!(a, b);
        assert!(!mesh.contains_vert(a));
    }

    #[test]
    fn snapshots_are_sorted() {
        let mut mesh = PolyMesh::new();
        for _ in 0..8 {
            mesh.add_vert();
        }
        let vs = mesh.verts();
        assert!(vs.windows(2).all(|w| w[0] < w[1]));
    }
}
