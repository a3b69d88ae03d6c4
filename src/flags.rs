//! Per-call operator flag storage.
//!
//! Editing operators mark subsets of mesh elements with transient boolean
//! flags before invoking the deletion engine. A [`FlagPool`] holds one layer
//! of per-element bits per allocated [`FlagId`]; layers are explicitly
//! allocated and released by the calling operator, never process-wide.
//!
//! Bits default to false and are keyed by element handle, so flags on
//! elements the kernel has since removed are simply stale entries — handle
//! values are never reused by a mesh, so a stale bit can never be read as a
//! flag on a different live element.
//!
//! Flaggable kinds are vertices, edges, and faces; loops are never flagged
//! (the deletion engine flags a loop's vertex and edge instead).

use std::hash::Hash;

use hashbrown::HashSet;

use crate::mesh_error::MeshPruneError;
use crate::topology::handle::{EdgeId, FaceId, VertId};

/// Identifier of one allocated flag layer in a [`FlagPool`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlagId(usize);

impl FlagId {
    /// Raw layer index, for diagnostics.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One layer of per-element flag bits.
#[derive(Clone, Debug, Default)]
pub struct FlagLayer {
    verts: HashSet<VertId>,
    edges: HashSet<EdgeId>,
    faces: HashSet<FaceId>,
}

/// Element kinds that can carry operator flags.
///
/// Implemented by [`VertId`], [`EdgeId`], and [`FaceId`]; the set picked out
/// of a layer is per kind, so flag bits of different kinds never collide
/// even when raw handle values coincide.
pub trait FlagElement: Copy + Eq + Hash {
    fn bits(layer: &FlagLayer) -> &HashSet<Self>;
    fn bits_mut(layer: &mut FlagLayer) -> &mut HashSet<Self>;
}

impl FlagElement for VertId {
    #[inline]
    fn bits(layer: &FlagLayer) -> &HashSet<Self> {
        &layer.verts
    }
    #[inline]
    fn bits_mut(layer: &mut FlagLayer) -> &mut HashSet<Self> {
        &mut layer.verts
    }
}

impl FlagElement for EdgeId {
    #[inline]
    fn bits(layer: &FlagLayer) -> &HashSet<Self> {
        &layer.edges
    }
    #[inline]
    fn bits_mut(layer: &mut FlagLayer) -> &mut HashSet<Self> {
        &mut layer.edges
    }
}

impl FlagElement for FaceId {
    #[inline]
    fn bits(layer: &FlagLayer) -> &HashSet<Self> {
        &layer.faces
    }
    #[inline]
    fn bits_mut(layer: &mut FlagLayer) -> &mut HashSet<Self> {
        &mut layer.faces
    }
}

/// Pool of transient flag layers, scoped to one operator run.
///
/// Released layer slots are recycled for later allocations, but a released
/// [`FlagId`] itself becomes invalid: operations on it fail with
/// [`MeshPruneError::UnknownFlag`] until the slot is handed out again.
#[derive(Clone, Debug, Default)]
pub struct FlagPool {
    layers: Vec<Option<FlagLayer>>,
    free: Vec<usize>,
}

impl FlagPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh flag layer with all bits false.
    pub fn alloc(&mut self) -> FlagId {
        if let Some(slot) = self.free.pop() {
            self.layers[slot] = Some(FlagLayer::default());
            FlagId(slot)
        } else {
            self.layers.push(Some(FlagLayer::default()));
            FlagId(self.layers.len() - 1)
        }
    }

    /// Releases a flag layer, dropping all its bits.
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownFlag`] if `flag` is not currently allocated.
    pub fn release(&mut self, flag: FlagId) -> Result<(), MeshPruneError> {
        match self.layers.get_mut(flag.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                self.free.push(flag.0);
                Ok(())
            }
            _ => Err(MeshPruneError::UnknownFlag(flag.0)),
        }
    }

    /// True if `flag` addresses a currently allocated layer.
    pub fn contains(&self, flag: FlagId) -> bool {
        matches!(self.layers.get(flag.0), Some(Some(_)))
    }

    fn layer(&self, flag: FlagId) -> Result<&FlagLayer, MeshPruneError> {
        self.layers
            .get(flag.0)
            .and_then(Option::as_ref)
            .ok_or(MeshPruneError::UnknownFlag(flag.0))
    }

    fn layer_mut(&mut self, flag: FlagId) -> Result<&mut FlagLayer, MeshPruneError> {
        self.layers
            .get_mut(flag.0)
            .and_then(Option::as_mut)
            .ok_or(MeshPruneError::UnknownFlag(flag.0))
    }

    /// Tests the flag bit of one element.
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownFlag`] if `flag` is not allocated.
    pub fn test<E: FlagElement>(&self, flag: FlagId, elem: E) -> Result<bool, MeshPruneError> {
        Ok(E::bits(self.layer(flag)?).contains(&elem))
    }

    /// Sets the flag bit of one element.
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownFlag`] if `flag` is not allocated.
    pub fn enable<E: FlagElement>(&mut self, flag: FlagId, elem: E) -> Result<(), MeshPruneError> {
        E::bits_mut(self.layer_mut(flag)?).insert(elem);
        Ok(())
    }

    /// Clears the flag bit of one element.
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownFlag`] if `flag` is not allocated.
    pub fn disable<E: FlagElement>(&mut self, flag: FlagId, elem: E) -> Result<(), MeshPruneError> {
        E::bits_mut(self.layer_mut(flag)?).remove(&elem);
        Ok(())
    }

    /// Number of set bits of one kind in a layer, mainly for diagnostics.
    ///
    /// # Errors
    /// [`MeshPruneError::UnknownFlag`] if `flag` is not allocated.
    pub fn count<E: FlagElement>(&self, flag: FlagId) -> Result<usize, MeshPruneError> {
        Ok(E::bits(self.layer(flag)?).len())
    }
}
