//! Strong, zero-cost handles for mesh elements.
//!
//! Every element of a [`PolyMesh`](crate::topology::mesh::PolyMesh) — vertex,
//! edge, face, or boundary loop — is addressed by an opaque handle wrapping a
//! nonzero `u32`. Zero is reserved as an invalid/sentinel value, enforced at
//! construction time.
//!
//! Handles of different kinds are distinct types, so an `EdgeId` can never be
//! passed where a `FaceId` is expected. Within one mesh, handle values are
//! minted from a monotonically increasing counter per kind and are never
//! reused, which means a stale handle can never alias a different live
//! element.
//!
//! This module provides:
//! - A transparent newtype per element kind around `NonZeroU32` for zero-cost
//!   memory layout guarantees.
//! - Fallible constructors rejecting the reserved zero value.
//! - Implementations of common traits (`Debug`, `Display`, ordering,
//!   hashing, serde) so handles can be used in maps, sets, and printed
//!   easily.

use std::{fmt, num::NonZeroU32};

use crate::mesh_error::MeshPruneError;

macro_rules! element_handle {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Creates a handle from a raw `u32` value.
            ///
            /// # Errors
            /// Returns [`MeshPruneError::InvalidHandle`] if `raw == 0`; zero
            /// is reserved as the invalid/sentinel value.
            #[inline]
            pub fn new(raw: u32) -> Result<Self, MeshPruneError> {
                NonZeroU32::new(raw)
                    .map(Self)
                    .ok_or(MeshPruneError::InvalidHandle)
            }

            /// Returns the inner `u32` value of this handle.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0.get()
            }

            #[inline]
            pub(crate) const fn from_nonzero(raw: NonZeroU32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.get())
            }
        }
    };
}

element_handle! {
    /// Handle of a mesh vertex.
    VertId
}
element_handle! {
    /// Handle of a mesh edge.
    EdgeId
}
element_handle! {
    /// Handle of a mesh face.
    FaceId
}
element_handle! {
    /// Handle of a face-boundary loop.
    LoopId
}

#[cfg(test)]
mod layout_tests {
    //! Compile-time assertions that handles keep the same size as `u32`.
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    // If these fail, our repr(transparent) guarantee is broken!
    assert_eq_size!(VertId, u32);
    assert_eq_size!(EdgeId, u32);
    assert_eq_size!(FaceId, u32);
    assert_eq_size!(LoopId, u32);

    #[test]
    fn alignment_matches_u32() {
        assert_eq_align!(VertId, u32);
        assert_eq_align!(LoopId, u32);
    }

    #[test]
    fn option_is_free() {
        // NonZeroU32 niche: Option<handle> costs nothing extra.
        assert_eq_size!(Option<EdgeId>, u32);
    }
}
