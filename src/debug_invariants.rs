use crate::mesh_error::MeshPruneError;
use crate::topology::mesh::PolyMesh;
use crate::topology::validation::{TopologyValidationOptions, validate_mesh_topology};

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshPruneError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

impl DebugInvariants for PolyMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "PolyMesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshPruneError> {
        validate_mesh_topology(self, TopologyValidationOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_mesh_passes() {
        let mut mesh = PolyMesh::new();
        let vs: Vec<_> = (0..3).map(|_| mesh.add_vert()).collect();
        mesh.add_face(&vs).unwrap();
        mesh.validate_invariants().unwrap();
        mesh.debug_assert_invariants();
    }
}
