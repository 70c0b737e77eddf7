//! Material

use crate::interaction::*;
use crate::memory::*;
use crate::reflection::*;
use std::sync::Arc;

/// Material interface.
pub trait Material {
    /// Returns the BSDF describing scattering at a surface point. The BSDF
    /// and its BxDFs are allocated from the memory pool.
    ///
    /// * `arena` - The memory pool for allocations.
    /// * `si`    - The surface interaction at the intersection.
    fn compute_scattering_functions<'arena>(
        &self,
        arena: &'arena MemoryPool,
        si: &SurfaceInteraction,
    ) -> &'arena BSDF<'arena>;
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material + Send + Sync>;
