//! Lambertian Reflection

use super::*;
use crate::memory::*;

/// BRDF for the Lambertian model for perfect diffuse surfaces that scatters
/// incident illumination equally in all directions.
pub struct LambertianReflection {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Allocate a new instance of `LambertianReflection`.
    ///
    /// * `arena` - The memory pool for allocations.
    /// * `r`     - Reflectance spectrum which gives the fraction of incident
    ///             light that is scattered.
    pub fn alloc(arena: &MemoryPool, r: Spectrum) -> &BxDF<'_> {
        let model = arena.alloc(Self { r });
        arena.alloc(BxDF::LambertianReflection(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `_wo` - Outgoing direction.
    /// * `_wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        self.r * INV_PI
    }
}
