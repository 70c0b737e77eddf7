//! Matte Material

use lumen_core::interaction::*;
use lumen_core::material::*;
use lumen_core::memory::*;
use lumen_core::pbrt::*;
use lumen_core::reflection::*;
use lumen_core::spectrum::*;

/// Largest roughness (in degrees) accepted by the Oren-Nayar model.
const MAX_SIGMA: Float = 90.0;

/// Implements purely diffuse surfaces.
pub struct MatteMaterial {
    /// Spectral diffuse reflection.
    kd: Spectrum,

    /// Roughness as the standard deviation of microfacet angles in degrees.
    sigma: Float,
}

impl MatteMaterial {
    /// Create a new `MatteMaterial`.
    ///
    /// * `kd`    - Spectral diffuse reflection.
    /// * `sigma` - Roughness in degrees. 0 selects a Lambertian surface.
    pub fn new(kd: Spectrum, sigma: Float) -> Self {
        let clamped = clamp(sigma, 0.0, MAX_SIGMA);
        if clamped != sigma {
            warn!("Matte roughness {} clamped to {}", sigma, clamped);
        }
        Self {
            kd: kd.clamp(0.0, INFINITY),
            sigma: clamped,
        }
    }
}

impl Material for MatteMaterial {
    /// Returns the BSDF describing scattering at a surface point.
    ///
    /// * `arena` - The memory pool for allocations.
    /// * `si`    - The surface interaction at the intersection.
    fn compute_scattering_functions<'arena>(
        &self,
        arena: &'arena MemoryPool,
        si: &SurfaceInteraction,
    ) -> &'arena BSDF<'arena> {
        let bsdf = BSDF::alloc(arena, si, None);
        if !self.kd.is_black() {
            if self.sigma == 0.0 {
                bsdf.add(LambertianReflection::alloc(arena, self.kd));
            } else {
                bsdf.add(OrenNayar::alloc(arena, self.kd, self.sigma));
            }
        }
        bsdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use lumen_core::geometry::*;

    fn surface() -> SurfaceInteraction<'static> {
        SurfaceInteraction::new(
            Point3f::ZERO,
            Point2f::new(0.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
            0.0,
        )
    }

    #[test]
    fn lambertian_matte_evaluates_albedo_over_pi() {
        let arena = MemoryPool::new();
        let si = surface();
        let matte = MatteMaterial::new(Spectrum::new(0.5), 0.0);
        let bsdf = matte.compute_scattering_functions(&arena, &si);

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let f = bsdf.f(&wo, &wi, BxDFType::BSDF_ALL);
        assert!(approx_eq!(f32, f[0], 0.5 * INV_PI, epsilon = 1e-6));
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 1);
    }

    #[test]
    fn rough_matte_stays_below_albedo() {
        let arena = MemoryPool::new();
        let si = surface();
        let matte = MatteMaterial::new(Spectrum::new(0.8), 20.0);
        let bsdf = matte.compute_scattering_functions(&arena, &si);

        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wi = Vector3f::new(0.0, -0.6, 0.8);
        let f = bsdf.f(&wo, &wi, BxDFType::BSDF_ALL);
        assert!(f[0] > 0.0);
        assert!(f[0] < 0.8 * INV_PI);
    }

    #[test]
    fn black_matte_has_no_lobes() {
        let arena = MemoryPool::new();
        let si = surface();
        let matte = MatteMaterial::new(Spectrum::ZERO, 0.0);
        let bsdf = matte.compute_scattering_functions(&arena, &si);
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 0);
    }

    #[test]
    fn roughness_is_clamped() {
        let matte = MatteMaterial::new(Spectrum::new(0.5), 120.0);
        assert!(approx_eq!(f32, matte.sigma, MAX_SIGMA, epsilon = 1e-6));
    }
}
