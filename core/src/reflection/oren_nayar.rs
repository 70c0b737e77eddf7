//! Oren-Nayar Microfacet Model

use super::*;
use crate::memory::*;

/// BRDF for the Oren-Nayar model for modeling rough surfaces using a microfacet
/// model.
pub struct OrenNayar {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,

    /// Precomputed parameter `A` where:
    ///               σ^2
    /// A = 1 - ---------------
    ///          2(σ^2 + 0.33)
    a: Float,

    /// Precomputed parameter `B` where:
    ///      0.45 * σ^2
    /// B = ------------
    ///      σ^2 + 0.09
    b: Float,
}

impl OrenNayar {
    /// Allocate a new instance of `OrenNayar`.
    ///
    /// * `arena` - The memory pool for allocations.
    /// * `r`     - Reflectance spectrum which gives the fraction of incident
    ///             light that is scattered.
    /// * `sigma` - The Gaussian distribution parameter, the standard deviation
    ///             of the microfacet orientation angle (in degrees).
    pub fn alloc(arena: &MemoryPool, r: Spectrum, sigma: Float) -> &BxDF<'_> {
        let sigma = sigma.to_radians();
        let sigma2 = sigma * sigma;
        let model = arena.alloc(Self {
            r,
            a: 1.0 - (sigma2 / (2.0 * (sigma2 + 0.33))),
            b: 0.45 * sigma2 / (sigma2 + 0.09),
        });
        arena.alloc(BxDF::OrenNayar(model))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        let sin_theta_i = sin_theta(wi);
        let sin_theta_o = sin_theta(wo);

        // Compute cosine term of Oren-Nayar model.
        let max_cos = if (sin_theta_i > 1e-4) && (sin_theta_o > 1e-4) {
            let d_cos = cos_phi(wi) * cos_phi(wo) + sin_phi(wi) * sin_phi(wo);
            max(0.0, d_cos)
        } else {
            0.0
        };

        // Compute sine and tangent terms of Oren-Nayar model.
        let abs_cos_theta_wo = abs_cos_theta(wo);
        let abs_cos_theta_wi = abs_cos_theta(wi);
        if abs_cos_theta_wi == 0.0 || abs_cos_theta_wo == 0.0 {
            return Spectrum::ZERO;
        }
        let (sin_alpha, tan_beta) = if abs_cos_theta_wi > abs_cos_theta_wo {
            (sin_theta_o, sin_theta_i / abs_cos_theta_wi)
        } else {
            (sin_theta_i, sin_theta_o / abs_cos_theta_wo)
        };

        self.r * INV_PI * (self.a + self.b * max_cos * sin_alpha * tan_beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn zero_roughness_reduces_to_lambertian() {
        let arena = MemoryPool::new();
        let bxdf = OrenNayar::alloc(&arena, Spectrum::new(0.8), 0.0);
        let wo = Vector3f::new(0.3, 0.0, 0.9).normalize();
        let wi = Vector3f::new(-0.5, 0.2, 0.7).normalize();
        assert!(approx_eq!(f32, bxdf.f(&wo, &wi)[1], 0.8 * INV_PI, epsilon = 1e-6));
    }
}
