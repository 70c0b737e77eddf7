//! BSDF

use super::*;
use crate::interaction::*;
use crate::memory::*;
use crate::rng::*;

/// Maximum number of BxDFs that can be stored in `BSDF`.
pub const MAX_BXDFS: usize = 8;

/// BSDF represents a collection of BRDFs and BTDFs at one shading point.
/// All directions passed in and returned are in world space.
pub struct BSDF<'arena> {
    /// Shading frame built from the shading normal and tangent. It is used to
    /// define hemispheres for integrating incident illumination.
    frame: Frame,

    /// The geometric normal defined by surface geometry.
    ng: Normal3f,

    /// The `BxDFs`.
    bxdfs: [Option<&'arena BxDF<'arena>>; MAX_BXDFS],

    /// Number of `BxDFs` stored.
    n_bxdfs: usize,

    /// Relative index of refraction over the surface boundary.
    pub eta: Float,
}

impl<'arena> BSDF<'arena> {
    /// Creates a new `BSDF`.
    ///
    /// * `si`  - The differential geometry at the point on a surface.
    /// * `eta` - Optional relative index of refraction over the surface
    ///           boundary. If not provided, defaults to 1.0; used for
    ///           opaque surfaces.
    pub fn new(si: &SurfaceInteraction, eta: Option<Float>) -> Self {
        Self {
            frame: Frame::new(&si.shading.n, &si.shading.dpdu),
            ng: si.hit.n,
            bxdfs: [None; MAX_BXDFS],
            n_bxdfs: 0,
            eta: eta.unwrap_or(1.0),
        }
    }

    /// Allocate a new `BSDF` in the memory pool.
    ///
    /// * `arena` - The memory pool.
    /// * `si`    - The differential geometry at the point on a surface.
    /// * `eta`   - Optional relative index of refraction.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(
        arena: &'arena MemoryPool,
        si: &SurfaceInteraction,
        eta: Option<Float>,
    ) -> &'arena mut Self {
        arena.alloc(Self::new(si, eta))
    }

    /// Add a `BxDF`.
    ///
    /// * `bxdf` - The `BxDF`.
    pub fn add(&mut self, bxdf: &'arena BxDF<'arena>) {
        assert!(
            self.n_bxdfs < MAX_BXDFS,
            "Cannot add BxDFs. BSDF maximum limit {} reached.",
            MAX_BXDFS
        );
        self.bxdfs[self.n_bxdfs] = Some(bxdf);
        self.n_bxdfs += 1;
    }

    /// Returns an iterator over the stored `BxDF`s.
    fn iter(&self) -> impl Iterator<Item = &'arena BxDF<'arena>> + '_ {
        self.bxdfs[..self.n_bxdfs].iter().flatten().copied()
    }

    /// Returns the number of `BxDF`s that match the given type.
    ///
    /// * `bxdf_type` - The `BxDFType` to match.
    pub fn num_components(&self, bxdf_type: BxDFType) -> usize {
        self.iter().filter(|b| b.matches_flags(bxdf_type)).count()
    }

    /// Returns the shading normal.
    pub fn shading_normal(&self) -> Normal3f {
        self.frame.n
    }

    /// Transforms a vector from world space to local space.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        self.frame.to_local(v)
    }

    /// Transforms a vector from local space to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        self.frame.from_local(v)
    }

    /// Returns true if the BxDF applies to the pair of world directions:
    /// reflection lobes for directions on the same side of the geometric
    /// surface and transmission lobes otherwise.
    fn applies(&self, bxdf: &BxDF, wo_w: &Vector3f, wi_w: &Vector3f) -> bool {
        let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
        let t = bxdf.get_type();
        (reflect && t.matches(BxDFType::BSDF_REFLECTION))
            || (!reflect && t.matches(BxDFType::BSDF_TRANSMISSION))
    }

    /// Returns the BSDF evaluated for a pair of directions.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Spectrum {
        let wi = self.world_to_local(wi_w);
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return Spectrum::ZERO;
        }

        self.iter()
            .filter(|b| b.matches_flags(bxdf_type) && self.applies(b, wo_w, wi_w))
            .fold(Spectrum::ZERO, |l, b| l + b.f(&wo, &wi))
    }

    /// Sample an incident direction for the outgoing direction. Returns a zero
    /// PDF if no component matches or the sample is degenerate.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `u`         - The 2D uniform random values.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &Point2f, bxdf_type: BxDFType) -> BxDFSample {
        // Choose which `BxDF` to sample.
        let matching_comps = self.num_components(bxdf_type);
        if matching_comps == 0 {
            return BxDFSample::default();
        }
        let comp = min(
            (u[0] * matching_comps as Float).floor() as usize,
            matching_comps - 1,
        );
        let bxdf = match self
            .iter()
            .filter(|b| b.matches_flags(bxdf_type))
            .nth(comp)
        {
            Some(b) => b,
            None => return BxDFSample::default(),
        };

        // Remap BxDF sample `u` to `[0,1)^2`.
        let u_remapped = Point2f::new(
            min(
                u[0] * matching_comps as Float - comp as Float,
                ONE_MINUS_EPSILON,
            ),
            u[1],
        );

        // Sample chosen `BxDF`.
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return BxDFSample::default();
        }
        let sampled_type = bxdf.get_type();
        let sample = bxdf.sample_f(&wo, &u_remapped);
        if sample.pdf == 0.0 {
            return BxDFSample::new(Spectrum::ZERO, 0.0, Vector3f::ZERO, sampled_type);
        }
        let wi_w = self.local_to_world(&sample.wi);

        // Compute overall PDF with all matching BxDFs.
        let mut pdf = sample.pdf;
        if !sampled_type.matches(BxDFType::BSDF_SPECULAR) && matching_comps > 1 {
            pdf += self
                .iter()
                .filter(|b| !std::ptr::eq(*b, bxdf) && b.matches_flags(bxdf_type))
                .map(|b| b.pdf(&wo, &sample.wi))
                .sum::<Float>();
        }
        if matching_comps > 1 {
            pdf /= matching_comps as Float;
        }

        // Compute value of BSDF for sampled direction.
        let f = if sampled_type.matches(BxDFType::BSDF_SPECULAR) {
            sample.f
        } else {
            self.iter()
                .filter(|b| b.matches_flags(bxdf_type) && self.applies(b, wo_w, &wi_w))
                .fold(Spectrum::ZERO, |l, b| l + b.f(&wo, &sample.wi))
        };
        BxDFSample::new(f, pdf, wi_w, sampled_type)
    }

    /// Evaluates the PDF of `sample_f()` for a pair of directions.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Float {
        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        if wo.z == 0.0 {
            return 0.0;
        }

        let (matching_comps, pdf) = self
            .iter()
            .filter(|b| b.matches_flags(bxdf_type))
            .fold((0, 0.0), |(n, pdf), b| (n + 1, pdf + b.pdf(&wo, &wi)));
        if matching_comps > 0 {
            pdf / matching_comps as Float
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn flat_interaction() -> SurfaceInteraction<'static> {
        SurfaceInteraction::new(
            Point3f::ZERO,
            Point2f::zero(),
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Normal3f::new(0.0, 0.0, 1.0),
            0.0,
        )
    }

    #[test]
    fn empty_bsdf_is_black() {
        let si = flat_interaction();
        let bsdf = BSDF::new(&si, None);
        let w = Vector3f::new(0.0, 0.0, 1.0);
        assert!(bsdf.f(&w, &w, BxDFType::BSDF_ALL).is_black());
        assert_eq!(bsdf.pdf(&w, &w, BxDFType::BSDF_ALL), 0.0);
        assert_eq!(bsdf.sample_f(&w, &Point2f::zero(), BxDFType::BSDF_ALL).pdf, 0.0);
    }

    #[test]
    fn reflection_is_zero_below_the_surface() {
        let arena = MemoryPool::new();
        let si = flat_interaction();
        let bsdf = BSDF::alloc(&arena, &si, None);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let below = Vector3f::new(0.0, 0.6, -0.8);
        let above = Vector3f::new(0.0, 0.6, 0.8);
        assert!(bsdf.f(&wo, &below, BxDFType::BSDF_ALL).is_black());
        assert_eq!(bsdf.pdf(&wo, &below, BxDFType::BSDF_ALL), 0.0);
        let f = bsdf.f(&wo, &above, BxDFType::BSDF_ALL);
        assert!(approx_eq!(f32, f[0], 0.5 * INV_PI, epsilon = 1e-6));
        assert!(approx_eq!(
            f32,
            bsdf.pdf(&wo, &above, BxDFType::BSDF_ALL),
            0.8 * INV_PI,
            epsilon = 1e-6
        ));
    }

    #[test]
    fn sample_f_agrees_with_f_and_pdf() {
        let arena = MemoryPool::new();
        let si = flat_interaction();
        let bsdf = BSDF::alloc(&arena, &si, None);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        bsdf.add(OrenNayar::alloc(&arena, Spectrum::new(0.3), 20.0));
        let wo = Vector3f::new(0.3, -0.2, 0.9).normalize();
        let s = bsdf.sample_f(&wo, &Point2f::new(0.7, 0.4), BxDFType::BSDF_ALL);
        assert!(s.pdf > 0.0);
        let f = bsdf.f(&wo, &s.wi, BxDFType::BSDF_ALL);
        let pdf = bsdf.pdf(&wo, &s.wi, BxDFType::BSDF_ALL);
        assert!(approx_eq!(f32, s.f[0], f[0], epsilon = 1e-5));
        assert!(approx_eq!(f32, s.pdf, pdf, epsilon = 1e-5));
    }

    #[test]
    fn specular_only_flags_match_nothing_diffuse() {
        let arena = MemoryPool::new();
        let si = flat_interaction();
        let bsdf = BSDF::alloc(&arena, &si, None);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        let flags = BxDFType::BSDF_ALL & !BxDFType::BSDF_DIFFUSE;
        assert_eq!(bsdf.num_components(flags), 0);
    }
}
