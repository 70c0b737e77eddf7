//! Point Light Source

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::pbrt::*;
use lumen_core::spectrum::*;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions.
#[derive(Clone)]
pub struct PointLight {
    /// Position.
    pub p_light: Point3f,

    /// Intensity.
    pub intensity: Spectrum,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `p_light`   - Position.
    /// * `intensity` - Intensity.
    pub fn new(p_light: Point3f, intensity: Spectrum) -> Self {
        Self { p_light, intensity }
    }
}

impl Light for PointLight {
    fn get_name(&self) -> &'static str {
        "point"
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::DELTA_POSITION_LIGHT
    }

    /// Return the radiance arriving at an interaction point. The intensity
    /// falls off with the squared distance to the light.
    ///
    /// * `hit` - The interaction hit point.
    /// * `_u`  - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
        let d2 = self.p_light.distance_squared(&hit.p);
        if d2 == 0.0 {
            return Li::zero();
        }
        let wi = (self.p_light - hit.p).normalize();
        let vis = VisibilityTester::new(*hit, Hit::new_minimal(self.p_light, hit.time));
        Li::new(wi, 1.0, Some(vis), self.intensity / d2)
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        FOUR_PI * self.intensity
    }

    /// A point light can never be hit by a sampled direction.
    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        0.0
    }
}
