//! Diffuse Area Light Source

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::pbrt::*;
use lumen_core::spectrum::*;

/// Implements a basic area light source with uniform spatial and directional
/// radiance distribution.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Used to trace multiple shadow rays to the light to compute soft shadows.
    pub n_samples: usize,

    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Shape describing surface of the light source.
    pub shape: ArcShape,

    /// Surface area of the shape.
    pub area: Float,

    /// Indicates whether light source 2-sided.
    pub two_sided: bool,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight`.
    ///
    /// * `l_emit`    - Emitted radiance.
    /// * `n_samples` - Used to trace multiple shadow rays to the light
    ///                 to compute soft shadows.
    /// * `shape`     - Shape describing surface of the light source.
    /// * `two_sided` - Indicates whether light source 2-sided.
    pub fn new(l_emit: Spectrum, n_samples: usize, shape: ArcShape, two_sided: bool) -> Self {
        let area = shape.area();
        Self {
            n_samples: max(1, n_samples),
            l_emit,
            shape,
            area,
            two_sided,
        }
    }
}

impl Light for DiffuseAreaLight {
    fn get_name(&self) -> &'static str {
        "diffuse area"
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::AREA_LIGHT
    }

    /// Return the radiance arriving at an interaction point from a point
    /// sampled on the shape.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li {
        let (p_shape_hit, pdf) = self.shape.sample_solid_angle(hit, u);
        let wi = p_shape_hit.p - hit.p;
        if pdf == 0.0 || wi.length_squared() == 0.0 {
            return Li::zero();
        }

        let wi = wi.normalize();
        let visibility = Some(VisibilityTester::new(*hit, p_shape_hit));
        let value = self.l(&p_shape_hit, &(-wi));
        Li::new(wi, pdf, visibility, value)
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        let sides = if self.two_sided { 2.0 } else { 1.0 };
        self.l_emit * (sides * self.area * PI)
    }

    /// Returns emitted radiance based on `two_sided` flag.
    ///
    /// * `intr` - The interaction point.
    /// * `w`    - Direction.
    fn l(&self, intr: &Hit, w: &Vector3f) -> Spectrum {
        if self.two_sided || intr.n.dot(w) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        }
    }

    /// Returns the probability density with respect to solid angle for the light’s
    /// `sample_li()`.
    ///
    /// * `hit` - The interaction hit point.
    /// * `wi`  - The incident direction.
    fn pdf_li(&self, hit: &Hit, wi: &Vector3f) -> Float {
        self.shape.pdf_solid_angle(hit, wi)
    }

    fn get_num_samples(&self) -> usize {
        self.n_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use shapes::*;
    use std::sync::Arc;

    fn light(two_sided: bool) -> DiffuseAreaLight {
        let disk = Disk::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), 1.0);
        DiffuseAreaLight::new(Spectrum::new(3.0), 4, Arc::new(disk), two_sided)
    }

    #[test]
    fn emits_only_on_the_front_side() {
        let l = light(false);
        let p = Hit::new(
            Point3f::new(0.0, 0.0, 1.0),
            0.0,
            Vector3f::ZERO,
            Vector3f::new(0.0, 0.0, -1.0),
        );
        assert_eq!(l.l(&p, &Vector3f::new(0.0, 0.0, -1.0)), Spectrum::new(3.0));
        assert!(l.l(&p, &Vector3f::new(0.0, 0.0, 1.0)).is_black());
        assert!(!light(true).l(&p, &Vector3f::new(0.0, 0.0, 1.0)).is_black());
    }

    #[test]
    fn sampled_direction_points_at_the_light() {
        let l = light(false);
        let hit = Hit::new_minimal(Point3f::ZERO, 0.0);
        let li = l.sample_li(&hit, &Point2f::new(0.3, 0.8));
        assert!(li.pdf > 0.0);
        assert!(approx_eq!(f32, li.wi.length(), 1.0, epsilon = 1e-5));
        assert!(li.wi.z > 0.0);
        assert_eq!(li.value, Spectrum::new(3.0));
        assert!(approx_eq!(f32, l.pdf_li(&hit, &li.wi), li.pdf, epsilon = 1e-3 * li.pdf));
    }

    #[test]
    fn power_counts_both_sides() {
        assert!(approx_eq!(f32, light(false).power()[0], 3.0 * PI * PI, epsilon = 1e-4));
        assert!(approx_eq!(f32, light(true).power()[0], 6.0 * PI * PI, epsilon = 1e-4));
        assert_eq!(light(false).get_num_samples(), 4);
        assert!(!light(false).is_delta_light());
    }
}
