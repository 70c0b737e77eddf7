//! Spot Light Source

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::pbrt::*;
use lumen_core::spectrum::*;

/// Implements an spot light source that emits light in a cone of directions from
/// its position.
#[derive(Clone)]
pub struct SpotLight {
    /// Position.
    pub p_light: Point3f,

    /// Axis of the cone.
    pub direction: Vector3f,

    /// Intensity.
    pub intensity: Spectrum,

    /// Cosine of overall angular width of the cone.
    cos_total_width: Float,

    /// Cosine of angle at which falloff starts.
    cos_falloff_start: Float,
}

impl SpotLight {
    /// Returns a new `SpotLight`.
    ///
    /// * `from`          - Position.
    /// * `to`            - Point the cone axis passes through.
    /// * `intensity`     - Intensity.
    /// * `total_width`   - Overall angular width of the cone in degrees.
    /// * `falloff_start` - Angle at which fallof starts in degrees.
    pub fn new(
        from: Point3f,
        to: Point3f,
        intensity: Spectrum,
        total_width: Float,
        falloff_start: Float,
    ) -> Self {
        assert!(
            falloff_start <= total_width,
            "Spot light falloff start {} exceeds cone width {}",
            falloff_start,
            total_width
        );
        Self {
            p_light: from,
            direction: (to - from).normalize(),
            intensity,
            cos_total_width: total_width.to_radians().cos(),
            cos_falloff_start: falloff_start.to_radians().cos(),
        }
    }

    /// Returns the distribution of light accounting for the spotlight cone.
    ///
    /// * `w` - Unit vector from the light toward the hit point.
    fn falloff(&self, w: &Vector3f) -> Float {
        let cos_theta = w.dot(&self.direction);
        if cos_theta < self.cos_total_width {
            return 0.0;
        }
        if cos_theta >= self.cos_falloff_start {
            return 1.0;
        }

        // Compute falloff inside spotlight cone.
        let delta = (cos_theta - self.cos_total_width) / (self.cos_falloff_start - self.cos_total_width);
        (delta * delta) * (delta * delta)
    }
}

impl Light for SpotLight {
    fn get_name(&self) -> &'static str {
        "spot"
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::DELTA_POSITION_LIGHT
    }

    /// Return the radiance arriving at an interaction point.
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
        let value = self.intensity * self.falloff(&-wi) / d2;
        Li::new(wi, 1.0, Some(vis), value)
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        self.intensity * TWO_PI * (1.0 - 0.5 * (self.cos_falloff_start + self.cos_total_width))
    }

    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn light() -> SpotLight {
        SpotLight::new(
            Point3f::new(0.0, 0.0, 2.0),
            Point3f::ZERO,
            Spectrum::new(4.0),
            30.0,
            20.0,
        )
    }

    #[test]
    fn full_intensity_on_axis() {
        let li = light().sample_li(&Hit::new_minimal(Point3f::ZERO, 0.0), &Point2f::new(0.0, 0.0));
        assert!(approx_eq!(f32, li.value[0], 1.0, epsilon = 1e-6));
    }

    #[test]
    fn nothing_outside_the_cone() {
        let hit = Hit::new_minimal(Point3f::new(5.0, 0.0, 0.0), 0.0);
        let li = light().sample_li(&hit, &Point2f::new(0.0, 0.0));
        assert!(li.value.is_black());
    }

    #[test]
    fn falloff_is_between_zero_and_one_inside_the_band() {
        let l = light();
        // 25 degrees off axis.
        let angle = 25.0_f32.to_radians();
        let w = Vector3f::new(angle.sin(), 0.0, -angle.cos());
        let f = l.falloff(&w);
        assert!(f > 0.0 && f < 1.0, "falloff {}", f);
    }
}
