//! Distant Source

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::pbrt::*;
use lumen_core::scene::*;
use lumen_core::spectrum::*;
use std::sync::{PoisonError, RwLock};

/// Implements a directional light source that deposits illumination from the
/// same direction at every point in space.
pub struct DistantLight {
    /// The emitted radiance `L`.
    pub emitted_radiance: Spectrum,

    /// Direction toward the light.
    pub w_light: Vector3f,

    /// Center and radius of the spherical world bounds.
    world_sphere: RwLock<(Point3f, Float)>,
}

impl DistantLight {
    /// Returns a new `DistantLight`.
    ///
    /// * `emitted_radiance` - The emitted radiance.
    /// * `w_light`          - Direction toward the light.
    pub fn new(emitted_radiance: Spectrum, w_light: Vector3f) -> Self {
        Self {
            emitted_radiance,
            w_light: w_light.normalize(),
            world_sphere: RwLock::new((Point3f::ZERO, 1.0)), // Calculated in preprocess().
        }
    }

    /// Returns the bounding sphere of the scene.
    fn world_sphere(&self) -> (Point3f, Float) {
        *self.world_sphere.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Light for DistantLight {
    fn get_name(&self) -> &'static str {
        "distant"
    }

    /// Initialize the light source before rendering begins.
    ///
    /// * `scene` - The scene.
    fn preprocess(&self, scene: &Scene) {
        let sphere = if scene.world_bound.is_empty() {
            (Point3f::ZERO, 1.0)
        } else {
            scene.world_bound.bounding_sphere()
        };
        debug!("Distant light world sphere {} radius {}", sphere.0, sphere.1);
        *self.world_sphere.write().unwrap_or_else(PoisonError::into_inner) = sphere;
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::DELTA_DIRECTION_LIGHT
    }

    /// Return the radiance arriving at an interaction point. The shadow ray
    /// ends at a point outside the scene bounds.
    ///
    /// * `hit` - The interaction hit point.
    /// * `_u`  - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
        let (_, world_radius) = self.world_sphere();
        let p_outside = hit.p + self.w_light * (2.0 * world_radius);
        let vis = VisibilityTester::new(*hit, Hit::new_minimal(p_outside, hit.time));
        Li::new(self.w_light, 1.0, Some(vis), self.emitted_radiance)
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        let (_, world_radius) = self.world_sphere();
        self.emitted_radiance * PI * world_radius * world_radius
    }

    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use lumen_core::primitive::*;
    use shapes::*;
    use std::sync::Arc;

    #[test]
    fn radiance_is_the_same_everywhere() {
        let light = DistantLight::new(Spectrum::new(2.0), Vector3f::new(0.0, 0.0, 5.0));
        for p in [Point3f::ZERO, Point3f::new(10.0, -3.0, 2.0)] {
            let li = light.sample_li(&Hit::new_minimal(p, 0.0), &Point2f::new(0.5, 0.5));
            assert_eq!(li.value, Spectrum::new(2.0));
            assert!(approx_eq!(f32, li.wi.z, 1.0, epsilon = 1e-6));
        }
    }

    #[test]
    fn preprocess_uses_scene_bounds() {
        let sphere: ArcPrimitive = Arc::new(GeometricPrimitive::new(
            Arc::new(Sphere::new(Point3f::ZERO, 2.0)),
            None,
            None,
        ));
        let light = Arc::new(DistantLight::new(Spectrum::new(1.0), Vector3f::new(0.0, 1.0, 0.0)));
        let lights: Vec<ArcLight> = vec![light.clone()];
        let _scene = Scene::new(Arc::new(PrimitiveList::new(vec![sphere])), lights);

        let (_, radius) = light.world_sphere();
        assert!(approx_eq!(f32, radius, 12.0_f32.sqrt(), epsilon = 1e-4));
        let expected = PI * 12.0;
        assert!(approx_eq!(f32, light.power()[0], expected, epsilon = 1e-3));
    }
}
