//! Infinite Area Light Source

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;
use lumen_core::scene::*;
use lumen_core::spectrum::*;
use std::sync::{PoisonError, RwLock};

/// Implements an infinitely far away area light source that surrounds the
/// scene and emits the same radiance from every direction.
pub struct InfiniteAreaLight {
    /// Used to trace multiple shadow rays to the light to compute soft shadows.
    pub n_samples: usize,

    /// Radiance arriving from every direction.
    pub l_emit: Spectrum,

    /// Center and radius of the spherical world bounds.
    world_sphere: RwLock<(Point3f, Float)>,
}

impl InfiniteAreaLight {
    /// Returns a new `InfiniteAreaLight`.
    ///
    /// * `l_emit`    - Radiance arriving from every direction.
    /// * `n_samples` - Used to trace multiple shadow rays to the light
    ///                 to compute soft shadows.
    pub fn new(l_emit: Spectrum, n_samples: usize) -> Self {
        Self {
            n_samples: max(1, n_samples),
            l_emit,
            world_sphere: RwLock::new((Point3f::ZERO, 1.0)), // Calculated in preprocess().
        }
    }

    /// Returns the bounding sphere of the scene.
    fn world_sphere(&self) -> (Point3f, Float) {
        *self.world_sphere.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Light for InfiniteAreaLight {
    fn get_name(&self) -> &'static str {
        "infinite area"
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
        debug!("Infinite light world sphere {} radius {}", sphere.0, sphere.1);
        *self.world_sphere.write().unwrap_or_else(PoisonError::into_inner) = sphere;
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::INFINITE_LIGHT
    }

    /// Return the radiance arriving at an interaction point from a direction
    /// sampled uniformly over the sphere.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li {
        let wi = uniform_sample_sphere(u);
        let (_, world_radius) = self.world_sphere();
        let p_outside = hit.p + wi * (2.0 * world_radius);
        let vis = VisibilityTester::new(*hit, Hit::new_minimal(p_outside, hit.time));
        Li::new(wi, uniform_sphere_pdf(), Some(vis), self.l_emit)
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        let (_, world_radius) = self.world_sphere();
        self.l_emit * (PI * world_radius * world_radius)
    }

    /// Returns emitted radiance along a ray that escapes the scene bounds.
    ///
    /// * `_ray` - The ray.
    fn le(&self, _ray: &Ray) -> Spectrum {
        self.l_emit
    }

    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        uniform_sphere_pdf()
    }

    fn get_num_samples(&self) -> usize {
        self.n_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use lumen_core::primitive::*;
    use proptest::prelude::*;
    use shapes::*;
    use std::sync::Arc;

    #[test]
    fn scene_lists_it_with_infinite_lights() {
        let sphere: ArcPrimitive = Arc::new(GeometricPrimitive::new(
            Arc::new(Sphere::new(Point3f::ZERO, 2.0)),
            None,
            None,
        ));
        let light = Arc::new(InfiniteAreaLight::new(Spectrum::new(0.5), 4));
        let lights: Vec<ArcLight> = vec![light.clone()];
        let scene = Scene::new(Arc::new(PrimitiveList::new(vec![sphere])), lights);

        assert_eq!(scene.infinite_lights.len(), 1);
        assert!(!light.is_delta_light());
        assert_eq!(light.get_num_samples(), 4);
        assert!(approx_eq!(f32, light.power()[0], 0.5 * PI * 12.0, epsilon = 1e-3));
    }

    #[test]
    fn escaping_rays_see_the_emitted_radiance() {
        let light = InfiniteAreaLight::new(Spectrum::new(1.5), 1);
        let ray = Ray::new(Point3f::ZERO, Vector3f::new(0.3, -0.2, 0.9), INFINITY);
        assert_eq!(light.le(&ray), Spectrum::new(1.5));
    }

    proptest! {
        #[test]
        fn sampled_pdf_matches_pdf_li(u0 in 0.0f32..1.0, u1 in 0.0f32..1.0) {
            let light = InfiniteAreaLight::new(Spectrum::ONE, 1);
            let hit = Hit::new_minimal(Point3f::new(1.0, 2.0, 3.0), 0.0);
            let li = light.sample_li(&hit, &Point2f::new(u0, u1));
            prop_assert!(approx_eq!(f32, li.wi.length(), 1.0, epsilon = 1e-4));
            prop_assert!(approx_eq!(f32, li.pdf, light.pdf_li(&hit, &li.wi), epsilon = 1e-7));
            prop_assert!(approx_eq!(f32, li.pdf, 1.0 / (4.0 * PI), epsilon = 1e-7));
            prop_assert_eq!(li.value, Spectrum::ONE);
        }
    }
}
