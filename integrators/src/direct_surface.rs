//! Direct Lighting Surface Integrator

use super::*;
use lumen_core::geometry::*;
use lumen_core::integrator::*;
use lumen_core::interaction::*;
use lumen_core::memory::*;
use lumen_core::sampler::*;
use lumen_core::scene::*;
use lumen_core::spectrum::*;

/// Surface integrator that returns emitted radiance plus the direct lighting
/// estimate at the first intersection.
pub struct DirectLightingSurfaceIntegrator {
    /// The direct lighting estimator.
    direct: DirectLightingIntegrator,
}

impl DirectLightingSurfaceIntegrator {
    /// Create a new `DirectLightingSurfaceIntegrator`.
    ///
    /// * `strategy` - Light sampling strategy.
    pub fn new(strategy: LightStrategy) -> Self {
        Self {
            direct: DirectLightingIntegrator::new(strategy),
        }
    }
}

impl SurfaceIntegrator for DirectLightingSurfaceIntegrator {
    fn get_name(&self) -> &'static str {
        "direct lighting"
    }

    fn request_samples(&mut self, sampler: &mut dyn Sampler, scene: &Scene) {
        self.direct.request_samples(sampler, scene);
    }

    /// Returns the radiance leaving the intersection toward the ray origin.
    ///
    /// * `scene`  - The scene.
    /// * `ray`    - The camera ray.
    /// * `isect`  - The surface interaction where the ray hit the scene.
    /// * `sample` - The sample holding the requested sequences.
    /// * `arena`  - Memory pool for allocations scoped to the call.
    fn radiance(
        &self,
        scene: &Scene,
        ray: &Ray,
        isect: &SurfaceInteraction,
        sample: &Sample,
        arena: &MemoryPool,
    ) -> Spectrum {
        let wo = -ray.d.normalize();

        // Compute emitted light if ray hit an area light source.
        let mut l = isect.le(&wo);

        match isect.compute_scattering_functions(arena) {
            Some(bsdf) => {
                l += self
                    .direct
                    .compute_direct_lighting(scene, isect, &wo, bsdf, sample, arena);
            }
            None => trace!("No material at {}", isect.hit.p),
        }
        l
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cameras::*;
    use float_cmp::*;
    use lights::*;
    use lumen_core::camera::*;
    use lumen_core::geometry::*;
    use lumen_core::light::*;
    use lumen_core::material::*;
    use lumen_core::pbrt::*;
    use lumen_core::primitive::*;
    use materials::*;
    use samplers::*;
    use shapes::*;
    use std::sync::Arc;

    fn ground() -> ArcPrimitive {
        let matte: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.5), 0.0));
        Arc::new(GeometricPrimitive::new(
            Arc::new(Disk::new(Point3f::ZERO, Vector3f::new(0.0, 0.0, 1.0), 100.0)),
            Some(matte),
            None,
        ))
    }

    fn looking_down() -> PerspectiveCamera {
        PerspectiveCamera::new(
            Point3f::new(0.0, 0.0, 5.0),
            Point3f::ZERO,
            Vector3f::new(0.0, 1.0, 0.0),
            40.0,
            Point2i::new(32, 32),
            0.0,
            1.0,
        )
    }

    #[test]
    fn stratified_pixel_matches_lambertian_under_distant_light() {
        // Light from 36.87 degrees off the normal: cos(theta) = 0.8.
        let light: ArcLight = Arc::new(DistantLight::new(Spectrum::ONE, Vector3f::new(0.6, 0.0, 0.8)));
        let scene = Scene::new(Arc::new(PrimitiveList::new(vec![ground()])), vec![light]);
        let camera = looking_down();

        let pixel = Bounds2i::new(Point2i::new(10, 10), Point2i::new(11, 11));
        let mut sampler = create_sampler(SamplerKind::Stratified, pixel, 15, PixelsOrderKind::Consecutive, 3);
        assert_eq!(sampler.samples_per_pixel(), 16);

        let mut integrator = DirectLightingSurfaceIntegrator::new(LightStrategy::UniformSampleAll);
        integrator.request_samples(sampler.as_mut(), &scene);
        let mut sub_samplers = sampler.sub_samplers(1);
        let mut sample = sampler.create_sample();

        let mut arena = MemoryPool::new();
        let mut values = vec![];
        while sub_samplers[0].get_next_sample(&mut sample) {
            assert_eq!(sample.pixel, Point2i::new(10, 10));
            let (mut ray, _) = camera.generate_ray(&CameraSample::new(sample.image_point, sample.lens_uv));
            let isect = scene.intersect(&mut ray).expect("camera ray hits the ground");
            let l = integrator.radiance(&scene, &ray, &isect, &sample, &arena);
            values.push(l.y());
            arena.reset();
        }
        assert_eq!(values.len(), 16);

        let n = values.len() as Float;
        let mean = values.iter().sum::<Float>() / n;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<Float>() / (n - 1.0);
        let std_err = (var / n).sqrt();
        let expected = 0.5 * INV_PI * 0.8;
        assert!(
            (mean - expected).abs() <= 3.0 * std_err + 1e-5,
            "mean {} expected {}",
            mean,
            expected
        );
    }

    #[test]
    fn emitter_hit_directly_returns_emitted_radiance() {
        let disk: ArcShape = Arc::new(Disk::new(Point3f::ZERO, Vector3f::new(0.0, 0.0, 1.0), 10.0));
        let light: ArcLight = Arc::new(DiffuseAreaLight::new(Spectrum::new(2.0), 1, Arc::clone(&disk), false));
        let emitter: ArcPrimitive = Arc::new(GeometricPrimitive::new(disk, None, Some(Arc::clone(&light))));
        let scene = Scene::new(Arc::new(PrimitiveList::new(vec![emitter])), vec![light]);
        let camera = looking_down();

        let bounds = Bounds2i::new(Point2i::new(16, 16), Point2i::new(17, 17));
        let mut sampler = create_sampler(SamplerKind::Random, bounds, 1, PixelsOrderKind::Consecutive, 5);
        let mut integrator = DirectLightingSurfaceIntegrator::new(LightStrategy::UniformSampleOne);
        integrator.request_samples(sampler.as_mut(), &scene);
        let mut sub_samplers = sampler.sub_samplers(1);
        let mut sample = sampler.create_sample();
        assert!(sub_samplers[0].get_next_sample(&mut sample));

        let arena = MemoryPool::new();
        let (mut ray, _) = camera.generate_ray(&CameraSample::new(sample.image_point, sample.lens_uv));
        let isect = scene.intersect(&mut ray).expect("camera ray hits the emitter");
        let l = integrator.radiance(&scene, &ray, &isect, &sample, &arena);
        assert!(approx_eq!(f32, l[0], 2.0, epsilon = 1e-5));
    }
}
