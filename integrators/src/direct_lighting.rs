//! Direct Lighting Integrator

use lumen_core::geometry::*;
use lumen_core::integrator::*;
use lumen_core::interaction::*;
use lumen_core::memory::*;
use lumen_core::pbrt::*;
use lumen_core::reflection::*;
use lumen_core::sampler::*;
use lumen_core::sampling::*;
use lumen_core::scene::*;
use lumen_core::spectrum::*;
use std::fmt;
use std::str::FromStr;

/// Direct light sampling strategy.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LightStrategy {
    /// Loops over all of the lights and takes a number of samples based on
    /// `n_samples` from each of them, summing the result.
    #[default]
    UniformSampleAll,

    /// Takes a single sample from just one of the lights, chosen at random.
    UniformSampleOne,

    /// Takes a single sample from one light chosen proportionally to its
    /// emitted power.
    PowerSampleOne,
}

impl FromStr for LightStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::UniformSampleAll),
            "one" => Ok(Self::UniformSampleOne),
            "power" => Ok(Self::PowerSampleOne),
            _ => Err(format!("Strategy '{}' for direct lighting unknown", s)),
        }
    }
}

impl fmt::Display for LightStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniformSampleAll => write!(f, "all"),
            Self::UniformSampleOne => write!(f, "one"),
            Self::PowerSampleOne => write!(f, "power"),
        }
    }
}

/// Sequences reserved for one light sampling estimate.
#[derive(Copy, Clone)]
struct LightSequences {
    /// Sample values for picking a point on the light.
    u_light: Sequence2DId,

    /// Sample values for sampling the BSDF.
    u_scattering: Sequence2DId,
}

/// Sequences reserved by `request_samples()`. The layout depends on the
/// strategy.
enum RequestedSequences {
    /// `request_samples()` has not been called.
    None,

    /// One pair of sequences per light in scene order.
    AllLights(Vec<LightSequences>),

    /// A light selection value and one pair of sequences.
    OneLight {
        select: Sequence1DId,
        sequences: LightSequences,
    },
}

/// Estimates single bounce direct lighting at a surface point with multiple
/// importance sampling of the lights and the BSDF.
pub struct DirectLightingIntegrator {
    /// Light sampling strategy.
    strategy: LightStrategy,

    /// Sequences reserved in the sampler.
    requested: RequestedSequences,

    /// Number of lights the sequences were requested for.
    n_lights: usize,

    /// Light selection distribution for `PowerSampleOne`.
    light_distrib: Option<Distribution1D>,
}

impl DirectLightingIntegrator {
    /// Create a new `DirectLightingIntegrator`.
    ///
    /// * `strategy` - Light sampling strategy.
    pub fn new(strategy: LightStrategy) -> Self {
        Self {
            strategy,
            requested: RequestedSequences::None,
            n_lights: 0,
            light_distrib: None,
        }
    }

    /// Reserve the sequences `compute_direct_lighting()` consumes. Must be
    /// called once before sample generation starts.
    ///
    /// * `sampler` - The sampler.
    /// * `scene`   - The scene.
    pub fn request_samples(&mut self, sampler: &mut dyn Sampler, scene: &Scene) {
        self.n_lights = scene.lights.len();
        self.requested = match self.strategy {
            LightStrategy::UniformSampleAll => {
                let sequences = scene
                    .lights
                    .iter()
                    .map(|light| {
                        let n_samples = sampler.round_samples_number(light.get_num_samples());
                        if n_samples != light.get_num_samples() {
                            debug!(
                                "{} light samples rounded from {} to {}",
                                light.get_name(),
                                light.get_num_samples(),
                                n_samples
                            );
                        }
                        LightSequences {
                            u_light: sampler.request_samples_2d(n_samples),
                            u_scattering: sampler.request_samples_2d(n_samples),
                        }
                    })
                    .collect();
                RequestedSequences::AllLights(sequences)
            }
            LightStrategy::UniformSampleOne | LightStrategy::PowerSampleOne => {
                let n = sampler.round_samples_number(1);
                RequestedSequences::OneLight {
                    select: sampler.request_samples_1d(n),
                    sequences: LightSequences {
                        u_light: sampler.request_samples_2d(n),
                        u_scattering: sampler.request_samples_2d(n),
                    },
                }
            }
        };

        self.light_distrib = if self.strategy == LightStrategy::PowerSampleOne {
            compute_light_power_distribution(scene)
        } else {
            None
        };

        info!(
            "Direct lighting with strategy '{}' for {} lights",
            self.strategy, self.n_lights
        );
    }

    /// Returns the direct lighting estimate at a surface point.
    ///
    /// * `scene`  - The scene.
    /// * `si`     - The surface interaction.
    /// * `wo`     - Outgoing direction pointing toward the viewer.
    /// * `bsdf`   - The BSDF at the surface interaction.
    /// * `sample` - The sample holding the requested sequences.
    /// * `_arena` - Memory pool for allocations scoped to the call.
    pub fn compute_direct_lighting(
        &self,
        scene: &Scene,
        si: &SurfaceInteraction,
        wo: &Vector3f,
        bsdf: &BSDF,
        sample: &Sample,
        _arena: &MemoryPool,
    ) -> Spectrum {
        assert_eq!(
            scene.lights.len(),
            self.n_lights,
            "direct lighting sequences were requested for a different scene"
        );
        if scene.lights.is_empty() {
            return Spectrum::ZERO;
        }

        let bsdf_flags = BxDFType::BSDF_ALL & !BxDFType::BSDF_SPECULAR;
        match &self.requested {
            RequestedSequences::None => {
                panic!("DirectLightingIntegrator::request_samples() was not called")
            }
            RequestedSequences::AllLights(all) => {
                let mut l = Spectrum::ZERO;
                for (light, seq) in scene.lights.iter().zip(all.iter()) {
                    let u_light = sample.get_2d(seq.u_light);
                    let u_scattering = sample.get_2d(seq.u_scattering);
                    let n_samples = u_light.len();

                    let mut ld = Spectrum::ZERO;
                    for (ul, us) in u_light.iter().zip(u_scattering.iter()) {
                        ld += estimate_direct(scene, si, wo, bsdf, light, ul, us, bsdf_flags);
                    }
                    if n_samples > 0 {
                        l += ld / n_samples as Float;
                    }
                }
                l
            }
            RequestedSequences::OneLight { select, sequences } => {
                // Randomly choose a single light to sample.
                let u = sample.get_1d(*select)[0];
                let (light_num, light_pdf) = self.choose_light(u);
                if light_pdf == 0.0 {
                    return Spectrum::ZERO;
                }

                let light = &scene.lights[light_num];
                let u_light = sample.get_2d(sequences.u_light)[0];
                let u_scattering = sample.get_2d(sequences.u_scattering)[0];
                let ld = estimate_direct(
                    scene,
                    si,
                    wo,
                    bsdf,
                    light,
                    &u_light,
                    &u_scattering,
                    bsdf_flags,
                );
                ld / light_pdf
            }
        }
    }

    /// Pick a light for the single light strategies. Returns the light index
    /// and the probability it was chosen with.
    ///
    /// * `u` - Sample value.
    fn choose_light(&self, u: Float) -> (usize, Float) {
        match &self.light_distrib {
            Some(distrib) => {
                let (light_num, pdf, _) = distrib.sample_discrete(u);
                (light_num, pdf)
            }
            None => {
                let n = self.n_lights as Float;
                let light_num = min(u * n, n - 1.0) as usize;
                (light_num, 1.0 / n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use lights::*;
    use lumen_core::light::*;
    use lumen_core::material::*;
    use lumen_core::primitive::*;
    use materials::*;
    use samplers::*;
    use shapes::*;
    use std::sync::Arc;

    /// Receiver at the origin facing +z.
    fn receiver() -> SurfaceInteraction<'static> {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        SurfaceInteraction::new(
            Point3f::ZERO,
            Point2f::new(0.0, 0.0),
            n,
            Vector3f::new(1.0, 0.0, 0.0),
            n,
            0.0,
        )
    }

    fn scene_with(primitives: Vec<ArcPrimitive>, lights: Vec<ArcLight>) -> Scene {
        Scene::new(Arc::new(PrimitiveList::new(primitives)), lights)
    }

    /// Average the direct lighting estimate at the receiver over every sample
    /// of a single pixel.
    fn average_estimate(
        integrator: &mut DirectLightingIntegrator,
        scene: &Scene,
        kind: SamplerKind,
        spp: usize,
    ) -> (Float, Float, usize) {
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(1, 1));
        let mut sampler = create_sampler(kind, bounds, spp, PixelsOrderKind::Consecutive, 17);
        integrator.request_samples(sampler.as_mut(), scene);
        let mut sub_samplers = sampler.sub_samplers(1);
        let mut sample = sampler.create_sample();

        let arena = MemoryPool::new();
        let si = receiver();
        let matte = MatteMaterial::new(Spectrum::new(0.5), 0.0);
        let bsdf = matte.compute_scattering_functions(&arena, &si);

        let mut values = vec![];
        while sub_samplers[0].get_next_sample(&mut sample) {
            let l = integrator.compute_direct_lighting(scene, &si, &si.hit.wo, bsdf, &sample, &arena);
            values.push(l[0] as f64);
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0).max(1.0);
        (mean as Float, (var / n).sqrt() as Float, values.len())
    }

    #[test]
    fn strategy_parses_names() {
        assert_eq!("all".parse::<LightStrategy>(), Ok(LightStrategy::UniformSampleAll));
        assert_eq!("one".parse::<LightStrategy>(), Ok(LightStrategy::UniformSampleOne));
        assert_eq!("power".parse::<LightStrategy>(), Ok(LightStrategy::PowerSampleOne));
        assert!("some".parse::<LightStrategy>().is_err());
        assert_eq!(LightStrategy::PowerSampleOne.to_string(), "power");
    }

    #[test]
    fn sphere_light_estimate_is_unbiased() {
        // A Lambertian receiver under a sphere of radiance 1 subtending
        // sin^2(theta_max) = (r / d)^2 receives albedo * (r / d)^2.
        let sphere: ArcShape = Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 2.0), 1.0));
        let light: ArcLight = Arc::new(DiffuseAreaLight::new(Spectrum::ONE, 1, Arc::clone(&sphere), false));
        let emitter: ArcPrimitive = Arc::new(GeometricPrimitive::new(sphere, None, Some(Arc::clone(&light))));
        let scene = scene_with(vec![emitter], vec![light]);

        let mut integrator = DirectLightingIntegrator::new(LightStrategy::UniformSampleAll);
        let (mean, std_err, n) = average_estimate(&mut integrator, &scene, SamplerKind::Random, 10_000);
        assert_eq!(n, 10_000);

        let expected = 0.5 * 0.25;
        assert!(
            (mean - expected).abs() <= 4.0 * std_err + 1e-4,
            "mean {} expected {} std err {}",
            mean,
            expected,
            std_err
        );
    }

    #[test]
    fn uniform_environment_estimate_is_albedo_times_radiance() {
        // Every BSDF sample escapes the empty scene and picks up radiance
        // from the environment: albedo * L.
        let environment: ArcLight = Arc::new(InfiniteAreaLight::new(Spectrum::new(2.0), 1));
        let scene = scene_with(vec![], vec![environment]);
        assert_eq!(scene.infinite_lights.len(), 1);

        for kind in [SamplerKind::Random, SamplerKind::Stratified] {
            let mut integrator = DirectLightingIntegrator::new(LightStrategy::UniformSampleAll);
            let (mean, std_err, _) = average_estimate(&mut integrator, &scene, kind, 4096);
            let expected = 0.5 * 2.0;
            assert!(
                (mean - expected).abs() <= 4.0 * std_err + 1e-3,
                "{:?}: mean {} expected {} std err {}",
                kind,
                mean,
                expected,
                std_err
            );
        }
    }

    #[test]
    fn point_light_gives_exact_value() {
        let light: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 2.0), Spectrum::ONE));
        let scene = scene_with(vec![], vec![light]);

        let mut integrator = DirectLightingIntegrator::new(LightStrategy::UniformSampleAll);
        let (mean, std_err, _) = average_estimate(&mut integrator, &scene, SamplerKind::Stratified, 4);
        assert!(approx_eq!(f32, mean, 0.5 * INV_PI * 0.25, epsilon = 1e-5));
        assert!(approx_eq!(f32, std_err, 0.0, epsilon = 1e-6));
    }

    #[test]
    fn blocked_point_light_gives_zero() {
        let light: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 2.0), Spectrum::ONE));
        let blocker: ArcPrimitive = Arc::new(GeometricPrimitive::new(
            Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 1.0), 0.25)),
            None,
            None,
        ));
        let scene = scene_with(vec![blocker], vec![light]);

        let mut integrator = DirectLightingIntegrator::new(LightStrategy::UniformSampleAll);
        let (mean, _, _) = average_estimate(&mut integrator, &scene, SamplerKind::Random, 8);
        assert_eq!(mean, 0.0);
    }

    #[test]
    fn one_light_strategies_match_all_lights() {
        let lights = || -> Vec<ArcLight> {
            let dim: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 2.0), Spectrum::ONE));
            let bright: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 1.0), Spectrum::new(3.0)));
            vec![dim, bright]
        };
        // 0.5 / pi * (1 / 4 + 3 / 1).
        let expected = 0.5 * INV_PI * 3.25;

        for strategy in [LightStrategy::UniformSampleOne, LightStrategy::PowerSampleOne] {
            let scene = scene_with(vec![], lights());
            let mut integrator = DirectLightingIntegrator::new(strategy);
            let (mean, std_err, _) = average_estimate(&mut integrator, &scene, SamplerKind::Random, 4096);
            assert!(
                (mean - expected).abs() <= 4.0 * std_err + 1e-4,
                "{}: mean {} expected {}",
                strategy,
                mean,
                expected
            );
        }
    }

    #[test]
    fn power_sampling_prefers_bright_lights() {
        let dim: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 2.0), Spectrum::ONE));
        let bright: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 1.0), Spectrum::new(3.0)));
        let scene = scene_with(vec![], vec![dim, bright]);

        let mut integrator = DirectLightingIntegrator::new(LightStrategy::PowerSampleOne);
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(1, 1));
        let mut sampler = create_sampler(SamplerKind::Random, bounds, 1, PixelsOrderKind::Consecutive, 1);
        integrator.request_samples(sampler.as_mut(), &scene);

        let (i, pdf) = integrator.choose_light(0.1);
        assert_eq!(i, 0);
        assert!(approx_eq!(f32, pdf, 0.25, epsilon = 1e-6));
        let (i, pdf) = integrator.choose_light(0.9);
        assert_eq!(i, 1);
        assert!(approx_eq!(f32, pdf, 0.75, epsilon = 1e-6));
    }

    #[test]
    fn power_sampling_without_power_picks_lights_uniformly() {
        let first: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 2.0), Spectrum::ZERO));
        let second: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 1.0), Spectrum::ZERO));
        let scene = scene_with(vec![], vec![first, second]);

        let mut integrator = DirectLightingIntegrator::new(LightStrategy::PowerSampleOne);
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(1, 1));
        let mut sampler = create_sampler(SamplerKind::Random, bounds, 1, PixelsOrderKind::Consecutive, 1);
        integrator.request_samples(sampler.as_mut(), &scene);

        let (i, pdf) = integrator.choose_light(0.1);
        assert_eq!(i, 0);
        assert!(approx_eq!(f32, pdf, 0.5, epsilon = 1e-6));
        let (i, pdf) = integrator.choose_light(0.9);
        assert_eq!(i, 1);
        assert!(approx_eq!(f32, pdf, 0.5, epsilon = 1e-6));
    }

    #[test]
    fn no_lights_gives_black() {
        let scene = scene_with(vec![], vec![]);
        let mut integrator = DirectLightingIntegrator::new(LightStrategy::UniformSampleOne);
        let (mean, _, _) = average_estimate(&mut integrator, &scene, SamplerKind::Random, 2);
        assert_eq!(mean, 0.0);
    }

    #[test]
    #[should_panic(expected = "request_samples() was not called")]
    fn estimate_without_requested_samples_panics() {
        let light: ArcLight = Arc::new(PointLight::new(Point3f::new(0.0, 0.0, 2.0), Spectrum::ONE));
        let scene = scene_with(vec![], vec![light]);

        // Light count matches so only the missing sequences trip.
        let mut integrator = DirectLightingIntegrator::new(LightStrategy::UniformSampleAll);
        integrator.n_lights = 1;

        let arena = MemoryPool::new();
        let si = receiver();
        let bsdf = MatteMaterial::new(Spectrum::new(0.5), 0.0).compute_scattering_functions(&arena, &si);
        let sample = Sample::new(Default::default());
        integrator.compute_direct_lighting(&scene, &si, &si.hit.wo, bsdf, &sample, &arena);
    }
}
