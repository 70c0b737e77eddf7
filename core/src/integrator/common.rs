//! Common

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::pbrt::*;
use crate::reflection::*;
use crate::sampling::*;
use crate::scene::*;
use crate::spectrum::*;

/// Compute a direct lighting estimate for a light source sample by applying
/// multiple importance sampling. Delta lights are only sampled through the
/// light; every other light also gets a BSDF-sampled term and both terms are
/// weighted with the power heuristic.
///
/// * `scene`        - The scene.
/// * `si`           - The surface interaction.
/// * `wo`           - Outgoing direction pointing toward the viewer.
/// * `bsdf`         - The BSDF at the surface interaction.
/// * `light`        - The light.
/// * `u_light`      - Light sample.
/// * `u_scattering` - Scattering sample.
/// * `bsdf_flags`   - BxDF components to consider.
#[allow(clippy::too_many_arguments)]
pub fn estimate_direct(
    scene: &Scene,
    si: &SurfaceInteraction,
    wo: &Vector3f,
    bsdf: &BSDF,
    light: &ArcLight,
    u_light: &Point2f,
    u_scattering: &Point2f,
    bsdf_flags: BxDFType,
) -> Spectrum {
    let hit = &si.hit;
    let ns = bsdf.shading_normal();
    let mut ld = Spectrum::ZERO;

    // Sample light source with multiple importance sampling.
    let Li {
        wi,
        pdf: light_pdf,
        visibility,
        value: mut li,
    } = light.sample_li(hit, u_light);
    if light_pdf > 0.0 && !li.is_black() {
        // Evaluate BSDF for light sampling strategy.
        let f = bsdf.f(wo, &wi, bsdf_flags) * wi.abs_dot(&ns);
        let scattering_pdf = bsdf.pdf(wo, &wi, bsdf_flags);

        if !f.is_black() {
            // Compute effect of visibility for light source sample.
            if let Some(vis) = visibility {
                if !vis.unoccluded(scene) {
                    trace!("  {}: shadow ray blocked", light.get_name());
                    li = Spectrum::ZERO;
                }
            }

            // Add light's contribution to reflected radiance.
            if !li.is_black() {
                if light.is_delta_light() {
                    ld += f * li / light_pdf;
                } else {
                    let weight = power_heuristic(1, light_pdf, 1, scattering_pdf);
                    ld += f * li * weight / light_pdf;
                }
            }
        }
    }
    trace!("  {} light sampling: {}", light.get_name(), ld);

    // Sample BSDF with multiple importance sampling.
    if !light.is_delta_light() {
        let BxDFSample {
            f,
            pdf: scattering_pdf,
            wi,
            sampled_type,
        } = bsdf.sample_f(wo, u_scattering, bsdf_flags);
        let f = f * wi.abs_dot(&ns);

        if !f.is_black() && scattering_pdf > 0.0 {
            // Account for light contributions along sampled direction `wi`.
            let mut weight = 1.0;
            if !sampled_type.matches(BxDFType::BSDF_SPECULAR) {
                let light_pdf = light.pdf_li(hit, &wi);
                if light_pdf == 0.0 {
                    return ld;
                }
                weight = power_heuristic(1, scattering_pdf, 1, light_pdf);
            }

            // Add light contribution from material sampling.
            let mut ray = hit.spawn_ray(&wi);
            let li = match scene.intersect(&mut ray) {
                Some(light_isect) => {
                    let area_light = light_isect.primitive.and_then(|p| p.get_area_light());
                    match area_light {
                        Some(area_light) if same_light(area_light, light) => light_isect.le(&(-wi)),
                        _ => Spectrum::ZERO,
                    }
                }
                None => light.le(&ray),
            };

            if !li.is_black() {
                let contrib = f * li * weight / scattering_pdf;
                trace!("  {} BSDF sampling: {}", light.get_name(), contrib);
                ld += contrib;
            }
        }
    }

    ld
}

/// Returns the light power distribution in a scene or `None` if the scene has
/// no lights.
///
/// * `scene` - The scene.
pub fn compute_light_power_distribution(scene: &Scene) -> Option<Distribution1D> {
    if scene.lights.is_empty() {
        None
    } else {
        let light_power: Vec<Float> = scene.lights.iter().map(|light| light.power().y()).collect();
        Some(Distribution1D::new(light_power))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::*;
    use crate::primitive::*;
    use float_cmp::*;
    use std::sync::Arc;

    /// Isotropic point light at a fixed position.
    struct TestPointLight {
        p: Point3f,
        intensity: Spectrum,
    }

    impl Light for TestPointLight {
        fn get_name(&self) -> &'static str {
            "test point"
        }

        fn get_type(&self) -> LightType {
            LightType::DELTA_POSITION_LIGHT
        }

        fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
            let wi = (self.p - hit.p).normalize();
            let vis = VisibilityTester::new(*hit, Hit::new_minimal(self.p, hit.time));
            Li::new(wi, 1.0, Some(vis), self.intensity / self.p.distance_squared(&hit.p))
        }

        fn power(&self) -> Spectrum {
            FOUR_PI * self.intensity
        }

        fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
            0.0
        }
    }

    /// Axis aligned square in the plane `y = height`, facing -y.
    struct TestBlocker {
        height: Float,
    }

    impl Shape for TestBlocker {
        fn get_type(&self) -> &'static str {
            "blocker"
        }

        fn world_bound(&self) -> Bounds3f {
            Bounds3f::new(
                Point3f::new(-1.0, self.height, -1.0),
                Point3f::new(1.0, self.height, 1.0),
            )
        }

        fn intersect<'scene>(&self, r: &Ray) -> Option<Intersection<'scene>> {
            if r.d.y == 0.0 {
                return None;
            }
            let t = (self.height - r.o.y) / r.d.y;
            if t <= 0.0 || t >= r.t_max {
                return None;
            }
            let p = r.at(t);
            if p.x.abs() > 1.0 || p.z.abs() > 1.0 {
                return None;
            }
            let si = SurfaceInteraction::new(
                p,
                Point2f::new(0.5, 0.5),
                -r.d,
                Vector3f::new(1.0, 0.0, 0.0),
                Vector3f::new(0.0, -1.0, 0.0),
                0.0,
            );
            Some(Intersection::new(t, si))
        }

        fn intersect_p(&self, r: &Ray) -> bool {
            self.intersect(r).is_some()
        }

        fn area(&self) -> Float {
            4.0
        }

        fn sample_area(&self, _u: &Point2f) -> (Hit, Float) {
            (Hit::new_minimal(Point3f::new(0.0, self.height, 0.0), 0.0), 0.25)
        }
    }

    fn shading_point() -> SurfaceInteraction<'static> {
        SurfaceInteraction::new(
            Point3f::ZERO,
            Point2f::new(0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            0.0,
        )
    }

    fn scene_with(light: ArcLight, primitives: Vec<ArcPrimitive>) -> Scene {
        Scene::new(Arc::new(PrimitiveList::new(primitives)), vec![light])
    }

    fn estimate(scene: &Scene, light: &ArcLight) -> Spectrum {
        let arena = MemoryPool::new();
        let si = shading_point();
        let bsdf = BSDF::alloc(&arena, &si, None);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        estimate_direct(
            scene,
            &si,
            &si.hit.wo,
            bsdf,
            light,
            &Point2f::new(0.3, 0.7),
            &Point2f::new(0.6, 0.2),
            BxDFType::BSDF_ALL & !BxDFType::BSDF_SPECULAR,
        )
    }

    #[test]
    fn delta_light_gives_closed_form_value() {
        let light: ArcLight = Arc::new(TestPointLight {
            p: Point3f::new(0.0, 2.0, 0.0),
            intensity: Spectrum::new(4.0),
        });
        let scene = scene_with(Arc::clone(&light), vec![]);
        let l = estimate(&scene, &light);

        // f = 0.5 / pi, Li = 4 / 2^2, cos = 1.
        let expected = 0.5 * INV_PI;
        assert!(approx_eq!(f32, l[0], expected, epsilon = 1e-5));
        assert!(approx_eq!(f32, l[2], expected, epsilon = 1e-5));
    }

    #[test]
    fn occluded_delta_light_contributes_nothing() {
        let light: ArcLight = Arc::new(TestPointLight {
            p: Point3f::new(0.0, 2.0, 0.0),
            intensity: Spectrum::new(4.0),
        });
        let blocker: ArcPrimitive = Arc::new(GeometricPrimitive::new(
            Arc::new(TestBlocker { height: 1.0 }),
            None,
            None,
        ));
        let scene = scene_with(Arc::clone(&light), vec![blocker]);
        assert!(estimate(&scene, &light).is_black());
    }

    #[test]
    fn power_distribution_follows_light_power() {
        let dim: ArcLight = Arc::new(TestPointLight {
            p: Point3f::new(0.0, 2.0, 0.0),
            intensity: Spectrum::new(1.0),
        });
        let bright: ArcLight = Arc::new(TestPointLight {
            p: Point3f::new(0.0, 3.0, 0.0),
            intensity: Spectrum::new(3.0),
        });
        let scene = Scene::new(Arc::new(PrimitiveList::new(vec![])), vec![dim, bright]);

        let distrib = compute_light_power_distribution(&scene).expect("scene has lights");
        assert!(approx_eq!(f32, distrib.discrete_pdf(0), 0.25, epsilon = 1e-6));
        assert!(approx_eq!(f32, distrib.discrete_pdf(1), 0.75, epsilon = 1e-6));

        let empty = Scene::new(Arc::new(PrimitiveList::new(vec![])), vec![]);
        assert!(compute_light_power_distribution(&empty).is_none());
    }
}
