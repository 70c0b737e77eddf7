//! Scene

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::primitive::*;
use std::sync::Arc;

/// Scene is the read-only collection of geometry and lights shared by all
/// rendering threads.
pub struct Scene {
    /// Aggregate of all primitives.
    pub aggregate: ArcPrimitive,

    /// All light sources.
    pub lights: Vec<ArcLight>,

    /// Lights that contribute along rays escaping the scene.
    pub infinite_lights: Vec<ArcLight>,

    /// Bounds of the aggregate.
    pub world_bound: Bounds3f,
}

impl Scene {
    /// Create a new scene and preprocess its lights.
    ///
    /// * `aggregate` - Aggregate of all primitives.
    /// * `lights`    - All light sources.
    pub fn new(aggregate: ArcPrimitive, lights: Vec<ArcLight>) -> Self {
        let world_bound = aggregate.world_bound();
        let infinite_lights = lights
            .iter()
            .filter(|light| light.get_type().matches(LightType::INFINITE_LIGHT))
            .map(Arc::clone)
            .collect();

        let scene = Self {
            aggregate,
            lights,
            infinite_lights,
            world_bound,
        };
        for light in scene.lights.iter() {
            light.preprocess(&scene);
        }
        info!(
            "Scene has {} lights ({} infinite)",
            scene.lights.len(),
            scene.infinite_lights.len()
        );
        scene
    }

    /// Returns the closest intersection along the ray and shortens `r.t_max`
    /// to it.
    ///
    /// * `r` - The ray.
    pub fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>> {
        debug_assert!(!r.d.has_nans());
        self.aggregate.intersect(r)
    }

    /// Returns `true` if the ray hits anything before `r.t_max`.
    ///
    /// * `r` - The ray.
    pub fn intersect_p(&self, r: &Ray) -> bool {
        debug_assert!(!r.d.has_nans());
        self.aggregate.intersect_p(r)
    }
}
