//! Integrator

mod common;
mod sampler_renderer;

use crate::geometry::*;
use crate::interaction::*;
use crate::memory::*;
use crate::sampler::*;
use crate::scene::Scene;
use crate::spectrum::*;

// Re-export.
pub use common::*;
pub use sampler_renderer::*;

/// Estimates the radiance leaving a surface point toward the camera.
/// Implementations hold no per-call mutable state so one instance is shared by
/// all rendering threads; each call gets its own `Sample` and `MemoryPool`.
pub trait SurfaceIntegrator: Send + Sync {
    /// Returns the integrator name for logging.
    fn get_name(&self) -> &'static str;

    /// Reserve the sample sequences the integrator consumes per call. This
    /// must be called once before sample generation starts.
    ///
    /// * `sampler` - The sampler.
    /// * `scene`   - The scene.
    fn request_samples(&mut self, sampler: &mut dyn Sampler, scene: &Scene);

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
    ) -> Spectrum;
}
