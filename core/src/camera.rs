//! Camera

use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;
use std::sync::Arc;

/// Camera trait provides common behavior.
pub trait Camera {
    /// Returns a ray corresponding to a given sample. It also returns, a floating
    /// point value that affects how much the radiance arriving at the film plane
    /// will contribute to final image.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> (Ray, Float);

    /// Returns the image resolution the camera projects onto.
    fn get_resolution(&self) -> Point2i;
}

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera + Send + Sync>;

/// Stores all of the sample values needed to specify a camera ray.
#[derive(Copy, Clone, Default)]
pub struct CameraSample {
    /// Point on the film to which the generated ray carries radiance.
    pub p_film: Point2f,

    /// The point on the lens the ray passes through (for cameras that
    /// support lenses).
    pub p_lens: Point2f,
}

impl CameraSample {
    /// Create a new `CameraSample`.
    ///
    /// * `p_film` - Point on the film to which the generated ray carries radiance.
    /// * `p_lens` - The point on the lens the ray passes through.
    pub fn new(p_film: Point2f, p_lens: Point2f) -> Self {
        Self { p_film, p_lens }
    }
}

impl fmt::Display for CameraSample {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CameraSample<p_film: {}, p_lens: {}>", self.p_film, self.p_lens)
    }
}
