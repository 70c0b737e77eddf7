//! Surface Interactions

use super::Hit;
use crate::geometry::*;
use crate::memory::*;
use crate::pbrt::*;
use crate::primitive::*;
use crate::reflection::*;
use crate::spectrum::*;

/// SurfaceInteraction represents geometry of a particular point on a surface.
///
/// The lifetime specifiers:
/// * `'scene` - Shared reference to the scene containing primitive.
#[derive(Clone)]
pub struct SurfaceInteraction<'scene> {
    /// The common interaction data.
    pub hit: Hit,

    /// The uv coordinates from surface parametrization.
    pub uv: Point2f,

    /// Parametric partial derivative of the point ∂p/∂u.
    pub dpdu: Vector3f,

    /// Shading geometry used for perturbed values.
    pub shading: Shading,

    /// The primitive that was hit. Shapes leave this empty and the primitive
    /// owning the shape fills it in.
    pub primitive: Option<&'scene dyn Primitive>,
}

/// Shading geometry.
#[derive(Copy, Clone, Debug)]
pub struct Shading {
    /// Shading normal.
    pub n: Normal3f,

    /// Shading tangent ∂p/∂u.
    pub dpdu: Vector3f,
}

impl<'scene> SurfaceInteraction<'scene> {
    /// Create a new surface interaction. The shading geometry starts out equal
    /// to the true geometry.
    ///
    /// * `p`    - Point of interaction.
    /// * `uv`   - The uv coordinates from surface parametrization.
    /// * `wo`   - The negative ray direction.
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    /// * `n`    - Unit surface normal.
    /// * `time` - Time when interaction occurred.
    pub fn new(
        p: Point3f,
        uv: Point2f,
        wo: Vector3f,
        dpdu: Vector3f,
        n: Normal3f,
        time: Float,
    ) -> Self {
        Self {
            hit: Hit::new(p, time, wo, n),
            uv,
            dpdu,
            shading: Shading { n, dpdu },
            primitive: None,
        }
    }

    /// Returns the emitted radiance at a surface point intersected by a ray
    /// if the primitive carries an area light.
    ///
    /// * `w` - Outgoing direction from the surface.
    pub fn le(&self, w: &Vector3f) -> Spectrum {
        self.primitive
            .and_then(|primitive| primitive.get_area_light())
            .map_or(Spectrum::ZERO, |area_light| area_light.l(&self.hit, w))
    }

    /// Ask the hit primitive's material for the BSDF at this point. Returns
    /// `None` for primitives without a material; rays pass through them.
    ///
    /// * `arena` - The memory pool the BSDF is allocated from.
    pub fn compute_scattering_functions<'arena>(
        &self,
        arena: &'arena MemoryPool,
    ) -> Option<&'arena BSDF<'arena>> {
        self.primitive
            .and_then(|primitive| primitive.get_material())
            .map(|material| material.compute_scattering_functions(arena, self))
    }
}

/// Stores geometric information about a single ray-shape intersection.
pub struct Intersection<'scene> {
    /// The parameter along the ray where intersection occurred.
    pub t: Float,

    /// The surface interaction details.
    pub isect: SurfaceInteraction<'scene>,
}

impl<'scene> Intersection<'scene> {
    /// Create a new intersection.
    ///
    /// * `t`     - The parameter along the ray where intersection occurred.
    /// * `isect` - The surface interaction details.
    pub fn new(t: Float, isect: SurfaceInteraction<'scene>) -> Self {
        Self { t, isect }
    }
}
