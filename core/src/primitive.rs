//! Primitives

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::material::*;
use std::sync::Arc;

/// Primitive ties geometry to its material and, for emitters, its area light.
pub trait Primitive {
    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns the closest intersection along the ray and shortens `r.t_max`
    /// to it.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>>;

    /// Returns `true` if the ray hits anything before `r.t_max`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool;

    /// Returns the area light attached to the primitive, if any.
    fn get_area_light(&self) -> Option<&ArcLight> {
        None
    }

    /// Returns the material of the primitive, if any.
    fn get_material(&self) -> Option<&ArcMaterial> {
        None
    }
}

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive + Send + Sync>;

/// A shape with a material and an optional area light.
pub struct GeometricPrimitive {
    /// The shape.
    pub shape: ArcShape,

    /// The material.
    pub material: Option<ArcMaterial>,

    /// Area light emitting from the shape's surface.
    pub area_light: Option<ArcLight>,
}

impl GeometricPrimitive {
    /// Create a new `GeometricPrimitive`.
    ///
    /// * `shape`      - The shape.
    /// * `material`   - The material.
    /// * `area_light` - Area light emitting from the shape's surface.
    pub fn new(
        shape: ArcShape,
        material: Option<ArcMaterial>,
        area_light: Option<ArcLight>,
    ) -> Self {
        Self {
            shape,
            material,
            area_light,
        }
    }
}

impl Primitive for GeometricPrimitive {
    fn world_bound(&self) -> Bounds3f {
        self.shape.world_bound()
    }

    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>> {
        let Intersection { t, mut isect } = self.shape.intersect(r)?;
        r.t_max = t;
        isect.primitive = Some(self);
        Some(isect)
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.shape.intersect_p(r)
    }

    fn get_area_light(&self) -> Option<&ArcLight> {
        self.area_light.as_ref()
    }

    fn get_material(&self) -> Option<&ArcMaterial> {
        self.material.as_ref()
    }
}

/// Aggregate that tests every primitive in turn.
pub struct PrimitiveList {
    primitives: Vec<ArcPrimitive>,
    bounds: Bounds3f,
}

impl PrimitiveList {
    /// Create a new `PrimitiveList`.
    ///
    /// * `primitives` - The primitives.
    pub fn new(primitives: Vec<ArcPrimitive>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3f::EMPTY, |b, p| b.union(&p.world_bound()));
        Self { primitives, bounds }
    }
}

impl Primitive for PrimitiveList {
    fn world_bound(&self) -> Bounds3f {
        self.bounds
    }

    fn intersect(&self, r: &mut Ray) -> Option<SurfaceInteraction<'_>> {
        // Each hit shortens the ray so the last one found is the closest.
        let mut closest = None;
        for primitive in self.primitives.iter() {
            if let Some(isect) = primitive.intersect(r) {
                closest = Some(isect);
            }
        }
        closest
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.primitives.iter().any(|p| p.intersect_p(r))
    }
}
