//! Interactions

use crate::geometry::*;
use crate::pbrt::*;

mod surface_interaction;

pub use surface_interaction::*;

/// Hit provides the data shared by every point where light interacts with
/// the scene: surface hits, points sampled on lights and shading points.
#[derive(Copy, Clone, Debug)]
pub struct Hit {
    /// Point of interaction.
    pub p: Point3f,

    /// Time when interaction occurred.
    pub time: Float,

    /// The negative ray direction (outgoing direction used when computing
    /// lighting at points).
    pub wo: Vector3f,

    /// Surface normal at the point `p`. Zero for points not on a surface.
    pub n: Normal3f,
}

impl Hit {
    /// Create a new hit. `wo` is normalized unless it is a zero vector.
    ///
    /// * `p`    - Point of interaction.
    /// * `time` - Time when interaction occurred.
    /// * `wo`   - The negative ray direction.
    /// * `n`    - Surface normal at the point `p`.
    pub fn new(p: Point3f, time: Float, wo: Vector3f, n: Normal3f) -> Self {
        let wo = if wo.length_squared() > 0.0 {
            wo.normalize()
        } else {
            wo
        };
        Self { p, time, wo, n }
    }

    /// Create a new hit for a point that is not on a surface.
    ///
    /// * `p`    - Point of interaction.
    /// * `time` - Time when interaction occurred.
    pub fn new_minimal(p: Point3f, time: Float) -> Self {
        Self {
            p,
            time,
            wo: Vector3f::ZERO,
            n: Normal3f::ZERO,
        }
    }

    /// Returns `true` if this is a surface interaction.
    pub fn is_surface_interaction(&self) -> bool {
        self.n != Normal3f::ZERO
    }

    /// Offset the origin of a ray leaving this point along the normal so that
    /// it does not re-intersect the surface.
    ///
    /// * `w` - Direction the ray will travel.
    fn offset_origin(&self, w: &Vector3f) -> Point3f {
        if !self.is_surface_interaction() {
            return self.p;
        }
        let scale = max(
            1.0,
            max(self.p.x.abs(), max(self.p.y.abs(), self.p.z.abs())),
        );
        let offset = self.n * (RAY_EPSILON * scale);
        if w.dot(&self.n) < 0.0 {
            self.p - offset
        } else {
            self.p + offset
        }
    }

    /// Returns a ray leaving this point in a given direction.
    ///
    /// * `d` - Outgoing direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        Ray::new(self.offset_origin(d), *d, INFINITY)
    }

    /// Returns a ray from this point that stops just short of another point.
    ///
    /// * `p2` - The other point.
    pub fn spawn_ray_to_point(&self, p2: &Point3f) -> Ray {
        let o = self.offset_origin(&(*p2 - self.p));
        Ray::new(o, *p2 - o, 1.0 - SHADOW_EPSILON)
    }

    /// Returns a ray from this point that stops just short of another
    /// interaction, offsetting both ends.
    ///
    /// * `it` - The other interaction.
    pub fn spawn_ray_to_hit(&self, it: &Hit) -> Ray {
        let p0 = self.offset_origin(&(it.p - self.p));
        let p1 = it.offset_origin(&(p0 - it.p));
        Ray::new(p0, p1 - p0, 1.0 - SHADOW_EPSILON)
    }
}
