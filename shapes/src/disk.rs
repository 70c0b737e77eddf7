//! Disks

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;

/// A one-sided disk placed in world space. The normal gives the front side.
#[derive(Clone)]
pub struct Disk {
    /// Center of the disk.
    pub center: Point3f,

    /// Radius of the disk.
    pub radius: Float,

    /// Local frame with the disk normal as `n`.
    frame: Frame,
}

impl Disk {
    /// Create a new disk.
    ///
    /// * `center` - Center of the disk.
    /// * `normal` - Surface normal.
    /// * `radius` - Radius of the disk.
    pub fn new(center: Point3f, normal: Normal3f, radius: Float) -> Self {
        assert!(radius > 0.0, "Disk radius {} must be positive", radius);
        let n = normal.normalize();
        Self {
            center,
            radius,
            frame: Frame::new(&n, &Vector3f::new(1.0, 0.0, 0.0)),
        }
    }

    /// Returns the surface normal.
    pub fn normal(&self) -> Normal3f {
        self.frame.n
    }
}

impl Shape for Disk {
    fn get_type(&self) -> &'static str {
        "disk"
    }

    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f {
        let n = self.frame.n;
        let extent = |c: Float| self.radius * safe_sqrt(1.0 - c * c);
        let e = Vector3f::new(extent(n.x), extent(n.y), extent(n.z));
        Bounds3f::new(self.center - e, self.center + e)
    }

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect<'scene>(&self, r: &Ray) -> Option<Intersection<'scene>> {
        // Reject disk intersections for rays parallel to the disk's plane.
        let n = self.frame.n;
        let denom = r.d.dot(&n);
        if denom == 0.0 {
            return None;
        }
        let t_shape_hit = (self.center - r.o).dot(&n) / denom;
        if t_shape_hit <= 0.0 || t_shape_hit >= r.t_max {
            return None;
        }

        // See if hit point is inside disk radius.
        let local = self.frame.to_local(&(r.at(t_shape_hit) - self.center));
        let dist2 = local.x * local.x + local.y * local.y;
        if dist2 > self.radius * self.radius {
            return None;
        }

        // Find parametric representation of disk hit.
        let mut phi = local.y.atan2(local.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }
        let uv = Point2f::new(phi * INV_TWO_PI, 1.0 - dist2.sqrt() / self.radius);
        let dpdu = self
            .frame
            .from_local(&Vector3f::new(-TWO_PI * local.y, TWO_PI * local.x, 0.0));

        // Refine disk intersection point onto the plane.
        let p_hit = self.center + self.frame.from_local(&Vector3f::new(local.x, local.y, 0.0));

        let si = SurfaceInteraction::new(p_hit, uv, -r.d, dpdu, n, 0.0);
        Some(Intersection::new(t_shape_hit, si))
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float {
        PI * self.radius * self.radius
    }

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let pd = concentric_sample_disk(u);
        let offset = self
            .frame
            .from_local(&Vector3f::new(pd.x * self.radius, pd.y * self.radius, 0.0));
        let it = Hit::new(self.center + offset, 0.0, Vector3f::ZERO, self.frame.n);
        (it, 1.0 / self.area())
    }
}
