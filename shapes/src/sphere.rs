//! Spheres

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;

/// Squared sine of the smallest cone half-angle (1.5 degrees) for which the
/// cone sampling formula is numerically stable.
const SIN2_THETA_MAX_SMALL: Float = 0.00068523;

/// A full sphere placed in world space.
#[derive(Clone)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3f,

    /// Radius of sphere.
    pub radius: Float,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `center` - Center of the sphere.
    /// * `radius` - Radius of sphere.
    pub fn new(center: Point3f, radius: Float) -> Self {
        assert!(radius > 0.0, "Sphere radius {} must be positive", radius);
        Self { center, radius }
    }

    /// Returns the parametric distance to the nearest hit in `(0, t_max)`.
    ///
    /// * `r` - The ray.
    fn hit_distance(&self, r: &Ray) -> Option<Float> {
        let oc = r.o - self.center;
        let a = r.d.length_squared();
        let b = 2.0 * oc.dot(&r.d);
        let c = oc.length_squared() - self.radius * self.radius;

        // Check quadric shape `t0` and `t1` for nearest intersection.
        let (t0, t1) = quadratic(a, b, c)?;
        if t0 >= r.t_max || t1 <= 0.0 {
            return None;
        }
        if t0 > 0.0 {
            Some(t0)
        } else if t1 < r.t_max {
            Some(t1)
        } else {
            None
        }
    }
}

impl Shape for Sphere {
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect<'scene>(&self, r: &Ray) -> Option<Intersection<'scene>> {
        let t_shape_hit = self.hit_distance(r)?;

        // Refine sphere intersection point.
        let d = r.at(t_shape_hit) - self.center;
        let len = d.length();
        if len == 0.0 {
            return None;
        }
        let n = d / len;
        let p_hit = self.center + n * self.radius;

        // Find parametric representation of sphere hit.
        let mut phi = n.y.atan2(n.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }
        let theta = clamp(n.z, -1.0, 1.0).acos();
        let uv = Point2f::new(phi * INV_TWO_PI, theta * INV_PI);
        let dpdu = Vector3f::new(-TWO_PI * d.y, TWO_PI * d.x, 0.0);

        let si = SurfaceInteraction::new(p_hit, uv, -r.d, dpdu, n, 0.0);
        Some(Intersection::new(t_shape_hit, si))
    }

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.hit_distance(r).is_some()
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float {
        FOUR_PI * self.radius * self.radius
    }

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let n = uniform_sample_sphere(u);
        let p = self.center + n * self.radius;
        let it = Hit::new(p, 0.0, Vector3f::ZERO, n);
        (it, 1.0 / self.area())
    }

    /// Sample a point on the part of the sphere visible from the reference
    /// point by sampling the cone of directions it subtends. Points inside
    /// the sphere fall back to area sampling.
    ///
    /// * `hit` - Reference point.
    /// * `u`   - Sample value to use.
    fn sample_solid_angle(&self, hit: &Hit, u: &Point2f) -> (Hit, Float) {
        let dc2 = hit.p.distance_squared(&self.center);
        if dc2 <= self.radius * self.radius {
            return sample_solid_angle_by_area(self, hit, u);
        }

        // Compute coordinate system for sphere sampling.
        let dc = dc2.sqrt();
        let inv_dc = 1.0 / dc;
        let wc = (self.center - hit.p) * inv_dc;
        let (wc_x, wc_y) = coordinate_system(&wc);

        // Compute theta and phi values for sample in cone.
        let sin_theta_max = self.radius * inv_dc;
        let sin2_theta_max = sin_theta_max * sin_theta_max;
        let inv_sin_theta_max = 1.0 / sin_theta_max;
        let cos_theta_max = safe_sqrt(1.0 - sin2_theta_max);

        let mut cos_theta = (cos_theta_max - 1.0) * u[0] + 1.0;
        let mut sin2_theta = 1.0 - cos_theta * cos_theta;
        if sin2_theta_max < SIN2_THETA_MAX_SMALL {
            // Fall back to a Taylor expansion for small angles.
            sin2_theta = sin2_theta_max * u[0];
            cos_theta = (1.0 - sin2_theta).sqrt();
        }

        // Compute angle alpha from center of sphere to sampled point on surface.
        let cos_alpha = sin2_theta * inv_sin_theta_max
            + cos_theta * safe_sqrt(1.0 - sin2_theta * inv_sin_theta_max * inv_sin_theta_max);
        let sin_alpha = safe_sqrt(1.0 - cos_alpha * cos_alpha);
        let phi = u[1] * TWO_PI;

        // Compute surface normal and sampled point on sphere.
        let n = spherical_direction_in_frame(sin_alpha, cos_alpha, phi, &(-wc_x), &(-wc_y), &(-wc));
        let p = self.center + n * self.radius;
        let it = Hit::new(p, hit.time, Vector3f::ZERO, n);

        (it, uniform_cone_pdf(cos_theta_max))
    }

    /// Returns the PDF of the cone sampling in `sample_solid_angle()`.
    ///
    /// * `hit` - The reference point.
    /// * `wi`  - The incident direction.
    fn pdf_solid_angle(&self, hit: &Hit, wi: &Vector3f) -> Float {
        let dc2 = hit.p.distance_squared(&self.center);
        let r2 = self.radius * self.radius;
        if dc2 <= r2 {
            return pdf_solid_angle_by_area(self, hit, wi);
        }

        // Compute general sphere PDF.
        let cos_theta_max = safe_sqrt(1.0 - r2 / dc2);
        trace!("sphere cone pdf cos_theta_max {}", cos_theta_max);
        uniform_cone_pdf(cos_theta_max)
    }
}
