//! Shapes

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Shape common functions. Shapes are defined directly in world space.
pub trait Shape {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned. The primitive field of
    /// the returned interaction is left empty.
    ///
    /// * `r` - The ray.
    fn intersect<'scene>(&self, r: &Ray) -> Option<Intersection<'scene>>;

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float;

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface.
    ///
    /// NOTE: The returned `Hit` value will have `wo` = Vector3f::ZERO.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float);

    /// Sample a point on the shape given a reference point and return the PDF
    /// with respect to the solid angle from ref.
    ///
    /// * `hit` - Reference point.
    /// * `u`   - Sample value to use.
    fn sample_solid_angle(&self, hit: &Hit, u: &Point2f) -> (Hit, Float) {
        sample_solid_angle_by_area(self, hit, u)
    }

    /// Returns the PDF with respect to solid angle of sampling direction `wi`
    /// from the reference point.
    ///
    /// * `hit` - The reference point.
    /// * `wi`  - The incident direction.
    fn pdf_solid_angle(&self, hit: &Hit, wi: &Vector3f) -> Float {
        pdf_solid_angle_by_area(self, hit, wi)
    }
}

/// Sample a point uniformly by area and convert the PDF to solid angle
/// measure from the reference point.
///
/// * `shape` - The shape.
/// * `hit`   - Reference point.
/// * `u`     - Sample value to use.
pub fn sample_solid_angle_by_area<S: Shape + ?Sized>(shape: &S, hit: &Hit, u: &Point2f) -> (Hit, Float) {
    let (intr, pdf) = shape.sample_area(u);
    let wi = intr.p - hit.p;
    if wi.length_squared() == 0.0 {
        return (intr, 0.0);
    }

    // Convert from area measure to solid angle measure.
    let wi = wi.normalize();
    let cos_theta = intr.n.abs_dot(&(-wi));
    let mut pdf = if cos_theta > 0.0 {
        pdf * hit.p.distance_squared(&intr.p) / cos_theta
    } else {
        0.0
    };
    if pdf.is_infinite() {
        pdf = 0.0;
    }
    (intr, pdf)
}

/// Returns the solid angle PDF of `sample_solid_angle_by_area()` for a
/// direction by intersecting the shape.
///
/// * `shape` - The shape.
/// * `hit`   - The reference point.
/// * `wi`    - The incident direction.
pub fn pdf_solid_angle_by_area<S: Shape + ?Sized>(shape: &S, hit: &Hit, wi: &Vector3f) -> Float {
    let ray = hit.spawn_ray(wi);
    match shape.intersect(&ray) {
        Some(Intersection { t: _, isect }) => {
            let denom = isect.hit.n.abs_dot(&(-*wi)) * shape.area();
            if denom == 0.0 {
                return 0.0;
            }
            let pdf = hit.p.distance_squared(&isect.hit.p) / denom;
            if pdf.is_infinite() {
                0.0
            } else {
                pdf
            }
        }
        None => 0.0,
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape + Send + Sync>;
