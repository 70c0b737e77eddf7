//! Common geometric helpers.

use crate::geometry::*;
use crate::pbrt::*;

/// Construct a local coordinate system given only a single 3D unit vector.
/// Returns the two remaining axes.
///
/// * `v1` - Unit vector.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if v1.x.abs() > v1.y.abs() {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3 = v1.cross(&v2);
    (v2, v3)
}

/// Converts spherical coordinates into a direction with respect to the
/// given basis vectors.
///
/// * `sin_theta` - Sine of polar angle.
/// * `cos_theta` - Cosine of polar angle.
/// * `phi`       - Azimuthal angle.
/// * `x`         - Basis vector for x-axis.
/// * `y`         - Basis vector for y-axis.
/// * `z`         - Basis vector for z-axis.
pub fn spherical_direction_in_frame(
    sin_theta: Float,
    cos_theta: Float,
    phi: Float,
    x: &Vector3f,
    y: &Vector3f,
    z: &Vector3f,
) -> Vector3f {
    sin_theta * phi.cos() * *x + sin_theta * phi.sin() * *y + cos_theta * *z
}

/// An orthonormal basis used to move directions between world space and a
/// local shading space where the normal is +z.
#[derive(Copy, Clone, Debug)]
pub struct Frame {
    /// First tangent.
    pub s: Vector3f,

    /// Second tangent.
    pub t: Vector3f,

    /// Normal.
    pub n: Normal3f,
}

impl Frame {
    /// Build a frame around a normal and a tangent hint. If the hint is
    /// degenerate an arbitrary tangent is chosen.
    ///
    /// * `n`    - Unit normal.
    /// * `dpdu` - Tangent hint.
    pub fn new(n: &Normal3f, dpdu: &Vector3f) -> Self {
        let t = n.cross(dpdu);
        if t.length_squared() > 1e-12 {
            let t = t.normalize();
            let s = t.cross(n);
            Self { s, t, n: *n }
        } else {
            let (s, t) = coordinate_system(n);
            Self { s, t, n: *n }
        }
    }

    /// Transform a world space direction to the local frame.
    ///
    /// * `v` - World space direction.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.s), v.dot(&self.t), v.dot(&self.n))
    }

    /// Transform a local direction to world space.
    ///
    /// * `v` - Local direction.
    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        self.s * v.x + self.t * v.y + self.n * v.z
    }
}
