//! Common

use crate::geometry::*;
use crate::pbrt::*;

// Directions in the local shading frame have the normal along +z.

/// Returns cos(θ) of a local direction.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns |cos(θ)| of a local direction.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    w.z.abs()
}

/// Returns sin²(θ) of a local direction.
#[inline]
pub fn sin2_theta(w: &Vector3f) -> Float {
    max(0.0, 1.0 - w.z * w.z)
}

/// Returns sin(θ) of a local direction.
#[inline]
pub fn sin_theta(w: &Vector3f) -> Float {
    sin2_theta(w).sqrt()
}

/// Returns cos(φ) of a local direction.
#[inline]
pub fn cos_phi(w: &Vector3f) -> Float {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        1.0
    } else {
        clamp(w.x / sin_theta, -1.0, 1.0)
    }
}

/// Returns sin(φ) of a local direction.
#[inline]
pub fn sin_phi(w: &Vector3f) -> Float {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        0.0
    } else {
        clamp(w.y / sin_theta, -1.0, 1.0)
    }
}

/// Returns true if two local directions are in the same hemisphere.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}
