//! 3D Axis Aligned Bounding Boxes.

use crate::geometry::*;
use crate::pbrt::*;

/// 3D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Bounds3f {
    /// Bounding box that contains nothing; grows from here via `union`.
    pub const EMPTY: Self = Self {
        p_min: Point3f::new(INFINITY, INFINITY, INFINITY),
        p_max: Point3f::new(-INFINITY, -INFINITY, -INFINITY),
    };

    /// Creates a new bounding box from 2 points.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns true if the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.p_max.x < self.p_min.x || self.p_max.y < self.p_min.y || self.p_max.z < self.p_min.z
    }

    /// Return a bounding box containing both bounding boxes.
    ///
    /// * `other` - The other bounding box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }

    /// Return the center and radius of a sphere that bounds the box.
    pub fn bounding_sphere(&self) -> (Point3f, Float) {
        if self.is_empty() {
            return (Point3f::ZERO, 0.0);
        }
        let center = 0.5 * (self.p_min + self.p_max);
        (center, center.distance(&self.p_max))
    }
}

impl Default for Bounds3f {
    fn default() -> Self {
        Self::EMPTY
    }
}
