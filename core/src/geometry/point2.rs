//! 2-D Points

#![allow(dead_code)]
use crate::geometry::*;
use crate::pbrt::*;
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Index, Mul, Sub};

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

/// 2-D point containing `Int` values.
pub type Point2i = Point2<Int>;

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a new 2-D zero point.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero())
    }

    /// Return the component-wise minimum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(min(self.x, other.x), min(self.y, other.y))
    }

    /// Return the component-wise maximum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(max(self.x, other.x), max(self.y, other.y))
    }
}

impl Point2f {
    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Returns a new point containing floor of values of the components.
    pub fn floor(&self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> Float {
        (*self - *other).length()
    }
}

impl<T: Num> Add<Vector2<T>> for Point2<T> {
    type Output = Point2<T>;

    /// Offsets a point by a vector.
    ///
    /// * `other` - The vector.
    fn add(self, other: Vector2<T>) -> Self::Output {
        Point2::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num> Add<Point2<T>> for Point2<T> {
    type Output = Point2<T>;

    /// Adds the coordinates of two points. Only meaningful for weighted sums.
    ///
    /// * `other` - The other point.
    fn add(self, other: Point2<T>) -> Self::Output {
        Point2::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num + Copy> AddAssign<Vector2<T>> for Point2<T> {
    /// Offsets the point by a vector.
    ///
    /// * `other` - The vector.
    fn add_assign(&mut self, other: Vector2<T>) {
        *self = *self + other;
    }
}

impl<T: Num> Sub<Point2<T>> for Point2<T> {
    type Output = Vector2<T>;

    /// Returns the vector between two points.
    ///
    /// * `other` - The other point.
    fn sub(self, other: Point2<T>) -> Self::Output {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: Num> Sub<Vector2<T>> for Point2<T> {
    type Output = Point2<T>;

    /// Offsets a point by the negated vector.
    ///
    /// * `other` - The vector.
    fn sub(self, other: Vector2<T>) -> Self::Output {
        Point2::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: Num + Copy> Mul<T> for Point2<T> {
    type Output = Point2<T>;

    /// Scale the point.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Point2::new(self.x * f, self.y * f)
    }
}

impl Mul<Point2f> for Float {
    type Output = Point2f;

    /// Scale the point.
    ///
    /// * `p` - The point.
    fn mul(self, p: Point2f) -> Self::Output {
        p * self
    }
}

impl<T> Index<usize> for Point2<T> {
    type Output = T;

    /// Index the coordinates; 0 for x and 1 for y.
    ///
    /// * `i` - The index.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid index {} for Point2<T>", i),
        }
    }
}

impl From<Point2i> for Point2f {
    /// Convert integer coordinates to floating point.
    ///
    /// * `p` - The integer point.
    fn from(p: Point2i) -> Self {
        Self::new(p.x as Float, p.y as Float)
    }
}

impl From<Point2f> for Point2i {
    /// Convert floating point coordinates to integers by truncation.
    ///
    /// * `p` - The floating point point.
    fn from(p: Point2f) -> Self {
        Self::new(p.x as Int, p.y as Int)
    }
}

impl<T: fmt::Display> fmt::Display for Point2<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_minus_point_is_vector() {
        let v = Point2::new(3, 5) - Point2::new(1, 1);
        assert_eq!(v, Vector2::new(2, 4));
    }

    #[test]
    fn conversion_from_float_truncates() {
        assert_eq!(Point2i::from(Point2f::new(1.7, 2.2)), Point2::new(1, 2));
    }

    #[test]
    #[should_panic]
    #[allow(unused)]
    fn invalid_index_panics() {
        let c = Point2::new(1, 2)[2];
    }
}
