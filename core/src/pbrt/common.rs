//! Common

#![allow(dead_code)]

use num_traits::Num;
use std::ops::Neg;

/// Use 32-bit precision for floating point numbers.
pub type Float = f32;

/// Default signed integer to 32-bit.
pub type Int = i32;

/// Infinty (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 1/2*PI (1/2π)
pub const INV_TWO_PI: Float = 1.0 / TWO_PI;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// 1/4*PI (1/4π)
pub const INV_FOUR_PI: Float = 1.0 / FOUR_PI;

/// Offset applied along the surface normal when spawning rays so they do not
/// re-intersect the surface they leave.
pub const RAY_EPSILON: Float = 1e-4;

/// Fraction of a shadow ray's length that is tested for occluders.
pub const SHADOW_EPSILON: Float = 0.0001;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Clamps a value to the closed interval `[low, high]`.
///
/// * `val`  - The value.
/// * `low`  - Lower bound.
/// * `high` - Upper bound.
#[inline(always)]
pub fn clamp<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Returns gamma corrected values for use in 8-bit images.
///
/// * `value` - Value to correct.
#[inline(always)]
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Solve the quadratic equation `a t^2 + b t + c = 0`. Returns the two roots
/// in ascending order or `None` if there is no real solution.
///
/// * `a` - Quadratic coefficient.
/// * `b` - Linear coefficient.
/// * `c` - Constant.
pub fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    let (a, b, c) = (a as f64, b as f64, c as f64);
    if a == 0.0 {
        return None;
    }
    let discrim = b * b - 4.0 * a * c;
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();

    let q = if b < 0.0 {
        -0.5 * (b - root_discrim)
    } else {
        -0.5 * (b + root_discrim)
    };
    if q == 0.0 {
        return Some((0.0, 0.0));
    }
    let t0 = (q / a) as Float;
    let t1 = (c / q) as Float;
    if t0 > t1 {
        Some((t1, t0))
    } else {
        Some((t0, t1))
    }
}

/// Returns true if `v` is a power of 2.
///
/// * `v` - The value.
#[inline(always)]
pub fn is_power_of_2(v: usize) -> bool {
    v != 0 && (v & (v - 1)) == 0
}

/// Returns the smallest perfect square that is not less than `v`.
///
/// * `v` - The value.
pub fn round_up_perfect_square(v: usize) -> usize {
    let mut root = (v as f64).sqrt() as usize;
    while root * root < v {
        root += 1;
    }
    root * root
}

/// Returns the square root of a value clamped to zero to avoid NaN from
/// tiny negative round-off errors.
///
/// * `value` - The value.
#[inline(always)]
pub fn safe_sqrt(value: Float) -> Float {
    debug_assert!(value >= -1e-3);
    max(0.0, value).sqrt()
}

/// Bump a floating point value down to the next lower representable floating
/// point value.
///
/// * `v` - Floating point value.
pub fn next_float_down(v: Float) -> Float {
    // Handle infinity and positive zero.
    if v.is_infinite() && v < 0.0 {
        return v;
    }

    let nv = if v == 0.0 { -0.0 } else { v };
    let ui = nv.to_bits();
    if nv > 0.0 {
        Float::from_bits(ui - 1)
    } else {
        Float::from_bits(ui + 1)
    }
}

/// Emulates the behavior of `upper_bound` but uses a function object to get
/// values at various indices instead of requiring access to an actual array.
///
/// * `size` - Size of array.
/// * `pred` - Function that returns a value at a given index.
pub fn find_interval<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    let (mut first, mut len) = (0, size);

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    clamp(first as isize - 1, 0, size as isize - 2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_returns_sorted_roots() {
        assert_eq!(quadratic(1.0, -3.0, 2.0), Some((1.0, 2.0)));
        assert_eq!(quadratic(1.0, 0.0, 1.0), None);
        assert_eq!(quadratic(0.0, 1.0, 1.0), None);
    }

    #[test]
    fn round_up_perfect_square_keeps_squares() {
        assert_eq!(round_up_perfect_square(0), 0);
        assert_eq!(round_up_perfect_square(1), 1);
        assert_eq!(round_up_perfect_square(16), 16);
        assert_eq!(round_up_perfect_square(17), 25);
        assert_eq!(round_up_perfect_square(10), 16);
    }

    #[test]
    fn is_power_of_2_rejects_zero() {
        assert!(!is_power_of_2(0));
        assert!(is_power_of_2(1));
        assert!(is_power_of_2(64));
        assert!(!is_power_of_2(12));
    }

    #[test]
    fn next_float_down_is_strictly_smaller() {
        assert!(next_float_down(1.0) < 1.0);
        assert!(next_float_down(0.0) < 0.0);
        assert!(next_float_down(-2.0) < -2.0);
    }

    #[test]
    fn find_interval_returns_bracketing_index() {
        let cdf = [0.0, 0.25, 0.5, 1.0];
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 0.3), 1);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 0.0), 0);
        assert_eq!(find_interval(cdf.len(), |i| cdf[i] <= 1.0), 2);
    }
}
