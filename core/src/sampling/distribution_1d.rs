//! 1D Distribution.

use crate::pbrt::*;

/// Represents a piecewise-constant 1D function’s PDF and CDF and provides methods to perform this sampling efficiently.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    /// Piecewise-constant function.
    pub func: Vec<Float>,

    /// CDF for `func`.
    pub cdf: Vec<Float>,

    /// Integral of `func`.
    pub func_int: Float,
}

impl Distribution1D {
    /// Returns a new `Distribution1D` for given piecewise-constant function.
    ///
    /// - `f` - Piecewise-constant 1D function.
    pub fn new(f: Vec<Float>) -> Self {
        let n = f.len();
        assert!(n > 0, "Distribution1D needs at least one value");

        // Compute integral of step function at `x_i`
        let mut cdf: Vec<Float> = Vec::with_capacity(n + 1);
        cdf.push(0.0);
        for i in 1..n + 1 {
            cdf.push(cdf[i - 1] + f[i - 1] / n as Float);
        }

        // Transform step function integral into CDF.
        let func_int = cdf[n];
        if func_int == 0.0 {
            for (i, v) in cdf.iter_mut().enumerate().skip(1).take(n) {
                *v = i as Float / n as Float;
            }
        } else {
            for v in cdf.iter_mut().skip(1).take(n) {
                *v /= func_int;
            }
        }

        Self { func: f, cdf, func_int }
    }

    /// Returns the number of sample points for the piecewise-constant function.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Return a sample from the discrete distribution given a random sample.
    /// Returns the index, its probability and the sample remapped to `[0, 1)`.
    ///
    /// - `u` - The random sample.
    pub fn sample_discrete(&self, u: Float) -> (usize, Float, Float) {
        // Find surrounding CDF segments and `offset`.
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);
        let pdf = self.discrete_pdf(offset);
        let width = self.cdf[offset + 1] - self.cdf[offset];
        let u_remapped = if width > 0.0 {
            (u - self.cdf[offset]) / width
        } else {
            0.0
        };
        debug_assert!((0.0..=1.0).contains(&u_remapped));

        (offset, pdf, u_remapped)
    }

    /// Return the PDF for sampling a given value from the discrete PDF. A
    /// function that integrates to zero is sampled uniformly.
    ///
    /// * `index` - Sample index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        assert!(index < self.count());
        if self.func_int > 0.0 {
            self.func[index] / (self.func_int * self.count() as Float)
        } else {
            1.0 / self.count() as Float
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn discrete_sampling_follows_weights() {
        let d = Distribution1D::new(vec![1.0, 3.0]);
        let (i, pdf, _) = d.sample_discrete(0.1);
        assert_eq!(i, 0);
        assert!(approx_eq!(f32, pdf, 0.25, epsilon = 1e-6));
        let (i, pdf, _) = d.sample_discrete(0.9);
        assert_eq!(i, 1);
        assert!(approx_eq!(f32, pdf, 0.75, epsilon = 1e-6));
    }

    #[test]
    fn zero_weight_entries_are_never_chosen() {
        let d = Distribution1D::new(vec![0.0, 2.0, 0.0]);
        for k in 0..100 {
            let (i, pdf, _) = d.sample_discrete(k as Float / 100.0);
            assert_eq!(i, 1);
            assert!(approx_eq!(f32, pdf, 1.0, epsilon = 1e-6));
        }
    }

    #[test]
    fn zero_integral_is_sampled_uniformly() {
        let d = Distribution1D::new(vec![0.0; 4]);
        for k in 0..4 {
            let (i, pdf, _) = d.sample_discrete((k as Float + 0.5) / 4.0);
            assert_eq!(i, k);
            assert!(approx_eq!(f32, pdf, 0.25, epsilon = 1e-6));
        }
    }
}
