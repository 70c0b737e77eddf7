//! Low Discrepancy Sequences

use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;

/// Generator matrix for the van der Corput sequence in base 2.
const C_VAN_DER_CORPUT: [u32; 32] = van_der_corput_matrix();

/// Generator matrices for the first two dimensions of the Sobol' sequence.
const C_SOBOL: [[u32; 32]; 2] = [van_der_corput_matrix(), sobol_second_matrix()];

/// Builds the base-2 radical inverse generator matrix; column `i` has a
/// single bit at position `31 - i`.
const fn van_der_corput_matrix() -> [u32; 32] {
    let mut c = [0_u32; 32];
    let mut i = 0;
    while i < 32 {
        c[i] = 1 << (31 - i);
        i += 1;
    }
    c
}

/// Builds the generator matrix of the second Sobol' dimension. Each column is
/// the previous one xor-ed with itself shifted right by one bit.
const fn sobol_second_matrix() -> [u32; 32] {
    let mut c = [0_u32; 32];
    c[0] = 1 << 31;
    let mut i = 1;
    while i < 32 {
        c[i] = c[i - 1] ^ (c[i - 1] >> 1);
        i += 1;
    }
    c
}

/// Converts a 32-bit fixed point value to a float in `[0, 1)`.
#[inline(always)]
fn to_unit_float(v: u32) -> Float {
    min(v as Float * hexf32!("0x1.0p-32"), ONE_MINUS_EPSILON)
}

/// Generates `samples.len()` 1D points of the sequence defined by generator
/// matrix `c` in Gray code order.
///
/// * `c`        - Generator matrix.
/// * `scramble` - Random digit scramble.
/// * `samples`  - Output samples.
pub fn gray_code_sample_1d(c: &[u32; 32], scramble: u32, samples: &mut [Float]) {
    let mut v = scramble;
    for (i, s) in samples.iter_mut().enumerate() {
        *s = to_unit_float(v);
        v ^= c[(i + 1).trailing_zeros() as usize];
    }
}

/// Generates `samples.len()` 2D points of the sequence defined by generator
/// matrices `c0` and `c1` in Gray code order.
///
/// * `c0`       - Generator matrix for the first dimension.
/// * `c1`       - Generator matrix for the second dimension.
/// * `scramble` - Random digit scramble for both dimensions.
/// * `samples`  - Output samples.
pub fn gray_code_sample_2d(
    c0: &[u32; 32],
    c1: &[u32; 32],
    scramble: (u32, u32),
    samples: &mut [Point2f],
) {
    let (mut v0, mut v1) = scramble;
    for (i, s) in samples.iter_mut().enumerate() {
        *s = Point2f::new(to_unit_float(v0), to_unit_float(v1));
        let column = (i + 1).trailing_zeros() as usize;
        v0 ^= c0[column];
        v1 ^= c1[column];
    }
}

/// Fill `samples` with scrambled van der Corput points for `n_pixel_samples`
/// pixel samples, each taking `n_samples_per_pixel_sample` values. Points are
/// shuffled inside each pixel sample and then between pixel samples so that
/// different dimensions do not correlate.
///
/// * `n_samples_per_pixel_sample` - Values consumed by one pixel sample.
/// * `n_pixel_samples`            - Number of pixel samples.
/// * `samples`                    - Output samples.
/// * `rng`                        - Random number generator.
pub fn van_der_corput(
    n_samples_per_pixel_sample: usize,
    n_pixel_samples: usize,
    samples: &mut [Float],
    rng: &mut RNG,
) {
    let total = n_samples_per_pixel_sample * n_pixel_samples;
    assert!(samples.len() >= total);
    let scramble = rng.uniform_u32();
    gray_code_sample_1d(&C_VAN_DER_CORPUT, scramble, &mut samples[..total]);

    for i in 0..n_pixel_samples {
        let start = i * n_samples_per_pixel_sample;
        rng.shuffle(&mut samples[start..], n_samples_per_pixel_sample, 1);
    }
    rng.shuffle(samples, n_pixel_samples, n_samples_per_pixel_sample);
}

/// Fill `samples` with scrambled (0,2)-sequence points for `n_pixel_samples`
/// pixel samples, each taking `n_samples_per_pixel_sample` values.
///
/// * `n_samples_per_pixel_sample` - Values consumed by one pixel sample.
/// * `n_pixel_samples`            - Number of pixel samples.
/// * `samples`                    - Output samples.
/// * `rng`                        - Random number generator.
pub fn sobol_2d(
    n_samples_per_pixel_sample: usize,
    n_pixel_samples: usize,
    samples: &mut [Point2f],
    rng: &mut RNG,
) {
    let total = n_samples_per_pixel_sample * n_pixel_samples;
    assert!(samples.len() >= total);
    let scramble = (rng.uniform_u32(), rng.uniform_u32());
    gray_code_sample_2d(&C_SOBOL[0], &C_SOBOL[1], scramble, &mut samples[..total]);

    for i in 0..n_pixel_samples {
        let start = i * n_samples_per_pixel_sample;
        rng.shuffle(&mut samples[start..], n_samples_per_pixel_sample, 1);
    }
    rng.shuffle(samples, n_pixel_samples, n_samples_per_pixel_sample);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscrambled_van_der_corput_is_radical_inverse_in_gray_order() {
        let mut samples = [0.0; 4];
        gray_code_sample_1d(&C_VAN_DER_CORPUT, 0, &mut samples);
        assert_eq!(samples, [0.0, 0.5, 0.75, 0.25]);
    }

    #[test]
    fn sobol_second_matrix_matches_known_columns() {
        let c = sobol_second_matrix();
        assert_eq!(&c[..4], &[0x80000000, 0xc0000000, 0xa0000000, 0xf0000000]);
    }

    #[test]
    fn sobol_points_are_02_stratified() {
        // Every elementary interval of area 1/16 holds exactly one point.
        let mut rng = RNG::new(5);
        let mut samples = vec![Point2f::zero(); 16];
        sobol_2d(1, 16, &mut samples, &mut rng);
        for (nx, ny) in [(16, 1), (8, 2), (4, 4), (2, 8), (1, 16)] {
            let mut cells: Vec<(usize, usize)> = samples
                .iter()
                .map(|p| {
                    (
                        (p.x * nx as Float) as usize,
                        (p.y * ny as Float) as usize,
                    )
                })
                .collect();
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells.len(), 16, "{}x{} intervals", nx, ny);
        }
    }

    #[test]
    fn van_der_corput_values_are_in_unit_interval() {
        let mut rng = RNG::new(9);
        let mut samples = vec![0.0; 32];
        van_der_corput(4, 8, &mut samples, &mut rng);
        assert!(samples.iter().all(|&v| (0.0..1.0).contains(&v)));
    }
}
