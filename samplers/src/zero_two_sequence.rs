//! (0, 2)-Sequence Sampler.

use super::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;

/// Implements a (0-2)-sequence sampler. The samples of a pixel and every
/// sequence are drawn from scrambled van der Corput and Sobol' sequences so
/// any power of two prefix is well stratified.
pub struct ZeroTwoSequenceSampler {
    /// The common sampler data.
    pub data: SamplerData,
}

impl ZeroTwoSequenceSampler {
    /// Create a new `ZeroTwoSequenceSampler`. The number of samples per pixel
    /// is rounded up to a power of 2.
    ///
    /// * `sample_bounds`     - Pixels to generate samples for.
    /// * `samples_per_pixel` - Requested number of samples for each pixel.
    /// * `pixels_order`      - Order in which sub-samplers visit their pixels.
    /// * `seed`              - Base seed for random number generators.
    pub fn new(
        sample_bounds: Bounds2i,
        samples_per_pixel: usize,
        pixels_order: PixelsOrderKind,
        seed: u64,
    ) -> Self {
        let spp = log_rounding(
            "(0, 2)-sequence",
            samples_per_pixel,
            samples_per_pixel.next_power_of_two(),
        );
        Self {
            data: SamplerData::new(sample_bounds, spp, pixels_order, seed),
        }
    }
}

impl Sampler for ZeroTwoSequenceSampler {
    fn get_type(&self) -> &'static str {
        "02sequence"
    }

    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    /// Rounds up to power of 2.
    ///
    /// * `n` - The integer value to round.
    fn round_samples_number(&self, n: usize) -> usize {
        n.next_power_of_two()
    }

    fn create_sub_sampler(&self, bounds: Bounds2i, seed: u64) -> Box<dyn SubSampler> {
        let data = SubSamplerData::for_sampler(&self.data, bounds, seed);
        let pixel_samples = PixelSamples::new(&data.layout, data.samples_per_pixel);
        Box::new(ZeroTwoSequenceSubSampler {
            data,
            pixel_samples,
        })
    }
}

/// Sub-sampler of `ZeroTwoSequenceSampler`.
pub struct ZeroTwoSequenceSubSampler {
    /// The common sub-sampler data.
    data: SubSamplerData,

    /// Values of every sample of the current pixel.
    pixel_samples: PixelSamples,
}

impl SubSampler for ZeroTwoSequenceSubSampler {
    fn get_data(&self) -> &SubSamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SubSamplerData {
        &mut self.data
    }

    /// Generate the (0, 2)-sequence values of every sample of the pixel.
    ///
    /// * `_pixel` - The new pixel.
    fn start_pixel(&mut self, _pixel: Point2i) {
        let spp = self.data.samples_per_pixel;
        let rng = &mut self.data.rng;
        let samples = &mut self.pixel_samples;

        sobol_2d(1, spp, &mut samples.image, rng);
        sobol_2d(1, spp, &mut samples.lens, rng);

        for (_, count, values) in samples.values_1d.iter_mut() {
            van_der_corput(*count, spp, values, rng);
        }
        for (_, count, values) in samples.values_2d.iter_mut() {
            sobol_2d(*count, spp, values, rng);
        }
    }

    fn generate_sample(&mut self, pixel: Point2i, sample_index: usize, sample: &mut Sample) {
        self.pixel_samples.copy_to(pixel, sample_index, sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds2i {
        Bounds2i::new(Point2i::new(0, 0), Point2i::new(2, 2))
    }

    #[test]
    fn rounds_to_power_of_two() {
        let sampler = ZeroTwoSequenceSampler::new(bounds(), 6, PixelsOrderKind::Consecutive, 0);
        assert_eq!(sampler.samples_per_pixel(), 8);
        assert_eq!(sampler.round_samples_number(3), 4);
        assert_eq!(sampler.round_samples_number(1), 1);
    }

    #[test]
    fn pixel_samples_are_elementary_intervals() {
        let mut sampler = ZeroTwoSequenceSampler::new(bounds(), 16, PixelsOrderKind::Consecutive, 4);
        let id = sampler.request_samples_1d(1);
        let mut sub_samplers = sampler.sub_samplers(1);
        let mut sample = sampler.create_sample();

        for s in sub_samplers.iter_mut() {
            let mut cols = vec![0; 16];
            let mut values = vec![0; 16];
            while s.get_next_sample(&mut sample) {
                let d = sample.image_point - Point2f::from(sample.pixel);
                cols[(d.x * 16.0) as usize] += 1;
                values[(sample.get_1d(id)[0] * 16.0) as usize] += 1;
            }
            assert!(cols.iter().all(|&c| c == 1));
            assert!(values.iter().all(|&c| c == 1));
        }
    }

    #[test]
    fn values_lie_in_unit_interval() {
        let mut sampler = ZeroTwoSequenceSampler::new(bounds(), 4, PixelsOrderKind::Random, 7);
        let id = sampler.request_samples_2d(2);
        let mut sub_samplers = sampler.sub_samplers(2);
        let mut sample = sampler.create_sample();
        let mut count = 0;
        while sub_samplers[0].get_next_sample(&mut sample) {
            count += 1;
            for p in sample.get_2d(id).iter() {
                assert!((0.0 as Float..1.0).contains(&p.x));
                assert!((0.0 as Float..1.0).contains(&p.y));
            }
        }
        assert_eq!(count, 16);
    }
}
