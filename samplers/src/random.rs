//! Random Sampler.

use lumen_core::geometry::*;
use lumen_core::sampler::*;

/// Implements a sampler that uses a PRNG to generate uniformly random samples.
pub struct RandomSampler {
    /// The common sampler data.
    pub data: SamplerData,
}

impl RandomSampler {
    /// Create a new `RandomSampler`.
    ///
    /// * `sample_bounds`     - Pixels to generate samples for.
    /// * `samples_per_pixel` - Number of samples to generate for each pixel.
    /// * `pixels_order`      - Order in which sub-samplers visit their pixels.
    /// * `seed`              - Base seed for random number generators.
    pub fn new(
        sample_bounds: Bounds2i,
        samples_per_pixel: usize,
        pixels_order: PixelsOrderKind,
        seed: u64,
    ) -> Self {
        Self {
            data: SamplerData::new(sample_bounds, samples_per_pixel, pixels_order, seed),
        }
    }
}

impl Sampler for RandomSampler {
    fn get_type(&self) -> &'static str {
        "random"
    }

    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    /// Create the `SubSampler` that generates samples for a range of pixels.
    ///
    /// * `bounds` - Pixel bounds of the sub-sampler.
    /// * `seed`   - Seed for the sub-sampler's random number generator.
    fn create_sub_sampler(&self, bounds: Bounds2i, seed: u64) -> Box<dyn SubSampler> {
        Box::new(RandomSubSampler {
            data: SubSamplerData::for_sampler(&self.data, bounds, seed),
        })
    }
}

/// Sub-sampler of `RandomSampler`.
pub struct RandomSubSampler {
    /// The common sub-sampler data.
    data: SubSamplerData,
}

impl SubSampler for RandomSubSampler {
    fn get_data(&self) -> &SubSamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SubSamplerData {
        &mut self.data
    }

    /// Every value is independent so nothing is prepared per pixel.
    fn generate_sample(&mut self, pixel: Point2i, _sample_index: usize, sample: &mut Sample) {
        self.data.fill_uniform(pixel, sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::pbrt::*;
    use proptest::prelude::*;

    fn bounds(w: i32, h: i32) -> Bounds2i {
        Bounds2i::new(Point2i::new(0, 0), Point2i::new(w, h))
    }

    #[test]
    fn rounding_is_identity() {
        let sampler = RandomSampler::new(bounds(2, 2), 3, PixelsOrderKind::Consecutive, 0);
        assert_eq!(sampler.round_samples_number(7), 7);
        assert_eq!(sampler.samples_per_pixel(), 3);
    }

    #[test]
    #[should_panic]
    fn requesting_after_generation_started_panics() {
        let mut sampler = RandomSampler::new(bounds(2, 2), 1, PixelsOrderKind::Consecutive, 0);
        let _ = sampler.sub_samplers(8);
        sampler.request_samples_1d(1);
    }

    #[test]
    fn same_seed_gives_same_samples() {
        let render = || {
            let mut sampler = RandomSampler::new(bounds(3, 3), 2, PixelsOrderKind::Random, 9);
            let id = sampler.request_samples_1d(2);
            let mut sub_samplers = sampler.sub_samplers(2);
            let mut sample = sampler.create_sample();
            let mut values = vec![];
            for s in sub_samplers.iter_mut() {
                while s.get_next_sample(&mut sample) {
                    values.push(sample.image_point.x);
                    values.extend(sample.get_1d(id).iter().copied());
                }
            }
            values
        };
        assert_eq!(render(), render());
    }

    proptest! {
        #[test]
        fn sequences_match_requests_and_lie_in_unit_interval(
            spp in 1_usize..6,
            n1 in 1_usize..5,
            n2 in 1_usize..5,
        ) {
            let mut sampler = RandomSampler::new(bounds(3, 2), spp, PixelsOrderKind::Serpentine, 5);
            let id1 = sampler.request_samples_1d(n1);
            let id2 = sampler.request_samples_2d(n2);
            let mut sub_samplers = sampler.sub_samplers(2);
            let mut sample = sampler.create_sample();

            let mut count = 0;
            for s in sub_samplers.iter_mut() {
                while s.get_next_sample(&mut sample) {
                    count += 1;
                    let s1 = sample.get_1d(id1);
                    let s2 = sample.get_2d(id2);
                    prop_assert_eq!(s1.len(), n1);
                    prop_assert_eq!(s2.len(), n2);
                    for v in s1.iter() {
                        prop_assert!((0.0..1.0).contains(v));
                    }
                    for p in s2.iter() {
                        prop_assert!((0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y));
                    }
                    let offset = sample.image_point - Point2f::from(sample.pixel);
                    prop_assert!((0.0 as Float..1.0).contains(&offset.x));
                }
            }
            prop_assert_eq!(count, 6 * spp);
        }
    }
}
