//! Stratified Sampler.

use super::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;

/// Implements a sampler that subdivides the pixel area into a square grid of
/// strata and places one jittered sample in each.
pub struct StratifiedSampler {
    /// The common sampler data.
    pub data: SamplerData,

    /// Jitter the samples inside their strata.
    pub jitter: bool,
}

impl StratifiedSampler {
    /// Create a new `StratifiedSampler`. The number of samples per pixel is
    /// rounded up to a perfect square.
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
            "Stratified",
            samples_per_pixel,
            round_up_perfect_square(samples_per_pixel),
        );
        Self {
            data: SamplerData::new(sample_bounds, spp, pixels_order, seed),
            jitter: true,
        }
    }
}

impl Sampler for StratifiedSampler {
    fn get_type(&self) -> &'static str {
        "stratified"
    }

    fn get_data(&self) -> &SamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.data
    }

    /// Rounds up to the next perfect square.
    ///
    /// * `n` - The integer value to round.
    fn round_samples_number(&self, n: usize) -> usize {
        round_up_perfect_square(n)
    }

    fn create_sub_sampler(&self, bounds: Bounds2i, seed: u64) -> Box<dyn SubSampler> {
        let data = SubSamplerData::for_sampler(&self.data, bounds, seed);
        let pixel_samples = PixelSamples::new(&data.layout, data.samples_per_pixel);
        Box::new(StratifiedSubSampler {
            data,
            pixel_samples,
            jitter: self.jitter,
        })
    }
}

/// Sub-sampler of `StratifiedSampler`.
pub struct StratifiedSubSampler {
    /// The common sub-sampler data.
    data: SubSamplerData,

    /// Values of every sample of the current pixel.
    pixel_samples: PixelSamples,

    /// Jitter the samples inside their strata.
    jitter: bool,
}

impl SubSampler for StratifiedSubSampler {
    fn get_data(&self) -> &SubSamplerData {
        &self.data
    }

    fn get_data_mut(&mut self) -> &mut SubSamplerData {
        &mut self.data
    }

    /// Generate the strata of every sample of the pixel.
    ///
    /// * `_pixel` - The new pixel.
    fn start_pixel(&mut self, _pixel: Point2i) {
        let spp = self.data.samples_per_pixel;
        let n = (spp as Float).sqrt() as usize;
        debug_assert_eq!(n * n, spp);

        let rng = &mut self.data.rng;
        let jitter = self.jitter;
        let samples = &mut self.pixel_samples;

        // Image and lens positions use the pixel grid; shuffle so they do
        // not correlate with each other.
        samples.image = stratified_sample_2d(rng, n, n, jitter);
        samples.lens = stratified_sample_2d(rng, n, n, jitter);
        rng.shuffle(&mut samples.lens, spp, 1);

        // Each sample's sequence is stratified on its own.
        for (_, count, values) in samples.values_1d.iter_mut().filter(|(_, n, _)| *n > 0) {
            for chunk in values.chunks_mut(*count) {
                chunk.copy_from_slice(&stratified_sample_1d(rng, *count, jitter));
                rng.shuffle(chunk, *count, 1);
            }
        }
        for (_, count, values) in samples.values_2d.iter_mut().filter(|(_, n, _)| *n > 0) {
            for chunk in values.chunks_mut(*count) {
                let lhs = latin_hypercube(rng, *count, 2);
                for (p, xy) in chunk.iter_mut().zip(lhs.chunks(2)) {
                    *p = Point2f::new(xy[0], xy[1]);
                }
            }
        }
    }

    fn generate_sample(&mut self, pixel: Point2i, sample_index: usize, sample: &mut Sample) {
        self.pixel_samples.copy_to(pixel, sample_index, sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::rng::*;

    fn bounds() -> Bounds2i {
        Bounds2i::new(Point2i::new(8, 8), Point2i::new(12, 12))
    }

    #[test]
    fn rounds_to_perfect_square() {
        let sampler = StratifiedSampler::new(bounds(), 5, PixelsOrderKind::Consecutive, 0);
        assert_eq!(sampler.samples_per_pixel(), 9);
        assert_eq!(sampler.round_samples_number(2), 4);
        assert_eq!(sampler.round_samples_number(16), 16);
    }

    #[test]
    #[should_panic]
    fn unrounded_sequence_request_panics() {
        let mut sampler = StratifiedSampler::new(bounds(), 4, PixelsOrderKind::Consecutive, 0);
        sampler.request_samples_2d(3);
    }

    #[test]
    fn image_points_cover_every_stratum() {
        let mut sampler = StratifiedSampler::new(bounds(), 16, PixelsOrderKind::Consecutive, 1);
        let mut sub_samplers = sampler.sub_samplers(16);
        assert_eq!(sub_samplers.len(), 1);
        let mut sample = sampler.create_sample();

        let mut strata = vec![0; 16];
        let mut pixel = None;
        while sub_samplers[0].get_next_sample(&mut sample) {
            if pixel.is_some() && pixel != Some(sample.pixel) {
                break;
            }
            pixel = Some(sample.pixel);
            let d = sample.image_point - Point2f::from(sample.pixel);
            let (x, y) = ((d.x * 4.0) as usize, (d.y * 4.0) as usize);
            strata[y * 4 + x] += 1;
        }
        assert!(strata.iter().all(|&c| c == 1), "{:?}", strata);
    }

    #[test]
    fn sequences_are_stratified_per_sample() {
        let mut sampler = StratifiedSampler::new(bounds(), 4, PixelsOrderKind::Consecutive, 2);
        let id1 = sampler.request_samples_1d(4);
        let id2 = sampler.request_samples_2d(4);
        let mut sub_samplers = sampler.sub_samplers(2);
        let mut sample = sampler.create_sample();

        while sub_samplers[0].get_next_sample(&mut sample) {
            let mut strata: Vec<usize> = sample.get_1d(id1).iter().map(|v| (v * 4.0) as usize).collect();
            strata.sort_unstable();
            assert_eq!(strata, vec![0, 1, 2, 3]);

            let mut xs: Vec<usize> = sample.get_2d(id2).iter().map(|p| (p.x * 4.0) as usize).collect();
            xs.sort_unstable();
            assert_eq!(xs, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn stratified_values_stay_below_one() {
        let mut rng = RNG::new(3);
        for v in stratified_sample_1d(&mut rng, 64, true) {
            assert!((0.0..1.0).contains(&v));
        }
    }
}
