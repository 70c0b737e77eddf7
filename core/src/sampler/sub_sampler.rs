//! Sub-samplers

use super::*;
use crate::pbrt::*;
use crate::rng::*;

/// Mixed into a sub-sampler seed to pick the random stream of its pixel order.
const PIXELS_ORDER_STREAM: u64 = 0x5851_f42d_4c95_7f2d;

/// Returns the seed for the pixel order of a sub-sampler. The order and the
/// sample values then draw from different PCG streams.
///
/// * `seed` - The sub-sampler seed.
pub fn pixels_order_seed(seed: u64) -> u64 {
    seed ^ PIXELS_ORDER_STREAM
}

/// Stores the state shared by all sub-sampler implementations: the pixel
/// cursor, the per-pixel sample counter and the random number generator.
pub struct SubSamplerData {
    /// Pixels serviced by this sub-sampler.
    pub bounds: Bounds2i,

    /// Number of samples generated for each pixel.
    pub samples_per_pixel: usize,

    /// Sequences every sample carries.
    pub layout: Arc<SampleLayout>,

    /// Random number generator owned by this sub-sampler.
    pub rng: RNG,

    /// Pixel traversal order.
    pixels_order: Box<dyn ImagePixelsOrder>,

    /// Pixel currently being sampled.
    current_pixel: Option<Point2i>,

    /// Index of the next sample in the current pixel.
    sample_index: usize,

    /// Set once every pixel has been sampled.
    exhausted: bool,
}

impl SubSamplerData {
    /// Create a new `SubSamplerData` instance.
    ///
    /// * `bounds`            - Pixels serviced by the sub-sampler.
    /// * `samples_per_pixel` - Number of samples generated for each pixel.
    /// * `layout`            - Sequences every sample carries.
    /// * `pixels_order`      - Pixel traversal order.
    /// * `seed`              - Seed for the random number generator.
    pub fn new(
        bounds: Bounds2i,
        samples_per_pixel: usize,
        layout: Arc<SampleLayout>,
        pixels_order: PixelsOrderKind,
        seed: u64,
    ) -> Self {
        Self {
            bounds,
            samples_per_pixel,
            layout,
            rng: RNG::new(seed),
            pixels_order: pixels_order.create(bounds, pixels_order_seed(seed)),
            current_pixel: None,
            sample_index: 0,
            exhausted: false,
        }
    }

    /// Create the data for a sub-sampler of the given sampler.
    ///
    /// * `sampler` - The sampler data.
    /// * `bounds`  - Pixels serviced by the sub-sampler.
    /// * `seed`    - Seed for the random number generator.
    pub fn for_sampler(sampler: &SamplerData, bounds: Bounds2i, seed: u64) -> Self {
        Self::new(
            bounds,
            sampler.samples_per_pixel,
            sampler.layout_for_generation(),
            sampler.pixels_order,
            seed,
        )
    }

    /// Returns true once every pixel has been sampled.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Advance the cursor. Returns the pixel and sample index to generate
    /// next and whether the pixel just started, or `None` when exhausted.
    fn advance(&mut self) -> Option<(Point2i, usize, bool)> {
        if self.exhausted {
            return None;
        }

        let mut new_pixel = false;
        if self.current_pixel.is_none() || self.sample_index >= self.samples_per_pixel {
            match self.pixels_order.next_pixel() {
                Some(p) => {
                    self.current_pixel = Some(p);
                    self.sample_index = 0;
                    new_pixel = true;
                }
                None => {
                    self.current_pixel = None;
                    self.exhausted = true;
                    return None;
                }
            }
        }

        let index = self.sample_index;
        self.sample_index += 1;
        self.current_pixel.map(|p| (p, index, new_pixel))
    }

    /// Restart from the first pixel.
    fn reset(&mut self) {
        self.pixels_order.reset();
        self.current_pixel = None;
        self.sample_index = 0;
        self.exhausted = false;
    }

    /// Fill the image point, lens point and every sequence of a sample with
    /// independent uniform values.
    ///
    /// * `pixel`  - The pixel.
    /// * `sample` - The sample to fill.
    pub fn fill_uniform(&mut self, pixel: Point2i, sample: &mut Sample) {
        let rng = &mut self.rng;
        sample.image_point = Point2f::new(
            pixel.x as Float + rng.uniform(1.0),
            pixel.y as Float + rng.uniform(1.0),
        );
        sample.lens_uv = Point2f::new(rng.uniform(1.0), rng.uniform(1.0));
        for v in sample.values_1d_mut() {
            *v = rng.uniform(1.0);
        }
        for v in sample.values_2d_mut() {
            *v = Point2f::new(rng.uniform(1.0), rng.uniform(1.0));
        }
    }
}

/// Generates the samples of a disjoint range of pixels. A sub-sampler is used
/// by exactly one thread at a time.
pub trait SubSampler: Send {
    /// Returns a shared reference underlying `SubSamplerData`.
    fn get_data(&self) -> &SubSamplerData;

    /// Returns a mutable reference to underlying `SubSamplerData`.
    fn get_data_mut(&mut self) -> &mut SubSamplerData;

    /// Called when the cursor moves to a new pixel, before its first sample
    /// is generated. Samplers that distribute values over all samples of a
    /// pixel prepare them here.
    ///
    /// * `pixel` - The new pixel.
    fn start_pixel(&mut self, _pixel: Point2i) {}

    /// Fill a sample for a pixel. Every value must be in `[0, 1)` except the
    /// image point which is the pixel position plus a `[0, 1)^2` offset.
    ///
    /// * `pixel`        - The pixel.
    /// * `sample_index` - Index of the sample in the pixel.
    /// * `sample`       - The sample to fill.
    fn generate_sample(&mut self, pixel: Point2i, sample_index: usize, sample: &mut Sample);

    /// Returns the pixels serviced by this sub-sampler.
    fn pixel_bounds(&self) -> Bounds2i {
        self.get_data().bounds
    }

    /// Generate the next sample. Samples of a pixel are generated in index
    /// order before moving on to the next pixel. Returns `false` once every
    /// pixel has received all its samples.
    ///
    /// * `sample` - The sample to fill; it must have been created by the
    ///              sampler that created this sub-sampler.
    fn get_next_sample(&mut self, sample: &mut Sample) -> bool {
        debug_assert!(
            **sample.layout() == *self.get_data().layout,
            "sample was created for a different sampler"
        );

        match self.get_data_mut().advance() {
            Some((pixel, index, new_pixel)) => {
                if new_pixel {
                    self.start_pixel(pixel);
                }
                self.generate_sample(pixel, index, sample);
                sample.pixel = pixel;
                sample.index = index;
                true
            }
            None => false,
        }
    }

    /// Restart from the first pixel.
    fn reset(&mut self) {
        self.get_data_mut().reset();
    }
}

impl<S: SubSampler + ?Sized> SubSampler for Box<S> {
    #[inline]
    fn get_data(&self) -> &SubSamplerData {
        (**self).get_data()
    }

    #[inline]
    fn get_data_mut(&mut self) -> &mut SubSamplerData {
        (**self).get_data_mut()
    }

    #[inline]
    fn start_pixel(&mut self, pixel: Point2i) {
        (**self).start_pixel(pixel);
    }

    #[inline]
    fn generate_sample(&mut self, pixel: Point2i, sample_index: usize, sample: &mut Sample) {
        (**self).generate_sample(pixel, sample_index, sample);
    }

    #[inline]
    fn get_next_sample(&mut self, sample: &mut Sample) -> bool {
        (**self).get_next_sample(sample)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset();
    }
}
