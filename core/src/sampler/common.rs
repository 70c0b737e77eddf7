//! Common

use super::*;
use std::sync::Arc;

/// Sampler life cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SamplerState {
    /// Sequences may still be requested.
    Configured,

    /// Sub-samplers exist; the sample layout is frozen.
    Generating,
}

/// Stores the sampler data and implements common functionality for all samplers.
#[derive(Clone, Debug)]
pub struct SamplerData {
    /// Pixels to generate samples for.
    pub sample_bounds: Bounds2i,

    /// Number of samples generated for each pixel.
    pub samples_per_pixel: usize,

    /// Order in which sub-samplers visit their pixels.
    pub pixels_order: PixelsOrderKind,

    /// Base seed for sub-sampler random number generators.
    pub seed: u64,

    /// Requested sequences.
    layout: Arc<SampleLayout>,

    /// Current state.
    state: SamplerState,
}

impl SamplerData {
    /// Create a new `SamplerData` instance.
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
        assert!(samples_per_pixel > 0, "samples per pixel must be positive");
        Self {
            sample_bounds,
            samples_per_pixel,
            pixels_order,
            seed,
            layout: Arc::new(SampleLayout::default()),
            state: SamplerState::Configured,
        }
    }

    /// Reserve a 1D sequence.
    ///
    /// * `count` - Number of values.
    pub fn request_samples_1d(&mut self, count: usize) -> Sequence1DId {
        self.assert_configured();
        Arc::make_mut(&mut self.layout).push_1d(count)
    }

    /// Reserve a 2D sequence.
    ///
    /// * `count` - Number of values.
    pub fn request_samples_2d(&mut self, count: usize) -> Sequence2DId {
        self.assert_configured();
        Arc::make_mut(&mut self.layout).push_2d(count)
    }

    /// Freeze the layout and move to the generating state. Calling this more
    /// than once is harmless.
    pub fn start_generation(&mut self) -> Arc<SampleLayout> {
        if self.state == SamplerState::Configured {
            info!(
                "Sample layout: {} 1D values, {} 2D values per sample",
                self.layout.total_1d(),
                self.layout.total_2d()
            );
            self.state = SamplerState::Generating;
        }
        Arc::clone(&self.layout)
    }

    /// Returns the frozen layout. Panics if generation has not started.
    pub fn layout_for_generation(&self) -> Arc<SampleLayout> {
        assert_eq!(
            self.state,
            SamplerState::Generating,
            "samples can only be created after generation started"
        );
        Arc::clone(&self.layout)
    }

    fn assert_configured(&self) {
        assert_eq!(
            self.state,
            SamplerState::Configured,
            "sample sequences must be requested before sample generation starts"
        );
    }
}
