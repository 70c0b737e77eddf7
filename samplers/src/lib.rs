//! Samplers

#[macro_use]
extern crate log;

mod pixel_samples;
mod random;
mod stratified;
mod zero_two_sequence;

use lumen_core::geometry::*;
use lumen_core::sampler::*;
use std::fmt;
use std::str::FromStr;

// Re-export
pub use pixel_samples::*;
pub use random::*;
pub use stratified::*;
pub use zero_two_sequence::*;

/// The available sampler implementations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SamplerKind {
    /// `RandomSampler`
    Random,

    /// `StratifiedSampler`
    #[default]
    Stratified,

    /// `ZeroTwoSequenceSampler`
    ZeroTwoSequence,
}

impl FromStr for SamplerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "stratified" => Ok(Self::Stratified),
            "02sequence" | "lowdiscrepancy" => Ok(Self::ZeroTwoSequence),
            _ => Err(format!("unknown sampler '{}'", s)),
        }
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Stratified => "stratified",
            Self::ZeroTwoSequence => "02sequence",
        };
        write!(f, "{}", name)
    }
}

/// Create a sampler.
///
/// * `kind`              - Sampler implementation.
/// * `sample_bounds`     - Pixels to generate samples for.
/// * `samples_per_pixel` - Requested number of samples per pixel; rounded by
///                         the sampler if needed.
/// * `pixels_order`      - Order in which sub-samplers visit their pixels.
/// * `seed`              - Base seed for random number generators.
pub fn create_sampler(
    kind: SamplerKind,
    sample_bounds: Bounds2i,
    samples_per_pixel: usize,
    pixels_order: PixelsOrderKind,
    seed: u64,
) -> Box<dyn Sampler> {
    match kind {
        SamplerKind::Random => Box::new(RandomSampler::new(
            sample_bounds,
            samples_per_pixel,
            pixels_order,
            seed,
        )),
        SamplerKind::Stratified => Box::new(StratifiedSampler::new(
            sample_bounds,
            samples_per_pixel,
            pixels_order,
            seed,
        )),
        SamplerKind::ZeroTwoSequence => Box::new(ZeroTwoSequenceSampler::new(
            sample_bounds,
            samples_per_pixel,
            pixels_order,
            seed,
        )),
    }
}

/// Round a requested sample count with a sampler's policy and warn when the
/// count changes.
///
/// * `name`      - Sampler name for the log message.
/// * `requested` - Requested count.
/// * `rounded`   - Count after rounding.
fn log_rounding(name: &str, requested: usize, rounded: usize) -> usize {
    if rounded != requested {
        warn!(
            "{} sampler: pixel samples being rounded from {} to {}",
            name, requested, rounded
        );
    }
    rounded
}
