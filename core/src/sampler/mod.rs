//! Sampler

mod common;
mod pixels_order;
mod sample;
mod sub_sampler;

use crate::geometry::*;
use std::sync::Arc;

// Re-export
pub use common::*;
pub use pixels_order::*;
pub use sample::*;
pub use sub_sampler::*;

/// Sampler interface. A sampler is configured with the image bounds and the
/// number of samples per pixel, collects the sequences integrators request
/// and then splits the image into `SubSampler`s that generate the actual
/// samples, one per unit of parallel work.
pub trait Sampler: Send + Sync {
    /// Returns the sampler type for logging.
    fn get_type(&self) -> &'static str;

    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData;

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData;

    /// Returns nearest integer based on some criteria (e.g. nearest power of
    /// two) that the sampler can generate well-distributed samples for. The
    /// default implementation simply returns the given value.
    ///
    /// * `n` - The integer value to round.
    fn round_samples_number(&self, n: usize) -> usize {
        n
    }

    /// Create the `SubSampler` that generates samples for a range of pixels.
    ///
    /// * `bounds` - Pixel bounds of the sub-sampler.
    /// * `seed`   - Seed for the sub-sampler's random number generator.
    fn create_sub_sampler(&self, bounds: Bounds2i, seed: u64) -> Box<dyn SubSampler>;

    /// Reserve a sequence of `count` 1D values in every sample. This must be
    /// called before sample generation starts and `count` must already be
    /// rounded with `round_samples_number()`.
    ///
    /// * `count` - Number of values.
    fn request_samples_1d(&mut self, count: usize) -> Sequence1DId {
        assert_eq!(
            self.round_samples_number(count),
            count,
            "{} cannot generate 1D sequences of {} values; round the count first",
            self.get_type(),
            count
        );
        let id = self.get_data_mut().request_samples_1d(count);
        debug!("Requested 1D sequence {:?} of {} values", id, count);
        id
    }

    /// Reserve a sequence of `count` 2D values in every sample. This must be
    /// called before sample generation starts and `count` must already be
    /// rounded with `round_samples_number()`.
    ///
    /// * `count` - Number of values.
    fn request_samples_2d(&mut self, count: usize) -> Sequence2DId {
        assert_eq!(
            self.round_samples_number(count),
            count,
            "{} cannot generate 2D sequences of {} values; round the count first",
            self.get_type(),
            count
        );
        let id = self.get_data_mut().request_samples_2d(count);
        debug!("Requested 2D sequence {:?} of {} values", id, count);
        id
    }

    /// Returns the number of samples generated for each pixel.
    fn samples_per_pixel(&self) -> usize {
        self.get_data().samples_per_pixel
    }

    /// Returns the pixel bounds samples are generated for.
    fn sample_bounds(&self) -> Bounds2i {
        self.get_data().sample_bounds
    }

    /// Stop accepting sequence requests. Returns the final sample layout.
    fn start_generation(&mut self) -> Arc<SampleLayout> {
        self.get_data_mut().start_generation()
    }

    /// Returns a new `Sample` with storage for every requested sequence.
    /// Sample generation must have started.
    fn create_sample(&self) -> Sample {
        Sample::new(self.get_data().layout_for_generation())
    }

    /// Partition the sample bounds into square tiles and return one
    /// `SubSampler` per tile in row-major tile order. Sub-sampler `i` is
    /// seeded with the sampler's seed plus `i` so the generated samples do not
    /// depend on which thread processes which tile.
    ///
    /// * `tile_size` - Width and height of the tiles in pixels.
    fn sub_samplers(&mut self, tile_size: usize) -> Vec<Box<dyn SubSampler>> {
        self.start_generation();
        let data = self.get_data();
        let seed = data.seed;
        let tiles = tile_bounds(&data.sample_bounds, tile_size);
        debug!(
            "{} creating {} sub-samplers for {} at {} samples per pixel",
            self.get_type(),
            tiles.len(),
            data.sample_bounds,
            data.samples_per_pixel
        );
        tiles
            .into_iter()
            .enumerate()
            .map(|(i, tile)| self.create_sub_sampler(tile, seed.wrapping_add(i as u64)))
            .collect()
    }
}

/// Split pixel bounds into square tiles in row-major order. Tiles on the right
/// and bottom edges are clipped to the bounds.
///
/// * `bounds`    - Pixel bounds.
/// * `tile_size` - Width and height of the tiles in pixels.
pub fn tile_bounds(bounds: &Bounds2i, tile_size: usize) -> Vec<Bounds2i> {
    assert!(tile_size > 0, "tile size must be positive");
    if bounds.is_empty() {
        return vec![];
    }

    let size = tile_size as i32;
    let extent = bounds.diagonal();
    let n_tiles = Point2i::new((extent.x + size - 1) / size, (extent.y + size - 1) / size);
    Bounds2::new(Point2i::zero(), n_tiles)
        .into_iter()
        .map(|t| {
            let p0 = bounds.p_min + Vector2i::new(t.x * size, t.y * size);
            let p1 = p0 + Vector2i::new(size, size);
            Bounds2::new(p0, p1).intersect(bounds)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_partition_bounds() {
        let bounds = Bounds2::new(Point2::new(1, 2), Point2::new(11, 9));
        let tiles = tile_bounds(&bounds, 4);
        assert_eq!(tiles.len(), 3 * 2);
        assert_eq!(tiles.iter().map(|t| t.area()).sum::<i32>(), bounds.area());
        assert_eq!(tiles[0], Bounds2::new(Point2::new(1, 2), Point2::new(5, 6)));
        assert_eq!(tiles[5], Bounds2::new(Point2::new(9, 6), Point2::new(11, 9)));
    }

    #[test]
    fn empty_bounds_have_no_tiles() {
        let bounds = Bounds2::new(Point2::new(0, 0), Point2::new(0, 9));
        assert!(tile_bounds(&bounds, 4).is_empty());
    }
}
