//! Film

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::{PoisonError, RwLock};

mod film_tile;

// Re-export.
pub use film_tile::*;

/// Pixel data.
#[derive(Copy, Clone, Default)]
pub struct Pixel {
    /// Running weighted sum of sample radiance.
    pub contrib_sum: Spectrum,

    /// Sum of filter weights for the sample contributions to the pixel.
    pub filter_weight_sum: Float,
}

/// Models the sensing device in a simulated camera. Samples are reconstructed
/// with a box filter that covers exactly one pixel.
pub struct Film {
    /// The overall image resolution in pixels.
    pub full_resolution: Point2i,

    /// Stores the image pixels.
    pixels: RwLock<Vec<Pixel>>,
}

impl Film {
    /// Create a new `Film`.
    ///
    /// * `resolution` - The overall image resolution in pixels.
    pub fn new(resolution: Point2i) -> Self {
        assert!(
            resolution.x > 0 && resolution.y > 0,
            "Film resolution {} must be positive",
            resolution
        );
        let n = (resolution.x * resolution.y) as usize;
        Self {
            full_resolution: resolution,
            pixels: RwLock::new(vec![Pixel::default(); n]),
        }
    }

    /// Returns the range of pixels the sampler has to generate samples for.
    pub fn get_sample_bounds(&self) -> Bounds2i {
        Bounds2i::new(Point2i::new(0, 0), self.full_resolution)
    }

    /// Gets the pixel given its coordinates in the overall image.
    ///
    /// * `p` - The pixel coordinates with respect to the overall image.
    pub fn get_pixel_offset(&self, p: &Point2i) -> usize {
        assert!(self.get_sample_bounds().contains_exclusive(p));
        (p.x + p.y * self.full_resolution.x) as usize
    }

    /// Returns a `FilmTile` that stores the contributions for pixels in the
    /// specified region of the image.
    ///
    /// * `sample_bounds` - Tile region in the overall image.
    pub fn get_film_tile(&self, sample_bounds: Bounds2i) -> FilmTile {
        FilmTile::new(sample_bounds.intersect(&self.get_sample_bounds()))
    }

    /// Merge the `FilmTile`'s pixel contribution into the image.
    ///
    /// * `tile` - The `FilmTile` to merge.
    pub fn merge_film_tile(&self, tile: &FilmTile) {
        let mut pixels = self.pixels.write().unwrap_or_else(PoisonError::into_inner);
        for p in tile.get_pixel_bounds() {
            let tile_pixel = tile.get_pixel(&p);
            let merge_pixel = &mut pixels[self.get_pixel_offset(&p)];
            merge_pixel.contrib_sum += tile_pixel.contrib_sum;
            merge_pixel.filter_weight_sum += tile_pixel.filter_weight_sum;
        }
    }

    /// Returns the final pixel value at the given pixel as linear RGB.
    ///
    /// * `p` - The pixel coordinates.
    pub fn get_pixel_rgb(&self, p: &Point2i) -> [Float; 3] {
        let pixels = self.pixels.read().unwrap_or_else(PoisonError::into_inner);
        Self::resolve(&pixels[self.get_pixel_offset(p)])
    }

    /// Converts the image to 8-bit gamma corrected RGB in scanline order.
    pub fn to_srgb8(&self) -> Vec<u8> {
        info!("Converting image to RGB and computing final weighted pixel values");

        let pixels = self.pixels.read().unwrap_or_else(PoisonError::into_inner);
        pixels
            .iter()
            .flat_map(|pixel| Self::resolve(pixel))
            .map(|v| clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8)
            .collect()
    }

    /// Normalize a pixel by its filter weight.
    ///
    /// * `pixel` - The pixel.
    fn resolve(pixel: &Pixel) -> [Float; 3] {
        let mut rgb = pixel.contrib_sum.to_rgb();
        if pixel.filter_weight_sum != 0.0 {
            let inv_wt = 1.0 / pixel.filter_weight_sum;
            for v in rgb.iter_mut() {
                *v = max(0.0, *v * inv_wt);
            }
        }
        rgb
    }
}
