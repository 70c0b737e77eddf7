//! Film Tile

use super::Pixel;
use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// Stores the contributions for the pixels of one image tile so rendering
/// threads never contend on the film while generating samples.
pub struct FilmTile {
    /// Bounding box of the pixels in the tile.
    pixel_bounds: Bounds2i,

    /// The pixels in the tile.
    pixels: Vec<Pixel>,
}

impl FilmTile {
    /// Create a new `FilmTile`.
    ///
    /// * `pixel_bounds` - Bounding box of the pixels in the tile.
    pub fn new(pixel_bounds: Bounds2i) -> Self {
        let n = max(0, pixel_bounds.area()) as usize;
        Self {
            pixel_bounds,
            pixels: vec![Pixel::default(); n],
        }
    }

    /// Returns the bounding box of the pixels in the tile.
    pub fn get_pixel_bounds(&self) -> Bounds2i {
        self.pixel_bounds
    }

    /// Add a sample's radiance to the pixel containing the film position.
    /// Samples outside the tile are ignored.
    ///
    /// * `p_film`        - The sample position on the film.
    /// * `l`             - Radiance carried by the sample.
    /// * `sample_weight` - Weight returned by the camera for the sample.
    pub fn add_sample(&mut self, p_film: &Point2f, l: Spectrum, sample_weight: Float) {
        let p = Point2i::new(p_film.x.floor() as Int, p_film.y.floor() as Int);
        if !self.pixel_bounds.contains_exclusive(&p) {
            return;
        }
        let offset = self.get_pixel_offset(&p);
        let pixel = &mut self.pixels[offset];
        pixel.contrib_sum += l * sample_weight;
        pixel.filter_weight_sum += 1.0;
    }

    /// Returns the pixel at the given image coordinates.
    ///
    /// * `p` - The pixel coordinates with respect to the overall image.
    pub fn get_pixel(&self, p: &Point2i) -> &Pixel {
        &self.pixels[self.get_pixel_offset(p)]
    }

    /// Returns the offset of a pixel within the tile.
    ///
    /// * `p` - The pixel coordinates with respect to the overall image.
    fn get_pixel_offset(&self, p: &Point2i) -> usize {
        assert!(self.pixel_bounds.contains_exclusive(p));
        let width = self.pixel_bounds.p_max.x - self.pixel_bounds.p_min.x;
        let offset = (p.x - self.pixel_bounds.p_min.x) + (p.y - self.pixel_bounds.p_min.y) * width;
        offset as usize
    }
}
