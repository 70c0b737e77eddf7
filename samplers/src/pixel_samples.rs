//! Pixel Samples

use lumen_core::geometry::*;
use lumen_core::pbrt::*;
use lumen_core::sampler::*;

/// Holds the values of every sample of the current pixel for samplers that
/// distribute their values over all samples of a pixel. Sequences are stored
/// sample by sample, so sample `i` of a sequence of `n` values is the slice
/// `[i * n, (i + 1) * n)`.
pub struct PixelSamples {
    /// Number of samples per pixel.
    samples_per_pixel: usize,

    /// Offsets of the image point inside the pixel, one per sample.
    pub image: Vec<Point2f>,

    /// Lens positions, one per sample.
    pub lens: Vec<Point2f>,

    /// Values of the 1D sequences.
    pub values_1d: Vec<(Sequence1DId, usize, Vec<Float>)>,

    /// Values of the 2D sequences.
    pub values_2d: Vec<(Sequence2DId, usize, Vec<Point2f>)>,
}

impl PixelSamples {
    /// Allocate storage for the sequences of a layout.
    ///
    /// * `layout`            - Sequences every sample carries.
    /// * `samples_per_pixel` - Number of samples per pixel.
    pub fn new(layout: &SampleLayout, samples_per_pixel: usize) -> Self {
        Self {
            samples_per_pixel,
            image: vec![Point2f::zero(); samples_per_pixel],
            lens: vec![Point2f::zero(); samples_per_pixel],
            values_1d: layout
                .sequences_1d()
                .map(|(id, n)| (id, n, vec![0.0; n * samples_per_pixel]))
                .collect(),
            values_2d: layout
                .sequences_2d()
                .map(|(id, n)| (id, n, vec![Point2f::zero(); n * samples_per_pixel]))
                .collect(),
        }
    }

    /// Copy the values of one sample of the pixel into a `Sample`.
    ///
    /// * `pixel`        - The pixel.
    /// * `sample_index` - Index of the sample in the pixel.
    /// * `sample`       - The sample to fill.
    pub fn copy_to(&self, pixel: Point2i, sample_index: usize, sample: &mut Sample) {
        assert!(sample_index < self.samples_per_pixel);

        let offset = self.image[sample_index];
        sample.image_point = Point2f::new(pixel.x as Float + offset.x, pixel.y as Float + offset.y);
        sample.lens_uv = self.lens[sample_index];

        for (id, n, values) in self.values_1d.iter() {
            let start = sample_index * n;
            sample.sequence_1d_mut(*id).copy_from_slice(&values[start..start + n]);
        }
        for (id, n, values) in self.values_2d.iter() {
            let start = sample_index * n;
            sample.sequence_2d_mut(*id).copy_from_slice(&values[start..start + n]);
        }
    }
}
