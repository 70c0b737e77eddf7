//! Samples and sample sequences.

use crate::geometry::*;
use crate::pbrt::*;
use std::ops::{Index, Range};
use std::slice::Iter;
use std::sync::Arc;

/// Identifies a sequence of 1D values reserved with
/// `Sampler::request_samples_1d()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sequence1DId(usize);

/// Identifies a sequence of 2D values reserved with
/// `Sampler::request_samples_2d()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sequence2DId(usize);

/// Maps every requested sequence to a contiguous range inside the shared
/// 1D and 2D value buffers of a `Sample`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleLayout {
    /// Ranges of the 1D sequences.
    ranges_1d: Vec<Range<usize>>,

    /// Ranges of the 2D sequences.
    ranges_2d: Vec<Range<usize>>,
}

impl SampleLayout {
    /// Appends a 1D sequence of `count` values and returns its id.
    ///
    /// * `count` - Number of values.
    pub fn push_1d(&mut self, count: usize) -> Sequence1DId {
        let start = self.total_1d();
        self.ranges_1d.push(start..start + count);
        Sequence1DId(self.ranges_1d.len() - 1)
    }

    /// Appends a 2D sequence of `count` values and returns its id.
    ///
    /// * `count` - Number of values.
    pub fn push_2d(&mut self, count: usize) -> Sequence2DId {
        let start = self.total_2d();
        self.ranges_2d.push(start..start + count);
        Sequence2DId(self.ranges_2d.len() - 1)
    }

    /// Returns the number of 1D values over all sequences.
    pub fn total_1d(&self) -> usize {
        self.ranges_1d.last().map_or(0, |r| r.end)
    }

    /// Returns the number of 2D values over all sequences.
    pub fn total_2d(&self) -> usize {
        self.ranges_2d.last().map_or(0, |r| r.end)
    }

    /// Returns the ids and lengths of the 1D sequences in request order.
    pub fn sequences_1d(&self) -> impl Iterator<Item = (Sequence1DId, usize)> + '_ {
        self.ranges_1d
            .iter()
            .enumerate()
            .map(|(i, r)| (Sequence1DId(i), r.len()))
    }

    /// Returns the ids and lengths of the 2D sequences in request order.
    pub fn sequences_2d(&self) -> impl Iterator<Item = (Sequence2DId, usize)> + '_ {
        self.ranges_2d
            .iter()
            .enumerate()
            .map(|(i, r)| (Sequence2DId(i), r.len()))
    }

    /// Returns the buffer range of a 1D sequence.
    ///
    /// * `id` - The sequence.
    fn range_1d(&self, id: Sequence1DId) -> Range<usize> {
        match self.ranges_1d.get(id.0) {
            Some(r) => r.clone(),
            None => panic!("1D sample sequence {} was never requested", id.0),
        }
    }

    /// Returns the buffer range of a 2D sequence.
    ///
    /// * `id` - The sequence.
    fn range_2d(&self, id: Sequence2DId) -> Range<usize> {
        match self.ranges_2d.get(id.0) {
            Some(r) => r.clone(),
            None => panic!("2D sample sequence {} was never requested", id.0),
        }
    }
}

/// All the random values used by one pixel sample: the image plane position,
/// the lens position and every sequence requested before rendering started.
#[derive(Clone, Debug)]
pub struct Sample {
    /// Position on the image plane in raster coordinates (pixel plus jitter).
    pub image_point: Point2f,

    /// Position on the lens in `[0, 1)^2`.
    pub lens_uv: Point2f,

    /// The pixel this sample belongs to.
    pub pixel: Point2i,

    /// Index of this sample inside its pixel.
    pub index: usize,

    /// Sequence ranges.
    layout: Arc<SampleLayout>,

    /// Storage shared by all 1D sequences.
    values_1d: Vec<Float>,

    /// Storage shared by all 2D sequences.
    values_2d: Vec<Point2f>,
}

impl Sample {
    /// Create a sample with zeroed storage for a layout.
    ///
    /// * `layout` - Sequence ranges.
    pub fn new(layout: Arc<SampleLayout>) -> Self {
        let values_1d = vec![0.0; layout.total_1d()];
        let values_2d = vec![Point2f::zero(); layout.total_2d()];
        Self {
            image_point: Point2f::zero(),
            lens_uv: Point2f::zero(),
            pixel: Point2i::zero(),
            index: 0,
            layout,
            values_1d,
            values_2d,
        }
    }

    /// Returns the layout the sample was created for.
    pub fn layout(&self) -> &Arc<SampleLayout> {
        &self.layout
    }

    /// Returns a read-only view of a 1D sequence.
    ///
    /// * `id` - The sequence.
    pub fn get_1d(&self, id: Sequence1DId) -> SamplesSequence1D<'_> {
        SamplesSequence1D {
            values: &self.values_1d[self.layout.range_1d(id)],
        }
    }

    /// Returns a read-only view of a 2D sequence.
    ///
    /// * `id` - The sequence.
    pub fn get_2d(&self, id: Sequence2DId) -> SamplesSequence2D<'_> {
        SamplesSequence2D {
            values: &self.values_2d[self.layout.range_2d(id)],
        }
    }

    /// Returns the storage of a 1D sequence for the sampler to fill.
    ///
    /// * `id` - The sequence.
    pub fn sequence_1d_mut(&mut self, id: Sequence1DId) -> &mut [Float] {
        let range = self.layout.range_1d(id);
        &mut self.values_1d[range]
    }

    /// Returns the storage of a 2D sequence for the sampler to fill.
    ///
    /// * `id` - The sequence.
    pub fn sequence_2d_mut(&mut self, id: Sequence2DId) -> &mut [Point2f] {
        let range = self.layout.range_2d(id);
        &mut self.values_2d[range]
    }

    /// Returns the storage of all 1D sequences.
    pub fn values_1d_mut(&mut self) -> &mut [Float] {
        &mut self.values_1d
    }

    /// Returns the storage of all 2D sequences.
    pub fn values_2d_mut(&mut self) -> &mut [Point2f] {
        &mut self.values_2d
    }
}

/// A read-only sequence of 1D sample values.
#[derive(Copy, Clone, Debug)]
pub struct SamplesSequence1D<'a> {
    values: &'a [Float],
}

impl<'a> SamplesSequence1D<'a> {
    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sequence has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at index `i` or `None` past the end.
    ///
    /// * `i` - The index.
    pub fn get(&self, i: usize) -> Option<Float> {
        self.values.get(i).copied()
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> Iter<'a, Float> {
        self.values.iter()
    }
}

impl<'a> Index<usize> for SamplesSequence1D<'a> {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.values[i]
    }
}

impl<'a> IntoIterator for SamplesSequence1D<'a> {
    type Item = &'a Float;
    type IntoIter = Iter<'a, Float>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// A read-only sequence of 2D sample values.
#[derive(Copy, Clone, Debug)]
pub struct SamplesSequence2D<'a> {
    values: &'a [Point2f],
}

impl<'a> SamplesSequence2D<'a> {
    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sequence has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at index `i` or `None` past the end.
    ///
    /// * `i` - The index.
    pub fn get(&self, i: usize) -> Option<Point2f> {
        self.values.get(i).copied()
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> Iter<'a, Point2f> {
        self.values.iter()
    }
}

impl<'a> Index<usize> for SamplesSequence2D<'a> {
    type Output = Point2f;

    fn index(&self, i: usize) -> &Self::Output {
        &self.values[i]
    }
}

impl<'a> IntoIterator for SamplesSequence2D<'a> {
    type Item = &'a Point2f;
    type IntoIter = Iter<'a, Point2f>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_map_to_disjoint_ranges() {
        let mut layout = SampleLayout::default();
        let a = layout.push_1d(3);
        let b = layout.push_1d(5);
        let c = layout.push_2d(4);
        assert_eq!(layout.total_1d(), 8);
        assert_eq!(layout.total_2d(), 4);

        let mut sample = Sample::new(Arc::new(layout));
        sample.sequence_1d_mut(a).fill(0.25);
        sample.sequence_1d_mut(b).fill(0.75);
        assert_eq!(sample.get_1d(a).len(), 3);
        assert!(sample.get_1d(a).iter().all(|&v| v == 0.25));
        assert!(sample.get_1d(b).iter().all(|&v| v == 0.75));
        assert_eq!(sample.get_2d(c).len(), 4);
    }

    #[test]
    fn reading_past_the_end_returns_none() {
        let mut layout = SampleLayout::default();
        let a = layout.push_2d(2);
        let sample = Sample::new(Arc::new(layout));
        let seq = sample.get_2d(a);
        assert!(seq.get(1).is_some());
        assert!(seq.get(2).is_none());
    }

    #[test]
    #[should_panic]
    fn unknown_sequence_panics() {
        let mut other = SampleLayout::default();
        let id = other.push_1d(1);
        let sample = Sample::new(Arc::new(SampleLayout::default()));
        let _ = sample.get_1d(id);
    }
}
