//! Image pixel traversal orders.

use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::*;
use std::fmt;
use std::str::FromStr;

/// Yields the pixels of a bounding box one at a time. Every pixel of the
/// bounds is produced exactly once between `reset()` and the first `None`.
pub trait ImagePixelsOrder: Send {
    /// Set the pixels to traverse and restart the traversal.
    ///
    /// * `bounds` - Pixel bounds (upper bounds exclusive).
    fn set_bounds(&mut self, bounds: Bounds2i);

    /// Restart the traversal from the first pixel.
    fn reset(&mut self);

    /// Returns the next pixel, or `None` once every pixel has been produced.
    fn next_pixel(&mut self) -> Option<Point2i>;
}

/// Number of pixels in a bounding box.
fn pixel_count(bounds: &Bounds2i) -> usize {
    max(bounds.area(), 0) as usize
}

/// Row by row, left to right.
pub struct ConsecutivePixelsOrder {
    bounds: Bounds2i,
    next: usize,
}

impl ConsecutivePixelsOrder {
    /// Create a new consecutive order.
    ///
    /// * `bounds` - Pixel bounds.
    pub fn new(bounds: Bounds2i) -> Self {
        Self { bounds, next: 0 }
    }
}

impl ImagePixelsOrder for ConsecutivePixelsOrder {
    fn set_bounds(&mut self, bounds: Bounds2i) {
        self.bounds = bounds;
        self.reset();
    }

    fn reset(&mut self) {
        self.next = 0;
    }

    fn next_pixel(&mut self) -> Option<Point2i> {
        if self.next >= pixel_count(&self.bounds) {
            return None;
        }
        let width = self.bounds.diagonal().x as usize;
        let (row, col) = (self.next / width, self.next % width);
        self.next += 1;
        Some(self.bounds.p_min + Vector2i::new(col as Int, row as Int))
    }
}

/// Row by row, alternating left to right and right to left so consecutive
/// pixels are always neighbours.
pub struct SerpentinePixelsOrder {
    bounds: Bounds2i,
    next: usize,
}

impl SerpentinePixelsOrder {
    /// Create a new serpentine order.
    ///
    /// * `bounds` - Pixel bounds.
    pub fn new(bounds: Bounds2i) -> Self {
        Self { bounds, next: 0 }
    }
}

impl ImagePixelsOrder for SerpentinePixelsOrder {
    fn set_bounds(&mut self, bounds: Bounds2i) {
        self.bounds = bounds;
        self.reset();
    }

    fn reset(&mut self) {
        self.next = 0;
    }

    fn next_pixel(&mut self) -> Option<Point2i> {
        if self.next >= pixel_count(&self.bounds) {
            return None;
        }
        let width = self.bounds.diagonal().x as usize;
        let (row, mut col) = (self.next / width, self.next % width);
        if row % 2 == 1 {
            col = width - 1 - col;
        }
        self.next += 1;
        Some(self.bounds.p_min + Vector2i::new(col as Int, row as Int))
    }
}

/// A random permutation of the pixels; reshuffled on every `reset()`.
pub struct RandomPixelsOrder {
    pixels: Vec<Point2i>,
    next: usize,
    rng: RNG,
}

impl RandomPixelsOrder {
    /// Create a new random order.
    ///
    /// * `bounds` - Pixel bounds.
    /// * `seed`   - Seed for the shuffle.
    pub fn new(bounds: Bounds2i, seed: u64) -> Self {
        let mut order = Self {
            pixels: vec![],
            next: 0,
            rng: RNG::new(seed),
        };
        order.set_bounds(bounds);
        order
    }
}

impl ImagePixelsOrder for RandomPixelsOrder {
    fn set_bounds(&mut self, bounds: Bounds2i) {
        self.pixels = bounds.into_iter().collect();
        self.reset();
    }

    fn reset(&mut self) {
        let n = self.pixels.len();
        self.rng.shuffle(&mut self.pixels, n, 1);
        self.next = 0;
    }

    fn next_pixel(&mut self) -> Option<Point2i> {
        let p = self.pixels.get(self.next).copied();
        if p.is_some() {
            self.next += 1;
        }
        p
    }
}

/// Selects an `ImagePixelsOrder` implementation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PixelsOrderKind {
    /// `ConsecutivePixelsOrder`
    #[default]
    Consecutive,

    /// `SerpentinePixelsOrder`
    Serpentine,

    /// `RandomPixelsOrder`
    Random,
}

impl PixelsOrderKind {
    /// Create the pixel order for a bounding box.
    ///
    /// * `bounds` - Pixel bounds.
    /// * `seed`   - Seed used by randomized orders.
    pub fn create(&self, bounds: Bounds2i, seed: u64) -> Box<dyn ImagePixelsOrder> {
        match self {
            Self::Consecutive => Box::new(ConsecutivePixelsOrder::new(bounds)),
            Self::Serpentine => Box::new(SerpentinePixelsOrder::new(bounds)),
            Self::Random => Box::new(RandomPixelsOrder::new(bounds, seed)),
        }
    }
}

impl FromStr for PixelsOrderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consecutive" => Ok(Self::Consecutive),
            "serpentine" => Ok(Self::Serpentine),
            "random" => Ok(Self::Random),
            _ => Err(format!("unknown pixel order '{}'", s)),
        }
    }
}

impl fmt::Display for PixelsOrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Consecutive => "consecutive",
            Self::Serpentine => "serpentine",
            Self::Random => "random",
        };
        write!(f, "{}", name)
    }
}
