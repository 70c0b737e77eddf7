//! Geometry

#[macro_use]
extern crate log;

mod disk;
mod sphere;

// Re-export
pub use disk::*;
pub use sphere::*;
