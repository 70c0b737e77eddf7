//! Materials

#[macro_use]
extern crate log;

mod matte;

// Re-export
pub use matte::*;
