//! Integrators

#[macro_use]
extern crate log;

mod direct_lighting;
mod direct_surface;

// Re-export.
pub use direct_lighting::*;
pub use direct_surface::*;
