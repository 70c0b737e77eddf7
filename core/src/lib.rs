//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

pub mod camera;
pub mod film;
pub mod geometry;
pub mod integrator;
pub mod interaction;
pub mod light;
pub mod material;
pub mod memory;
pub mod pbrt;
pub mod primitive;
pub mod reflection;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod spectrum;
