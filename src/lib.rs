//! Spheretrace path tracer
//!
//! Renders scenes of spheres with diffuse, metallic and dielectric materials
//! through a thin-lens camera, sampling light paths on the CPU. Outputs PNG,
//! PPM and EXR formats.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod hittable;
pub mod integrator;
pub mod interval;
pub mod material;
pub mod output;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod sphere;
pub mod vec;
