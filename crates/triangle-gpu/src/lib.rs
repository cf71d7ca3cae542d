//! wgpu pipeline objects for the fixed-triangle render stage.
//!
//! The shading stages live in `shaders/triangle.wgsl`; their CPU reference
//! functions live in `triangle-core`. This crate binds the WGSL entry points
//! to pipeline stage slots and provides a headless context plus an offscreen
//! target so the stages can be exercised without a window.

pub mod context;
pub mod offscreen;
pub mod triangle_pass;
