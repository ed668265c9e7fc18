//! Rendering pipeline: plan → paint → raster.
//!
//! [`plan`] derives every seed-driven parameter in the fixed draw order,
//! [`paint`] turns the plan into surface primitives, and [`raster`] is the
//! software surface that produces pixels and PNG bytes.

pub mod font;
pub mod paint;
pub mod plan;
pub mod raster;
pub mod surface;

/// A finished render: raster dimensions, the exposed seed, encoded PNG
/// bytes, and a digest of the raw pixels for regression comparison.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    pub png_data: Vec<u8>,
    pub pixel_digest: String,
}
