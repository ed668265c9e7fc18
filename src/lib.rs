//! Wordmandala
//!
//! A deterministic word→mandala renderer: one input word always yields a
//! pixel-identical decorative radial image. The word is folded into a 32-bit
//! seed, the seed drives a reproducible generator, and a layered radial
//! compositor consumes the generator's draws in a fixed order to choose
//! palette, layer counts, motif kinds, and geometry.
//!
//! # Pipeline
//!
//! - **Seed**: [`seed`] hashes the lower-cased word and stirs three stream
//!   outputs into one `u32`.
//! - **Generator**: [`rng::Mulberry32`] produces the draw sequence.
//! - **Plan**: [`rendering::plan`] consumes every draw, in order, into a
//!   size-independent parameter set.
//! - **Paint + raster**: [`rendering::paint`] walks the plan against a
//!   [`rendering::surface::Surface`]; the software rasterizer produces RGBA
//!   pixels and PNG bytes.
//!
//! # Example
//!
//! ```
//! use wordmandala::{render_word, RenderConfig};
//!
//! # fn main() -> wordmandala::Result<()> {
//! let config = RenderConfig { width: 160, height: 160, ..Default::default() };
//! let art = render_word("ocean", &config)?;
//! assert_eq!(art.seed, 2447940024);
//! assert_eq!(&art.png_data[0..4], b"\x89PNG");
//! # Ok(())
//! # }
//! ```

use log::debug;

pub mod error;
pub use error::{Error, Result};

pub mod palette;
pub mod rendering;
pub mod rng;
pub mod seed;

pub use rendering::Artwork;
pub use seed::{compute_seed, sanitize_word};

use rendering::paint;
use rendering::plan::RenderPlan;
use rendering::raster::RasterSurface;

/// Configuration for one render call
///
/// Dimensions are device pixels. The seed is derived from the word alone, so
/// re-rendering at a different size keeps every structural choice (segments,
/// layers, motif kinds) and only changes geometric scale.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Draw the sanitized word as a low-alpha signature near the bottom
    pub signature: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { width: 1024, height: 1024, signature: false }
    }
}

impl RenderConfig {
    /// Square surface of the given side length.
    pub fn square(size: u32) -> Self {
        Self { width: size, height: size, ..Default::default() }
    }
}

/// Derive the drawing plan for a word without rasterizing.
///
/// The plan carries every seed-driven choice in unit space; tests use it to
/// verify structural stability across surface sizes, and the CLI serializes
/// its summary.
pub fn plan_word(raw_word: &str) -> Result<RenderPlan> {
    let word = sanitize_word(raw_word).ok_or(Error::EmptyWord)?;
    Ok(RenderPlan::compose(compute_seed(&word)))
}

/// Render a word to a finished [`Artwork`].
///
/// The input is sanitized (trimmed, first token, capped at 32 code points);
/// an input with no renderable token is rejected before any drawing starts.
pub fn render_word(raw_word: &str, config: &RenderConfig) -> Result<Artwork> {
    let word = sanitize_word(raw_word).ok_or(Error::EmptyWord)?;
    let seed = compute_seed(&word);
    debug!("word {:?} -> seed {}", word, seed);

    let plan = RenderPlan::compose(seed);
    debug!(
        "plan: {} segments, {} layers, {} center petals",
        plan.segments,
        plan.layers.len(),
        plan.rosette.len()
    );

    let mut surface = RasterSurface::new(config.width, config.height)?;
    let signature = config.signature.then_some(word.as_str());
    paint::paint(&plan, &mut surface, signature);

    let png_data = surface.to_png()?;
    let pixel_digest = surface.pixel_digest();
    debug!("raster digest {}", pixel_digest);

    Ok(Artwork {
        width: config.width,
        height: config.height,
        seed,
        png_data,
        pixel_digest,
    })
}
