//! Drawing-surface contract.
//!
//! The compositor only needs a small set of 2D primitives: filled/stroked
//! paths, a radial gradient, a color-keyed glow, an affine transform stack,
//! and text for the optional signature. Backends implement [`Surface`]; the
//! software rasterizer in [`raster`](crate::rendering::raster) is the
//! default, and [`RecordingSurface`] captures calls for tests.

use crate::palette::Hsla;

/// One path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Cubic bezier: two control points then the end point.
    CubicTo(f64, f64, f64, f64, f64, f64),
    /// Circular arc around (cx, cy) from `start` to `end` radians.
    Arc {
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
    },
    Close,
}

/// A path under construction or ready for drawing.
#[derive(Debug, Clone, Default)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.cmds.push(PathCmd::MoveTo(x, y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.cmds.push(PathCmd::LineTo(x, y));
        self
    }

    pub fn cubic_to(
        &mut self,
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    ) -> &mut Self {
        self.cmds.push(PathCmd::CubicTo(c1x, c1y, c2x, c2y, x, y));
        self
    }

    pub fn arc(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64) -> &mut Self {
        self.cmds.push(PathCmd::Arc { cx, cy, r, start, end });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    /// Full circle helper.
    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        let mut p = Self::new();
        p.arc(cx, cy, r, 0.0, std::f64::consts::TAU).close();
        p
    }

    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

/// Abstract 2D drawing target.
///
/// State (transform, alpha, line width, glow) follows a save/restore stack,
/// the way immediate-mode canvases do. Implementations may ignore the glow
/// (the recording surface does) but must keep the call order observable.
pub trait Surface {
    /// Surface extent in device pixels.
    fn size(&self) -> (u32, u32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, angle: f64);

    /// Set the alpha applied to subsequent fills and strokes. Saved and
    /// restored with the rest of the drawing state.
    fn set_alpha(&mut self, alpha: f64);
    fn set_line_width(&mut self, width: f64);

    /// Enable a soft blur halo in `color` behind subsequent fills/strokes.
    fn set_glow(&mut self, color: Hsla, blur: f64);
    fn clear_glow(&mut self);

    fn fill_path(&mut self, path: &Path, color: Hsla);
    fn stroke_path(&mut self, path: &Path, color: Hsla);

    /// Paint a radial gradient disc centered at (cx, cy) with the given
    /// radius; `stops` are (offset in 0..=1, color) pairs in ascending order.
    fn fill_radial_gradient(&mut self, cx: f64, cy: f64, r: f64, stops: &[(f64, Hsla)]);

    /// Axis-aligned filled rectangle (used for the background wash and the
    /// single-pixel grain dots).
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Hsla);

    /// Draw `text` centered horizontally on `x` with baseline `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Hsla);
}

/// A [`Surface`] that records primitive calls instead of producing pixels.
///
/// Used by tests to assert on what the painter emits without rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<RecordedOp>,
}

/// Primitive calls captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    SetAlpha(f64),
    SetLineWidth(f64),
    SetGlow(Hsla, f64),
    ClearGlow,
    FillPath { cmds: usize, color: Hsla },
    StrokePath { cmds: usize, color: Hsla },
    RadialGradient { stops: usize },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    FillText { text: String, size: f64 },
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&RecordedOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn save(&mut self) {
        self.ops.push(RecordedOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(RecordedOp::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(RecordedOp::Translate(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.ops.push(RecordedOp::Rotate(angle));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(RecordedOp::SetAlpha(alpha));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(RecordedOp::SetLineWidth(width));
    }

    fn set_glow(&mut self, color: Hsla, blur: f64) {
        self.ops.push(RecordedOp::SetGlow(color, blur));
    }

    fn clear_glow(&mut self) {
        self.ops.push(RecordedOp::ClearGlow);
    }

    fn fill_path(&mut self, path: &Path, color: Hsla) {
        self.ops.push(RecordedOp::FillPath { cmds: path.cmds().len(), color });
    }

    fn stroke_path(&mut self, path: &Path, color: Hsla) {
        self.ops.push(RecordedOp::StrokePath { cmds: path.cmds().len(), color });
    }

    fn fill_radial_gradient(&mut self, _cx: f64, _cy: f64, _r: f64, stops: &[(f64, Hsla)]) {
        self.ops.push(RecordedOp::RadialGradient { stops: stops.len() });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, _color: Hsla) {
        self.ops.push(RecordedOp::FillRect { x, y, w, h });
    }

    fn fill_text(&mut self, text: &str, _x: f64, _y: f64, size: f64, _color: Hsla) {
        self.ops.push(RecordedOp::FillText { text: text.to_string(), size });
    }
}
