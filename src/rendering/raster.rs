//! Software rasterizer backing the [`Surface`] trait.
//!
//! Pixels are stored premultiplied RGBA f32 and converted to straight 8-bit
//! on export. Paths are flattened with fixed subdivision counts and filled
//! with a nonzero-winding scanline pass using four vertical sub-samples and
//! fractional horizontal coverage. Strokes are stamped as per-segment quads
//! plus round joint disks, max-merged so overlaps do not double-blend. The
//! glow effect composites a box-blurred copy of the shape's coverage mask
//! beneath the sharp shape.
//!
//! Everything is plain arithmetic in a fixed order, so identical input
//! produces identical pixels.

use std::f64::consts::PI;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::palette::Hsla;
use crate::rendering::font;
use crate::rendering::surface::{Path, PathCmd, Surface};

/// Vertical sub-samples per pixel row during polygon filling.
const SUB_SAMPLES: usize = 4;
/// Fixed subdivision count for cubic beziers.
const CUBIC_SEGMENTS: usize = 24;
/// Maximum angular step when flattening arcs, radians.
const ARC_STEP: f64 = PI / 32.0;
/// Alpha factor applied to the blurred glow pass.
const GLOW_ALPHA: f64 = 0.8;

#[derive(Debug, Clone, Copy)]
struct Affine {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Affine {
    const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.e += self.a * dx + self.c * dy;
        self.f += self.b * dx + self.d * dy;
    }

    fn rotate(&mut self, angle: f64) {
        let (s, c) = angle.sin_cos();
        let (a, b, cc, d) = (self.a, self.b, self.c, self.d);
        self.a = a * c + cc * s;
        self.b = b * c + d * s;
        self.c = cc * c - a * s;
        self.d = d * c - b * s;
    }
}

#[derive(Debug, Clone)]
struct DrawState {
    transform: Affine,
    alpha: f64,
    line_width: f64,
    glow: Option<(Hsla, f64)>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self { transform: Affine::IDENTITY, alpha: 1.0, line_width: 1.0, glow: None }
    }
}

/// A flattened subpath in device coordinates.
#[derive(Debug, Clone)]
struct Polyline {
    pts: Vec<(f64, f64)>,
    closed: bool,
}

/// Bbox-cropped f32 coverage tile.
#[derive(Debug, Clone)]
struct Mask {
    x0: i32,
    y0: i32,
    w: usize,
    h: usize,
    data: Vec<f32>,
}

impl Mask {
    fn new(x0: i32, y0: i32, w: usize, h: usize) -> Self {
        Self { x0, y0, w, h, data: vec![0.0; w * h] }
    }

    /// Max-merge `other` into self; non-overlapping texels are skipped.
    fn merge_max(&mut self, other: &Mask) {
        for oy in 0..other.h {
            let y = other.y0 + oy as i32 - self.y0;
            if y < 0 || y as usize >= self.h {
                continue;
            }
            for ox in 0..other.w {
                let x = other.x0 + ox as i32 - self.x0;
                if x < 0 || x as usize >= self.w {
                    continue;
                }
                let dst = &mut self.data[y as usize * self.w + x as usize];
                let src = other.data[oy * other.w + ox];
                if src > *dst {
                    *dst = src;
                }
            }
        }
    }
}

/// An owned RGBA raster implementing [`Surface`].
pub struct RasterSurface {
    width: u32,
    height: u32,
    /// Premultiplied RGBA, row-major.
    pixels: Vec<f32>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl RasterSurface {
    /// Allocate a transparent surface. Zero dimensions are rejected.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSurface { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0.0; width as usize * height as usize * 4],
            state: DrawState::default(),
            stack: Vec::new(),
        })
    }

    /// Straight-alpha 8-bit RGBA copy of the raster.
    pub fn pixels_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len());
        for px in self.pixels.chunks_exact(4) {
            let a = px[3].clamp(0.0, 1.0);
            let unmul = |c: f32| {
                let v = if a > 0.0 { (c / a).clamp(0.0, 1.0) } else { 0.0 };
                (v * 255.0 + 0.5) as u8
            };
            out.push(unmul(px[0]));
            out.push(unmul(px[1]));
            out.push(unmul(px[2]));
            out.push((a * 255.0 + 0.5) as u8);
        }
        out
    }

    /// Encode the raster as a PNG byte stream.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let data = self.pixels_rgba8();
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&data)?;
        }
        Ok(out)
    }

    /// sha256 hex digest of the 8-bit pixel data, for golden tests.
    pub fn pixel_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.pixels_rgba8());
        hex::encode(hasher.finalize())
    }

    fn blend_pixel(&mut self, x: i32, y: i32, rgb: [f64; 3], alpha: f64) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0) as f32;
        if a <= 0.0 {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let inv = 1.0 - a;
        self.pixels[idx] = rgb[0] as f32 * a + self.pixels[idx] * inv;
        self.pixels[idx + 1] = rgb[1] as f32 * a + self.pixels[idx + 1] * inv;
        self.pixels[idx + 2] = rgb[2] as f32 * a + self.pixels[idx + 2] * inv;
        self.pixels[idx + 3] = a + self.pixels[idx + 3] * inv;
    }

    /// Composite a coverage mask in `color` scaled by `alpha_mult`.
    fn composite(&mut self, mask: &Mask, color: Hsla, alpha_mult: f64) {
        let rgba = color.to_rgba();
        let base = rgba[3] * alpha_mult;
        if base <= 0.0 {
            return;
        }
        for my in 0..mask.h {
            let y = mask.y0 + my as i32;
            for mx in 0..mask.w {
                let cov = mask.data[my * mask.w + mx];
                if cov > 0.0 {
                    let x = mask.x0 + mx as i32;
                    self.blend_pixel(x, y, [rgba[0], rgba[1], rgba[2]], f64::from(cov) * base);
                }
            }
        }
    }

    /// Glow-then-sharp composite shared by fills and strokes.
    fn draw_mask(&mut self, mask: &Mask, color: Hsla) {
        let alpha = self.state.alpha;
        if let Some((glow_color, blur)) = self.state.glow {
            let blurred = blur_mask(mask, blur);
            self.composite(&blurred, glow_color, alpha * GLOW_ALPHA);
        }
        self.composite(mask, color, alpha);
    }

    fn glow_margin(&self) -> i32 {
        match self.state.glow {
            Some((_, blur)) => 3 * box_radius(blur) + 2,
            None => 1,
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f64) {
        self.state.transform.rotate(angle);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width.max(0.1);
    }

    fn set_glow(&mut self, color: Hsla, blur: f64) {
        self.state.glow = Some((color, blur.max(0.0)));
    }

    fn clear_glow(&mut self) {
        self.state.glow = None;
    }

    fn fill_path(&mut self, path: &Path, color: Hsla) {
        let polys = flatten(path, &self.state.transform);
        if let Some(mask) = fill_mask(&polys, self.width, self.height, self.glow_margin()) {
            self.draw_mask(&mask, color);
        }
    }

    fn stroke_path(&mut self, path: &Path, color: Hsla) {
        let polys = flatten(path, &self.state.transform);
        let lw = self.state.line_width;
        if let Some(mask) = stroke_mask(&polys, lw, self.width, self.height, self.glow_margin()) {
            self.draw_mask(&mask, color);
        }
    }

    fn fill_radial_gradient(&mut self, cx: f64, cy: f64, r: f64, stops: &[(f64, Hsla)]) {
        if stops.is_empty() || r <= 0.0 {
            return;
        }
        let (cx, cy) = self.state.transform.apply(cx, cy);
        let alpha = self.state.alpha;
        let rgbas: Vec<(f64, [f64; 4])> = stops.iter().map(|(o, c)| (*o, c.to_rgba())).collect();

        let x0 = ((cx - r).floor() as i32).max(0);
        let x1 = ((cx + r).ceil() as i32).min(self.width as i32);
        let y0 = ((cy - r).floor() as i32).max(0);
        let y1 = ((cy + r).ceil() as i32).min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = f64::from(x) + 0.5 - cx;
                let dy = f64::from(y) + 0.5 - cy;
                let t = (dx * dx + dy * dy).sqrt() / r;
                if t > 1.0 {
                    continue;
                }
                let rgba = gradient_at(&rgbas, t);
                self.blend_pixel(x, y, [rgba[0], rgba[1], rgba[2]], rgba[3] * alpha);
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Hsla) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        // Rects are axis-aligned; the transform moves the origin only.
        let (x, y) = self.state.transform.apply(x, y);
        let rgba = color.to_rgba();
        let base = rgba[3] * self.state.alpha;
        if base <= 0.0 {
            return;
        }
        let y_start = y.floor() as i32;
        let y_end = (y + h).ceil() as i32;
        let x_start = x.floor() as i32;
        let x_end = (x + w).ceil() as i32;
        for py in y_start..y_end {
            let cov_y = overlap(f64::from(py), y, y + h);
            if cov_y <= 0.0 {
                continue;
            }
            for px in x_start..x_end {
                let cov_x = overlap(f64::from(px), x, x + w);
                if cov_x > 0.0 {
                    self.blend_pixel(px, py, [rgba[0], rgba[1], rgba[2]], base * cov_x * cov_y);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Hsla) {
        let scale = size / 8.0;
        let advance = f64::from(font::GLYPH_ADVANCE) * scale;
        let n = text.chars().count();
        if n == 0 {
            return;
        }
        let total = advance * n as f64 - scale;
        let mut pen_x = x - total / 2.0;
        let top = y - f64::from(font::GLYPH_HEIGHT) * scale;
        for ch in text.chars() {
            let g = font::glyph(ch);
            for col in 0..5 {
                for row in 0..font::GLYPH_HEIGHT {
                    if font::pixel_set(g, col, row) {
                        self.fill_rect(
                            pen_x + f64::from(col) * scale,
                            top + f64::from(row) * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            pen_x += advance;
        }
    }
}

/// Overlap of the unit pixel starting at `p` with the interval [lo, hi).
fn overlap(p: f64, lo: f64, hi: f64) -> f64 {
    (hi.min(p + 1.0) - lo.max(p)).clamp(0.0, 1.0)
}

/// Piecewise-linear interpolation over gradient stops.
fn gradient_at(stops: &[(f64, [f64; 4])], t: f64) -> [f64; 4] {
    if t <= stops[0].0 {
        return stops[0].1;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let f = if o1 > o0 { (t - o0) / (o1 - o0) } else { 0.0 };
            let mut out = [0.0; 4];
            for (i, v) in out.iter_mut().enumerate() {
                *v = c0[i] + (c1[i] - c0[i]) * f;
            }
            return out;
        }
    }
    stops[stops.len() - 1].1
}

/// Flatten path commands to device-space polylines.
fn flatten(path: &Path, t: &Affine) -> Vec<Polyline> {
    let mut out: Vec<Polyline> = Vec::new();
    let mut pts: Vec<(f64, f64)> = Vec::new();
    let mut cur: Option<(f64, f64)> = None;
    let mut subpath_start: Option<(f64, f64)> = None;

    fn flush(pts: &mut Vec<(f64, f64)>, closed: bool, out: &mut Vec<Polyline>) {
        if pts.len() >= 2 {
            out.push(Polyline { pts: std::mem::take(pts), closed });
        } else {
            pts.clear();
        }
    }

    for cmd in path.cmds() {
        match *cmd {
            PathCmd::MoveTo(x, y) => {
                flush(&mut pts, false, &mut out);
                cur = Some((x, y));
                subpath_start = cur;
                pts.push(t.apply(x, y));
            }
            PathCmd::LineTo(x, y) => {
                if cur.is_none() {
                    subpath_start = Some((x, y));
                }
                cur = Some((x, y));
                pts.push(t.apply(x, y));
            }
            PathCmd::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
                let (px, py) = cur.unwrap_or((c1x, c1y));
                for k in 1..=CUBIC_SEGMENTS {
                    let s = k as f64 / CUBIC_SEGMENTS as f64;
                    let u = 1.0 - s;
                    let bx = u * u * u * px
                        + 3.0 * u * u * s * c1x
                        + 3.0 * u * s * s * c2x
                        + s * s * s * x;
                    let by = u * u * u * py
                        + 3.0 * u * u * s * c1y
                        + 3.0 * u * s * s * c2y
                        + s * s * s * y;
                    pts.push(t.apply(bx, by));
                }
                cur = Some((x, y));
            }
            PathCmd::Arc { cx, cy, r, start, end } => {
                let sweep = end - start;
                let steps = ((sweep.abs() / ARC_STEP).ceil() as usize).max(2);
                for k in 0..=steps {
                    let theta = start + sweep * (k as f64 / steps as f64);
                    let (ax, ay) = (cx + r * theta.cos(), cy + r * theta.sin());
                    if cur.is_none() && k == 0 {
                        subpath_start = Some((ax, ay));
                    }
                    pts.push(t.apply(ax, ay));
                    cur = Some((ax, ay));
                }
            }
            PathCmd::Close => {
                if let Some(start) = subpath_start {
                    cur = Some(start);
                }
                flush(&mut pts, true, &mut out);
            }
        }
    }
    flush(&mut pts, false, &mut out);
    out
}

fn poly_bbox(polys: &[Polyline]) -> Option<(f64, f64, f64, f64)> {
    let mut bbox: Option<(f64, f64, f64, f64)> = None;
    for poly in polys {
        for &(x, y) in &poly.pts {
            bbox = Some(match bbox {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bbox
}

/// Nonzero-winding scanline fill into a bbox-cropped coverage mask.
fn fill_mask(polys: &[Polyline], width: u32, height: u32, margin: i32) -> Option<Mask> {
    let (bx0, by0, bx1, by1) = poly_bbox(polys)?;
    let x0 = ((bx0.floor() as i32) - margin).max(-margin - 2);
    let y0 = ((by0.floor() as i32) - margin).max(-margin - 2);
    let x1 = ((bx1.ceil() as i32) + margin).min(width as i32 + margin + 2);
    let y1 = ((by1.ceil() as i32) + margin).min(height as i32 + margin + 2);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    let (mw, mh) = ((x1 - x0) as usize, (y1 - y0) as usize);
    let mut mask = Mask::new(x0, y0, mw, mh);

    // Edge list with all subpaths implicitly closed for filling.
    let mut edges: Vec<((f64, f64), (f64, f64))> = Vec::new();
    for poly in polys {
        let n = poly.pts.len();
        for i in 0..n {
            let a = poly.pts[i];
            let b = poly.pts[(i + 1) % n];
            if a.1 != b.1 {
                edges.push((a, b));
            }
        }
    }
    if edges.is_empty() {
        return None;
    }

    let weight = 1.0 / SUB_SAMPLES as f32;
    let mut crossings: Vec<(f64, i32)> = Vec::new();
    for my in 0..mh {
        let row = my * mw;
        for sub in 0..SUB_SAMPLES {
            let sy = f64::from(y0 + my as i32) + (sub as f64 + 0.5) / SUB_SAMPLES as f64;
            crossings.clear();
            for &((ax, ay), (bx, by)) in &edges {
                let (ymin, ymax) = if ay < by { (ay, by) } else { (by, ay) };
                if sy < ymin || sy >= ymax {
                    continue;
                }
                let x = ax + (sy - ay) * (bx - ax) / (by - ay);
                crossings.push((x, if by > ay { 1 } else { -1 }));
            }
            crossings.sort_by(|l, r| l.0.partial_cmp(&r.0).unwrap_or(std::cmp::Ordering::Equal));

            let mut winding = 0;
            let mut span_start = 0.0;
            for &(x, dir) in crossings.iter() {
                if winding == 0 && dir != 0 {
                    span_start = x;
                }
                let prev = winding;
                winding += dir;
                if prev != 0 && winding == 0 {
                    add_span(&mut mask.data[row..row + mw], span_start - f64::from(x0), x - f64::from(x0), weight, mw);
                }
            }
        }
    }
    Some(mask)
}

/// Accumulate one sub-scanline span with fractional endpoints.
fn add_span(row: &mut [f32], xa: f64, xb: f64, weight: f32, mw: usize) {
    let xa = xa.max(0.0);
    let xb = xb.min(mw as f64);
    if xb <= xa {
        return;
    }
    let first = xa.floor() as usize;
    let last = (xb.ceil() as usize).min(mw);
    for px in first..last {
        let cov = (xb.min(px as f64 + 1.0) - xa.max(px as f64)).clamp(0.0, 1.0);
        row[px] += weight * cov as f32;
    }
}

/// Stroke coverage: per-segment quads plus round joint disks, max-merged so
/// overlapping stamps do not double-blend.
fn stroke_mask(
    polys: &[Polyline],
    line_width: f64,
    width: u32,
    height: u32,
    margin: i32,
) -> Option<Mask> {
    let (bx0, by0, bx1, by1) = poly_bbox(polys)?;
    let half = line_width / 2.0;
    let pad = margin + half.ceil() as i32 + 1;
    let x0 = (bx0.floor() as i32) - pad;
    let y0 = (by0.floor() as i32) - pad;
    let x1 = (bx1.ceil() as i32) + pad;
    let y1 = (by1.ceil() as i32) + pad;
    let x0c = x0.max(-pad - 2);
    let y0c = y0.max(-pad - 2);
    let x1c = x1.min(width as i32 + pad + 2);
    let y1c = y1.min(height as i32 + pad + 2);
    if x1c <= x0c || y1c <= y0c {
        return None;
    }
    let mut mask = Mask::new(x0c, y0c, (x1c - x0c) as usize, (y1c - y0c) as usize);

    let mut stamp = |polys: &[Polyline], mask: &mut Mask| {
        if let Some(sub) = fill_mask(polys, width, height, 1) {
            mask.merge_max(&sub);
        }
    };

    for poly in polys {
        let n = poly.pts.len();
        if n < 2 {
            continue;
        }
        let seg_count = if poly.closed { n } else { n - 1 };
        for i in 0..seg_count {
            let (ax, ay) = poly.pts[i];
            let (bx, by) = poly.pts[(i + 1) % n];
            let (dx, dy) = (bx - ax, by - ay);
            let len = (dx * dx + dy * dy).sqrt();
            if len <= f64::EPSILON {
                continue;
            }
            let (nx, ny) = (-dy / len * half, dx / len * half);
            let quad = Polyline {
                pts: vec![
                    (ax + nx, ay + ny),
                    (bx + nx, by + ny),
                    (bx - nx, by - ny),
                    (ax - nx, ay - ny),
                ],
                closed: true,
            };
            stamp(std::slice::from_ref(&quad), &mut mask);
        }
        // Round joints, and round caps on open polylines.
        for i in 0..n {
            let (cx, cy) = poly.pts[i];
            let disk = disk_polyline(cx, cy, half);
            stamp(std::slice::from_ref(&disk), &mut mask);
        }
    }
    Some(mask)
}

fn disk_polyline(cx: f64, cy: f64, r: f64) -> Polyline {
    let steps = ((r * 4.0).ceil() as usize).clamp(8, 48);
    let mut pts = Vec::with_capacity(steps);
    for k in 0..steps {
        let theta = k as f64 / steps as f64 * 2.0 * PI;
        pts.push((cx + r * theta.cos(), cy + r * theta.sin()));
    }
    Polyline { pts, closed: true }
}

fn box_radius(blur: f64) -> i32 {
    ((blur / 2.0).round() as i32).max(1)
}

/// Three box passes approximate a gaussian of sigma ~ blur/2.
fn blur_mask(mask: &Mask, blur: f64) -> Mask {
    let rb = box_radius(blur) as usize;
    let margin = (rb * 3) as i32;
    let w = mask.w + 2 * margin as usize;
    let h = mask.h + 2 * margin as usize;
    let mut out = Mask::new(mask.x0 - margin, mask.y0 - margin, w, h);
    for my in 0..mask.h {
        for mx in 0..mask.w {
            out.data[(my + margin as usize) * w + mx + margin as usize] =
                mask.data[my * mask.w + mx];
        }
    }

    let mut tmp = vec![0.0f32; w * h];
    for _ in 0..3 {
        box_pass_horizontal(&out.data, &mut tmp, w, h, rb);
        box_pass_vertical(&tmp, &mut out.data, w, h, rb);
    }
    out
}

fn box_pass_horizontal(src: &[f32], dst: &mut [f32], w: usize, h: usize, r: usize) {
    let norm = 1.0 / (2 * r + 1) as f32;
    for y in 0..h {
        let row = y * w;
        let mut acc = 0.0f32;
        for x in 0..=r.min(w - 1) {
            acc += src[row + x];
        }
        for x in 0..w {
            dst[row + x] = acc * norm;
            if x + r + 1 < w {
                acc += src[row + x + r + 1];
            }
            if x >= r {
                acc -= src[row + x - r];
            }
        }
    }
}

fn box_pass_vertical(src: &[f32], dst: &mut [f32], w: usize, h: usize, r: usize) {
    let norm = 1.0 / (2 * r + 1) as f32;
    for x in 0..w {
        let mut acc = 0.0f32;
        for y in 0..=r.min(h - 1) {
            acc += src[y * w + x];
        }
        for y in 0..h {
            dst[y * w + x] = acc * norm;
            if y + r + 1 < h {
                acc += src[(y + r + 1) * w + x];
            }
            if y >= r {
                acc -= src[(y - r) * w + x];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Hsla {
        Hsla::new(0.0, 0.0, 100.0, 1.0)
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(RasterSurface::new(0, 10).is_err());
        assert!(RasterSurface::new(10, 0).is_err());
    }

    #[test]
    fn fill_rect_covers_pixels() {
        let mut s = RasterSurface::new(16, 16).unwrap();
        s.fill_rect(4.0, 4.0, 8.0, 8.0, white());
        let px = s.pixels_rgba8();
        let idx = (8 * 16 + 8) * 4;
        assert_eq!(px[idx + 3], 255);
        assert_eq!(px[idx], 255);
        // Outside the rect stays transparent.
        assert_eq!(px[3], 0);
    }

    #[test]
    fn fill_path_triangle_hits_interior_not_exterior() {
        let mut s = RasterSurface::new(32, 32).unwrap();
        let mut p = Path::new();
        p.move_to(2.0, 2.0).line_to(30.0, 2.0).line_to(2.0, 30.0).close();
        s.fill_path(&p, white());
        let px = s.pixels_rgba8();
        let at = |x: usize, y: usize| px[(y * 32 + x) * 4 + 3];
        assert!(at(8, 8) > 200, "interior should be covered");
        assert_eq!(at(30, 30), 0, "exterior should stay empty");
    }

    #[test]
    fn stroke_marks_outline_only() {
        let mut s = RasterSurface::new(32, 32).unwrap();
        s.set_line_width(2.0);
        let p = Path::circle(16.0, 16.0, 10.0);
        s.stroke_path(&p, white());
        let px = s.pixels_rgba8();
        let at = |x: usize, y: usize| px[(y * 32 + x) * 4 + 3];
        assert!(at(26, 16) > 100, "ring should be drawn");
        assert_eq!(at(16, 16), 0, "circle center should stay empty");
    }

    #[test]
    fn transform_rotates_fills() {
        let mut s = RasterSurface::new(32, 32).unwrap();
        s.save();
        s.translate(16.0, 16.0);
        s.rotate(PI / 2.0);
        let mut p = Path::new();
        // A bar along +x; after rotation it lies along +y.
        p.move_to(4.0, -1.5).line_to(12.0, -1.5).line_to(12.0, 1.5).line_to(4.0, 1.5).close();
        s.fill_path(&p, white());
        s.restore();
        let px = s.pixels_rgba8();
        let at = |x: usize, y: usize| px[(y * 32 + x) * 4 + 3];
        assert!(at(16, 24) > 200, "rotated bar should extend downward");
        assert_eq!(at(24, 16), 0, "unrotated position should be empty");
    }

    #[test]
    fn glow_spreads_beyond_shape() {
        let mut s = RasterSurface::new(48, 48).unwrap();
        s.set_glow(white(), 8.0);
        let p = Path::circle(24.0, 24.0, 4.0);
        s.fill_path(&p, white());
        let px = s.pixels_rgba8();
        let at = |x: usize, y: usize| px[(y * 48 + x) * 4 + 3];
        assert!(at(24, 24) > 200);
        assert!(at(24, 32) > 0, "halo should reach past the shape edge");
    }

    #[test]
    fn gradient_interpolates_stops() {
        let mut s = RasterSurface::new(20, 20).unwrap();
        let stops = [
            (0.0, Hsla::new(0.0, 0.0, 100.0, 1.0)),
            (1.0, Hsla::new(0.0, 0.0, 0.0, 1.0)),
        ];
        s.fill_radial_gradient(10.0, 10.0, 10.0, &stops);
        let px = s.pixels_rgba8();
        let center = px[(10 * 20 + 10) * 4];
        let edge = px[(10 * 20 + 1) * 4];
        assert!(center > 220, "center should be near white");
        assert!(edge < center, "edge should be darker than center");
    }

    #[test]
    fn identical_draw_sequences_digest_identically() {
        let draw = || {
            let mut s = RasterSurface::new(40, 40).unwrap();
            s.fill_rect(0.0, 0.0, 40.0, 40.0, Hsla::new(220.0, 50.0, 10.0, 1.0));
            s.set_glow(white(), 6.0);
            s.fill_path(&Path::circle(20.0, 20.0, 8.0), Hsla::new(40.0, 90.0, 60.0, 0.9));
            s.pixel_digest()
        };
        assert_eq!(draw(), draw());
    }

    #[test]
    fn png_export_has_signature_and_dimensions() {
        let s = RasterSurface::new(12, 7).unwrap();
        let data = s.to_png().unwrap();
        assert_eq!(&data[0..8], b"\x89PNG\r\n\x1a\n");
        // Width/height live in the IHDR chunk at fixed offsets.
        assert_eq!(&data[16..20], &12u32.to_be_bytes());
        assert_eq!(&data[20..24], &7u32.to_be_bytes());
    }

    #[test]
    fn text_renders_pixels() {
        let mut s = RasterSurface::new(64, 32).unwrap();
        s.fill_text("ab", 32.0, 24.0, 16.0, white());
        let px = s.pixels_rgba8();
        let any = px.chunks_exact(4).any(|p| p[3] > 0);
        assert!(any, "text should produce coverage");
    }
}
