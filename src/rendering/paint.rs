//! Walks a [`RenderPlan`] and issues surface primitives.
//!
//! The painter consumes no generator draws; all randomness is already baked
//! into the plan. Geometry here maps the plan's unit-space values into
//! device pixels around the surface center. Motifs are built along the +x
//! axis and rotated into place per segment.

use std::f64::consts::{PI, TAU};

use crate::palette::{Hsla, Palette};
use crate::rendering::plan::{
    BandSeg, DotsSeg, LayerPlan, PetalSeg, RaysSeg, RenderPlan, SegmentMotif, TriangleSeg,
};
use crate::rendering::surface::{Path, Surface};

/// Reference radius as a fraction of the short surface side.
const REF_RADIUS_FRAC: f64 = 0.44;
/// Glow blur radius as a fraction of the reference radius.
const GLOW_BLUR_FRAC: f64 = 0.045;
/// Guide ring sits just inside the outermost layer band.
const GUIDE_RING_FRAC: f64 = 0.98;
/// Rays fan across this fraction of the segment step, centered on the axis.
const RAY_FAN_FRAC: f64 = 0.64;

/// Render the plan onto `surface`. When `signature` is set, the sanitized
/// word is drawn as low-alpha text near the bottom; it never affects any
/// other drawing state.
pub fn paint(plan: &RenderPlan, surface: &mut dyn Surface, signature: Option<&str>) {
    let (w, h) = surface.size();
    let (wf, hf) = (f64::from(w), f64::from(h));
    let r_ref = REF_RADIUS_FRAC * wf.min(hf);
    let blur = GLOW_BLUR_FRAC * r_ref;
    let (cx, cy) = (wf / 2.0, hf / 2.0);

    paint_background(plan, surface, wf, hf);

    surface.save();
    surface.translate(cx, cy);
    surface.rotate(plan.rotation);

    paint_guide_ring(plan, surface, r_ref);

    let step = plan.step();
    for layer in &plan.layers {
        surface.set_line_width(layer.line_width);
        for (si, motif) in layer.motifs.iter().enumerate() {
            surface.save();
            surface.rotate(si as f64 * step);
            paint_motif(surface, motif, layer, &plan.palette, step, r_ref, blur);
            surface.restore();
        }
    }

    paint_rosette(plan, surface, r_ref, blur);
    paint_center_dot(plan, surface, r_ref, blur);
    surface.restore();

    if let Some(word) = signature {
        paint_signature(plan, surface, word, wf, hf);
    }
}

fn paint_background(plan: &RenderPlan, surface: &mut dyn Surface, wf: f64, hf: f64) {
    let base = plan.palette.base_hue;
    let edge = Hsla::new(base, 55.0, 4.0, 1.0);
    let stops = [
        (0.0, Hsla::new(base, 45.0, 18.0, 1.0)),
        (0.55, Hsla::new((base + 40.0).rem_euclid(360.0), 50.0, 10.0, 1.0)),
        (1.0, edge),
    ];

    // Wash the corners the gradient disc does not reach.
    surface.fill_rect(0.0, 0.0, wf, hf, edge);
    surface.fill_radial_gradient(wf / 2.0, hf / 2.0, 0.72 * wf.max(hf), &stops);

    let white = plan.palette.white;
    for dot in &plan.grain {
        surface.fill_rect(dot.x * wf, dot.y * hf, 1.0, 1.0, white.with_alpha(dot.alpha));
    }
}

fn paint_guide_ring(plan: &RenderPlan, surface: &mut dyn Surface, r_ref: f64) {
    let ring = Path::circle(0.0, 0.0, GUIDE_RING_FRAC * r_ref);
    surface.set_line_width(1.0);
    surface.stroke_path(&ring, plan.palette.white.with_alpha(0.08));
}

fn paint_motif(
    surface: &mut dyn Surface,
    motif: &SegmentMotif,
    layer: &LayerPlan,
    palette: &Palette,
    step: f64,
    r_ref: f64,
    blur: f64,
) {
    let r0 = layer.r0 * r_ref;
    let r1 = layer.r1 * r_ref;
    let stroke = palette.color(layer.stroke);
    let fill = palette.color(layer.fill);
    match motif {
        SegmentMotif::Petal(p) => paint_petal(surface, p, r0, r1, stroke, fill, blur),
        SegmentMotif::Band(b) => paint_band(surface, b, r0, r1, stroke, fill, blur),
        SegmentMotif::Rays(r) => paint_rays(surface, r, r0, r1, stroke, step, blur),
        SegmentMotif::Dots(d) => paint_dots(surface, d, r0, r1, palette, r_ref, blur),
        SegmentMotif::Triangles(t) => paint_triangle(surface, t, r0, r1, stroke, fill, blur),
    }
}

/// Symmetric bezier petal along the +x axis from r0 to r1.
fn petal_path(r0: f64, r1: f64, half_width: f64, bulge: f64) -> Path {
    let span = r1 - r0;
    let belly = (r0 + r1) * 0.5 * half_width.sin() * (0.5 + bulge);
    let mut p = Path::new();
    p.move_to(r0, 0.0)
        .cubic_to(r0 + span * 0.25, belly, r1 - span * 0.25, belly, r1, 0.0)
        .cubic_to(r1 - span * 0.25, -belly, r0 + span * 0.25, -belly, r0, 0.0)
        .close();
    p
}

fn paint_petal(
    surface: &mut dyn Surface,
    seg: &PetalSeg,
    r0: f64,
    r1: f64,
    stroke: Hsla,
    fill: Hsla,
    blur: f64,
) {
    let path = petal_path(r0, r1, seg.half_width, seg.bulge);
    surface.set_glow(fill, blur);
    surface.fill_path(&path, fill);
    surface.set_glow(stroke, blur);
    surface.stroke_path(&path, stroke);
    surface.clear_glow();
}

/// Annular wedge: outer arc joined to the reversed inner arc.
fn paint_band(
    surface: &mut dyn Surface,
    seg: &BandSeg,
    r0: f64,
    r1: f64,
    stroke: Hsla,
    fill: Hsla,
    blur: f64,
) {
    let a0 = -seg.span / 2.0;
    let a1 = seg.span / 2.0;
    let mut path = Path::new();
    path.move_to(r1 * a0.cos(), r1 * a0.sin())
        .arc(0.0, 0.0, r1, a0, a1)
        .line_to(r0 * a1.cos(), r0 * a1.sin())
        .arc(0.0, 0.0, r0, a1, a0)
        .close();

    surface.set_glow(fill, blur);
    surface.fill_path(&path, fill);
    surface.set_glow(stroke, blur);
    surface.stroke_path(&path, stroke);
    surface.clear_glow();
}

/// Straight radial lines fanned evenly across ±32% of the segment step.
fn paint_rays(
    surface: &mut dyn Surface,
    seg: &RaysSeg,
    r0: f64,
    r1: f64,
    stroke: Hsla,
    step: f64,
    blur: f64,
) {
    let span = r1 - r0;
    let divisor = seg.rays.len().saturating_sub(1).max(1) as f64;
    for (i, ray) in seg.rays.iter().enumerate() {
        let t = i as f64 / divisor;
        let angle = (t - 0.5) * RAY_FAN_FRAC * step;
        let rin = r0 + span * 0.20 * ray.inner_t;
        let rout = r0 + span * (0.80 + 0.20 * ray.outer_t);
        let mut path = Path::new();
        path.move_to(rin * angle.cos(), rin * angle.sin())
            .line_to(rout * angle.cos(), rout * angle.sin());

        surface.save();
        surface.set_alpha(ray.alpha);
        surface.set_glow(stroke, blur);
        surface.stroke_path(&path, stroke);
        surface.clear_glow();
        surface.restore();
    }
}

/// Small filled circles spaced evenly between r0 and r1 along the axis.
fn paint_dots(
    surface: &mut dyn Surface,
    seg: &DotsSeg,
    r0: f64,
    r1: f64,
    palette: &Palette,
    r_ref: f64,
    blur: f64,
) {
    let span = r1 - r0;
    let divisor = seg.dots.len().saturating_sub(1).max(1) as f64;
    for (j, dot) in seg.dots.iter().enumerate() {
        let rr = r0 + span * (j as f64 / divisor);
        let path = Path::circle(rr, 0.0, dot.size * r_ref);
        let fill = palette.color(dot.fill);
        let outline = palette.color(dot.outline);

        surface.save();
        surface.set_alpha(dot.alpha);
        surface.set_glow(fill, blur);
        surface.fill_path(&path, fill);
        surface.set_glow(outline, blur);
        surface.stroke_path(&path, outline);
        surface.clear_glow();
        surface.restore();
    }
}

/// Isoceles triangle, base near r0, tip near r1.
fn paint_triangle(
    surface: &mut dyn Surface,
    seg: &TriangleSeg,
    r0: f64,
    r1: f64,
    stroke: Hsla,
    fill: Hsla,
    blur: f64,
) {
    let span = r1 - r0;
    let base_r = r0 + span * 0.12 * seg.base_jitter;
    let tip_r = r1 - span * 0.12 * (1.0 - seg.tip_jitter);
    let halfw = base_r * seg.half_width.sin();
    let mut path = Path::new();
    path.move_to(base_r, -halfw)
        .line_to(tip_r, 0.0)
        .line_to(base_r, halfw)
        .close();

    surface.set_glow(fill, blur);
    surface.fill_path(&path, fill);
    surface.set_glow(stroke, blur);
    surface.stroke_path(&path, stroke);
    surface.clear_glow();
}

fn paint_rosette(plan: &RenderPlan, surface: &mut dyn Surface, r_ref: f64, blur: f64) {
    let n = plan.rosette.len();
    let white = plan.palette.white;
    surface.set_line_width(1.0);
    for (i, petal) in plan.rosette.iter().enumerate() {
        let angle = i as f64 / n as f64 * TAU;
        let outer = r_ref * (0.16 + 0.10 * petal.radius_jitter);
        let half_width = (0.5 + 0.5 * petal.width_jitter) * (PI / n as f64);
        let hue = (plan.palette.base_hue + i as f64 * 7.0).rem_euclid(360.0);
        let fill = Hsla::new(hue, 85.0, 65.0, 0.8);
        let path = petal_path(r_ref * 0.02, outer, half_width, 0.5);

        surface.save();
        surface.rotate(angle);
        surface.set_glow(fill, blur);
        surface.fill_path(&path, fill);
        surface.set_glow(white, blur);
        surface.stroke_path(&path, white);
        surface.clear_glow();
        surface.restore();
    }
}

fn paint_center_dot(plan: &RenderPlan, surface: &mut dyn Surface, r_ref: f64, blur: f64) {
    let gold = plan.palette.gold;
    let path = Path::circle(0.0, 0.0, 0.045 * r_ref);
    surface.set_glow(gold, blur);
    surface.fill_path(&path, gold);
    surface.clear_glow();
}

fn paint_signature(plan: &RenderPlan, surface: &mut dyn Surface, word: &str, wf: f64, hf: f64) {
    let size = (hf * 0.025).max(10.0);
    let color = plan.palette.white.with_alpha(0.35);
    surface.fill_text(word, wf / 2.0, hf - hf * 0.03, size, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::surface::{RecordedOp, RecordingSurface};

    fn plan() -> RenderPlan {
        RenderPlan::compose(crate::seed::compute_seed("ocean"))
    }

    #[test]
    fn painter_balances_save_restore() {
        let p = plan();
        let mut s = RecordingSurface::new(64, 64);
        paint(&p, &mut s, None);
        let saves = s.count(|op| matches!(op, RecordedOp::Save));
        let restores = s.count(|op| matches!(op, RecordedOp::Restore));
        assert_eq!(saves, restores);
    }

    #[test]
    fn background_draws_gradient_and_grain() {
        let p = plan();
        let mut s = RecordingSurface::new(64, 64);
        paint(&p, &mut s, None);
        assert_eq!(s.count(|op| matches!(op, RecordedOp::RadialGradient { .. })), 1);
        // Full-surface wash plus one rect per grain dot.
        let rects = s.count(|op| matches!(op, RecordedOp::FillRect { .. }));
        assert_eq!(rects, 1 + p.grain.len());
    }

    #[test]
    fn signature_is_optional_and_last() {
        let p = plan();
        let mut without = RecordingSurface::new(64, 64);
        paint(&p, &mut without, None);
        assert_eq!(without.count(|op| matches!(op, RecordedOp::FillText { .. })), 0);

        let mut with = RecordingSurface::new(64, 64);
        paint(&p, &mut with, Some("ocean"));
        assert!(matches!(with.ops.last(), Some(RecordedOp::FillText { .. })));
        // Identical drawing up to the signature.
        assert_eq!(&with.ops[..without.ops.len()], &without.ops[..]);
    }

    #[test]
    fn identical_plans_paint_identically() {
        let p = plan();
        let mut a = RecordingSurface::new(100, 80);
        let mut b = RecordingSurface::new(100, 80);
        paint(&p, &mut a, None);
        paint(&p, &mut b, None);
        assert_eq!(a.ops, b.ops);
    }

    #[test]
    fn global_rotation_is_applied() {
        let p = plan();
        let mut s = RecordingSurface::new(64, 64);
        paint(&p, &mut s, None);
        let rotations = s.count(|op| matches!(op, RecordedOp::Rotate(a) if *a == p.rotation));
        assert!(rotations >= 1);
    }
}
