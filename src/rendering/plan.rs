//! Render-parameter derivation.
//!
//! Every generator draw a render consumes happens here, in one fixed order:
//! palette, background grain, global rotation, segment/layer counts, then
//! per-layer and per-segment motif jitter, then the center rosette. The
//! painter walks the finished plan and draws nothing random of its own, so
//! reordering paint code cannot change which draw feeds which parameter.
//!
//! All geometry is stored in unit space: radii as fractions of the reference
//! radius R, grain positions as fractions of the surface extent, angles in
//! radians. A plan is therefore a pure function of the seed, independent of
//! surface size; only the painter knows about pixels.

use serde::Serialize;
use std::f64::consts::TAU;

use crate::palette::Palette;
use crate::rng::Mulberry32;

/// Number of background grain dots. Fixed, not seed-dependent.
pub const GRAIN_DOTS: usize = 2400;

/// One low-alpha single-pixel background dot, in surface fractions.
#[derive(Debug, Clone, Copy)]
pub struct GrainDot {
    pub x: f64,
    pub y: f64,
    pub alpha: f64,
}

/// The five motif kinds a layer can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MotifKind {
    Petal,
    Band,
    Rays,
    Dots,
    Triangles,
}

impl MotifKind {
    const ALL: [MotifKind; 5] = [
        MotifKind::Petal,
        MotifKind::Band,
        MotifKind::Rays,
        MotifKind::Dots,
        MotifKind::Triangles,
    ];
}

/// Per-segment petal jitter: half-width angle plus a control-point bulge.
#[derive(Debug, Clone, Copy)]
pub struct PetalSeg {
    pub half_width: f64,
    pub bulge: f64,
}

/// Per-segment band jitter: the angular span of the annular wedge.
#[derive(Debug, Clone, Copy)]
pub struct BandSeg {
    pub span: f64,
}

/// One ray of a rays-motif fan.
#[derive(Debug, Clone, Copy)]
pub struct RaySpec {
    /// Fraction of the lower radius band the ray starts into.
    pub inner_t: f64,
    /// Fraction of the upper radius band the ray reaches into.
    pub outer_t: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone)]
pub struct RaysSeg {
    pub rays: Vec<RaySpec>,
}

/// One dot of a dots-motif chain.
#[derive(Debug, Clone, Copy)]
pub struct DotSpec {
    /// Radius as a fraction of R.
    pub size: f64,
    pub alpha: f64,
    /// Palette index for the fill.
    pub fill: usize,
    /// Palette index for the outline.
    pub outline: usize,
}

#[derive(Debug, Clone)]
pub struct DotsSeg {
    pub dots: Vec<DotSpec>,
}

/// Per-segment triangle jitter.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSeg {
    pub half_width: f64,
    pub tip_jitter: f64,
    pub base_jitter: f64,
}

/// Closed variant over the per-segment motif instances.
#[derive(Debug, Clone)]
pub enum SegmentMotif {
    Petal(PetalSeg),
    Band(BandSeg),
    Rays(RaysSeg),
    Dots(DotsSeg),
    Triangles(TriangleSeg),
}

/// Everything one concentric layer needs: radii (fractions of R), color
/// picks, motif kind, line width, and one motif instance per segment.
#[derive(Debug, Clone)]
pub struct LayerPlan {
    pub r0: f64,
    pub r1: f64,
    pub stroke: usize,
    pub fill: usize,
    pub kind: MotifKind,
    pub line_width: f64,
    pub motifs: Vec<SegmentMotif>,
}

/// One center-rosette petal.
#[derive(Debug, Clone, Copy)]
pub struct RosettePetal {
    pub radius_jitter: f64,
    pub width_jitter: f64,
}

/// The complete deterministic drawing plan for one seed.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub seed: u32,
    pub palette: Palette,
    pub grain: Vec<GrainDot>,
    pub rotation: f64,
    pub segments: u32,
    pub layers: Vec<LayerPlan>,
    pub rosette: Vec<RosettePetal>,
}

impl RenderPlan {
    /// Derive the full plan from a seed, consuming generator draws in the
    /// fixed order that defines the rendering contract.
    pub fn compose(seed: u32) -> Self {
        let mut rng = Mulberry32::new(seed);

        let palette = Palette::build(&mut rng);

        let mut grain = Vec::with_capacity(GRAIN_DOTS);
        for _ in 0..GRAIN_DOTS {
            let x = rng.next_f64();
            let y = rng.next_f64();
            let alpha = 0.02 + rng.next_f64() * 0.08;
            grain.push(GrainDot { x, y, alpha });
        }

        let rotation = rng.in_range(-0.09, 0.09);

        let segments = ((8.0 + rng.next_f64() * 18.0).floor() as u32).clamp(8, 26);
        let layers_n = ((7.0 + rng.next_f64() * 7.0).floor() as u32).clamp(7, 14);
        let step = TAU / f64::from(segments);

        let mut layers = Vec::with_capacity(layers_n as usize);
        for li in 0..layers_n {
            let t = f64::from(li) / f64::from(layers_n.saturating_sub(1).max(1));
            let r0 = 0.07 + t * 0.85;
            let r1 = r0 + 0.05 + rng.next_f64() * 0.10;
            let stroke = rng.pick(Palette::LEN);
            let fill = rng.pick(Palette::LEN);
            let kind = MotifKind::ALL[rng.pick(MotifKind::ALL.len())];
            let line_width = 0.8 + rng.next_f64() * 2.2;

            let mut motifs = Vec::with_capacity(segments as usize);
            for _si in 0..segments {
                motifs.push(Self::compose_motif(kind, step, &mut rng));
            }

            layers.push(LayerPlan { r0, r1, stroke, fill, kind, line_width, motifs });
        }

        let petals_n = ((10.0 + rng.next_f64() * 18.0).floor() as u32).clamp(10, 30);
        let mut rosette = Vec::with_capacity(petals_n as usize);
        for _ in 0..petals_n {
            let radius_jitter = rng.next_f64();
            let width_jitter = rng.next_f64();
            rosette.push(RosettePetal { radius_jitter, width_jitter });
        }

        Self { seed, palette, grain, rotation, segments, layers, rosette }
    }

    /// Draws for one motif instance. Variable-length kinds (rays, dots) draw
    /// their count first, then a fixed set per element, so consumption stays
    /// reproducible.
    fn compose_motif(kind: MotifKind, step: f64, rng: &mut Mulberry32) -> SegmentMotif {
        match kind {
            MotifKind::Petal => SegmentMotif::Petal(PetalSeg {
                half_width: step * (0.18 + rng.next_f64() * 0.22),
                bulge: 0.25 + rng.next_f64() * 0.5,
            }),
            MotifKind::Band => SegmentMotif::Band(BandSeg {
                span: step * (0.70 + rng.next_f64() * 0.20),
            }),
            MotifKind::Rays => {
                let count = ((2.0 + rng.next_f64() * 6.0).floor() as usize).clamp(2, 7);
                let mut rays = Vec::with_capacity(count);
                for _ in 0..count {
                    let inner_t = rng.next_f64();
                    let outer_t = rng.next_f64();
                    let alpha = 0.25 + rng.next_f64() * 0.6;
                    rays.push(RaySpec { inner_t, outer_t, alpha });
                }
                SegmentMotif::Rays(RaysSeg { rays })
            }
            MotifKind::Dots => {
                let count = ((2.0 + rng.next_f64() * 5.0).floor() as usize).clamp(2, 6);
                let mut dots = Vec::with_capacity(count);
                for _ in 0..count {
                    let size = 0.008 + rng.next_f64() * 0.018;
                    let alpha = 0.5 + rng.next_f64() * 0.45;
                    let fill = rng.pick(Palette::LEN);
                    let outline = rng.pick(Palette::LEN);
                    dots.push(DotSpec { size, alpha, fill, outline });
                }
                SegmentMotif::Dots(DotsSeg { dots })
            }
            MotifKind::Triangles => SegmentMotif::Triangles(TriangleSeg {
                half_width: step * (0.12 + rng.next_f64() * 0.20),
                tip_jitter: rng.next_f64(),
                base_jitter: rng.next_f64(),
            }),
        }
    }

    /// Angular step between segments.
    pub fn step(&self) -> f64 {
        TAU / f64::from(self.segments)
    }

    /// Machine-readable summary of the seed-driven choices, for the CLI
    /// parameter dump and for structure tests.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            seed: self.seed,
            base_hue: self.palette.base_hue,
            rotation: self.rotation,
            segments: self.segments,
            layer_count: self.layers.len() as u32,
            center_petals: self.rosette.len() as u32,
            layers: self
                .layers
                .iter()
                .map(|l| LayerSummary {
                    r0: l.r0,
                    r1: l.r1,
                    kind: l.kind,
                    stroke: l.stroke,
                    fill: l.fill,
                })
                .collect(),
        }
    }
}

/// Serializable digest of a plan's structural choices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub seed: u32,
    pub base_hue: f64,
    pub rotation: f64,
    pub segments: u32,
    pub layer_count: u32,
    pub center_petals: u32,
    pub layers: Vec<LayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    pub r0: f64,
    pub r1: f64,
    pub kind: MotifKind,
    pub stroke: usize,
    pub fill: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::compute_seed;

    #[test]
    fn plan_is_deterministic() {
        let a = RenderPlan::compose(2447940024);
        let b = RenderPlan::compose(2447940024);
        assert_eq!(a.summary(), b.summary());
        assert_eq!(a.grain.len(), b.grain.len());
        assert_eq!(a.grain[17].x, b.grain[17].x);
    }

    #[test]
    fn structural_choices_stay_in_bounds() {
        // Sweep a spread of seeds; the clamps must hold for all of them.
        for i in 0..500u32 {
            let plan = RenderPlan::compose(i.wrapping_mul(2_654_435_761));
            assert!((8..=26).contains(&plan.segments), "segments {}", plan.segments);
            assert!((7..=14).contains(&(plan.layers.len() as u32)));
            assert!((10..=30).contains(&(plan.rosette.len() as u32)));
            assert!(plan.rotation >= -0.09 && plan.rotation < 0.09);
            for layer in &plan.layers {
                assert!(layer.r0 >= 0.07 && layer.r1 > layer.r0);
                assert!(layer.stroke < Palette::LEN && layer.fill < Palette::LEN);
                assert_eq!(plan.segments as usize, layer.motifs.len());
            }
        }
    }

    #[test]
    fn lotus_structure_fixture() {
        let plan = RenderPlan::compose(compute_seed("lotus"));
        assert_eq!(plan.segments, 19);
        assert_eq!(plan.layers.len(), 7);
    }

    #[test]
    fn grain_field_is_fixed_size() {
        let plan = RenderPlan::compose(1);
        assert_eq!(plan.grain.len(), GRAIN_DOTS);
        for dot in &plan.grain {
            assert!((0.0..1.0).contains(&dot.x) && (0.0..1.0).contains(&dot.y));
            assert!(dot.alpha > 0.0 && dot.alpha < 0.2);
        }
    }

    #[test]
    fn variable_motifs_respect_count_ranges() {
        for i in 0..100u32 {
            let plan = RenderPlan::compose(i.wrapping_mul(40_503));
            for layer in &plan.layers {
                for motif in &layer.motifs {
                    match motif {
                        SegmentMotif::Rays(r) => {
                            assert!((2..=7).contains(&r.rays.len()));
                        }
                        SegmentMotif::Dots(d) => {
                            assert!((2..=6).contains(&d.dots.len()));
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    #[test]
    fn all_kinds_appear_across_seeds() {
        let mut seen = [false; 5];
        for i in 0..60u32 {
            let plan = RenderPlan::compose(i.wrapping_mul(97_911));
            for layer in &plan.layers {
                seen[layer.kind as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "not all motif kinds observed: {seen:?}");
    }

    #[test]
    fn summary_serializes_to_json() {
        let plan = RenderPlan::compose(42);
        let json = serde_json::to_string(&plan.summary()).unwrap();
        assert!(json.contains("\"segments\""));
        assert!(json.contains("\"kind\""));
    }
}
