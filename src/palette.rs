//! Hue-based color theme derived from the generator's first draws.

use serde::Serialize;

use crate::rng::Mulberry32;

/// A color in HSL space with an alpha channel.
///
/// Hue is in degrees, saturation/lightness in percent, alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Convert to linear-free sRGB components in `[0, 1]` plus alpha.
    pub fn to_rgba(self) -> [f64; 4] {
        let h = self.h.rem_euclid(360.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        [r1 + m, g1 + m, b1 + m, self.a.clamp(0.0, 1.0)]
    }
}

/// The six-color theme built once per render.
///
/// Four ink hues sit at fixed angular offsets (with jitter) from the base
/// hue, plus a gold accent and a fixed white. Immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Palette {
    pub base_hue: f64,
    pub ink: Hsla,
    pub ink2: Hsla,
    pub ink3: Hsla,
    pub ink4: Hsla,
    pub gold: Hsla,
    pub white: Hsla,
}

impl Palette {
    /// Number of colors available to the uniform color picks.
    pub const LEN: usize = 6;

    /// Build the theme from the generator's next four draws, in order:
    /// base hue, then the jitter for the three derived ink hues.
    pub fn build(rng: &mut Mulberry32) -> Self {
        let base_hue = (rng.next_f64() * 360.0).floor();
        let hue2 = (base_hue + 35.0 + rng.next_f64() * 40.0).rem_euclid(360.0);
        let hue3 = (base_hue + 180.0 + rng.next_f64() * 50.0).rem_euclid(360.0);
        let hue4 = (base_hue + 250.0 + rng.next_f64() * 50.0).rem_euclid(360.0);

        Self {
            base_hue,
            ink: Hsla::new(base_hue, 85.0, 70.0, 0.85),
            ink2: Hsla::new(hue2, 88.0, 62.0, 0.85),
            ink3: Hsla::new(hue3, 85.0, 62.0, 0.82),
            ink4: Hsla::new(hue4, 88.0, 68.0, 0.82),
            gold: Hsla::new((base_hue + 55.0).rem_euclid(360.0), 90.0, 62.0, 0.9),
            white: Hsla::new(0.0, 0.0, 100.0, 0.9),
        }
    }

    /// Color for a uniform pick index in `0..LEN`.
    pub fn color(&self, index: usize) -> Hsla {
        match index % Self::LEN {
            0 => self.ink,
            1 => self.ink2,
            2 => self.ink3,
            3 => self.ink4,
            4 => self.gold,
            _ => self.white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_consumes_exactly_four_draws() {
        let mut a = Mulberry32::new(99);
        let mut b = Mulberry32::new(99);
        let _ = Palette::build(&mut a);
        for _ in 0..4 {
            b.next_f64();
        }
        // Both generators must now be in the same state.
        assert_eq!(a.next_f64(), b.next_f64());
    }

    #[test]
    fn derived_hues_stay_in_circle() {
        for seed in 0..200 {
            let mut rng = Mulberry32::new(seed);
            let p = Palette::build(&mut rng);
            for c in [p.ink, p.ink2, p.ink3, p.ink4, p.gold] {
                assert!((0.0..360.0).contains(&c.h), "hue {} out of range", c.h);
            }
        }
    }

    #[test]
    fn white_is_fixed() {
        let mut rng = Mulberry32::new(5);
        let p = Palette::build(&mut rng);
        assert_eq!(p.white, Hsla::new(0.0, 0.0, 100.0, 0.9));
    }

    #[test]
    fn hsl_primaries_convert() {
        let red = Hsla::new(0.0, 100.0, 50.0, 1.0).to_rgba();
        assert!((red[0] - 1.0).abs() < 1e-9 && red[1].abs() < 1e-9);
        let green = Hsla::new(120.0, 100.0, 50.0, 1.0).to_rgba();
        assert!((green[1] - 1.0).abs() < 1e-9);
        let white = Hsla::new(0.0, 0.0, 100.0, 1.0).to_rgba();
        assert!((white[0] - 1.0).abs() < 1e-9 && (white[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn color_indexing_covers_all_six() {
        let mut rng = Mulberry32::new(1);
        let p = Palette::build(&mut rng);
        assert_eq!(p.color(4), p.gold);
        assert_eq!(p.color(5), p.white);
        assert_eq!(p.color(6), p.ink);
    }
}
