//! Film grain, ordered dithering, scanlines, vignettes and print textures.
//!
//! Grain values are centered on zero and already scaled by their intensity, so they add
//! straight onto a color. Masks (`scanlines`, `vignette`, ...) are multipliers in `[0, 1]`.

use std::f64::consts::PI;

use crate::expr::{Expr, clamp, dot, float, mix, smoothstep, vec2, vec3};

/// Sine hash in `[0, 1)`.
fn sine_hash(p: &Expr) -> Expr {
    (dot(p, [12.9898, 78.233]).sin() * 43_758.545_3).fract()
}

/// Static grain in `[-intensity / 2, intensity / 2)`.
pub fn grain(uv: &Expr, intensity: impl Into<Expr>, seed: impl Into<Expr>) -> Expr {
    (sine_hash(&(uv + seed.into())) - 0.5) * intensity.into()
}

/// Grain re-seeded 24 times per unit of `time * speed`.
pub fn animated_grain(
    uv: &Expr,
    time: impl Into<Expr>,
    intensity: impl Into<Expr>,
    speed: impl Into<Expr>,
) -> Expr {
    let seed = (time.into() * speed.into() * 24.0).floor();
    grain(uv, intensity, seed)
}

/// Independent grain per channel (vec3).
pub fn colored_grain(uv: &Expr, intensity: impl Into<Expr>, seed: impl Into<Expr>) -> Expr {
    let intensity = intensity.into();
    let seed = seed.into();
    vec3(
        grain(uv, &intensity, &seed),
        grain(&(uv + [1.0, 0.0]), &intensity, &seed),
        grain(&(uv + [0.0, 1.0]), intensity, seed),
    )
}

/// Threshold of a `2^levels` square ordered-dither matrix, in `[0, 1)`.
///
/// Built bit by bit: level `k` contributes `2 |x_k - y_k| + x_k`, weighted by `4^(levels-1-k)`.
fn bayer(uv: &Expr, scale: Expr, levels: u32) -> Expr {
    let size = f64::from(1u32 << levels);
    let cell = (uv * scale).floor().modulo(size);
    let mut acc = float(0.0);
    for k in 0..levels {
        let place = f64::from(1u32 << k);
        let bit = |v: Expr| (v / place).floor().modulo(2.0);
        let bx = bit(cell.x());
        let by = bit(cell.y());
        let weight = f64::from(1u32 << (2 * (levels - 1 - k)));
        acc = acc + ((&bx - &by).abs() * 2.0 + bx) * weight;
    }
    acc / (size * size)
}

/// 2x2 ordered-dither threshold in `[0, 1)`; one matrix cell per `1 / scale` units.
pub fn bayer2x2(uv: &Expr, scale: impl Into<Expr>) -> Expr {
    bayer(uv, scale.into(), 1)
}

/// 4x4 ordered-dither threshold in `[0, 1)`.
pub fn bayer4x4(uv: &Expr, scale: impl Into<Expr>) -> Expr {
    bayer(uv, scale.into(), 2)
}

/// 8x8 ordered-dither threshold in `[0, 1)`.
pub fn bayer8x8(uv: &Expr, scale: impl Into<Expr>) -> Expr {
    bayer(uv, scale.into(), 3)
}

fn quantize_with(color: &Expr, levels: Expr, threshold: Expr) -> Expr {
    clamp((color * &levels + threshold).floor() / levels, 0.0, 1.0)
}

/// Quantize to `levels` steps per channel with a 4x4 ordered dither.
///
/// `strength` 0 rounds to the nearest step; 1 spreads the threshold over a full step.
pub fn dither_color(
    color: &Expr,
    uv: &Expr,
    levels: impl Into<Expr>,
    strength: impl Into<Expr>,
) -> Expr {
    let threshold = (bayer4x4(uv, 4.0) - 0.5) * strength.into() + 0.5;
    quantize_with(color, levels.into(), threshold)
}

/// [`dither_color`] over the 8x8 matrix, with `bias` as the matrix value that rounds
/// neutrally (0.5 centers the dither).
pub fn dither8x8_color(
    color: &Expr,
    uv: &Expr,
    levels: impl Into<Expr>,
    strength: impl Into<Expr>,
    bias: impl Into<Expr>,
) -> Expr {
    let threshold = (bayer8x8(uv, 8.0) - bias.into()) * strength.into() + 0.5;
    quantize_with(color, levels.into(), threshold)
}

/// Sine scanlines along y. `1` between lines, `1 - intensity` on them.
pub fn scanlines(
    uv: &Expr,
    density: impl Into<Expr>,
    intensity: impl Into<Expr>,
    offset: impl Into<Expr>,
) -> Expr {
    let line = ((uv.y() + offset.into()) * density.into() * PI).sin() * 0.5 + 0.5;
    1.0 - line * intensity.into()
}

/// Every other row darkened by `intensity`; odd `frame` values swap the rows.
pub fn interlace(
    uv: &Expr,
    density: impl Into<Expr>,
    intensity: impl Into<Expr>,
    frame: impl Into<Expr>,
) -> Expr {
    let odd = ((uv.y() * density.into()).floor() + frame.into()).modulo(2.0);
    1.0 - odd * intensity.into()
}

/// Round vignette around the center of `[0, 1]^2`. 1 in the middle, falling off outward.
pub fn vignette(
    uv: &Expr,
    intensity: impl Into<Expr>,
    smoothness: impl Into<Expr>,
    roundness: impl Into<Expr>,
) -> Expr {
    let dist = (uv - 0.5).length() * roundness.into();
    1.0 - smoothstep(smoothness.into().one_minus(), 1.0, dist * (intensity.into() * 2.0))
}

/// Vignette that follows the rectangle edges.
pub fn rect_vignette(uv: &Expr, intensity: impl Into<Expr>, smoothness: impl Into<Expr>) -> Expr {
    let smoothness = smoothness.into();
    let edge =
        |v: Expr| smoothstep(0.0, &smoothness, &v) * smoothstep(0.0, &smoothness, v.one_minus());
    mix(1.0, edge(uv.x()) * edge(uv.y()), intensity.into())
}

/// Three octaves of grain, like paper fibre.
pub fn paper_texture(
    uv: &Expr,
    scale: impl Into<Expr>,
    intensity: impl Into<Expr>,
    seed: impl Into<Expr>,
) -> Expr {
    let scale = scale.into();
    let seed = seed.into();
    let fine = grain(&(uv * &scale), 1.0, &seed);
    let mid = grain(&(uv * (&scale * 2.0)), 0.5, &seed + 1.0);
    let coarse = grain(&(uv * (scale * 4.0)), 0.25, seed + 2.0);
    (fine + mid + coarse) * intensity.into()
}

/// Halftone dots sized by `value` (0 none, 1 touching), on a grid rotated by `angle`.
pub fn halftone(
    uv: &Expr,
    value: impl Into<Expr>,
    scale: impl Into<Expr>,
    angle: impl Into<Expr>,
) -> Expr {
    let angle = angle.into();
    let (c, s) = (angle.cos(), angle.sin());
    let rotated = vec2(uv.x() * &c - uv.y() * &s, uv.x() * s + uv.y() * c);
    let dist = ((rotated * scale.into()).fract() - 0.5).length();
    let radius = value.into() * 0.5;
    1.0 - smoothstep(&radius - 0.01, radius + 0.01, dist)
}

/// `color` plus grain, clamped to `[0, 1]`.
pub fn apply_grain(
    color: &Expr,
    uv: &Expr,
    intensity: impl Into<Expr>,
    seed: impl Into<Expr>,
) -> Expr {
    clamp(color + grain(uv, intensity, seed), 0.0, 1.0)
}

/// `color` plus per-channel grain, clamped to `[0, 1]`.
pub fn apply_colored_grain(
    color: &Expr,
    uv: &Expr,
    intensity: impl Into<Expr>,
    seed: impl Into<Expr>,
) -> Expr {
    clamp(color + colored_grain(uv, intensity, seed), 0.0, 1.0)
}

/// `color` darkened toward the edges.
pub fn apply_vignette(color: &Expr, uv: &Expr, intensity: impl Into<Expr>) -> Expr {
    color * vignette(uv, intensity, 0.5, 1.0)
}

/// `color` with scanlines.
pub fn apply_scanlines(
    color: &Expr,
    uv: &Expr,
    density: impl Into<Expr>,
    intensity: impl Into<Expr>,
) -> Expr {
    color * scanlines(uv, density, intensity, 0.0)
}

/// Parameters for [`crt_effect`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CrtOptions {
    pub scanline_density: f64,
    pub scanline_intensity: f64,
    pub vignette_intensity: f64,
    pub grain_intensity: f64,
    pub grain_seed: f64,
}

impl Default for CrtOptions {
    fn default() -> Self {
        Self {
            scanline_density: 300.0,
            scanline_intensity: 0.15,
            vignette_intensity: 0.4,
            grain_intensity: 0.03,
            grain_seed: 0.0,
        }
    }
}

/// Scanlines, then vignette, then grain.
pub fn crt_effect(color: &Expr, uv: &Expr, opts: &CrtOptions) -> Expr {
    let lined = apply_scanlines(color, uv, opts.scanline_density, opts.scanline_intensity);
    let shaded = apply_vignette(&lined, uv, opts.vignette_intensity);
    apply_grain(&shaded, uv, opts.grain_intensity, opts.grain_seed)
}

#[cfg(test)]
#[path = "../../tests/unit/library/grain.rs"]
mod tests;
