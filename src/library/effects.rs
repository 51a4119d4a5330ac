//! Image-space effects over a sampled source.
//!
//! A source is any `Fn(&Expr) -> Expr` that maps a uv expression to a color; a layer's
//! builder, a texture lookup or a constant all qualify. Each effect decides where (and how
//! often) the source is sampled.

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, max, smoothstep, vec2, vec3};
use crate::library::math::{EPSILON, safe_normalize};
use crate::library::uv::{self, BulgeOptions};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedOptions {
    /// Cells per uv unit.
    pub scalar: f64,
    /// Larger values shrink each diode.
    pub zoom: f64,
    pub exponent: f64,
    /// Inner edge of the diode falloff.
    pub edge: f64,
}

impl Default for LedOptions {
    fn default() -> Self {
        Self {
            scalar: 100.0,
            zoom: 2.0,
            exponent: 1.2,
            edge: 0.1,
        }
    }
}

/// LED-panel look: the source multiplied by a round diode mask per grid cell.
pub fn led(source: impl Fn(&Expr) -> Expr, uv: &Expr, opts: &LedOptions) -> Expr {
    let cell = (uv * opts.scalar).fract() - 0.5;
    let lit = (cell * opts.zoom).length().one_minus();
    let mask = smoothstep(opts.edge, 1.0, lit).pow(opts.exponent);
    source(uv) * mask
}

/// Sample the source once per square block. `size` is the block edge in thousandths of
/// the viewport height; `resolution` keeps the blocks square.
pub fn pixellate(
    source: impl Fn(&Expr) -> Expr,
    uv: &Expr,
    size: impl Into<Expr>,
    resolution: &Expr,
) -> Expr {
    let aspect = resolution.x() / max(resolution.y(), EPSILON);
    let aspect = max(aspect, EPSILON);
    let pixel = max(size.into() / 1000.0, EPSILON);
    let corrected = vec2(uv.x() * &aspect, uv.y());
    let snapped = (corrected / &pixel).floor() * pixel;
    source(&vec2(snapped.x() / aspect, snapped.y()))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaticAberrationOptions {
    pub strength: f64,
    /// Blend between `direction` (0) and the outward radial direction (1).
    pub radial: f64,
    pub direction: [f64; 2],
}

impl Default for ChromaticAberrationOptions {
    fn default() -> Self {
        Self {
            strength: 0.01,
            radial: 0.5,
            direction: [0.0, 0.0],
        }
    }
}

/// Split the channels: red sampled ahead of the offset, blue behind it, green in place.
///
/// The offset grows with distance from the center of the frame. Returns rgb.
pub fn chromatic_aberration(
    source: impl Fn(&Expr) -> Expr,
    uv: &Expr,
    opts: &ChromaticAberrationOptions,
) -> Expr {
    let to_center = uv - [0.5, 0.5];
    let dist = to_center.length();
    let radial = safe_normalize(&to_center) * opts.radial;
    let dir = safe_normalize(&(Expr::from(opts.direction) * (1.0 - opts.radial) + radial));
    let offset = dir * opts.strength * (dist + 0.5);
    let r = source(&(uv + &offset)).x();
    let g = source(uv).y();
    let b = source(&(uv - offset)).z();
    vec3(r, g, b)
}

/// Sample through [`uv::bulge`].
pub fn bulge(source: impl Fn(&Expr) -> Expr, uv: &Expr, opts: &BulgeOptions) -> Expr {
    source(&uv::bulge(uv, opts))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveAxis {
    /// Displace x by a wave along y.
    X,
    /// Displace y by a wave along x.
    Y,
    #[default]
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveDistortionOptions {
    pub frequency: f64,
    pub amplitude: f64,
    pub axis: WaveAxis,
}

impl Default for WaveDistortionOptions {
    fn default() -> Self {
        Self {
            frequency: 10.0,
            amplitude: 0.02,
            axis: WaveAxis::Both,
        }
    }
}

/// Sine displacement of the sampling position. With [`WaveAxis::Both`] the y wave runs
/// 1.3 times faster so the two never lock.
pub fn wave_distortion(
    source: impl Fn(&Expr) -> Expr,
    uv: &Expr,
    time: impl Into<Expr>,
    opts: &WaveDistortionOptions,
) -> Expr {
    let time = time.into();
    let wave = |along: Expr, phase: Expr| (along * opts.frequency + phase).sin() * opts.amplitude;
    let displaced = match opts.axis {
        WaveAxis::X => vec2(uv.x() + wave(uv.y(), time), uv.y()),
        WaveAxis::Y => vec2(uv.x(), uv.y() + wave(uv.x(), time)),
        WaveAxis::Both => vec2(
            uv.x() + wave(uv.y(), time.clone()),
            uv.y() + wave(uv.x(), time * 1.3),
        ),
    };
    source(&displaced)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwirlOptions {
    /// Rotation at the center, radians.
    pub strength: f64,
    pub radius: f64,
    pub center: [f64; 2],
}

impl Default for SwirlOptions {
    fn default() -> Self {
        Self {
            strength: 1.0,
            radius: 0.5,
            center: [0.5, 0.5],
        }
    }
}

/// Rotate the sampling position around the center, smoothly fading out at the radius.
pub fn swirl(source: impl Fn(&Expr) -> Expr, uv: &Expr, opts: &SwirlOptions) -> Expr {
    let center = Expr::from(opts.center);
    let dist = (uv - &center).length();
    let angle = smoothstep(0.0, opts.radius.max(EPSILON), dist).one_minus() * opts.strength;
    source(&uv::rotate(uv, angle, center))
}

#[cfg(test)]
#[path = "../../tests/unit/library/effects.rs"]
mod tests;
