//! Coordinate transforms applied before sampling a pattern or noise.
//!
//! Angles are radians. Polar coordinates pack `(angle, radius)` with the angle normalized to
//! `[0, 1)` turns, so they feed straight into `fract`-based patterns.

use std::f64::consts::TAU;

use crate::expr::{Expr, atan2, greater_than, less_than, max, min, select, smoothstep, vec2};
use crate::library::math::{EPSILON, safe_normalize};

fn rotate_about_origin(p: &Expr, angle: &Expr) -> Expr {
    let c = angle.cos();
    let s = angle.sin();
    vec2(p.x() * &c - p.y() * &s, p.x() * s + p.y() * c)
}

/// Repeat `uv` every `1 / scale` units.
pub fn tile(uv: &Expr, scale: impl Into<Expr>) -> Expr {
    (uv * scale.into()).fract()
}

/// Rotate counter-clockwise by `angle` around `center`.
pub fn rotate(uv: &Expr, angle: impl Into<Expr>, center: impl Into<Expr>) -> Expr {
    let center = center.into();
    rotate_about_origin(&(uv - &center), &angle.into()) + center
}

/// Scale away from `center`; factors above 1 spread the pattern out.
pub fn scale(uv: &Expr, factor: impl Into<Expr>, center: impl Into<Expr>) -> Expr {
    let center = center.into();
    (uv - &center) * factor.into() + center
}

/// Magnify around `center`. A zoom of 2 shows half the area.
pub fn zoom(uv: &Expr, center: impl Into<Expr>, zoom: impl Into<Expr>) -> Expr {
    let center = center.into();
    (uv - &center) / max(zoom.into(), EPSILON) + center
}

/// Offset `uv` by a noise value scaled by `strength`.
pub fn distort(uv: &Expr, offset: impl Into<Expr>, strength: impl Into<Expr>) -> Expr {
    uv + offset.into() * strength.into()
}

/// `(angle in turns, radius)` relative to `center`.
pub fn polar(uv: &Expr, center: impl Into<Expr>) -> Expr {
    let centered = uv - center.into();
    let angle = atan2(centered.y(), centered.x()) / TAU + 0.5;
    vec2(angle, centered.length())
}

/// Inverse of [`polar`].
pub fn cartesian(polar: &Expr, center: impl Into<Expr>) -> Expr {
    let angle = (polar.x() - 0.5) * TAU;
    let radius = polar.y();
    vec2(angle.cos() * &radius, angle.sin() * radius) + center.into()
}

/// Fold coordinates back and forth across every integer boundary.
pub fn mirror(uv: &Expr) -> Expr {
    let fold = |v: Expr| {
        let m = v.modulo(2.0);
        select(greater_than(&m, 1.0), 2.0 - &m, &m)
    };
    vec2(fold(uv.x()), fold(uv.y()))
}

/// Mirror the plane into `segments` wedges around `center`.
pub fn kaleidoscope(uv: &Expr, center: impl Into<Expr>, segments: impl Into<Expr>) -> Expr {
    let center = center.into();
    let centered = uv - &center;
    let angle = atan2(centered.y(), centered.x());
    let radius = centered.length();
    let wedge = TAU / max(segments.into(), 1.0);
    let a = angle.modulo(&wedge);
    let a = select(greater_than(&a, &wedge * 0.5), &wedge - &a, &a);
    vec2(a.cos() * &radius, a.sin() * radius) + center
}

/// Cross-axis sine displacement.
pub fn wave(
    uv: &Expr,
    frequency: impl Into<Expr>,
    amplitude: impl Into<Expr>,
    time: impl Into<Expr>,
) -> Expr {
    let frequency = frequency.into();
    let amplitude = amplitude.into();
    let time = time.into();
    let dx = (uv.y() * &frequency + &time).sin() * &amplitude;
    let dy = (uv.x() * frequency + time).sin() * amplitude;
    uv + vec2(dx, dy)
}

/// Radial sine displacement travelling outward from `center`.
pub fn ripple(
    uv: &Expr,
    center: impl Into<Expr>,
    frequency: impl Into<Expr>,
    amplitude: impl Into<Expr>,
    time: impl Into<Expr>,
) -> Expr {
    let offset = uv - center.into();
    let wave = (offset.length() * frequency.into() - time.into()).sin() * amplitude.into();
    uv + safe_normalize(&offset) * wave
}

/// Barrel distortion; negative strength gives a pincushion.
pub fn barrel(uv: &Expr, center: impl Into<Expr>, strength: impl Into<Expr>) -> Expr {
    let center = center.into();
    let centered = uv - &center;
    let r2 = centered.dot(&centered);
    centered * (r2 * strength.into() + 1.0) + center
}

/// Pincushion distortion.
pub fn pincushion(uv: &Expr, center: impl Into<Expr>, strength: impl Into<Expr>) -> Expr {
    barrel(uv, center, -strength.into())
}

/// Twist inside `radius`, strongest at `center` and fading to nothing at the rim.
pub fn swirl(
    uv: &Expr,
    center: impl Into<Expr>,
    strength: impl Into<Expr>,
    radius: impl Into<Expr>,
) -> Expr {
    let center = center.into();
    let radius = max(radius.into(), EPSILON);
    let centered = uv - &center;
    let dist = centered.length();
    let angle = strength.into() * (&dist / &radius).min(1.0).one_minus();
    let rotated = rotate_about_origin(&centered, &angle) + center;
    select(less_than(dist, radius), rotated, uv)
}

/// Shift by `offset`.
pub fn translate(uv: &Expr, offset: impl Into<Expr>) -> Expr {
    uv + offset.into()
}

/// Wrap-around scrolling at `speed` units per second.
pub fn scroll(uv: &Expr, speed: impl Into<Expr>, time: impl Into<Expr>) -> Expr {
    (uv + speed.into() * time.into()).fract()
}

/// Offset scaled by `depth`; nearer layers use larger depths.
pub fn parallax(uv: &Expr, offset: impl Into<Expr>, depth: impl Into<Expr>) -> Expr {
    uv + offset.into() * depth.into()
}

fn fit(uv: &Expr, container: Expr, content: Expr, pick: fn(Expr, f64) -> Expr) -> Expr {
    let ratio = container / max(content, EPSILON);
    let sx = pick(ratio.clone(), 1.0);
    let sy = pick(1.0 / max(ratio, EPSILON), 1.0);
    vec2((uv.x() - 0.5) * sx + 0.5, (uv.y() - 0.5) * sy + 0.5)
}

/// Map a container's uv onto content of another aspect ratio so the content fills it,
/// cropping the overflow evenly on both sides (CSS `cover`).
///
/// Aspects are width over height.
pub fn cover(
    uv: &Expr,
    container_aspect: impl Into<Expr>,
    content_aspect: impl Into<Expr>,
) -> Expr {
    fit(uv, container_aspect.into(), content_aspect.into(), |r, one| min(r, one))
}

/// Like [`cover`], but the whole content stays visible and the uv runs past `[0, 1]` in
/// the letterboxed band (CSS `contain`).
pub fn contain(
    uv: &Expr,
    container_aspect: impl Into<Expr>,
    content_aspect: impl Into<Expr>,
) -> Expr {
    fit(uv, container_aspect.into(), content_aspect.into(), |r, one| max(r, one))
}

/// Parameters for [`bulge`]. Negative strength pinches.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BulgeOptions {
    pub strength: f64,
    pub radius: f64,
    pub power: f64,
    pub center: [f64; 2],
}

impl Default for BulgeOptions {
    fn default() -> Self {
        Self {
            strength: 0.5,
            radius: 0.5,
            power: 1.0,
            center: [0.5, 0.5],
        }
    }
}

/// Push points away from `center`, strongest near it and fading out at `radius`.
pub fn bulge(uv: &Expr, opts: &BulgeOptions) -> Expr {
    let center = Expr::from(opts.center);
    let offset = uv - &center;
    let dist = offset.length();
    let t = smoothstep(0.0, 1.0, (&dist / opts.radius.max(EPSILON)).min(1.0));
    let falloff = t.one_minus().pow(opts.power.max(0.0)) * opts.strength;
    center + safe_normalize(&offset) * (dist * (falloff + 1.0))
}

/// Stretch x by the viewport aspect ratio around the center so circles stay round.
pub fn aspect_correct(uv: &Expr, resolution: &Expr) -> Expr {
    let aspect = resolution.x() / max(resolution.y(), EPSILON);
    vec2((uv.x() - 0.5) * aspect + 0.5, uv.y())
}

#[cfg(test)]
#[path = "../../tests/unit/library/uv.rs"]
mod tests;
