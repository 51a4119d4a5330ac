//! Filled shape masks: 1 inside, 0 outside.
//!
//! Unlike [`crate::library::sdf`], these return coverage directly, which is what layer
//! builders usually want. Star and polygon edges are hard; use an SDF for antialiasing.

use std::f64::consts::TAU;

use crate::expr::{Expr, atan2, mix, smoothstep, step};

/// Soft disc with a `2 * softness` wide edge band centered on `radius`.
pub fn blob(
    uv: &Expr,
    center: impl Into<Expr>,
    radius: impl Into<Expr>,
    softness: impl Into<Expr>,
) -> Expr {
    let radius = radius.into();
    let softness = softness.into();
    let d = (uv - center.into()).length();
    smoothstep(&radius - &softness, radius + softness, d).one_minus()
}

/// Angle folded into `[0, half segment]` within the nearest of `count` equal segments.
fn folded_angle(angle: Expr, count: u32) -> (Expr, f64) {
    let segment = TAU / f64::from(count);
    let folded = ((angle / segment + 0.5).fract() - 0.5).abs() * segment;
    (folded, segment)
}

/// Star with `points` tips (at least 2), first tip along +x.
pub fn star(
    uv: &Expr,
    center: impl Into<Expr>,
    points: u32,
    inner_radius: impl Into<Expr>,
    outer_radius: impl Into<Expr>,
) -> Expr {
    let p = uv - center.into();
    let (folded, segment) = folded_angle(atan2(p.y(), p.x()), points.max(2));
    let edge = mix(outer_radius, inner_radius, folded / (segment * 0.5));
    step(p.length(), edge)
}

/// Regular polygon with `sides` sides (at least 3) inscribed in `radius`; `rotation` in
/// radians turns it clockwise.
pub fn polygon(
    uv: &Expr,
    center: impl Into<Expr>,
    sides: u32,
    radius: impl Into<Expr>,
    rotation: impl Into<Expr>,
) -> Expr {
    let p = uv - center.into();
    let (folded, segment) = folded_angle(atan2(p.y(), p.x()) + rotation.into(), sides.max(3));
    let edge = radius.into() * (segment * 0.5).cos() / folded.cos();
    step(p.length(), edge)
}

/// Linear falloff from 1 at `center` to 0 at distance `1 / scale`.
pub fn radial_gradient(uv: &Expr, center: impl Into<Expr>, scale: impl Into<Expr>) -> Expr {
    ((uv - center.into()).length() * scale.into()).one_minus().max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/library/shapes.rs"]
mod tests;
