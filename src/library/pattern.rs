//! Repeating 2D masks. Hard patterns return exactly 0 or 1; the `_smooth` variants ramp over
//! a softness band.

use std::f64::consts::TAU;

use crate::expr::{Expr, atan2, clamp, greater_than, less_than, max, min, select, vec2};
use crate::library::math::EPSILON;
use crate::library::uv::rotate;

fn either(a: Expr, b: Expr) -> Expr {
    max(a, b)
}

/// 1 where `v` is within `half` of a cell edge.
fn near_edge(v: &Expr, half: &Expr) -> Expr {
    either(less_than(v, half), greater_than(v, 1.0 - half))
}

/// Alternating 0/1 cells.
pub fn checker(uv: &Expr, scale: impl Into<Expr>) -> Expr {
    let s = uv * scale.into();
    (s.x().floor() + s.y().floor()).modulo(2.0)
}

/// Grid lines of total width `line_width` in cell units.
pub fn grid(uv: &Expr, scale: impl Into<Expr>, line_width: impl Into<Expr>) -> Expr {
    let cell = (uv * scale.into()).fract();
    let half = line_width.into() * 0.5;
    either(near_edge(&cell.x(), &half), near_edge(&cell.y(), &half))
}

/// One hard dot of `radius` per cell.
pub fn dots(uv: &Expr, scale: impl Into<Expr>, radius: impl Into<Expr>) -> Expr {
    let cell = (uv * scale.into()).fract();
    less_than((cell - [0.5, 0.5]).length(), radius)
}

/// Antialiased dots fading out over `softness` beyond `radius`.
pub fn dots_smooth(
    uv: &Expr,
    scale: impl Into<Expr>,
    radius: impl Into<Expr>,
    softness: impl Into<Expr>,
) -> Expr {
    let cell = (uv * scale.into()).fract();
    let d = (cell - [0.5, 0.5]).length();
    1.0 - clamp((d - radius.into()) / max(softness.into(), EPSILON), 0.0, 1.0)
}

/// Dots on a grid with separate spacing and radius in UV units, with a soft edge.
pub fn dot_grid(
    uv: &Expr,
    spacing: impl Into<Expr>,
    radius: impl Into<Expr>,
    softness: impl Into<Expr>,
) -> Expr {
    let spacing = max(spacing.into(), EPSILON);
    let local = (uv / &spacing).fract() - 0.5;
    let d = local.length() * spacing;
    1.0 - clamp((d - radius.into()) / max(softness.into(), EPSILON), 0.0, 1.0)
}

/// Hard stripes rotated by `angle` around the UV center.
pub fn stripes(uv: &Expr, scale: impl Into<Expr>, angle: impl Into<Expr>) -> Expr {
    let r = rotate(uv, angle, [0.5, 0.5]);
    (r.x() * scale.into()).floor().modulo(2.0)
}

/// Stripes of relative `width` with a soft edge.
pub fn stripes_smooth(
    uv: &Expr,
    scale: impl Into<Expr>,
    angle: impl Into<Expr>,
    width: impl Into<Expr>,
    softness: impl Into<Expr>,
) -> Expr {
    let r = rotate(uv, angle, [0.5, 0.5]);
    let band = ((r.x() * scale.into()).fract() - 0.5).abs() * 2.0;
    1.0 - clamp((band - width.into()) / max(softness.into(), EPSILON), 0.0, 1.0)
}

/// Distance-like edge value of a hexagonal tiling; 0 on cell edges' axes.
pub fn hex_grid(uv: &Expr, scale: impl Into<Expr>) -> Expr {
    const S: [f64; 2] = [1.0, 1.732];
    const H: [f64; 2] = [0.5, 0.866];
    let p = uv * scale.into();
    let a = p.modulo(S) - H;
    let b = (&p - H).modulo(S) - H;
    let gv = select(less_than(a.length(), b.length()), &a, &b);
    let x = gv.x() * 1.5;
    let y = gv.y() * 0.866;
    min(
        (&x + &y).abs(),
        min((x - y).abs(), (gv.y() * 1.732).abs()),
    )
}

/// Running-bond bricks: 1 on brick faces, 0 in mortar of width `gap`.
pub fn bricks(
    uv: &Expr,
    scale: impl Into<Expr>,
    ratio: impl Into<Expr>,
    gap: impl Into<Expr>,
) -> Expr {
    let p = uv * scale.into();
    let offset = p.y().floor().modulo(2.0) * 0.5;
    let cell = (vec2(p.x() + offset, p.y()) * vec2(1.0, ratio)).fract();
    let half = gap.into() * 0.5;
    either(near_edge(&cell.x(), &half), near_edge(&cell.y(), &half)).one_minus()
}

/// Rings around `center`; each ring occupies `width` of its period.
pub fn concentric_circles(
    uv: &Expr,
    center: impl Into<Expr>,
    scale: impl Into<Expr>,
    width: impl Into<Expr>,
) -> Expr {
    let rings = ((uv - center.into()).length() * scale.into()).fract();
    less_than(rings, width)
}

/// Sunburst of `count` rays around `center`.
pub fn radial_lines(
    uv: &Expr,
    center: impl Into<Expr>,
    count: impl Into<Expr>,
    width: impl Into<Expr>,
) -> Expr {
    let c = uv - center.into();
    let turns = atan2(c.y(), c.x()) / TAU + 0.5;
    less_than((turns * count.into()).fract(), width)
}

/// One diamond per cell.
pub fn diamonds(uv: &Expr, scale: impl Into<Expr>) -> Expr {
    let c = ((uv * scale.into()).fract() - 0.5).abs();
    less_than(c.x() + c.y(), 0.5)
}

/// Alternating triangle rows.
pub fn triangles(uv: &Expr, scale: impl Into<Expr>) -> Expr {
    let s = uv * scale.into();
    let p = s.fract();
    let odd_row = s.y().floor().modulo(2.0);
    let even = less_than(p.x() + p.y(), 1.0);
    let odd = greater_than(p.x() - p.y() + 1.0, 0.0);
    select(odd_row, odd, even)
}

/// Horizontal bands displaced by a sine along x.
pub fn waves(
    uv: &Expr,
    scale: impl Into<Expr>,
    amplitude: impl Into<Expr>,
    frequency: impl Into<Expr>,
) -> Expr {
    let offset = (uv.x() * frequency.into()).sin() * amplitude.into();
    less_than((uv.y() * scale.into() + offset).fract(), 0.5)
}

/// Horizontal bands displaced by a triangle wave along x.
pub fn zigzag(uv: &Expr, scale: impl Into<Expr>, amplitude: impl Into<Expr>) -> Expr {
    let s = uv * scale.into();
    let x = s.x().fract();
    let tri = select(less_than(&x, 0.5), &x * 2.0, x.one_minus() * 2.0);
    (s.y() + tri * amplitude.into()).floor().modulo(2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/library/pattern.rs"]
mod tests;
