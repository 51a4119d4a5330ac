//! Signed distance functions and boolean combinators. Negative inside, positive outside.

use crate::expr::{
    Expr, clamp, dot, greater_than, less_than, max, min, mix, select, smoothstep, vec2,
};
use crate::library::math::EPSILON;

/// Polynomial smooth minimum with blend radius `k`.
pub fn smin(a: impl Into<Expr>, b: impl Into<Expr>, k: impl Into<Expr>) -> Expr {
    let a = a.into();
    let b = b.into();
    let k = max(k.into(), EPSILON);
    let h = clamp(0.5 + (&b - &a) * 0.5 / &k, 0.0, 1.0);
    mix(b, a, &h) - k * &h * h.one_minus()
}

/// Polynomial smooth maximum with blend radius `k`.
pub fn smax(a: impl Into<Expr>, b: impl Into<Expr>, k: impl Into<Expr>) -> Expr {
    -smin(-a.into(), -b.into(), k)
}

/// Union of two shapes.
pub fn union(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    min(a, b)
}

/// Intersection of two shapes.
pub fn intersect(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    max(a, b)
}

/// `a` with `b` carved out.
pub fn subtract(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    max(a, -b.into())
}

/// Antialiased inside mask: 1 inside, 0 outside, blended over `softness`.
pub fn fill(d: &Expr, softness: impl Into<Expr>) -> Expr {
    let s = max(softness.into(), EPSILON);
    1.0 - smoothstep(-&s, s, d)
}

/// Antialiased outline of half-width `width`.
pub fn stroke(d: &Expr, width: impl Into<Expr>, softness: impl Into<Expr>) -> Expr {
    fill(&(d.abs() - width.into()), softness)
}

/// Circle of radius `r`.
pub fn circle(p: &Expr, r: impl Into<Expr>) -> Expr {
    p.length() - r.into()
}

/// Ring of radius `r` and half-thickness `thickness`.
pub fn ring(p: &Expr, r: impl Into<Expr>, thickness: impl Into<Expr>) -> Expr {
    (p.length() - r.into()).abs() - thickness.into()
}

/// Exact box with half-extents `b` (vec2).
pub fn rect(p: &Expr, b: impl Into<Expr>) -> Expr {
    let q = p.abs() - b.into();
    max(&q, 0.0).length() + q.x().max(q.y()).min(0.0)
}

/// Box with half-extents `b` and corner radius `r`.
pub fn rounded_rect(p: &Expr, b: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    let r = r.into();
    rect(p, b.into() - &r) - r
}

/// Diamond (L1 ball) of radius `r`.
pub fn diamond(p: &Expr, r: impl Into<Expr>) -> Expr {
    (p.x().abs() + p.y().abs() - r.into()) * std::f64::consts::FRAC_1_SQRT_2
}

/// Distance to the segment `a..b`.
pub fn segment(p: &Expr, a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    crate::library::math::line_distance(p, a, b)
}

/// Regular hexagon with inradius `r`, flat top.
pub fn hexagon(p: &Expr, r: impl Into<Expr>) -> Expr {
    const K: [f64; 3] = [-0.866_025_404, 0.5, 0.577_350_269];
    let r = r.into();
    let p = p.abs();
    let p = &p - Expr::from([K[0], K[1]]) * (min(dot([K[0], K[1]], &p), 0.0) * 2.0);
    let p = p.clone() - vec2(clamp(p.x(), -(&r * K[2]), &r * K[2]), &r);
    p.length() * p.y().sign()
}

/// Equilateral triangle with circumradius-like size `r`, pointing up.
pub fn equilateral_triangle(p: &Expr, r: impl Into<Expr>) -> Expr {
    let k = 3f64.sqrt();
    let r = r.into();
    let px = p.x().abs() - &r;
    let py = p.y() + &r / k;
    let flip = greater_than(&px + &py * k, 0.0);
    let fx = (&px - &py * k) * 0.5;
    let fy = (-&px * k - &py) * 0.5;
    let px = select(&flip, fx, px);
    let py = select(&flip, fy, py);
    let px = &px - clamp(&px, -(&r * 2.0), 0.0);
    -(vec2(&px, &py).length()) * py.sign()
}

/// Isosceles triangle of half-base `w` and height `h`, apex up, centered vertically on the
/// origin.
pub fn triangle(p: &Expr, w: impl Into<Expr>, h: impl Into<Expr>) -> Expr {
    let q = vec2(w, h);
    // apex at the origin, base at y = h
    let p = vec2(p.x().abs(), q.y() * 0.5 - p.y());
    let a = &p - &q * clamp(dot(&p, &q) / max(dot(&q, &q), EPSILON), 0.0, 1.0);
    let b = &p - &q * vec2(clamp(p.x() / max(q.x(), EPSILON), 0.0, 1.0), 1.0);
    let s = -q.y().sign();
    let d = min(
        vec2(dot(&a, &a), &s * (p.x() * q.y() - p.y() * q.x())),
        vec2(dot(&b, &b), &s * (p.y() - q.y())),
    );
    -d.x().sqrt() * d.y().sign()
}

/// Rhombus with half-diagonals `b` (vec2).
pub fn rhombus(p: &Expr, b: impl Into<Expr>) -> Expr {
    let b = b.into();
    let p = p.abs();
    let ndot = |a: &Expr, c: &Expr| a.x() * c.x() - a.y() * c.y();
    let h = clamp(
        ndot(&(&b - &p * 2.0), &b) / max(dot(&b, &b), EPSILON),
        -1.0,
        1.0,
    );
    let d = (&p - &b * vec2(h.one_minus(), &h + 1.0) * 0.5).length();
    d * (p.x() * b.y() + p.y() * b.x() - b.x() * b.y()).sign()
}

/// Parallelogram of half-width `wi`, half-height `he` and horizontal skew `sk`.
pub fn parallelogram(
    p: &Expr,
    wi: impl Into<Expr>,
    he: impl Into<Expr>,
    sk: impl Into<Expr>,
) -> Expr {
    let wi = wi.into();
    let he = he.into();
    let e = vec2(sk, &he);
    let p = select(less_than(p.y(), 0.0), -p, p);
    let w = &p - &e;
    let w = vec2(w.x() - clamp(w.x(), -&wi, &wi), w.y());
    let d = vec2(dot(&w, &w), -w.y());
    let s = p.x() * e.y() - p.y() * e.x();
    let p = select(less_than(&s, 0.0), -&p, &p);
    let v = &p - vec2(&wi, 0.0);
    let v = &v - &e * clamp(dot(&v, &e) / max(dot(&e, &e), EPSILON), -1.0, 1.0);
    let d = min(d, vec2(dot(&v, &v), &wi * &he - s.abs()));
    d.x().sqrt() * (-d.y()).sign()
}

/// Axis-aligned 3D box with half-extents `b` (vec3).
pub fn box3(p: &Expr, b: impl Into<Expr>) -> Expr {
    let q = p.abs() - b.into();
    max(&q, 0.0).length() + q.x().max(q.y().max(q.z())).min(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/library/sdf.rs"]
mod tests;
