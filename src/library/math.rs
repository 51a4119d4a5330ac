//! Scalar shaping functions and distance helpers.

use crate::expr::{Expr, clamp, dot, max, mix, pow, select};

/// Guard added to denominators that may reach zero.
pub const EPSILON: f64 = 1e-6;

/// `v / length(v)`, returning zero instead of NaN for zero-length input.
pub fn safe_normalize(v: &Expr) -> Expr {
    v / max(v.length(), 1e-8)
}

/// Hyperbolic tangent. The argument is clamped so the exponential cannot overflow.
pub fn tanh(x: impl Into<Expr>) -> Expr {
    let e2x = (x.into().clamp(-20.0, 20.0) * 2.0).exp();
    (&e2x - 1.0) / (&e2x + 1.0)
}

/// Hyperbolic sine.
pub fn sinh(x: impl Into<Expr>) -> Expr {
    let x = x.into();
    (x.exp() - (-&x).exp()) * 0.5
}

/// Hyperbolic cosine.
pub fn cosh(x: impl Into<Expr>) -> Expr {
    let x = x.into();
    (x.exp() + (-&x).exp()) * 0.5
}

/// Map `value` from `[in_min, in_max]` to `[out_min, out_max]`, clamped to the output range.
pub fn remap(
    value: impl Into<Expr>,
    in_min: impl Into<Expr>,
    in_max: impl Into<Expr>,
    out_min: impl Into<Expr>,
    out_max: impl Into<Expr>,
) -> Expr {
    let in_min = in_min.into();
    let t = clamp(
        (value.into() - &in_min) / (in_max.into() - &in_min),
        0.0,
        1.0,
    );
    mix(out_min, out_max, t)
}

/// Quintic step `6t^5 - 15t^4 + 10t^3`.
pub fn smootherstep(e0: impl Into<Expr>, e1: impl Into<Expr>, x: impl Into<Expr>) -> Expr {
    let e0 = e0.into();
    let t = clamp((x.into() - &e0) / (e1.into() - &e0), 0.0, 1.0);
    &t * &t * &t * (&t * (&t * 6.0 - 15.0) + 10.0)
}

/// Schlick-style rim term `(1 - saturate(dot(n, v)))^power`.
pub fn fresnel(view_dir: &Expr, normal: &Expr, power: impl Into<Expr>) -> Expr {
    let n_dot_v = clamp(
        dot(safe_normalize(normal), safe_normalize(view_dir)),
        0.0,
        1.0,
    );
    pow(n_dot_v.one_minus(), power)
}

/// Schlick bias curve on `[0, 1]`. `b = 0.5` is the identity, `b < 0.5` pulls values toward 0
/// and `b > 0.5` toward 1.
///
/// `x` is clamped to `[0, 1]` and `b` to `[EPSILON, 1 - EPSILON]`, so the result is finite for
/// any finite input.
pub fn bias(x: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    let x = x.into().saturate();
    let b = b.into().clamp(EPSILON, 1.0 - EPSILON);
    &x / ((1.0 / b - 2.0) * x.one_minus() + 1.0)
}

/// Schlick gain: [`bias`] mirrored about the midpoint. `g = 0.5` is the identity and
/// `g > 0.5` increases contrast around 0.5.
pub fn gain(x: impl Into<Expr>, g: impl Into<Expr>) -> Expr {
    let x = x.into().saturate();
    let b = g.into().one_minus();
    let low = bias(&x * 2.0, &b) * 0.5;
    let high = 1.0 - bias(2.0 - &x * 2.0, b) * 0.5;
    select(crate::expr::less_than(&x, 0.5), low, high)
}

/// Euclidean distance from `center`.
pub fn circular_distance(p: &Expr, center: impl Into<Expr>) -> Expr {
    (p - center.into()).length()
}

/// Signed distance to an axis-aligned box of half-extent `size` around `center`.
pub fn box_distance(p: &Expr, center: impl Into<Expr>, size: impl Into<Expr>) -> Expr {
    let d = (p - center.into()).abs() - size.into();
    let outside = max(&d, 0.0).length();
    let inside = d.x().max(d.y()).min(0.0);
    outside + inside
}

/// Distance to the segment `a..b`.
pub fn line_distance(p: &Expr, a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    let a = a.into();
    let pa = p - &a;
    let ba = b.into() - &a;
    let t = clamp(dot(&pa, &ba) / max(dot(&ba, &ba), EPSILON), 0.0, 1.0);
    (pa - ba * t).length()
}

/// Snap to `steps` discrete levels.
pub fn quantize(value: impl Into<Expr>, steps: impl Into<Expr>) -> Expr {
    let steps = steps.into();
    (value.into() * &steps).floor() / steps
}

/// `2^(-x * falloff)`
pub fn exp_falloff(x: impl Into<Expr>, falloff: impl Into<Expr>) -> Expr {
    pow(2.0, -(x.into() * falloff.into()))
}

/// 1 at `start`, 0 at `end`, clamped.
pub fn linear_falloff(x: impl Into<Expr>, start: impl Into<Expr>, end: impl Into<Expr>) -> Expr {
    let start = start.into();
    clamp(
        1.0 - (x.into() - &start) / (end.into() - &start),
        0.0,
        1.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/library/math.rs"]
mod tests;
