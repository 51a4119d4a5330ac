//! Deterministic coordinate hashes. Every noise function in this crate is built on these.

use crate::expr::{Expr, dot, vec2, vec3};

/// Scalar in `[0, 1)` from a 2D coordinate.
pub fn hash1(p: &Expr) -> Expr {
    let p3 = (vec3(p.x(), p.y(), p.x()) * 0.1031).fract();
    let d = dot(&p3, &p3 + 33.33);
    (d * (p3.x() + p3.y()) * 2.0).fract()
}

/// Vec2 in `[0, 1)` from a 2D coordinate.
pub fn hash2(p: &Expr) -> Expr {
    const K: [f64; 2] = [0.318_309_9, 0.367_879_4];
    let px = p.x() * K[0] + p.y() * K[1];
    let py = p.x() * K[1] + p.y() * K[0];
    (vec2(px, py).sin() * (43_758.545_3 * 2.0) - 1.0).fract()
}

/// Vec3 in `[-1, 1)` from a 3D coordinate.
pub fn hash3(p: &Expr) -> Expr {
    let q = vec3(
        dot(p, [127.1, 311.7, 74.7]),
        dot(p, [269.5, 183.3, 246.1]),
        dot(p, [113.5, 271.9, 124.6]),
    );
    (q.sin() * 43_758.545_312_3).fract() * 2.0 - 1.0
}

#[cfg(test)]
#[path = "../../tests/unit/library/hash.rs"]
mod tests;
