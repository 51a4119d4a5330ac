//! HDR to display tonemapping curves. Inputs are clamped to non-negative radiance first.

use crate::expr::{Expr, clamp, dot, max, mix, pow, smoothstep, splat3, vec3};
use crate::library::math::{EPSILON, tanh};

fn radiance(color: impl Into<Expr>) -> Expr {
    max(color, 0.0)
}

/// `c / (1 + c)`
pub fn reinhard(color: impl Into<Expr>) -> Expr {
    let c = radiance(color);
    &c / (&c + 1.0)
}

/// Reinhard with a white point that maps to 1.
pub fn reinhard_extended(color: impl Into<Expr>, white_point: impl Into<Expr>) -> Expr {
    let c = radiance(color);
    let wp = max(white_point, EPSILON);
    &c * (&c / (&wp * &wp) + 1.0) / (c + 1.0)
}

/// Narkowicz ACES fit.
pub fn aces(color: impl Into<Expr>) -> Expr {
    let c = radiance(color);
    &c * (&c * 2.51 + 0.03) / (&c * (&c * 2.43 + 0.59) + 0.14)
}

/// Hable's Uncharted 2 filmic curve with a fixed exposure bias of 16.
pub fn uncharted2(color: impl Into<Expr>) -> Expr {
    const A: f64 = 0.15;
    const B: f64 = 0.5;
    const C: f64 = 0.1;
    const D: f64 = 0.2;
    const E: f64 = 0.02;
    const F: f64 = 0.3;
    let x = radiance(color) * 16.0;
    (&x * (&x * A + C * B) + D * E) / (&x * (&x * A + B) + D * F) - E / F
}

/// Unreal 3 curve with gamma baked in.
pub fn unreal(color: impl Into<Expr>) -> Expr {
    let c = radiance(color);
    &c / (&c + 0.155) * 1.019
}

pub fn tanh_tonemap(color: impl Into<Expr>) -> Expr {
    tanh(radiance(color))
}

/// Per-channel power curves: lifted red, crushed blue.
pub fn cross_process(color: impl Into<Expr>) -> Expr {
    let c = radiance(color);
    clamp(
        vec3(pow(c.x(), 0.8), pow(c.y(), 1.2), pow(c.z(), 1.5)),
        0.0,
        1.0,
    )
}

/// Partial desaturation with a contrast lift.
pub fn bleach_bypass(color: impl Into<Expr>) -> Expr {
    let c = radiance(color);
    let lum = dot(&c, [0.2126, 0.7152, 0.0722]);
    clamp(mix(splat3(lum), c, 0.7) * 1.2, 0.0, 1.0)
}

/// Two-strip style channel mixing.
pub fn technicolor(color: impl Into<Expr>) -> Expr {
    let c = radiance(color);
    clamp(
        vec3(c.x() * 1.5, c.y() * 1.2, c.z() * 0.8 + c.x() * 0.2),
        0.0,
        1.0,
    )
}

/// S-curve per channel with a slight warm shift.
pub fn cinematic(color: impl Into<Expr>) -> Expr {
    let c = radiance(color);
    let curve = |x: Expr| smoothstep(0.05, 0.95, x);
    vec3(
        curve(c.x() * 0.95 + 0.02),
        curve(c.y() * 1.05),
        curve(c.z() * 1.1),
    )
}

/// Scale by `2^stops`.
pub fn exposure(color: impl Into<Expr>, stops: impl Into<Expr>) -> Expr {
    color.into() * pow(2.0, stops)
}

/// Encode with `1 / gamma`.
pub fn gamma(color: impl Into<Expr>, gamma: impl Into<Expr>) -> Expr {
    pow(radiance(color), 1.0 / max(gamma, EPSILON))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
/// Tonemap selector.
pub enum Tonemap {
    Reinhard,
    ReinhardExtended { white_point: f64 },
    #[default]
    Aces,
    Uncharted2,
    Unreal,
    Tanh,
    CrossProcess,
    BleachBypass,
    Technicolor,
    Cinematic,
}

impl Tonemap {
    pub fn apply(self, color: impl Into<Expr>) -> Expr {
        match self {
            Self::Reinhard => reinhard(color),
            Self::ReinhardExtended { white_point } => reinhard_extended(color, white_point),
            Self::Aces => aces(color),
            Self::Uncharted2 => uncharted2(color),
            Self::Unreal => unreal(color),
            Self::Tanh => tanh_tonemap(color),
            Self::CrossProcess => cross_process(color),
            Self::BleachBypass => bleach_bypass(color),
            Self::Technicolor => technicolor(color),
            Self::Cinematic => cinematic(color),
        }
    }
}

/// Tonemap then gamma-encode.
pub fn tonemap_with_gamma(color: impl Into<Expr>, curve: Tonemap, gamma_value: f64) -> Expr {
    gamma(curve.apply(color), gamma_value)
}

#[cfg(test)]
#[path = "../../tests/unit/library/tonemap.rs"]
mod tests;
