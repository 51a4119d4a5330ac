//! Layer blend operators on RGB expressions. `base` is the backdrop, `blend` the layer on top.

use crate::expr::{Expr, clamp, dot, max, min, mix, splat3, step};

/// Guard added to dodge/burn denominators.
const DODGE_EPSILON: f64 = 1e-4;

/// Linear interpolation from `a` to `b`.
pub fn linear(a: impl Into<Expr>, b: impl Into<Expr>, t: impl Into<Expr>) -> Expr {
    mix(a, b, t)
}

/// `base + blend * opacity`, unclamped.
pub fn add(base: impl Into<Expr>, blend: impl Into<Expr>, opacity: impl Into<Expr>) -> Expr {
    base.into() + blend.into() * opacity.into()
}

/// `base - blend * opacity`, unclamped.
pub fn subtract(base: impl Into<Expr>, blend: impl Into<Expr>, opacity: impl Into<Expr>) -> Expr {
    base.into() - blend.into() * opacity.into()
}

pub fn multiply(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    base.into() * blend.into()
}

pub fn screen(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    1.0 - (1.0 - base.into()) * (1.0 - blend.into())
}

/// Multiply in the shadows, screen in the highlights, switching on `base`.
pub fn overlay(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    let base = base.into();
    let blend = blend.into();
    let dark = &base * &blend * 2.0;
    let light = 1.0 - (1.0 - &base) * (1.0 - blend) * 2.0;
    mix(dark, light, step(0.5, base))
}

/// Soft light; the highlight branch takes `sqrt` of a non-negative base.
pub fn soft_light(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    let base = base.into();
    let blend = blend.into();
    let dark = &base * (&base + &blend * 2.0 * (1.0 - &base));
    let light = &base + (&blend * 2.0 - 1.0) * (max(&base, 0.0).sqrt() - &base);
    mix(dark, light, step(0.5, blend))
}

/// Overlay with the operands swapped.
pub fn hard_light(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    overlay(blend, base)
}

pub fn difference(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    (base.into() - blend.into()).abs()
}

pub fn exclusion(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    let base = base.into();
    let blend = blend.into();
    &base + &blend - base * blend * 2.0
}

pub fn darken(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    min(base, blend)
}

pub fn lighten(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    max(base, blend)
}

/// `base / (1 - blend)`, clamped to `[0, 1]`.
pub fn color_dodge(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    let denom = max(1.0 - blend.into(), 0.0) + DODGE_EPSILON;
    clamp(base.into() / denom, 0.0, 1.0)
}

/// `1 - (1 - base) / blend`, clamped to `[0, 1]`.
pub fn color_burn(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    let denom = max(blend.into(), 0.0) + DODGE_EPSILON;
    1.0 - clamp((1.0 - base.into()) / denom, 0.0, 1.0)
}

pub fn linear_dodge(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    clamp(base.into() + blend.into(), 0.0, 1.0)
}

pub fn linear_burn(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    clamp(base.into() + blend.into() - 1.0, 0.0, 1.0)
}

/// Burn below 0.5, dodge above.
pub fn vivid_light(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    let base = base.into();
    let blend = blend.into();
    let burn = color_burn(&base, &blend * 2.0);
    let dodge = color_dodge(&base, (&blend - 0.5) * 2.0);
    mix(burn, dodge, step(0.5, blend))
}

/// Darken below 0.5, lighten above.
pub fn pin_light(base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
    let base = base.into();
    let blend = blend.into();
    let dark = darken(&base, &blend * 2.0);
    let light = lighten(&base, (&blend - 0.5) * 2.0);
    mix(dark, light, step(0.5, blend))
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Blend operator selector for data-driven layer stacks.
pub enum BlendOp {
    /// The layer replaces the base.
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    SoftLight,
    HardLight,
    ColorDodge,
    ColorBurn,
    LinearDodge,
    LinearBurn,
    Difference,
    Exclusion,
    Lighten,
    Darken,
    VividLight,
    PinLight,
    /// Unclamped sum.
    Add,
    /// Unclamped difference.
    Subtract,
}

impl BlendOp {
    /// Blend `blend` over `base` at full strength.
    pub fn apply(self, base: impl Into<Expr>, blend: impl Into<Expr>) -> Expr {
        match self {
            Self::Normal => blend.into(),
            Self::Multiply => multiply(base, blend),
            Self::Screen => screen(base, blend),
            Self::Overlay => overlay(base, blend),
            Self::SoftLight => soft_light(base, blend),
            Self::HardLight => hard_light(base, blend),
            Self::ColorDodge => color_dodge(base, blend),
            Self::ColorBurn => color_burn(base, blend),
            Self::LinearDodge => linear_dodge(base, blend),
            Self::LinearBurn => linear_burn(base, blend),
            Self::Difference => difference(base, blend),
            Self::Exclusion => exclusion(base, blend),
            Self::Lighten => lighten(base, blend),
            Self::Darken => darken(base, blend),
            Self::VividLight => vivid_light(base, blend),
            Self::PinLight => pin_light(base, blend),
            Self::Add => add(base, blend, 1.0),
            Self::Subtract => subtract(base, blend, 1.0),
        }
    }
}

/// `mix(base, op(base, blend), opacity)`.
pub fn with_opacity(
    base: impl Into<Expr>,
    blend: impl Into<Expr>,
    op: BlendOp,
    opacity: impl Into<Expr>,
) -> Expr {
    let base = base.into();
    let blended = op.apply(&base, blend);
    mix(base, blended, opacity)
}

#[derive(Clone, Debug)]
/// One layer of a [`layered`] stack.
pub struct BlendLayer {
    pub color: Expr,
    pub op: BlendOp,
    pub opacity: Expr,
}

impl BlendLayer {
    pub fn new(color: impl Into<Expr>, op: BlendOp, opacity: impl Into<Expr>) -> Self {
        Self {
            color: color.into(),
            op,
            opacity: opacity.into(),
        }
    }
}

/// Apply each layer in order with [`with_opacity`].
pub fn layered(base: impl Into<Expr>, layers: &[BlendLayer]) -> Expr {
    layers.iter().fold(base.into(), |acc, layer| {
        with_opacity(acc, &layer.color, layer.op, &layer.opacity)
    })
}

/// Rec. 709 relative luminance.
pub fn luminance(color: &Expr) -> Expr {
    dot(color, [0.2126, 0.7152, 0.0722])
}

/// Move toward gray by `amount` (1 = fully gray).
pub fn desaturate(color: &Expr, amount: impl Into<Expr>) -> Expr {
    mix(color, splat3(luminance(color)), amount)
}

/// Push away from gray by `amount` (0 = unchanged).
pub fn saturate(color: &Expr, amount: impl Into<Expr>) -> Expr {
    mix(splat3(luminance(color)), color, amount.into() + 1.0)
}

pub fn brightness(color: &Expr, amount: impl Into<Expr>) -> Expr {
    color + amount.into()
}

/// Scale around mid-gray.
pub fn contrast(color: &Expr, amount: impl Into<Expr>) -> Expr {
    (color - 0.5) * amount.into() + 0.5
}

pub fn invert(color: &Expr) -> Expr {
    1.0 - color
}

#[cfg(test)]
#[path = "../../tests/unit/library/blend.rs"]
mod tests;
