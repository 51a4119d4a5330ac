//! Surface lighting terms for shaded pseudo-3D layers.
//!
//! Direction arguments point away from the surface. `normal` is expected to be unit length;
//! light and view directions are used as given except where a half or reflected vector is
//! built, which is renormalized.

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, dot, max, mix, splat3};
use crate::library::math::safe_normalize;

/// Reflect incident direction `i` about `n`.
fn reflect(i: &Expr, n: &Expr) -> Expr {
    i - n * dot(n, i) * 2.0
}

/// Hemisphere ambient: `ground` facing down, `sky` facing up.
pub fn hemi(normal: &Expr, ground: impl Into<Expr>, sky: impl Into<Expr>) -> Expr {
    mix(ground, sky, normal.y() * 0.5 + 0.5)
}

/// Lambert term times the light color.
pub fn diffuse(light_dir: &Expr, normal: &Expr, light_color: impl Into<Expr>) -> Expr {
    max(dot(light_dir, normal), 0.0) * light_color.into()
}

/// Phong highlight, as a gray vec3.
pub fn phong_specular(
    view_dir: &Expr,
    normal: &Expr,
    light_dir: &Expr,
    shininess: impl Into<Expr>,
) -> Expr {
    let reflected = safe_normalize(&reflect(&-light_dir, normal));
    splat3(max(dot(view_dir, reflected), 0.0).pow(shininess))
}

/// Blinn-Phong highlight from the half vector, as a gray vec3.
pub fn blinn_phong_specular(
    view_dir: &Expr,
    normal: &Expr,
    light_dir: &Expr,
    shininess: impl Into<Expr>,
) -> Expr {
    let half = safe_normalize(&(light_dir + view_dir));
    splat3(max(dot(half, normal), 0.0).pow(shininess))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingOptions {
    pub ambient: f64,
    pub diffuse_strength: f64,
    pub specular_strength: f64,
    pub shininess: f64,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            diffuse_strength: 1.0,
            specular_strength: 0.5,
            shininess: 32.0,
        }
    }
}

/// Ambient plus diffuse plus Phong specular for one light.
pub fn phong_lighting(
    view_dir: &Expr,
    normal: &Expr,
    light_dir: &Expr,
    light_color: impl Into<Expr>,
    opts: &LightingOptions,
) -> Expr {
    let light_color = light_color.into();
    let ambient = &light_color * opts.ambient;
    let diffuse = diffuse(light_dir, normal, light_color) * opts.diffuse_strength;
    let specular =
        phong_specular(view_dir, normal, light_dir, opts.shininess) * opts.specular_strength;
    ambient + diffuse + specular
}

#[cfg(test)]
#[path = "../../tests/unit/library/lighting.rs"]
mod tests;
