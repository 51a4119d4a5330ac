use serde::{Deserialize, Serialize};

use crate::animation::Uniform;
use crate::expr::{Expr, mix, vec2};
use crate::foundation::core::Color;
use crate::foundation::error::WeaveResult;
use crate::library::shapes::blob;
use crate::runtime::RuntimeContext;

use super::{color_uniforms, parse_colors, set_colors};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshGradientOptions {
    /// Base color first, then three blob colors.
    pub colors: [String; 4],
    pub speed: f64,
    pub blob_scale: f64,
    pub softness: f64,
    pub mouse_x: f64,
    pub mouse_y: f64,
    pub mouse_strength: f64,
}

impl Default for MeshGradientOptions {
    fn default() -> Self {
        Self {
            colors: [
                "#1a1a2e".into(),
                "#e94560".into(),
                "#0f3460".into(),
                "#16213e".into(),
            ],
            speed: 0.3,
            blob_scale: 1.0,
            softness: 0.25,
            mouse_x: 0.5,
            mouse_y: 0.5,
            mouse_strength: 0.5,
        }
    }
}

/// Four soft blobs orbiting their anchors, nudged by the pointer.
pub struct MeshGradient {
    pub speed: Uniform<f64>,
    pub blob_scale: Uniform<f64>,
    pub softness: Uniform<f64>,
    pub mouse_x: Uniform<f64>,
    pub mouse_y: Uniform<f64>,
    pub mouse_strength: Uniform<f64>,
    pub colors: [Uniform<Color>; 4],
}

impl MeshGradient {
    pub fn new(runtime: &RuntimeContext, opts: &MeshGradientOptions) -> WeaveResult<Self> {
        let colors = parse_colors(&opts.colors)?;
        tracing::debug!(preset = "mesh_gradient", "preset uniforms created");
        Ok(Self {
            speed: runtime.uniform(opts.speed),
            blob_scale: runtime.uniform(opts.blob_scale),
            softness: runtime.uniform(opts.softness),
            mouse_x: runtime.uniform(opts.mouse_x),
            mouse_y: runtime.uniform(opts.mouse_y),
            mouse_strength: runtime.uniform(opts.mouse_strength),
            colors: color_uniforms(runtime, colors),
        })
    }

    pub fn apply(&self, opts: &MeshGradientOptions) -> WeaveResult<()> {
        let colors = parse_colors(&opts.colors)?;
        self.speed.set(opts.speed);
        self.blob_scale.set(opts.blob_scale);
        self.softness.set(opts.softness);
        self.mouse_x.set(opts.mouse_x);
        self.mouse_y.set(opts.mouse_y);
        self.mouse_strength.set(opts.mouse_strength);
        set_colors(&self.colors, colors);
        Ok(())
    }

    pub fn layer(&self, uv: &Expr, time: &Expr) -> Expr {
        let t = time * self.speed.node();
        let strength = self.mouse_strength.node();
        let mx = (self.mouse_x.node() - 0.5) * &strength;
        let my = (self.mouse_y.node() - 0.5) * strength;

        // the second and fourth blobs swap sin and cos
        let orbit = |anchor: [f64; 2], r: f64, rates: [f64; 2], pull: f64, swap: bool| {
            let (wx, wy) = (&t * rates[0], &t * rates[1]);
            let (ox, oy) = if swap {
                (wx.cos(), wy.sin())
            } else {
                (wx.sin(), wy.cos())
            };
            vec2(
                ox * r + anchor[0] + &mx * pull,
                oy * r + anchor[1] + &my * pull,
            )
        };
        let centers = [
            orbit([0.3, 0.3], 0.15, [1.0, 0.8], 0.3, false),
            orbit([0.7, 0.4], 0.15, [0.7, 0.9], -0.2, true),
            orbit([0.5, 0.7], 0.15, [0.6, 1.1], 0.4, false),
            orbit([0.2, 0.6], 0.1, [0.5, 0.7], -0.25, true),
        ];

        let scale = self.blob_scale.node();
        let softness = self.softness.node();
        let blobs = [(0.35, 1.0), (0.3, 0.8), (0.28, 0.88), (0.25, 0.72)];
        let [b1, b2, b3, b4] = [0, 1, 2, 3].map(|i| {
            let (radius, soft) = blobs[i];
            blob(uv, centers[i].clone(), &scale * radius, &softness * soft)
        });

        let [base, c1, c2, c3] = &self.colors;
        let color = mix(base.node(), c1.node(), b1);
        let color = mix(color, c2.node(), b2 * 0.8);
        let color = mix(color, c3.node(), b3 * 0.7);
        mix(color, c1.node(), b4 * 0.5)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presets/mesh_gradient.rs"]
mod tests;
