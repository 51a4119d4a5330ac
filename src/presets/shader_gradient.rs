use serde::{Deserialize, Serialize};

use crate::animation::Uniform;
use crate::expr::{Expr, mix, smoothstep, vec2};
use crate::foundation::core::Color;
use crate::foundation::error::WeaveResult;
use crate::library::fractal::{FractalOptions, fbm};
use crate::library::noise::simplex2;
use crate::library::uv;
use crate::runtime::RuntimeContext;

use super::{color_uniforms, parse_colors, set_colors};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderGradientOptions {
    pub colors: [String; 3],
    pub speed: f64,
    /// How far the sampling position sways over time.
    pub morph_intensity: f64,
    pub grain: f64,
    /// Highlight position in uv space.
    pub light: [f64; 2],
    pub brightness: f64,
    pub zoom: f64,
}

impl Default for ShaderGradientOptions {
    fn default() -> Self {
        Self {
            colors: ["#ff5722".into(), "#673ab7".into(), "#2196f3".into()],
            speed: 0.4,
            morph_intensity: 1.0,
            grain: 0.03,
            light: [0.5, 0.5],
            brightness: 1.0,
            zoom: 1.0,
        }
    }
}

/// Three colors blended by swaying fbm fields, lit by a soft highlight, with fine grain.
pub struct ShaderGradient {
    pub speed: Uniform<f64>,
    pub morph_intensity: Uniform<f64>,
    pub grain: Uniform<f64>,
    pub light_x: Uniform<f64>,
    pub light_y: Uniform<f64>,
    pub brightness: Uniform<f64>,
    pub zoom: Uniform<f64>,
    pub colors: [Uniform<Color>; 3],
}

impl ShaderGradient {
    pub fn new(runtime: &RuntimeContext, opts: &ShaderGradientOptions) -> WeaveResult<Self> {
        let colors = parse_colors(&opts.colors)?;
        tracing::debug!(preset = "shader_gradient", "preset uniforms created");
        Ok(Self {
            speed: runtime.uniform(opts.speed),
            morph_intensity: runtime.uniform(opts.morph_intensity),
            grain: runtime.uniform(opts.grain),
            light_x: runtime.uniform(opts.light[0]),
            light_y: runtime.uniform(opts.light[1]),
            brightness: runtime.uniform(opts.brightness),
            zoom: runtime.uniform(opts.zoom),
            colors: color_uniforms(runtime, colors),
        })
    }

    pub fn apply(&self, opts: &ShaderGradientOptions) -> WeaveResult<()> {
        let colors = parse_colors(&opts.colors)?;
        self.speed.set(opts.speed);
        self.morph_intensity.set(opts.morph_intensity);
        self.grain.set(opts.grain);
        self.light_x.set(opts.light[0]);
        self.light_y.set(opts.light[1]);
        self.brightness.set(opts.brightness);
        self.zoom.set(opts.zoom);
        set_colors(&self.colors, colors);
        Ok(())
    }

    pub fn layer(&self, uv: &Expr, time: &Expr) -> Expr {
        let t = time * self.speed.node();
        let zoomed = uv::zoom(uv, [0.5, 0.5], self.zoom.node());

        let sway = self.morph_intensity.node() * 0.1;
        let morphed = &zoomed + vec2((&t * 0.7).sin() * &sway, (&t * 0.5).cos() * sway);
        let octaves = FractalOptions::default().with_octaves(3);
        let n1 = fbm(&(&morphed * 2.0 + &t * 0.3), &octaves) * 0.5 + 0.5;
        let n2 = fbm(&(&morphed * 3.0 - &t * 0.2), &octaves) * 0.5 + 0.5;
        let n3 = simplex2(&(morphed * 4.0 + vec2(&t * 0.4, &t * -0.3))) * 0.5 + 0.5;

        let light = vec2(self.light_x.node(), self.light_y.node());
        let falloff = smoothstep(0.0, 1.5, (&zoomed - light).length()).one_minus();

        let [first, second, third] = &self.colors;
        let color = mix(first.node(), second.node(), n1);
        let color = mix(color, third.node(), n2 * 0.7);
        let color = mix(color, first.node(), n3 * 0.3 * &falloff);
        let color = (color + falloff.pow(3.0) * 0.3) * self.brightness.node();

        let grain = simplex2(&(zoomed * 100.0 + t * 10.0));
        color + grain * self.grain.node()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presets/shader_gradient.rs"]
mod tests;
