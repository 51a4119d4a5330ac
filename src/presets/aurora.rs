use serde::{Deserialize, Serialize};

use crate::animation::Uniform;
use crate::expr::{Expr, max, mix, smoothstep, vec2};
use crate::foundation::core::Color;
use crate::foundation::error::WeaveResult;
use crate::library::noise::simplex2;
use crate::runtime::RuntimeContext;

use super::{color_uniforms, parse_colors, set_colors};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuroraOptions {
    /// Curtain colors, hex or `oklch(...)`.
    pub colors: [String; 3],
    pub speed: f64,
    /// Curtain folds across the width.
    pub density: f64,
    /// How quickly the curtains fade toward the top.
    pub fade_power: f64,
    pub glow_intensity: f64,
    pub sky_color: String,
    /// Horizontal pointer position in `[0, 1]`.
    pub mouse_x: f64,
    pub mouse_strength: f64,
}

impl Default for AuroraOptions {
    fn default() -> Self {
        Self {
            colors: ["#00ff87".into(), "#60efff".into(), "#ff00ea".into()],
            speed: 0.2,
            density: 3.0,
            fade_power: 1.5,
            glow_intensity: 1.0,
            sky_color: "#020205".into(),
            mouse_x: 0.5,
            mouse_strength: 0.5,
        }
    }
}

/// Three drifting noise curtains over a night sky.
pub struct Aurora {
    pub speed: Uniform<f64>,
    pub density: Uniform<f64>,
    pub fade_power: Uniform<f64>,
    pub glow_intensity: Uniform<f64>,
    pub mouse_x: Uniform<f64>,
    pub mouse_strength: Uniform<f64>,
    pub sky_color: Uniform<Color>,
    pub colors: [Uniform<Color>; 3],
}

impl Aurora {
    pub fn new(runtime: &RuntimeContext, opts: &AuroraOptions) -> WeaveResult<Self> {
        let colors = parse_colors(&opts.colors)?;
        let sky = Color::parse(&opts.sky_color)?;
        tracing::debug!(preset = "aurora", "preset uniforms created");
        Ok(Self {
            speed: runtime.uniform(opts.speed),
            density: runtime.uniform(opts.density),
            fade_power: runtime.uniform(opts.fade_power),
            glow_intensity: runtime.uniform(opts.glow_intensity),
            mouse_x: runtime.uniform(opts.mouse_x),
            mouse_strength: runtime.uniform(opts.mouse_strength),
            sky_color: runtime.uniform(sky),
            colors: color_uniforms(runtime, colors),
        })
    }

    pub fn apply(&self, opts: &AuroraOptions) -> WeaveResult<()> {
        let colors = parse_colors(&opts.colors)?;
        let sky = Color::parse(&opts.sky_color)?;
        self.speed.set(opts.speed);
        self.density.set(opts.density);
        self.fade_power.set(opts.fade_power);
        self.glow_intensity.set(opts.glow_intensity);
        self.mouse_x.set(opts.mouse_x);
        self.mouse_strength.set(opts.mouse_strength);
        self.sky_color.set(sky);
        set_colors(&self.colors, colors);
        Ok(())
    }

    /// Color at `uv` (y up), with `time` in seconds.
    pub fn layer(&self, uv: &Expr, time: &Expr) -> Expr {
        let t = time * self.speed.node();
        let mouse = (self.mouse_x.node() - 0.5) * self.mouse_strength.node();
        let density = self.density.node();

        let front = simplex2(&vec2(
            uv.x() * &density + &t + &mouse,
            uv.y() * 0.5 + &t * 0.3,
        ));
        let middle = simplex2(&vec2(
            uv.x() * (&density * 1.3) - &t * 0.7 - &mouse,
            uv.y() * 0.3 + &t * 0.2,
        ));
        let back = simplex2(&vec2(
            uv.x() * (density * 0.8) + &t * 0.5 + mouse * 0.5,
            uv.y() * 0.4 - t * 0.1,
        ));

        let fade = max(uv.y().one_minus(), 0.0).pow(self.fade_power.node());
        let curtains = (front * 0.5 + &middle * 0.3 + back * 0.2) * &fade;
        let glow = smoothstep(-0.2, 0.8, curtains);

        let [first, second, third] = &self.colors;
        let color = mix(first.node(), second.node(), &glow);
        let color = mix(color, third.node(), middle * fade * 0.5);
        let color = color + Expr::from([0.05, 0.1, 0.05]) * &glow * self.glow_intensity.node();
        mix(self.sky_color.node(), color, glow + 0.1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presets/aurora.rs"]
mod tests;
