use serde::{Deserialize, Serialize};

use crate::animation::Uniform;
use crate::expr::{Expr, clamp, mix, smoothstep};
use crate::foundation::core::Color;
use crate::foundation::error::WeaveResult;
use crate::library::fractal::{FractalOptions, fbm};
use crate::library::grain::{grain, paper_texture};
use crate::library::noise::simplex2;
use crate::runtime::RuntimeContext;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperShadingOptions {
    pub paper_color: String,
    pub ink_color: String,
    pub ink_color2: String,
    pub speed: f64,
    /// Strength of the paper fibre.
    pub texture_intensity: f64,
    /// Scales the flow noise before the ink threshold; 0 leaves bare paper.
    pub flow_intensity: f64,
    pub grain_intensity: f64,
    /// How far ink edges wander.
    pub bleed: f64,
    pub edge_darkness: f64,
}

impl Default for PaperShadingOptions {
    fn default() -> Self {
        Self {
            paper_color: "#f5f0e6".into(),
            ink_color: "#1a1a1a".into(),
            ink_color2: "#3d5a80".into(),
            speed: 0.1,
            texture_intensity: 0.15,
            flow_intensity: 1.0,
            grain_intensity: 0.08,
            bleed: 0.5,
            edge_darkness: 0.3,
        }
    }
}

/// Two inks bleeding across fibrous paper, darkened at the edges, output clamped to
/// `[0, 1]`.
pub struct PaperShading {
    pub paper_color: Uniform<Color>,
    pub ink_color: Uniform<Color>,
    pub ink_color2: Uniform<Color>,
    pub speed: Uniform<f64>,
    pub texture_intensity: Uniform<f64>,
    pub flow_intensity: Uniform<f64>,
    pub grain_intensity: Uniform<f64>,
    pub bleed: Uniform<f64>,
    pub edge_darkness: Uniform<f64>,
}

fn parse_inks(opts: &PaperShadingOptions) -> WeaveResult<[Color; 3]> {
    Ok([
        Color::parse(&opts.paper_color)?,
        Color::parse(&opts.ink_color)?,
        Color::parse(&opts.ink_color2)?,
    ])
}

impl PaperShading {
    pub fn new(runtime: &RuntimeContext, opts: &PaperShadingOptions) -> WeaveResult<Self> {
        let [paper, ink, ink2] = parse_inks(opts)?;
        tracing::debug!(preset = "paper_shading", "preset uniforms created");
        Ok(Self {
            paper_color: runtime.uniform(paper),
            ink_color: runtime.uniform(ink),
            ink_color2: runtime.uniform(ink2),
            speed: runtime.uniform(opts.speed),
            texture_intensity: runtime.uniform(opts.texture_intensity),
            flow_intensity: runtime.uniform(opts.flow_intensity),
            grain_intensity: runtime.uniform(opts.grain_intensity),
            bleed: runtime.uniform(opts.bleed),
            edge_darkness: runtime.uniform(opts.edge_darkness),
        })
    }

    pub fn apply(&self, opts: &PaperShadingOptions) -> WeaveResult<()> {
        let [paper, ink, ink2] = parse_inks(opts)?;
        self.paper_color.set(paper);
        self.ink_color.set(ink);
        self.ink_color2.set(ink2);
        self.speed.set(opts.speed);
        self.texture_intensity.set(opts.texture_intensity);
        self.flow_intensity.set(opts.flow_intensity);
        self.grain_intensity.set(opts.grain_intensity);
        self.bleed.set(opts.bleed);
        self.edge_darkness.set(opts.edge_darkness);
        Ok(())
    }

    pub fn layer(&self, uv: &Expr, time: &Expr) -> Expr {
        let t = time * self.speed.node();

        let fibre = paper_texture(uv, 20.0, self.texture_intensity.node(), &t);
        let color = self.paper_color.node() + fibre;

        let flow = self.flow_intensity.node();
        let wide = fbm(&(uv * 3.0 + &t * 0.5), &FractalOptions::default().with_octaves(4));
        let fine = fbm(&(uv * 4.0 - &t * 0.3), &FractalOptions::default().with_octaves(3));
        let bleed = simplex2(&(uv * 8.0 + &t * 0.2)) * self.bleed.node() * 0.1;
        let first = smoothstep(0.2 - &bleed, 0.5 + &bleed, wide * &flow);
        let second = smoothstep(0.3 - &bleed, 0.6 + bleed, fine * flow * 0.8);
        let color = mix(color, self.ink_color.node(), first * 0.7);
        let color = mix(color, self.ink_color2.node(), second * 0.5);

        let edge = (uv - 0.5).abs() * 2.0;
        let edge = smoothstep(0.5, 1.2, edge.x() + edge.y());
        let color = color * (1.0 - edge * self.edge_darkness.node());
        let color = color + grain(uv, self.grain_intensity.node(), t * 10.0);

        clamp(color * [1.02, 1.0, 0.98], 0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presets/paper_shading.rs"]
mod tests;
