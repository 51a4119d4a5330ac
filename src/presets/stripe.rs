use serde::{Deserialize, Serialize};

use crate::animation::Uniform;
use crate::expr::{Expr, mix, smoothstep, vec2};
use crate::foundation::core::Color;
use crate::foundation::error::WeaveResult;
use crate::library::noise::simplex2;
use crate::library::uv;
use crate::runtime::RuntimeContext;

use super::{color_uniforms, parse_colors, set_colors};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripeOptions {
    pub colors: [String; 5],
    pub speed: f64,
    pub noise_scale: f64,
    /// Rotation of the flow field around the frame center, radians.
    pub flow_angle: f64,
    pub mouse_x: f64,
    pub mouse_y: f64,
    pub mouse_strength: f64,
}

impl Default for StripeOptions {
    fn default() -> Self {
        Self {
            colors: [
                "#0a2540".into(),
                "#635bff".into(),
                "#00d4ff".into(),
                "#7a73ff".into(),
                "#80e9ff".into(),
            ],
            speed: 0.15,
            noise_scale: 1.5,
            flow_angle: 0.0,
            mouse_x: 0.5,
            mouse_y: 0.5,
            mouse_strength: 0.3,
        }
    }
}

/// Five colors layered by three drifting noise fields, with a soft brightness ripple.
pub struct Stripe {
    pub speed: Uniform<f64>,
    pub noise_scale: Uniform<f64>,
    pub flow_angle: Uniform<f64>,
    pub mouse_x: Uniform<f64>,
    pub mouse_y: Uniform<f64>,
    pub mouse_strength: Uniform<f64>,
    pub colors: [Uniform<Color>; 5],
}

impl Stripe {
    pub fn new(runtime: &RuntimeContext, opts: &StripeOptions) -> WeaveResult<Self> {
        let colors = parse_colors(&opts.colors)?;
        tracing::debug!(preset = "stripe", "preset uniforms created");
        Ok(Self {
            speed: runtime.uniform(opts.speed),
            noise_scale: runtime.uniform(opts.noise_scale),
            flow_angle: runtime.uniform(opts.flow_angle),
            mouse_x: runtime.uniform(opts.mouse_x),
            mouse_y: runtime.uniform(opts.mouse_y),
            mouse_strength: runtime.uniform(opts.mouse_strength),
            colors: color_uniforms(runtime, colors),
        })
    }

    pub fn apply(&self, opts: &StripeOptions) -> WeaveResult<()> {
        let colors = parse_colors(&opts.colors)?;
        self.speed.set(opts.speed);
        self.noise_scale.set(opts.noise_scale);
        self.flow_angle.set(opts.flow_angle);
        self.mouse_x.set(opts.mouse_x);
        self.mouse_y.set(opts.mouse_y);
        self.mouse_strength.set(opts.mouse_strength);
        set_colors(&self.colors, colors);
        Ok(())
    }

    pub fn layer(&self, uv: &Expr, time: &Expr) -> Expr {
        let t = time * self.speed.node();
        let strength = self.mouse_strength.node();
        let pointer = vec2(
            (self.mouse_x.node() - 0.5) * &strength,
            (self.mouse_y.node() - 0.5) * strength,
        );
        let p = uv::rotate(&(uv + pointer), self.flow_angle.node(), [0.5, 0.5]);

        let scale = self.noise_scale.node();
        let field = |freq: Expr, drift: [f64; 2]| {
            simplex2(&(&p * freq + vec2(&t * drift[0], &t * drift[1]))) * 0.5 + 0.5
        };
        let n1 = field(scale.clone(), [1.0, 0.5]);
        let n2 = field(&scale * 1.3, [-0.7, 0.3]);
        let n3 = field(scale * 0.8, [0.4, -0.6]);

        let [c0, c1, c2, c3, c4] = &self.colors;
        let color = mix(c0.node(), c1.node(), smoothstep(0.0, 0.5, &n1));
        let color = mix(color, c2.node(), smoothstep(0.3, 0.7, &n2));
        let color = mix(color, c3.node(), smoothstep(0.4, 0.8, n3));
        let color = mix(color, c4.node(), smoothstep(0.6, 1.0, n1 * n2));

        let brightness = simplex2(&(&p * 3.0 + &t)) * 0.1 + 0.9;
        color * brightness
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presets/stripe.rs"]
mod tests;
