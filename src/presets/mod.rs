//! Ready-made background layers.
//!
//! Each preset pairs an options struct (serde, every field defaulted) with a set of uniforms
//! created on a [`RuntimeContext`], so teardown cancels their tweens. `layer` builds the color
//! expression once; later `apply` calls only write uniforms and never change its structure.
//! `apply` parses every color before writing anything, so a rejected update leaves the
//! preset untouched.
//!
//! [`RuntimeContext`]: crate::runtime::RuntimeContext

mod aurora;
mod mesh_gradient;
mod paper_shading;
mod shader_gradient;
mod stripe;

pub use aurora::{Aurora, AuroraOptions};
pub use mesh_gradient::{MeshGradient, MeshGradientOptions};
pub use paper_shading::{PaperShading, PaperShadingOptions};
pub use shader_gradient::{ShaderGradient, ShaderGradientOptions};
pub use stripe::{Stripe, StripeOptions};

use crate::animation::Uniform;
use crate::foundation::core::Color;
use crate::foundation::error::WeaveResult;
use crate::runtime::RuntimeContext;

fn parse_colors<const N: usize>(inputs: &[String; N]) -> WeaveResult<[Color; N]> {
    let mut colors = [Color::default(); N];
    for (slot, input) in colors.iter_mut().zip(inputs) {
        *slot = Color::parse(input)?;
    }
    Ok(colors)
}

fn color_uniforms<const N: usize>(
    runtime: &RuntimeContext,
    colors: [Color; N],
) -> [Uniform<Color>; N] {
    colors.map(|c| runtime.uniform(c))
}

fn set_colors<const N: usize>(uniforms: &[Uniform<Color>; N], colors: [Color; N]) {
    for (uniform, color) in uniforms.iter().zip(colors) {
        uniform.set(color);
    }
}
