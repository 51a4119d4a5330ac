//! Procedural primitives built from [`crate::expr`] nodes: hashes, noise, fractals, shapes,
//! patterns, color, lighting, post effects and tonemapping.
//!
//! Every function here is pure: the same inputs produce structurally equal expressions and
//! nothing is captured besides the arguments.

pub mod blend;
pub mod cellular;
pub mod color;
pub mod effects;
pub mod fractal;
pub mod grain;
pub mod hash;
pub mod lighting;
pub mod math;
pub mod noise;
pub mod pattern;
pub mod sdf;
pub mod shapes;
pub mod tonemap;
pub mod uv;
pub mod waves;

pub use blend::{BlendLayer, BlendOp};
pub use cellular::{Voronoi, VoronoiOptions, voronoi};
pub use color::{ColorStop, Palette, cosine_palette};
pub use effects::{
    ChromaticAberrationOptions, LedOptions, SwirlOptions, WaveAxis, WaveDistortionOptions,
};
pub use fractal::{
    DomainWarpOptions, FractalOptions, NoiseBasis, RotationalTurbulenceOptions,
    WarpedFbmOptions, curl_noise, domain_warp, fbm, fbm_normalized, ridged_fbm, turbulence,
};
pub use grain::CrtOptions;
pub use lighting::LightingOptions;
pub use noise::{
    gradient_noise2, gradient_noise3, perlin3, simplex2, simplex3, simplex4, value_noise,
};
pub use tonemap::Tonemap;
pub use uv::BulgeOptions;
