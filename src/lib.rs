//! Shaderweave builds GPU-evaluated procedural effects from composable expressions.
//!
//! - Build per-pixel math as an [`Expr`] graph, using the primitives in [`library`]
//! - Drive it from the host through [`Uniform`] handles and tweens
//! - Stack layers in a [`CompositionGraph`] and hand the merged expression to a
//!   [`ProgramCompiler`] backend, or check it on the CPU with [`evaluate`]
//! - Start from a ready-made background in [`presets`]
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod composition;
pub mod expr;
pub mod library;
pub mod presets;
pub mod runtime;

pub use crate::foundation::core::{Color, Vec2, Vec3, parse_oklch};
pub use crate::foundation::error::{WeaveError, WeaveResult};

pub use crate::animation::{
    Ease, FrameScheduler, TweenHandle, TweenOutcome, Uniform, UniformDecl, UniformSet,
};
pub use crate::composition::{BlendMode, CompositionGraph, LayerOptions};
pub use crate::expr::{EvalInputs, Expr, ProgramCompiler, Value, ValueType, evaluate};
pub use crate::runtime::{RuntimeContext, RuntimeOptions, RuntimeScope};
