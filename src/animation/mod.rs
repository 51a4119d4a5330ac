//! Host-side animation: easing curves, the frame scheduler, uniform handles and tweens.

pub(crate) mod ease;
pub(crate) mod scheduler;
pub(crate) mod tween;
pub(crate) mod uniform;
pub(crate) mod uniform_set;
pub(crate) mod value;

pub use ease::Ease;
pub use scheduler::{FrameRequestId, FrameScheduler, FrameTime};
pub use tween::{TweenHandle, TweenOutcome};
pub use uniform::Uniform;
pub use uniform_set::{AnyUniform, UniformDecl, UniformSet};
pub use value::{Lerp, UniformValue};
