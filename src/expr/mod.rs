//! Expression algebra: immutable, structurally shared nodes that describe per-pixel math.

pub(crate) mod build;
pub(crate) mod compile;
pub(crate) mod eval;
pub(crate) mod node;
pub(crate) mod ops;
pub(crate) mod value;

pub use build::{
    atan2, clamp, cross, distance, dot, float, greater_than, less_than, max, min, mix, modulo,
    pow, resolution, select, smoothstep, splat3, splat4, step, time, uv, vec2, vec3, vec4,
};
pub use compile::{ProgramCache, ProgramCompiler};
pub use eval::{EvalInputs, Evaluator, evaluate};
pub use node::{Expr, Node, NodeKind, SwizzleLanes, UniformSlot};
pub use ops::{BinaryOp, Builtin, TernaryOp, UnaryOp};
pub use value::{Value, ValueType};
