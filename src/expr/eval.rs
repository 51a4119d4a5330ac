use std::collections::HashMap;

use crate::expr::node::{Expr, NodeKind};
use crate::expr::ops::{Builtin, apply_construct, apply_swizzle};
use crate::expr::value::Value;
use crate::foundation::core::Vec2;
use crate::foundation::error::{WeaveError, WeaveResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Values bound to [`Builtin`] inputs for one evaluation.
pub struct EvalInputs {
    /// Seconds bound to [`Builtin::Time`].
    pub time: f64,
    /// Surface coordinate bound to [`Builtin::Uv`].
    pub uv: Vec2,
    /// Surface size bound to [`Builtin::Resolution`].
    pub resolution: Vec2,
}

impl Default for EvalInputs {
    fn default() -> Self {
        Self {
            time: 0.0,
            uv: Vec2::new(0.5, 0.5),
            resolution: Vec2::new(1.0, 1.0),
        }
    }
}

impl EvalInputs {
    /// Inputs at surface coordinate `uv`, time zero.
    pub fn at(uv: Vec2) -> Self {
        Self {
            uv,
            ..Self::default()
        }
    }

    /// Same inputs at a different time.
    pub fn with_time(self, time: f64) -> Self {
        Self { time, ..self }
    }
}

/// CPU reference evaluator.
///
/// Shared subtrees are computed once per [`Evaluator::eval`] call. Uniform nodes read the
/// storage cell at evaluation time, so an evaluator observes host writes between calls.
pub struct Evaluator {
    inputs: EvalInputs,
    memo: HashMap<usize, Value>,
}

impl Evaluator {
    /// Evaluator bound to `inputs`.
    pub fn new(inputs: EvalInputs) -> Self {
        Self {
            inputs,
            memo: HashMap::new(),
        }
    }

    /// Replace the bound inputs.
    pub fn set_inputs(&mut self, inputs: EvalInputs) {
        self.inputs = inputs;
    }

    /// Evaluate `root`.
    pub fn eval(&mut self, root: &Expr) -> WeaveResult<Value> {
        self.memo.clear();
        let out = self.eval_node(root);
        self.memo.clear();
        out
    }

    /// Evaluate `root` and require a scalar result.
    pub fn eval_f64(&mut self, root: &Expr) -> WeaveResult<f64> {
        let v = self.eval(root)?;
        v.as_f64().ok_or_else(|| {
            WeaveError::evaluation(format!("expected a scalar, got {:?}", v.ty()))
        })
    }

    fn eval_node(&mut self, e: &Expr) -> WeaveResult<Value> {
        if let Some(v) = self.memo.get(&e.addr()) {
            return Ok(*v);
        }
        let v = match e.kind() {
            NodeKind::Const(v) => *v,
            NodeKind::Uniform(slot) => slot.get(),
            NodeKind::Input(Builtin::Time) => Value::float(self.inputs.time),
            NodeKind::Input(Builtin::Uv) => Value::vec2(self.inputs.uv.x, self.inputs.uv.y),
            NodeKind::Input(Builtin::Resolution) => {
                Value::vec2(self.inputs.resolution.x, self.inputs.resolution.y)
            }
            NodeKind::Unary(op, a) => {
                let a = self.eval_node(a)?;
                op.apply(a)?
            }
            NodeKind::Binary(op, a, b) => {
                let a = self.eval_node(a)?;
                let b = self.eval_node(b)?;
                op.apply(a, b)?
            }
            NodeKind::Ternary(op, a, b, c) => {
                let a = self.eval_node(a)?;
                let b = self.eval_node(b)?;
                let c = self.eval_node(c)?;
                op.apply(a, b, c)?
            }
            NodeKind::Construct(parts) => {
                let values = parts
                    .iter()
                    .map(|p| self.eval_node(p))
                    .collect::<WeaveResult<Vec<_>>>()?;
                apply_construct(&values)?
            }
            NodeKind::Swizzle(a, lanes) => {
                let a = self.eval_node(a)?;
                apply_swizzle(a, lanes)?
            }
        };
        self.memo.insert(e.addr(), v);
        Ok(v)
    }
}

/// One-shot evaluation.
pub fn evaluate(root: &Expr, inputs: EvalInputs) -> WeaveResult<Value> {
    Evaluator::new(inputs).eval(root)
}

#[cfg(test)]
#[path = "../../tests/unit/expr/eval.rs"]
mod tests;
