use crate::expr::value::{Value, ValueType};
use crate::foundation::error::{WeaveError, WeaveResult};
use crate::foundation::math::{fract, glsl_mod, smoothstep};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Single-operand operators.
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `|x|`
    Abs,
    /// `-1`, `0` or `1`.
    Sign,
    /// Round toward negative infinity.
    Floor,
    /// Round toward positive infinity.
    Ceil,
    /// `x - floor(x)`
    Fract,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Arc sine.
    Asin,
    /// Arc cosine.
    Acos,
    /// Arc tangent.
    Atan,
    /// Natural exponent.
    Exp,
    /// Natural logarithm.
    Log,
    /// Square root.
    Sqrt,
    /// Euclidean length, always scalar.
    Length,
    /// Unit vector in the same direction.
    Normalize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Two-operand operators. Component-wise ones broadcast scalars.
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a - b * floor(a / b)`
    Mod,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// `a` raised to `b`.
    Pow,
    /// `1` when `b >= a` (edge first), else `0`.
    Step,
    /// `1` when `a < b`, else `0`.
    LessThan,
    /// `1` when `a > b`, else `0`.
    GreaterThan,
    /// Dot product of equal-width operands.
    Dot,
    /// Cross product of two vec3.
    Cross,
    /// `length(a - b)`
    Distance,
    /// Four-quadrant arc tangent of `a / b` (y first).
    Atan2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Three-operand operators.
pub enum TernaryOp {
    /// `a + (b - a) * t`
    Mix,
    /// `min(max(x, lo), hi)`
    Clamp,
    /// Hermite step between two edges: `(e0, e1, x)`.
    Smoothstep,
    /// Component-wise `cond != 0 ? a : b`.
    Select,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Inputs supplied by the render attachment rather than by uniforms.
pub enum Builtin {
    /// Seconds since the render attachment started.
    Time,
    /// Normalized surface coordinate in `[0, 1]^2`.
    Uv,
    /// Surface size in pixels.
    Resolution,
}

impl Builtin {
    /// Shape of the value this input produces.
    pub fn ty(self) -> ValueType {
        match self {
            Self::Time => ValueType::Float,
            Self::Uv | Self::Resolution => ValueType::Vec2,
        }
    }
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn length(v: &Value) -> f64 {
    v.lanes().iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn same_width(op: BinaryOp, a: &Value, b: &Value) -> WeaveResult<()> {
    if a.ty() != b.ty() {
        return Err(WeaveError::evaluation(format!(
            "type mismatch: {op:?} needs equal widths, got {:?} and {:?}",
            a.ty(),
            b.ty()
        )));
    }
    Ok(())
}

impl UnaryOp {
    pub(crate) fn apply(self, a: Value) -> WeaveResult<Value> {
        Ok(match self {
            Self::Neg => a.map(|x| -x),
            Self::Abs => a.map(f64::abs),
            Self::Sign => a.map(sign),
            Self::Floor => a.map(f64::floor),
            Self::Ceil => a.map(f64::ceil),
            Self::Fract => a.map(fract),
            Self::Sin => a.map(f64::sin),
            Self::Cos => a.map(f64::cos),
            Self::Tan => a.map(f64::tan),
            Self::Asin => a.map(f64::asin),
            Self::Acos => a.map(f64::acos),
            Self::Atan => a.map(f64::atan),
            Self::Exp => a.map(f64::exp),
            Self::Log => a.map(f64::ln),
            Self::Sqrt => a.map(f64::sqrt),
            Self::Length => Value::float(length(&a)),
            Self::Normalize => {
                let len = length(&a);
                a.map(|x| x / len)
            }
        })
    }
}

impl BinaryOp {
    pub(crate) fn apply(self, a: Value, b: Value) -> WeaveResult<Value> {
        match self {
            Self::Add => a.zip(b, |x, y| x + y),
            Self::Sub => a.zip(b, |x, y| x - y),
            Self::Mul => a.zip(b, |x, y| x * y),
            Self::Div => a.zip(b, |x, y| x / y),
            Self::Mod => a.zip(b, glsl_mod),
            Self::Min => a.zip(b, f64::min),
            Self::Max => a.zip(b, f64::max),
            Self::Pow => a.zip(b, f64::powf),
            Self::Step => a.zip(b, |edge, x| if x >= edge { 1.0 } else { 0.0 }),
            Self::LessThan => a.zip(b, |x, y| if x < y { 1.0 } else { 0.0 }),
            Self::GreaterThan => a.zip(b, |x, y| if x > y { 1.0 } else { 0.0 }),
            Self::Atan2 => a.zip(b, f64::atan2),
            Self::Dot => {
                same_width(self, &a, &b)?;
                Ok(Value::float(
                    a.lanes().iter().zip(b.lanes()).map(|(x, y)| x * y).sum(),
                ))
            }
            Self::Distance => {
                same_width(self, &a, &b)?;
                Ok(Value::float(length(&a.zip(b, |x, y| x - y)?)))
            }
            Self::Cross => {
                if a.ty() != ValueType::Vec3 || b.ty() != ValueType::Vec3 {
                    return Err(WeaveError::evaluation(format!(
                        "type mismatch: Cross needs two Vec3, got {:?} and {:?}",
                        a.ty(),
                        b.ty()
                    )));
                }
                let [ax, ay, az] = [a.lanes()[0], a.lanes()[1], a.lanes()[2]];
                let [bx, by, bz] = [b.lanes()[0], b.lanes()[1], b.lanes()[2]];
                Ok(Value::vec3(
                    ay * bz - az * by,
                    az * bx - ax * bz,
                    ax * by - ay * bx,
                ))
            }
        }
    }
}

impl TernaryOp {
    pub(crate) fn apply(self, a: Value, b: Value, c: Value) -> WeaveResult<Value> {
        match self {
            Self::Mix => Value::zip3(a, b, c, |x, y, t| x + (y - x) * t),
            Self::Clamp => Value::zip3(a, b, c, |x, lo, hi| x.max(lo).min(hi)),
            Self::Smoothstep => Value::zip3(a, b, c, smoothstep),
            Self::Select => Value::zip3(a, b, c, |cond, x, y| if cond != 0.0 { x } else { y }),
        }
    }
}

/// Map a swizzle character to a lane index. Unknown characters map past the last lane so
/// that evaluation reports them.
pub(crate) fn swizzle_lane(c: char) -> u8 {
    match c {
        'x' | 'r' | 's' => 0,
        'y' | 'g' | 't' => 1,
        'z' | 'b' | 'p' => 2,
        'w' | 'a' | 'q' => 3,
        _ => u8::MAX,
    }
}

pub(crate) fn apply_swizzle(v: Value, lanes: &[u8]) -> WeaveResult<Value> {
    let mut out = Vec::with_capacity(lanes.len());
    for &lane in lanes {
        let picked = v.get(usize::from(lane)).ok_or_else(|| {
            WeaveError::evaluation(format!(
                "invalid swizzle lane {lane} for {:?} value",
                v.ty()
            ))
        })?;
        out.push(picked);
    }
    Value::from_lanes(&out)
}

pub(crate) fn apply_construct(parts: &[Value]) -> WeaveResult<Value> {
    let lanes: Vec<f64> = parts.iter().flat_map(|p| p.lanes().iter().copied()).collect();
    Value::from_lanes(&lanes)
}

#[cfg(test)]
#[path = "../../tests/unit/expr/ops.rs"]
mod tests;
