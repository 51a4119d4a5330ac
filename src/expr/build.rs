//! Builders and operator overloads for [`Expr`].
//!
//! Anything convertible into an [`Expr`] (numbers, arrays, host vectors, colors, other
//! expressions) can be passed to the free functions here, so procedural code reads close to
//! shading-language source:
//!
//! ```
//! use shaderweave::expr::{float, mix, uv, vec3};
//!
//! let p = uv() * 4.0;
//! let shade = mix(vec3(0.1, 0.1, 0.2), vec3(1.0, 0.8, 0.6), p.x().fract());
//! assert_eq!(shade, shade.clone());
//! # let _ = float(1.0);
//! ```

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::expr::node::Expr;
use crate::expr::ops::{BinaryOp, Builtin, TernaryOp, UnaryOp};
use crate::expr::value::Value;
use crate::foundation::core::{Color, Vec2, Vec3};

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::constant(v)
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::constant(v)
    }
}

impl From<[f64; 2]> for Expr {
    fn from([x, y]: [f64; 2]) -> Self {
        Expr::constant(Value::vec2(x, y))
    }
}

impl From<[f64; 3]> for Expr {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Expr::constant(Value::vec3(x, y, z))
    }
}

impl From<[f64; 4]> for Expr {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Expr::constant(Value::vec4(x, y, z, w))
    }
}

impl From<Vec2> for Expr {
    fn from(v: Vec2) -> Self {
        Expr::constant(Value::vec2(v.x, v.y))
    }
}

impl From<Vec3> for Expr {
    fn from(v: Vec3) -> Self {
        Expr::constant(Value::vec3(v.x, v.y, v.z))
    }
}

impl From<Color> for Expr {
    fn from(c: Color) -> Self {
        Expr::constant(Value::vec3(c.r, c.g, c.b))
    }
}

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<R: Into<Expr>> $trait<R> for Expr {
            type Output = Expr;
            fn $method(self, rhs: R) -> Expr {
                Expr::binary($op, self, rhs.into())
            }
        }

        impl<R: Into<Expr>> $trait<R> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: R) -> Expr {
                Expr::binary($op, self.clone(), rhs.into())
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, Expr::constant(self), rhs)
            }
        }

        impl $trait<&Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, Expr::constant(self), rhs.clone())
            }
        }
    };
}

impl_binary_operator!(Add, add, BinaryOp::Add);
impl_binary_operator!(Sub, sub, BinaryOp::Sub);
impl_binary_operator!(Mul, mul, BinaryOp::Mul);
impl_binary_operator!(Div, div, BinaryOp::Div);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::unary(UnaryOp::Neg, self)
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::unary(UnaryOp::Neg, self.clone())
    }
}

/// Scalar literal.
pub fn float(v: f64) -> Expr {
    Expr::constant(v)
}

/// Two-lane vector from scalar parts.
pub fn vec2(x: impl Into<Expr>, y: impl Into<Expr>) -> Expr {
    Expr::construct([x.into(), y.into()])
}

/// Three-lane vector; parts may themselves be vectors as long as the lanes add up.
pub fn vec3(x: impl Into<Expr>, y: impl Into<Expr>, z: impl Into<Expr>) -> Expr {
    Expr::construct([x.into(), y.into(), z.into()])
}

/// Four-lane vector.
pub fn vec4(
    x: impl Into<Expr>,
    y: impl Into<Expr>,
    z: impl Into<Expr>,
    w: impl Into<Expr>,
) -> Expr {
    Expr::construct([x.into(), y.into(), z.into(), w.into()])
}

/// `v` repeated in three lanes.
pub fn splat3(v: impl Into<Expr>) -> Expr {
    let v = v.into();
    Expr::construct([v.clone(), v.clone(), v])
}

/// `v` repeated in four lanes.
pub fn splat4(v: impl Into<Expr>) -> Expr {
    let v = v.into();
    Expr::construct([v.clone(), v.clone(), v.clone(), v])
}

/// Elapsed-time input.
pub fn time() -> Expr {
    Expr::input(Builtin::Time)
}

/// Surface-coordinate input.
pub fn uv() -> Expr {
    Expr::input(Builtin::Uv)
}

/// Surface-size input.
pub fn resolution() -> Expr {
    Expr::input(Builtin::Resolution)
}

/// `a + (b - a) * t`
pub fn mix(a: impl Into<Expr>, b: impl Into<Expr>, t: impl Into<Expr>) -> Expr {
    Expr::ternary(TernaryOp::Mix, a.into(), b.into(), t.into())
}

/// Clamp `x` to `[lo, hi]`.
pub fn clamp(x: impl Into<Expr>, lo: impl Into<Expr>, hi: impl Into<Expr>) -> Expr {
    Expr::ternary(TernaryOp::Clamp, x.into(), lo.into(), hi.into())
}

/// Hermite step from `e0` to `e1`.
pub fn smoothstep(e0: impl Into<Expr>, e1: impl Into<Expr>, x: impl Into<Expr>) -> Expr {
    Expr::ternary(TernaryOp::Smoothstep, e0.into(), e1.into(), x.into())
}

/// Component-wise `cond != 0 ? a : b`.
pub fn select(cond: impl Into<Expr>, a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::ternary(TernaryOp::Select, cond.into(), a.into(), b.into())
}

/// `1` where `x >= edge`.
pub fn step(edge: impl Into<Expr>, x: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Step, edge.into(), x.into())
}

/// `1` where `a < b`.
pub fn less_than(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::LessThan, a.into(), b.into())
}

/// `1` where `a > b`.
pub fn greater_than(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::GreaterThan, a.into(), b.into())
}

/// Component-wise minimum.
pub fn min(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Min, a.into(), b.into())
}

/// Component-wise maximum.
pub fn max(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Max, a.into(), b.into())
}

/// `a` raised to `b`.
pub fn pow(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Pow, a.into(), b.into())
}

/// Shading-language modulo.
pub fn modulo(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Mod, a.into(), b.into())
}

/// Dot product.
pub fn dot(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Dot, a.into(), b.into())
}

/// Cross product of two vec3.
pub fn cross(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Cross, a.into(), b.into())
}

/// Euclidean distance.
pub fn distance(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Distance, a.into(), b.into())
}

/// Four-quadrant arc tangent, `y` first.
pub fn atan2(y: impl Into<Expr>, x: impl Into<Expr>) -> Expr {
    Expr::binary(BinaryOp::Atan2, y.into(), x.into())
}

impl Expr {
    fn un(&self, op: UnaryOp) -> Expr {
        Expr::unary(op, self.clone())
    }

    /// `|self|`
    pub fn abs(&self) -> Expr {
        self.un(UnaryOp::Abs)
    }

    /// Sign, with `sign(0) == 0`.
    pub fn sign(&self) -> Expr {
        self.un(UnaryOp::Sign)
    }

    /// Floor.
    pub fn floor(&self) -> Expr {
        self.un(UnaryOp::Floor)
    }

    /// Ceiling.
    pub fn ceil(&self) -> Expr {
        self.un(UnaryOp::Ceil)
    }

    /// Fractional part.
    pub fn fract(&self) -> Expr {
        self.un(UnaryOp::Fract)
    }

    /// Sine.
    pub fn sin(&self) -> Expr {
        self.un(UnaryOp::Sin)
    }

    /// Cosine.
    pub fn cos(&self) -> Expr {
        self.un(UnaryOp::Cos)
    }

    /// Tangent.
    pub fn tan(&self) -> Expr {
        self.un(UnaryOp::Tan)
    }

    /// Arc sine.
    pub fn asin(&self) -> Expr {
        self.un(UnaryOp::Asin)
    }

    /// Arc cosine.
    pub fn acos(&self) -> Expr {
        self.un(UnaryOp::Acos)
    }

    /// Arc tangent.
    pub fn atan(&self) -> Expr {
        self.un(UnaryOp::Atan)
    }

    /// Natural exponent.
    pub fn exp(&self) -> Expr {
        self.un(UnaryOp::Exp)
    }

    /// Natural log.
    pub fn log(&self) -> Expr {
        self.un(UnaryOp::Log)
    }

    /// Square root.
    pub fn sqrt(&self) -> Expr {
        self.un(UnaryOp::Sqrt)
    }

    /// Euclidean length.
    pub fn length(&self) -> Expr {
        self.un(UnaryOp::Length)
    }

    /// Unit vector. Undefined for zero-length input; see
    /// [`crate::library::math::safe_normalize`].
    pub fn normalize(&self) -> Expr {
        self.un(UnaryOp::Normalize)
    }

    /// `1 - self`
    pub fn one_minus(&self) -> Expr {
        1.0 - self
    }

    /// Clamp to `[0, 1]`.
    pub fn saturate(&self) -> Expr {
        clamp(self, 0.0, 1.0)
    }

    /// `self * self`
    pub fn square(&self) -> Expr {
        self * self
    }

    /// Clamp to `[lo, hi]`.
    pub fn clamp(&self, lo: impl Into<Expr>, hi: impl Into<Expr>) -> Expr {
        clamp(self, lo, hi)
    }

    /// Component-wise minimum.
    pub fn min(&self, other: impl Into<Expr>) -> Expr {
        min(self, other)
    }

    /// Component-wise maximum.
    pub fn max(&self, other: impl Into<Expr>) -> Expr {
        max(self, other)
    }

    /// `self` raised to `e`.
    pub fn pow(&self, e: impl Into<Expr>) -> Expr {
        pow(self, e)
    }

    /// Shading-language modulo.
    pub fn modulo(&self, m: impl Into<Expr>) -> Expr {
        modulo(self, m)
    }

    /// Dot product.
    pub fn dot(&self, other: impl Into<Expr>) -> Expr {
        dot(self, other)
    }

    /// Append the lanes of `tail`, e.g. `uv().extend(z)` for a vec3.
    pub fn extend(&self, tail: impl Into<Expr>) -> Expr {
        Expr::construct([self.clone(), tail.into()])
    }

    /// First lane.
    pub fn x(&self) -> Expr {
        self.swizzle("x")
    }

    /// Second lane.
    pub fn y(&self) -> Expr {
        self.swizzle("y")
    }

    /// Third lane.
    pub fn z(&self) -> Expr {
        self.swizzle("z")
    }

    /// Fourth lane.
    pub fn w(&self) -> Expr {
        self.swizzle("w")
    }

    /// First two lanes.
    pub fn xy(&self) -> Expr {
        self.swizzle("xy")
    }

    /// First three lanes.
    pub fn xyz(&self) -> Expr {
        self.swizzle("xyz")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expr/build.rs"]
mod tests;
