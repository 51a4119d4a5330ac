use std::fmt;

use crate::expr::{Value, ValueType};
use crate::foundation::core::{Color, Vec2, Vec3};
use crate::foundation::math;

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        math::lerp(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(f64::lerp(&a.x, &b.x, t), f64::lerp(&a.y, &b.y, t))
    }
}

impl Lerp for Vec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec3::new(
            f64::lerp(&a.x, &b.x, t),
            f64::lerp(&a.y, &b.y, t),
            f64::lerp(&a.z, &b.z, t),
        )
    }
}

impl Lerp for Color {
    // Channels are linear light, so this is a physically linear blend.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Color::new(
            f64::lerp(&a.r, &b.r, t),
            f64::lerp(&a.g, &b.g, t),
            f64::lerp(&a.b, &b.b, t),
        )
    }
}

/// Host type that can back a uniform slot.
pub trait UniformValue: Lerp + Copy + fmt::Debug + 'static {
    const TYPE: ValueType;

    fn to_value(self) -> Value;

    /// Read back from a slot value. Missing lanes read as zero.
    fn from_value(value: &Value) -> Self;

    /// Componentwise clamp into `[lo, hi]`.
    fn clamp_between(self, lo: Self, hi: Self) -> Self;
}

fn lane(value: &Value, i: usize) -> f64 {
    value.get(i).unwrap_or(0.0)
}

fn clamp_lane(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

impl UniformValue for f64 {
    const TYPE: ValueType = ValueType::Float;

    fn to_value(self) -> Value {
        Value::float(self)
    }

    fn from_value(value: &Value) -> Self {
        lane(value, 0)
    }

    fn clamp_between(self, lo: Self, hi: Self) -> Self {
        clamp_lane(self, lo, hi)
    }
}

impl UniformValue for Vec2 {
    const TYPE: ValueType = ValueType::Vec2;

    fn to_value(self) -> Value {
        Value::vec2(self.x, self.y)
    }

    fn from_value(value: &Value) -> Self {
        Vec2::new(lane(value, 0), lane(value, 1))
    }

    fn clamp_between(self, lo: Self, hi: Self) -> Self {
        Vec2::new(clamp_lane(self.x, lo.x, hi.x), clamp_lane(self.y, lo.y, hi.y))
    }
}

impl UniformValue for Vec3 {
    const TYPE: ValueType = ValueType::Vec3;

    fn to_value(self) -> Value {
        Value::vec3(self.x, self.y, self.z)
    }

    fn from_value(value: &Value) -> Self {
        Vec3::new(lane(value, 0), lane(value, 1), lane(value, 2))
    }

    fn clamp_between(self, lo: Self, hi: Self) -> Self {
        Vec3::new(
            clamp_lane(self.x, lo.x, hi.x),
            clamp_lane(self.y, lo.y, hi.y),
            clamp_lane(self.z, lo.z, hi.z),
        )
    }
}

impl UniformValue for Color {
    const TYPE: ValueType = ValueType::Vec3;

    fn to_value(self) -> Value {
        Value::vec3(self.r, self.g, self.b)
    }

    fn from_value(value: &Value) -> Self {
        Color::new(lane(value, 0), lane(value, 1), lane(value, 2))
    }

    fn clamp_between(self, lo: Self, hi: Self) -> Self {
        Color::new(
            clamp_lane(self.r, lo.r, hi.r),
            clamp_lane(self.g, lo.g, hi.g),
            clamp_lane(self.b, lo.b, hi.b),
        )
    }
}
