use crate::foundation::error::{WeaveError, WeaveResult};
use crate::foundation::math::Fnv1a64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Static shape of a [`Value`].
pub enum ValueType {
    /// Scalar.
    Float,
    /// Two lanes.
    Vec2,
    /// Three lanes.
    Vec3,
    /// Four lanes.
    Vec4,
}

impl ValueType {
    /// Number of lanes.
    pub fn width(self) -> usize {
        match self {
            Self::Float => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }

    fn from_width(width: usize) -> Option<Self> {
        match width {
            1 => Some(Self::Float),
            2 => Some(Self::Vec2),
            3 => Some(Self::Vec3),
            4 => Some(Self::Vec4),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// A scalar or small vector of `f64` lanes, the runtime type of every expression.
pub struct Value {
    lanes: [f64; 4],
    ty: ValueType,
}

impl Value {
    /// Scalar value.
    pub const fn float(v: f64) -> Self {
        Self {
            lanes: [v, 0.0, 0.0, 0.0],
            ty: ValueType::Float,
        }
    }

    /// Two-lane value.
    pub const fn vec2(x: f64, y: f64) -> Self {
        Self {
            lanes: [x, y, 0.0, 0.0],
            ty: ValueType::Vec2,
        }
    }

    /// Three-lane value.
    pub const fn vec3(x: f64, y: f64, z: f64) -> Self {
        Self {
            lanes: [x, y, z, 0.0],
            ty: ValueType::Vec3,
        }
    }

    /// Four-lane value.
    pub const fn vec4(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self {
            lanes: [x, y, z, w],
            ty: ValueType::Vec4,
        }
    }

    /// Build from 1..=4 lanes.
    pub fn from_lanes(lanes: &[f64]) -> WeaveResult<Self> {
        let ty = ValueType::from_width(lanes.len()).ok_or_else(|| {
            WeaveError::evaluation(format!("cannot build a value with {} lanes", lanes.len()))
        })?;
        let mut out = [0.0; 4];
        out[..lanes.len()].copy_from_slice(lanes);
        Ok(Self { lanes: out, ty })
    }

    /// Static shape.
    pub fn ty(&self) -> ValueType {
        self.ty
    }

    /// Number of lanes.
    pub fn width(&self) -> usize {
        self.ty.width()
    }

    /// Active lanes.
    pub fn lanes(&self) -> &[f64] {
        &self.lanes[..self.width()]
    }

    /// Lane `i`, if present.
    pub fn get(&self, i: usize) -> Option<f64> {
        self.lanes().get(i).copied()
    }

    /// The scalar, if this is a scalar.
    pub fn as_f64(&self) -> Option<f64> {
        (self.ty == ValueType::Float).then_some(self.lanes[0])
    }

    /// True when every active lane is finite.
    pub fn is_finite(&self) -> bool {
        self.lanes().iter().all(|v| v.is_finite())
    }

    pub(crate) fn hash_into(&self, h: &mut Fnv1a64) {
        h.write_u8(self.width() as u8);
        for &lane in self.lanes() {
            h.write_f64(lane);
        }
    }

    /// Bitwise lane equality: `NaN == NaN` for identical payloads, `0.0 != -0.0`.
    pub(crate) fn bit_eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self
                .lanes()
                .iter()
                .zip(other.lanes())
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }

    pub(crate) fn map(self, f: impl Fn(f64) -> f64) -> Self {
        let mut lanes = self.lanes;
        for lane in &mut lanes[..self.width()] {
            *lane = f(*lane);
        }
        Self { lanes, ty: self.ty }
    }

    /// Component-wise combine with scalar broadcast.
    pub(crate) fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> WeaveResult<Self> {
        let ty = broadcast(&[self.ty, other.ty])?;
        let mut lanes = [0.0; 4];
        for (i, lane) in lanes.iter_mut().take(ty.width()).enumerate() {
            *lane = f(self.splat_lane(i), other.splat_lane(i));
        }
        Ok(Self { lanes, ty })
    }

    pub(crate) fn zip3(
        a: Self,
        b: Self,
        c: Self,
        f: impl Fn(f64, f64, f64) -> f64,
    ) -> WeaveResult<Self> {
        let ty = broadcast(&[a.ty, b.ty, c.ty])?;
        let mut lanes = [0.0; 4];
        for (i, lane) in lanes.iter_mut().take(ty.width()).enumerate() {
            *lane = f(a.splat_lane(i), b.splat_lane(i), c.splat_lane(i));
        }
        Ok(Self { lanes, ty })
    }

    fn splat_lane(&self, i: usize) -> f64 {
        if self.ty == ValueType::Float {
            self.lanes[0]
        } else {
            self.lanes[i]
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::float(v)
    }
}

fn broadcast(types: &[ValueType]) -> WeaveResult<ValueType> {
    let mut out = ValueType::Float;
    for &ty in types {
        if ty == ValueType::Float || ty == out {
            continue;
        }
        if out != ValueType::Float {
            return Err(WeaveError::evaluation(format!(
                "type mismatch: cannot combine {out:?} with {ty:?}"
            )));
        }
        out = ty;
    }
    Ok(out)
}
