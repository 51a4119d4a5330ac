use std::collections::BTreeMap;

use crate::animation::scheduler::FrameScheduler;
use crate::animation::uniform::Uniform;
use crate::expr::{Expr, Value};
use crate::foundation::core::{Color, Vec2, Vec3};
use crate::foundation::error::{WeaveError, WeaveResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// A uniform's declared type and value, as written in JSON.
///
/// Numbers declare floats, arrays of two or three numbers declare vectors and strings declare
/// colors (`#hex` or `oklch(...)`).
pub enum UniformDecl {
    Float(f64),
    Vec2([f64; 2]),
    Vec3([f64; 3]),
    Color(String),
}

impl From<f64> for UniformDecl {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<[f64; 2]> for UniformDecl {
    fn from(v: [f64; 2]) -> Self {
        Self::Vec2(v)
    }
}

impl From<[f64; 3]> for UniformDecl {
    fn from(v: [f64; 3]) -> Self {
        Self::Vec3(v)
    }
}

impl From<&str> for UniformDecl {
    fn from(v: &str) -> Self {
        Self::Color(v.to_owned())
    }
}

#[derive(Clone, Debug)]
/// Typed handle stored in a [`UniformSet`].
pub enum AnyUniform {
    Float(Uniform<f64>),
    Vec2(Uniform<Vec2>),
    Vec3(Uniform<Vec3>),
    Color(Uniform<Color>),
}

impl AnyUniform {
    fn create(scheduler: &FrameScheduler, decl: &UniformDecl) -> WeaveResult<Self> {
        Ok(match decl {
            UniformDecl::Float(v) => Self::Float(Uniform::new(scheduler, *v)),
            UniformDecl::Vec2([x, y]) => Self::Vec2(Uniform::new(scheduler, Vec2::new(*x, *y))),
            UniformDecl::Vec3([x, y, z]) => {
                Self::Vec3(Uniform::new(scheduler, Vec3::new(*x, *y, *z)))
            }
            UniformDecl::Color(s) => Self::Color(Uniform::new(scheduler, Color::parse(s)?)),
        })
    }

    pub fn node(&self) -> Expr {
        match self {
            Self::Float(u) => u.node(),
            Self::Vec2(u) => u.node(),
            Self::Vec3(u) => u.node(),
            Self::Color(u) => u.node(),
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Self::Float(u) => u.slot().get(),
            Self::Vec2(u) => u.slot().get(),
            Self::Vec3(u) => u.slot().get(),
            Self::Color(u) => u.slot().get(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Color(_) => "color",
        }
    }

    fn assign(&self, name: &str, decl: &UniformDecl) -> WeaveResult<()> {
        match (self, decl) {
            (Self::Float(u), UniformDecl::Float(v)) => u.set(*v),
            (Self::Vec2(u), UniformDecl::Vec2([x, y])) => u.set(Vec2::new(*x, *y)),
            (Self::Vec3(u), UniformDecl::Vec3([x, y, z])) => u.set(Vec3::new(*x, *y, *z)),
            (Self::Color(u), UniformDecl::Color(s)) => u.set(Color::parse(s)?),
            (Self::Color(u), UniformDecl::Vec3([r, g, b])) => u.set(Color::new(*r, *g, *b)),
            _ => {
                return Err(WeaveError::validation(format!(
                    "uniform '{name}' is a {}, got {decl:?}",
                    self.kind()
                )));
            }
        }
        Ok(())
    }
}

struct Entry {
    initial: UniformDecl,
    handle: AnyUniform,
}

/// Named uniforms declared up front, typically from a JSON object.
pub struct UniformSet {
    entries: BTreeMap<String, Entry>,
}

impl UniformSet {
    pub fn from_decls<I, K>(scheduler: &FrameScheduler, decls: I) -> WeaveResult<Self>
    where
        I: IntoIterator<Item = (K, UniformDecl)>,
        K: Into<String>,
    {
        let mut entries = BTreeMap::new();
        for (name, decl) in decls {
            let name = name.into();
            let handle = AnyUniform::create(scheduler, &decl)
                .map_err(|e| WeaveError::validation(format!("uniform '{name}': {e}")))?;
            entries.insert(
                name,
                Entry {
                    initial: decl,
                    handle,
                },
            );
        }
        Ok(Self { entries })
    }

    /// Parse a JSON object mapping names to declarations.
    pub fn from_json(scheduler: &FrameScheduler, json: &str) -> WeaveResult<Self> {
        let decls: BTreeMap<String, UniformDecl> = serde_json::from_str(json)?;
        Self::from_decls(scheduler, decls)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&AnyUniform> {
        self.entries.get(name).map(|e| &e.handle)
    }

    pub fn node(&self, name: &str) -> WeaveResult<Expr> {
        Ok(self.entry(name)?.handle.node())
    }

    /// Write a new value. The declaration must match the uniform's type; colors also accept
    /// a linear `[r, g, b]` triple.
    pub fn set(&self, name: &str, value: impl Into<UniformDecl>) -> WeaveResult<()> {
        self.entry(name)?.handle.assign(name, &value.into())
    }

    /// Restore every uniform to its declared value, cancelling running tweens.
    pub fn reset(&self) {
        for (name, entry) in &self.entries {
            if let Err(err) = entry.handle.assign(name, &entry.initial) {
                // declarations were validated at construction
                tracing::warn!(%name, %err, "uniform reset failed");
            }
        }
    }

    fn entry(&self, name: &str) -> WeaveResult<&Entry> {
        self.entries
            .get(name)
            .ok_or_else(|| WeaveError::validation(format!("unknown uniform '{name}'")))
    }
}

impl std::fmt::Debug for UniformSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, e)| (k, &e.handle)))
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/uniform_set.rs"]
mod tests;
