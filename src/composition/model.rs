use crate::expr::{Expr, mix};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a layer combines with everything below it.
pub enum BlendMode {
    /// The layer replaces what is below.
    #[default]
    Normal,
    /// Alias of [`BlendMode::Normal`].
    Mix,
    Add,
    Multiply,
    /// `a + b - ab`.
    Screen,
    /// Cheap overlay: `mix(2ab, 2(a + b - ab) - 1, a)`.
    Overlay,
}

impl BlendMode {
    /// Combine `layer` over `base`, ignoring opacity.
    pub fn apply(self, base: &Expr, layer: &Expr) -> Expr {
        match self {
            Self::Normal | Self::Mix => layer.clone(),
            Self::Add => base + layer,
            Self::Multiply => base * layer,
            Self::Screen => base + layer - base * layer,
            Self::Overlay => {
                let multiply = base * layer * 2.0;
                let screen = (base + layer - base * layer) * 2.0 - 1.0;
                mix(multiply, screen, base)
            }
        }
    }

    /// Blend, then fade the result in over `base` by `opacity`. Full opacity skips the fade.
    pub fn composite(self, base: &Expr, layer: &Expr, opacity: f64) -> Expr {
        let blended = self.apply(base, layer);
        if opacity < 1.0 {
            mix(base, blended, opacity)
        } else {
            blended
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Placement of one layer in a [`crate::composition::CompositionGraph`].
pub struct LayerOptions {
    /// Lower orders sit below higher ones. Ties keep registration order.
    pub order: i32,
    pub blend: BlendMode,
    /// Clamped to `[0, 1]` on registration.
    pub opacity: f64,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            order: 0,
            blend: BlendMode::Normal,
            opacity: 1.0,
        }
    }
}

impl LayerOptions {
    pub fn at(order: i32) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn blend(self, blend: BlendMode) -> Self {
        Self { blend, ..self }
    }

    pub fn opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    pub(crate) fn sanitized(self) -> Self {
        let opacity = if self.opacity.is_nan() {
            1.0
        } else {
            self.opacity.clamp(0.0, 1.0)
        };
        if opacity != self.opacity {
            tracing::debug!(requested = self.opacity, opacity, "layer opacity clamped");
        }
        Self { opacity, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
