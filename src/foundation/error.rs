/// Convenience result type used throughout the crate.
pub type WeaveResult<T> = Result<T, WeaveError>;

#[derive(thiserror::Error, Debug)]
/// Error taxonomy for expression evaluation, host-side parsing and runtime lookup.
pub enum WeaveError {
    /// Invalid host input (malformed hex color, OKLCH string, out-of-range option).
    #[error("validation error: {0}")]
    Validation(String),

    /// A descendant asked for a runtime or graph that no ancestor provided.
    #[error("scope error: {0}")]
    Scope(String),

    /// The reference evaluator hit an ill-typed expression.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Tween or scheduler misuse.
    #[error("animation error: {0}")]
    Animation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error bubbled up from a collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WeaveError {
    /// Build a [`WeaveError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WeaveError::Scope`].
    pub fn scope(msg: impl Into<String>) -> Self {
        Self::Scope(msg.into())
    }

    /// Build a [`WeaveError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`WeaveError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`WeaveError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for WeaveError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
