//! Shared runtime state: the effect clock, the pointer, global uniforms and scope lookup.

pub(crate) mod context;
pub(crate) mod pointer;
pub(crate) mod scope;
pub(crate) mod time;

pub use context::{DEFAULT_ACCENT, RuntimeContext, RuntimeOptions};
pub use pointer::{PointerOptions, PointerSource};
pub use scope::RuntimeScope;
pub use time::TimeSource;
