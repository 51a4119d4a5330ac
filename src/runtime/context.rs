use std::cell::{Cell, RefCell};

use crate::animation::{FrameScheduler, Uniform, UniformValue};
use crate::foundation::core::Color;
use crate::foundation::error::WeaveResult;
use crate::runtime::pointer::{DEFAULT_SMOOTHING, PointerOptions, PointerSource};
use crate::runtime::time::TimeSource;

pub const DEFAULT_ACCENT: &str = "#8b5cf6";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Construction options for [`RuntimeContext`].
pub struct RuntimeOptions {
    pub speed: f64,
    /// Accent color as `#hex` or `oklch(...)`.
    pub accent_color: String,
    pub dark_mode: bool,
    pub pointer_smoothing: f64,
    pub symmetric_pointer: bool,
    /// Start the clock and pointer loops immediately.
    pub auto_start: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            accent_color: DEFAULT_ACCENT.to_string(),
            dark_mode: true,
            pointer_smoothing: DEFAULT_SMOOTHING,
            symmetric_pointer: false,
            auto_start: true,
        }
    }
}

impl RuntimeOptions {
    pub fn from_json(json: &str) -> WeaveResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Long-lived state shared by every effect under one root: the clock, the pointer and the
/// global uniforms.
///
/// Tearing down (explicitly or on drop) stops both frame loops and cancels every tween on
/// uniforms the context owns.
pub struct RuntimeContext {
    scheduler: FrameScheduler,
    options: RuntimeOptions,
    time: TimeSource,
    pointer: PointerSource,
    accent: Uniform<Color>,
    transition: Uniform<f64>,
    dark_mode: Uniform<f64>,
    owned: RefCell<Vec<Box<dyn Fn()>>>,
    torn_down: Cell<bool>,
}

impl RuntimeContext {
    #[tracing::instrument(skip(scheduler))]
    pub fn new(scheduler: &FrameScheduler, options: RuntimeOptions) -> WeaveResult<Self> {
        let accent = Uniform::new(scheduler, Color::parse(&options.accent_color)?);
        let transition = Uniform::bounded(scheduler, 0.0, 0.0, 1.0);
        let dark_mode = Uniform::new(scheduler, if options.dark_mode { 1.0 } else { 0.0 });
        let time = TimeSource::new(scheduler, options.speed);
        let pointer = PointerSource::new(
            scheduler,
            PointerOptions {
                smoothing: options.pointer_smoothing,
                symmetric: options.symmetric_pointer,
            },
        );
        if options.auto_start {
            time.start();
            pointer.start();
        }
        let owned: Vec<Box<dyn Fn()>> = vec![
            Box::new(accent.stopper()),
            Box::new(transition.stopper()),
            Box::new(dark_mode.stopper()),
        ];
        tracing::debug!("runtime context created");
        Ok(Self {
            scheduler: scheduler.clone(),
            options,
            time,
            pointer,
            accent,
            transition,
            dark_mode,
            owned: RefCell::new(owned),
            torn_down: Cell::new(false),
        })
    }

    pub fn from_json(scheduler: &FrameScheduler, json: &str) -> WeaveResult<Self> {
        Self::new(scheduler, RuntimeOptions::from_json(json)?)
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    pub fn time(&self) -> &TimeSource {
        &self.time
    }

    pub fn pointer(&self) -> &PointerSource {
        &self.pointer
    }

    pub fn accent(&self) -> &Uniform<Color> {
        &self.accent
    }

    pub fn set_accent(&self, color: &str) -> WeaveResult<()> {
        self.accent.set(Color::parse(color)?);
        Ok(())
    }

    /// Page transition progress in `[0, 1]`.
    pub fn transition_progress(&self) -> &Uniform<f64> {
        &self.transition
    }

    /// 1.0 in dark mode, 0.0 otherwise.
    pub fn dark_mode(&self) -> &Uniform<f64> {
        &self.dark_mode
    }

    pub fn set_dark_mode(&self, dark: bool) {
        self.dark_mode.set(if dark { 1.0 } else { 0.0 });
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode.get() >= 0.5
    }

    /// A uniform whose tweens are cancelled when this context is torn down.
    pub fn uniform<T: UniformValue>(&self, initial: T) -> Uniform<T> {
        let u = Uniform::new(&self.scheduler, initial);
        self.owned.borrow_mut().push(Box::new(u.stopper()));
        u
    }

    /// Stop the frame loops and cancel owned tweens. Idempotent.
    pub fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }
        self.time.stop();
        self.pointer.stop();
        let owned = std::mem::take(&mut *self.owned.borrow_mut());
        for stop in &owned {
            stop();
        }
        tracing::debug!(owned = owned.len(), "runtime context torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.get()
    }
}

impl Drop for RuntimeContext {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("options", &self.options)
            .field("time", &self.time)
            .field("pointer", &self.pointer)
            .field("torn_down", &self.torn_down.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/context.rs"]
mod tests;
