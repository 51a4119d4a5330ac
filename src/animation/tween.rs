use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::animation::scheduler::{FrameRequestId, FrameScheduler, FrameTime};
use crate::animation::value::UniformValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// How a tween ended.
pub enum TweenOutcome {
    /// Reached its target and wrote it exactly.
    Completed,
    /// Cancelled, superseded by another write, or its uniform was dropped.
    Cancelled,
}

type Listener = Box<dyn FnOnce(TweenOutcome)>;

#[derive(Default)]
struct TweenState {
    outcome: Option<TweenOutcome>,
    request: Option<FrameRequestId>,
    listeners: Vec<Listener>,
}

#[derive(Clone)]
/// Completion signal for a running tween.
///
/// Resolves exactly once. Listeners run as deferred tasks on the scheduler, after the frame
/// that settled the tween.
pub struct TweenHandle {
    state: Rc<RefCell<TweenState>>,
    scheduler: FrameScheduler,
}

impl TweenHandle {
    fn new(scheduler: &FrameScheduler) -> Self {
        Self {
            state: Rc::new(RefCell::new(TweenState::default())),
            scheduler: scheduler.clone(),
        }
    }

    /// Stop ticking and resolve as [`TweenOutcome::Cancelled`]. No-op once settled.
    pub fn cancel(&self) {
        let request = self.state.borrow_mut().request.take();
        if let Some(id) = request {
            self.scheduler.cancel_frame(id);
        }
        self.resolve(TweenOutcome::Cancelled);
    }

    pub fn is_finished(&self) -> bool {
        self.state.borrow().outcome.is_some()
    }

    pub fn outcome(&self) -> Option<TweenOutcome> {
        self.state.borrow().outcome
    }

    /// Run `listener` once the tween settles. Registered after settling, it still runs (deferred).
    pub fn on_complete(&self, listener: impl FnOnce(TweenOutcome) + 'static) {
        let settled = self.state.borrow().outcome;
        match settled {
            Some(outcome) => self.scheduler.defer(move || listener(outcome)),
            None => self.state.borrow_mut().listeners.push(Box::new(listener)),
        }
    }

    fn resolve(&self, outcome: TweenOutcome) {
        let listeners = {
            let mut state = self.state.borrow_mut();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(outcome);
            state.request = None;
            std::mem::take(&mut state.listeners)
        };
        tracing::debug!(?outcome, "tween settled");
        for listener in listeners {
            self.scheduler.defer(move || listener(outcome));
        }
    }
}

impl std::fmt::Debug for TweenHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenHandle")
            .field("outcome", &self.outcome())
            .finish()
    }
}

/// Writes one tween sample. Returning `false` means the target is gone.
pub(crate) type TweenWrite<T> = Box<dyn Fn(T) -> bool>;

struct TweenRun<T: UniformValue> {
    handle: TweenHandle,
    from: T,
    to: T,
    duration: f64,
    ease: Ease,
    start: Cell<Option<f64>>,
    write: TweenWrite<T>,
}

/// Start ticking from `from` to `to` on the scheduler's next frame.
///
/// The first tick captures the start time, so a tween started between frames begins at `from`.
pub(crate) fn start<T: UniformValue>(
    scheduler: &FrameScheduler,
    from: T,
    to: T,
    duration: f64,
    ease: Ease,
    write: TweenWrite<T>,
) -> TweenHandle {
    let handle = TweenHandle::new(scheduler);
    let run = Rc::new(TweenRun {
        handle: handle.clone(),
        from,
        to,
        duration,
        ease,
        start: Cell::new(None),
        write,
    });
    tracing::debug!(?from, ?to, duration, ?ease, "tween started");
    schedule_tick(run);
    handle
}

fn schedule_tick<T: UniformValue>(run: Rc<TweenRun<T>>) {
    let next = Rc::clone(&run);
    let id = run
        .handle
        .scheduler
        .request_frame(move |time| tick(next, time));
    run.handle.state.borrow_mut().request = Some(id);
}

fn tick<T: UniformValue>(run: Rc<TweenRun<T>>, time: FrameTime) {
    if run.handle.is_finished() {
        return;
    }
    run.handle.state.borrow_mut().request = None;

    let start = match run.start.get() {
        Some(s) => s,
        None => {
            run.start.set(Some(time.now));
            time.now
        }
    };
    let raw = if run.duration > 0.0 {
        ((time.now - start) / run.duration).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let value = if raw >= 1.0 {
        run.to
    } else {
        T::lerp(&run.from, &run.to, run.ease.apply(raw))
    };

    if !(run.write)(value) {
        run.handle.resolve(TweenOutcome::Cancelled);
        return;
    }
    if raw >= 1.0 {
        run.handle.resolve(TweenOutcome::Completed);
    } else {
        schedule_tick(run);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
