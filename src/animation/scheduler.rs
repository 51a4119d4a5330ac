use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle returned by [`FrameScheduler::request_frame`].
pub struct FrameRequestId(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
/// Timestamp handed to frame callbacks.
pub struct FrameTime {
    /// Host clock in seconds.
    pub now: f64,
    /// Frames run so far, starting at 1 for the first frame.
    pub frame: u64,
}

type FrameCallback = Box<dyn FnOnce(FrameTime)>;
type Deferred = Box<dyn FnOnce()>;

#[derive(Default)]
struct SchedulerState {
    next_id: u64,
    pending: Vec<(FrameRequestId, FrameCallback)>,
    // ids of the batch currently running that have not been called yet
    in_flight: HashSet<FrameRequestId>,
    deferred: VecDeque<Deferred>,
    now: f64,
    frame: u64,
    running: bool,
}

#[derive(Clone, Default)]
/// Single-threaded frame loop shared by tweens and runtime sources.
///
/// The host drives it by calling [`FrameScheduler::run_frame`] once per display frame.
/// Callbacks requested while a frame is running are queued for the next frame. Deferred
/// tasks run after every callback of the frame has returned.
pub struct FrameScheduler(Rc<RefCell<SchedulerState>>);

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` for the next frame.
    pub fn request_frame(&self, callback: impl FnOnce(FrameTime) + 'static) -> FrameRequestId {
        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        let id = FrameRequestId(state.next_id);
        state.pending.push((id, Box::new(callback)));
        id
    }

    /// Drop a queued callback. Returns `false` if it already ran or was never queued.
    pub fn cancel_frame(&self, id: FrameRequestId) -> bool {
        let mut state = self.0.borrow_mut();
        if let Some(pos) = state.pending.iter().position(|(pid, _)| *pid == id) {
            let removed = state.pending.remove(pos);
            drop(state);
            drop(removed);
            return true;
        }
        state.in_flight.remove(&id)
    }

    /// Run every callback queued before this call, then flush deferred tasks.
    ///
    /// Returns the number of callbacks invoked. A nested call from inside a callback is ignored.
    pub fn run_frame(&self, now: f64) -> usize {
        let (batch, time) = {
            let mut state = self.0.borrow_mut();
            if state.running {
                tracing::warn!("run_frame called re-entrantly; ignoring");
                return 0;
            }
            state.running = true;
            state.now = now;
            state.frame += 1;
            let batch = std::mem::take(&mut state.pending);
            state.in_flight = batch.iter().map(|(id, _)| *id).collect();
            let time = FrameTime {
                now,
                frame: state.frame,
            };
            (batch, time)
        };

        let mut invoked = 0;
        for (id, callback) in batch {
            // a callback earlier in this batch may have cancelled this one
            let live = self.0.borrow_mut().in_flight.remove(&id);
            if live {
                callback(time);
                invoked += 1;
            }
        }

        {
            let mut state = self.0.borrow_mut();
            state.in_flight.clear();
            state.running = false;
        }
        let flushed = self.flush_deferred();
        tracing::trace!(frame = time.frame, now, invoked, flushed, "frame");
        invoked
    }

    /// Host clock of the most recent frame, in seconds.
    pub fn now(&self) -> f64 {
        self.0.borrow().now
    }

    /// Number of frames run so far.
    pub fn frame(&self) -> u64 {
        self.0.borrow().frame
    }

    pub fn pending_frames(&self) -> usize {
        self.0.borrow().pending.len()
    }

    /// Queue a task for the end of the current frame (or the next flush).
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.0.borrow_mut().deferred.push_back(Box::new(task));
    }

    /// Run deferred tasks until the queue is empty, including tasks they defer.
    pub fn flush_deferred(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.0.borrow_mut().deferred.pop_front();
            let Some(task) = next else {
                break;
            };
            task();
            ran += 1;
        }
        ran
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("FrameScheduler")
            .field("now", &state.now)
            .field("frame", &state.frame)
            .field("pending", &state.pending.len())
            .field("deferred", &state.deferred.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
