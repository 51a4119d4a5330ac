use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animation::{FrameRequestId, FrameScheduler, FrameTime, Uniform};
use crate::expr::Expr;

#[derive(Default)]
struct Clock {
    running: bool,
    // host time of the last start, resume or rebase
    origin: f64,
    // elapsed accumulated before `origin`
    offset: f64,
    request: Option<FrameRequestId>,
}

struct TimeShared {
    scheduler: FrameScheduler,
    clock: RefCell<Clock>,
    elapsed: Uniform<f64>,
    speed: Uniform<f64>,
    scaled: Uniform<f64>,
}

impl TimeShared {
    fn publish(&self, elapsed: f64) {
        self.elapsed.set(elapsed);
        self.scaled.set(elapsed * self.speed.get());
    }

    fn cancel_request(&self) {
        let request = self.clock.borrow_mut().request.take();
        if let Some(id) = request {
            self.scheduler.cancel_frame(id);
        }
    }

    fn schedule(this: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(this);
        let id = this.scheduler.request_frame(move |time| {
            if let Some(shared) = weak.upgrade() {
                Self::tick(&shared, time);
            }
        });
        this.clock.borrow_mut().request = Some(id);
    }

    fn tick(this: &Rc<Self>, time: FrameTime) {
        let elapsed = {
            let mut clock = this.clock.borrow_mut();
            clock.request = None;
            if !clock.running {
                return;
            }
            (time.now - clock.origin) * this.speed.get() + clock.offset
        };
        this.publish(elapsed);
        Self::schedule(this);
    }
}

impl Drop for TimeShared {
    fn drop(&mut self) {
        if let Some(id) = self.clock.get_mut().request.take() {
            self.scheduler.cancel_frame(id);
        }
    }
}

#[derive(Clone)]
/// Controllable effect clock.
///
/// While running, each frame publishes `elapsed = (now - origin) * speed + offset`, where
/// `offset` is the elapsed time banked at the last pause, speed change or seek. Pausing
/// freezes `elapsed` and detaches from the scheduler.
pub struct TimeSource(Rc<TimeShared>);

impl TimeSource {
    pub fn new(scheduler: &FrameScheduler, speed: f64) -> Self {
        let speed = sanitize_speed(speed);
        Self(Rc::new(TimeShared {
            scheduler: scheduler.clone(),
            clock: RefCell::new(Clock::default()),
            elapsed: Uniform::new(scheduler, 0.0),
            speed: Uniform::new(scheduler, speed),
            scaled: Uniform::new(scheduler, 0.0),
        }))
    }

    /// Start ticking from the scheduler's current time. No-op while running.
    pub fn start(&self) {
        {
            let mut clock = self.0.clock.borrow_mut();
            if clock.running {
                return;
            }
            clock.running = true;
            clock.origin = self.0.scheduler.now();
        }
        TimeShared::schedule(&self.0);
    }

    pub fn pause(&self) {
        {
            let mut clock = self.0.clock.borrow_mut();
            if !clock.running {
                return;
            }
            clock.running = false;
            clock.offset = self.0.elapsed.get();
        }
        self.0.cancel_request();
    }

    /// Continue from the paused `elapsed` without a jump.
    pub fn resume(&self) {
        self.start();
    }

    /// Pause and rewind to zero.
    pub fn reset(&self) {
        self.pause();
        self.0.clock.borrow_mut().offset = 0.0;
        self.0.publish(0.0);
    }

    /// Change speed, keeping the current `elapsed` as the new starting point.
    pub fn set_speed(&self, speed: f64) {
        let speed = sanitize_speed(speed);
        self.rebase(self.elapsed());
        self.0.speed.set(speed);
        self.0.publish(self.elapsed());
    }

    /// Jump to `time` seconds.
    pub fn set_time(&self, time: f64) {
        let time = if time.is_finite() { time } else { 0.0 };
        self.rebase(time);
        self.0.publish(time);
    }

    fn rebase(&self, elapsed: f64) {
        let mut clock = self.0.clock.borrow_mut();
        clock.offset = elapsed;
        clock.origin = self.0.scheduler.now();
    }

    /// Stop the frame loop for good. Same as [`TimeSource::pause`] but named for teardown.
    pub fn stop(&self) {
        self.pause();
    }

    pub fn is_running(&self) -> bool {
        self.0.clock.borrow().running
    }

    pub fn elapsed(&self) -> f64 {
        self.0.elapsed.get()
    }

    pub fn speed(&self) -> f64 {
        self.0.speed.get()
    }

    pub fn scaled(&self) -> f64 {
        self.0.scaled.get()
    }

    pub fn elapsed_node(&self) -> Expr {
        self.0.elapsed.node()
    }

    pub fn speed_node(&self) -> Expr {
        self.0.speed.node()
    }

    /// `elapsed * speed`.
    pub fn scaled_node(&self) -> Expr {
        self.0.scaled.node()
    }
}

fn sanitize_speed(speed: f64) -> f64 {
    if speed.is_finite() {
        speed
    } else {
        tracing::debug!(speed, "non-finite time speed replaced with 1.0");
        1.0
    }
}

impl std::fmt::Debug for TimeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSource")
            .field("elapsed", &self.elapsed())
            .field("speed", &self.speed())
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/time.rs"]
mod tests;
