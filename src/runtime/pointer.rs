use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animation::{FrameRequestId, FrameScheduler, Uniform};
use crate::expr::{Expr, vec2};
use crate::foundation::core::Vec2;

pub(crate) const DEFAULT_SMOOTHING: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Parameters for [`PointerSource`].
pub struct PointerOptions {
    /// Fraction of the remaining distance covered per frame. `1` snaps, `0` freezes.
    pub smoothing: f64,
    /// Report positions in `[-1, 1]` instead of `[0, 1]`.
    pub symmetric: bool,
}

impl Default for PointerOptions {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            symmetric: false,
        }
    }
}

struct PointerState {
    target: Vec2,
    current: Vec2,
    running: bool,
    request: Option<FrameRequestId>,
}

struct PointerShared {
    scheduler: FrameScheduler,
    state: RefCell<PointerState>,
    smoothing: f64,
    symmetric: bool,
    x: Uniform<f64>,
    y: Uniform<f64>,
    xy: Expr,
}

impl PointerShared {
    fn publish(&self, p: Vec2) {
        self.x.set(p.x);
        self.y.set(p.y);
    }

    fn advance(&self) {
        let next = {
            let mut state = self.state.borrow_mut();
            let next = state.current + (state.target - state.current) * self.smoothing;
            state.current = next;
            next
        };
        self.publish(next);
    }

    fn schedule(this: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(this);
        let id = this.scheduler.request_frame(move |_| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let running = {
                let mut state = shared.state.borrow_mut();
                state.request = None;
                state.running
            };
            if running {
                shared.advance();
                Self::schedule(&shared);
            }
        });
        this.state.borrow_mut().request = Some(id);
    }
}

impl Drop for PointerShared {
    fn drop(&mut self) {
        if let Some(id) = self.state.get_mut().request.take() {
            self.scheduler.cancel_frame(id);
        }
    }
}

#[derive(Clone)]
/// Smoothed pointer position in surface coordinates, `y = 0` at the bottom.
pub struct PointerSource(Rc<PointerShared>);

impl PointerSource {
    pub fn new(scheduler: &FrameScheduler, options: PointerOptions) -> Self {
        let smoothing = if options.smoothing.is_finite() {
            options.smoothing.clamp(0.0, 1.0)
        } else {
            DEFAULT_SMOOTHING
        };
        if smoothing != options.smoothing {
            tracing::debug!(
                requested = options.smoothing,
                smoothing,
                "pointer smoothing clamped"
            );
        }
        let center = if options.symmetric { 0.0 } else { 0.5 };
        let x = Uniform::new(scheduler, center);
        let y = Uniform::new(scheduler, center);
        let xy = vec2(x.node(), y.node());
        Self(Rc::new(PointerShared {
            scheduler: scheduler.clone(),
            state: RefCell::new(PointerState {
                target: Vec2::new(center, center),
                current: Vec2::new(center, center),
                running: false,
                request: None,
            }),
            smoothing,
            symmetric: options.symmetric,
            x,
            y,
            xy,
        }))
    }

    /// Map a client-space pointer position to the normalized target.
    ///
    /// The vertical axis is flipped. A zero-sized viewport axis reads as centered.
    pub fn normalize(&self, client: Vec2, viewport: Vec2) -> Vec2 {
        let axis = |v: f64, size: f64| if size > 0.0 { v / size } else { 0.5 };
        let raw = Vec2::new(axis(client.x, viewport.x), 1.0 - axis(client.y, viewport.y));
        if self.0.symmetric {
            raw * 2.0 - Vec2::new(1.0, 1.0)
        } else {
            raw
        }
    }

    /// Record a pointer move. The smoothed value catches up over the following frames.
    pub fn pointer_moved(&self, client: Vec2, viewport: Vec2) {
        let target = self.normalize(client, viewport);
        self.0.state.borrow_mut().target = target;
    }

    /// Place the pointer immediately, bypassing smoothing.
    pub fn set_position(&self, position: Vec2) {
        {
            let mut state = self.0.state.borrow_mut();
            state.target = position;
            state.current = position;
        }
        self.0.publish(position);
    }

    /// One smoothing step, as run every frame while started.
    pub fn advance(&self) {
        self.0.advance();
    }

    pub fn start(&self) {
        {
            let mut state = self.0.state.borrow_mut();
            if state.running {
                return;
            }
            state.running = true;
        }
        PointerShared::schedule(&self.0);
    }

    pub fn stop(&self) {
        let request = {
            let mut state = self.0.state.borrow_mut();
            state.running = false;
            state.request.take()
        };
        if let Some(id) = request {
            self.0.scheduler.cancel_frame(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.0.state.borrow().running
    }

    pub fn smoothing(&self) -> f64 {
        self.0.smoothing
    }

    /// Latest normalized target, unsmoothed.
    pub fn target(&self) -> Vec2 {
        self.0.state.borrow().target
    }

    /// Smoothed position.
    pub fn position(&self) -> Vec2 {
        self.0.state.borrow().current
    }

    pub fn x_node(&self) -> Expr {
        self.0.x.node()
    }

    pub fn y_node(&self) -> Expr {
        self.0.y.node()
    }

    pub fn xy_node(&self) -> Expr {
        self.0.xy.clone()
    }
}

impl std::fmt::Debug for PointerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSource")
            .field("position", &self.position())
            .field("target", &self.target())
            .field("smoothing", &self.0.smoothing)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/pointer.rs"]
mod tests;
