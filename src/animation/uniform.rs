use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animation::ease::Ease;
use crate::animation::scheduler::FrameScheduler;
use crate::animation::tween::{self, TweenHandle};
use crate::animation::value::UniformValue;
use crate::expr::{Expr, UniformSlot};
use crate::foundation::core::{Color, parse_oklch};
use crate::foundation::error::WeaveResult;

struct Shared<T: UniformValue> {
    slot: UniformSlot,
    node: Expr,
    bounds: Option<(T, T)>,
    active: RefCell<Option<TweenHandle>>,
    scheduler: FrameScheduler,
}

impl<T: UniformValue> Shared<T> {
    fn write(&self, value: T) {
        let value = match self.bounds {
            Some((lo, hi)) => value.clamp_between(lo, hi),
            None => value,
        };
        self.slot.set(value.to_value());
    }

    fn stop_tween(&self) {
        let active = self.active.borrow_mut().take();
        if let Some(handle) = active {
            handle.cancel();
        }
    }
}

impl<T: UniformValue> Drop for Shared<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.active.get_mut().take() {
            handle.cancel();
        }
    }
}

/// Host-writable value read by expressions through [`Uniform::node`].
///
/// Clones share one slot. Writes never rebuild the expression graph, so compiled programs only
/// see a new uniform value. At most one tween drives a uniform at a time.
pub struct Uniform<T: UniformValue>(Rc<Shared<T>>);

impl<T: UniformValue> Clone for Uniform<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: UniformValue> Uniform<T> {
    pub fn new(scheduler: &FrameScheduler, initial: T) -> Self {
        Self::build(scheduler, initial, None)
    }

    /// A uniform whose every write is clamped componentwise into `[lo, hi]`.
    pub fn bounded(scheduler: &FrameScheduler, initial: T, lo: T, hi: T) -> Self {
        Self::build(scheduler, initial, Some((lo, hi)))
    }

    fn build(scheduler: &FrameScheduler, initial: T, bounds: Option<(T, T)>) -> Self {
        let initial = match bounds {
            Some((lo, hi)) => initial.clamp_between(lo, hi),
            None => initial,
        };
        let slot = UniformSlot::new(initial.to_value());
        let node = Expr::uniform(&slot);
        Self(Rc::new(Shared {
            slot,
            node,
            bounds,
            active: RefCell::new(None),
            scheduler: scheduler.clone(),
        }))
    }

    /// Expression node reading this uniform. The same node is returned on every call.
    pub fn node(&self) -> Expr {
        self.0.node.clone()
    }

    pub fn slot(&self) -> &UniformSlot {
        &self.0.slot
    }

    pub fn get(&self) -> T {
        T::from_value(&self.0.slot.get())
    }

    /// Write immediately. Cancels any running tween first.
    pub fn set(&self, value: T) {
        self.0.stop_tween();
        self.0.write(value);
    }

    /// Tween to `target` over `duration` seconds with the default smoothstep curve.
    pub fn tween_to(&self, target: T, duration: f64) -> TweenHandle {
        self.tween_with(target, duration, Ease::default())
    }

    /// Tween to `target` from the current value, replacing any running tween.
    pub fn tween_with(&self, target: T, duration: f64, ease: Ease) -> TweenHandle {
        self.0.stop_tween();
        let target = match self.0.bounds {
            Some((lo, hi)) => target.clamp_between(lo, hi),
            None => target,
        };
        let weak: Weak<Shared<T>> = Rc::downgrade(&self.0);
        let write = Box::new(move |value: T| match weak.upgrade() {
            Some(shared) => {
                shared.write(value);
                true
            }
            None => false,
        });
        let handle = tween::start(&self.0.scheduler, self.get(), target, duration, ease, write);
        *self.0.active.borrow_mut() = Some(handle.clone());
        handle
    }

    /// Cancel the running tween, if any, keeping the current value.
    pub fn stop(&self) {
        self.0.stop_tween();
    }

    /// A callback that stops this uniform's tween without keeping the uniform alive.
    pub(crate) fn stopper(&self) -> impl Fn() + 'static {
        let weak = Rc::downgrade(&self.0);
        move || {
            if let Some(shared) = weak.upgrade() {
                shared.stop_tween();
            }
        }
    }

    pub fn is_tweening(&self) -> bool {
        self.0
            .active
            .borrow()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl<T: UniformValue> std::fmt::Debug for Uniform<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uniform")
            .field("slot", &self.0.slot)
            .field("bounds", &self.0.bounds)
            .finish()
    }
}

impl Uniform<Color> {
    /// Set from `#rgb` / `#rrggbb`.
    pub fn set_hex(&self, hex: &str) -> WeaveResult<()> {
        let color = Color::from_hex(hex)?;
        self.set(color);
        Ok(())
    }

    /// Set from `oklch(L C H)`.
    pub fn set_oklch(&self, input: &str) -> WeaveResult<()> {
        let [l, c, h] = parse_oklch(input)?;
        self.set(Color::from_oklch(l, c, h));
        Ok(())
    }

    /// Parse `hex` and tween to it. A parse failure leaves the current tween running.
    pub fn tween_to_hex(&self, hex: &str, duration: f64) -> WeaveResult<TweenHandle> {
        let color = Color::from_hex(hex)?;
        Ok(self.tween_to(color, duration))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/uniform.rs"]
mod tests;
