//! Periodic time signals. Every function takes a time expression, usually [`crate::expr::time`].

use std::f64::consts::TAU;

use crate::expr::{Expr, less_than, max, select, step};
use crate::library::math::EPSILON;

/// 0 to 1 and back over `2 * duration`.
pub fn ping_pong(time: impl Into<Expr>, duration: impl Into<Expr>) -> Expr {
    let duration = max(duration, EPSILON);
    let t = time.into().modulo(&duration * 2.0) / &duration;
    select(less_than(&t, 1.0), &t, 2.0 - &t)
}

/// `sin(2pi * time * frequency) * amplitude + 0.5`
pub fn oscillate(
    time: impl Into<Expr>,
    frequency: impl Into<Expr>,
    amplitude: impl Into<Expr>,
) -> Expr {
    (time.into() * frequency.into() * TAU).sin() * amplitude.into() + 0.5
}

/// Time wrapped to `[0, duration)`.
pub fn loop_time(time: impl Into<Expr>, duration: impl Into<Expr>) -> Expr {
    time.into().modulo(max(duration, EPSILON))
}

/// 1 during `[start, start + duration)`, 0 otherwise.
pub fn pulse(time: impl Into<Expr>, start: impl Into<Expr>, duration: impl Into<Expr>) -> Expr {
    let time = time.into();
    let start = start.into();
    let end = &start + duration.into();
    step(start, &time) * less_than(time, end)
}

/// Rising ramp in `[0, 1)`.
pub fn sawtooth(time: impl Into<Expr>, frequency: impl Into<Expr>) -> Expr {
    (time.into() * frequency.into()).modulo(1.0)
}

/// Symmetric ramp in `[0, 1]`, 1 at the start of each period.
pub fn triangle_wave(time: impl Into<Expr>, frequency: impl Into<Expr>) -> Expr {
    (sawtooth(time, frequency) * 2.0 - 1.0).abs()
}

/// 0 for the first half of each period, 1 for the second.
pub fn square_wave(time: impl Into<Expr>, frequency: impl Into<Expr>) -> Expr {
    step(0.5, sawtooth(time, frequency))
}

#[cfg(test)]
#[path = "../../tests/unit/library/waves.rs"]
mod tests;
