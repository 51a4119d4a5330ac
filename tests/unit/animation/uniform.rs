use super::*;
use crate::animation::tween::TweenOutcome;
use crate::expr::{EvalInputs, Value, evaluate};
use crate::foundation::core::Vec2;

#[test]
fn eased_tween_hits_midpoint_then_exact_target() {
    let s = FrameScheduler::new();
    let u = Uniform::new(&s, 0.5);
    let h = u.tween_to(1.0, 2.0);

    s.run_frame(0.0);
    assert_eq!(u.get(), 0.5);
    s.run_frame(1.0);
    assert!((u.get() - 0.75).abs() < 1e-12);
    assert!(u.is_tweening());
    s.run_frame(2.0);
    assert_eq!(u.get(), 1.0);
    assert_eq!(h.outcome(), Some(TweenOutcome::Completed));
    assert!(!u.is_tweening());
}

#[test]
fn node_is_stable_and_reads_current_value() {
    let s = FrameScheduler::new();
    let u = Uniform::new(&s, 2.0);
    assert!(Expr::ptr_eq(&u.node(), &u.node()));
    let e = u.node() * 3.0;
    assert_eq!(evaluate(&e, EvalInputs::default()).unwrap(), Value::float(6.0));
    u.set(4.0);
    assert_eq!(evaluate(&e, EvalInputs::default()).unwrap(), Value::float(12.0));
}

#[test]
fn set_cancels_running_tween() {
    let s = FrameScheduler::new();
    let u = Uniform::new(&s, 0.0);
    let h = u.tween_to(1.0, 1.0);
    s.run_frame(0.0);
    u.set(0.25);
    assert_eq!(h.outcome(), Some(TweenOutcome::Cancelled));
    s.run_frame(0.5);
    assert_eq!(u.get(), 0.25);
}

#[test]
fn restart_continues_from_current_value() {
    let s = FrameScheduler::new();
    let u = Uniform::new(&s, 0.0);
    let first = u.tween_with(1.0, 1.0, Ease::Linear);
    s.run_frame(0.0);
    s.run_frame(0.5);
    let mid = u.get();
    assert_eq!(mid, 0.5);

    let second = u.tween_with(0.0, 1.0, Ease::Linear);
    assert_eq!(first.outcome(), Some(TweenOutcome::Cancelled));
    s.run_frame(1.0);
    assert_eq!(u.get(), mid);
    s.run_frame(1.5);
    assert_eq!(u.get(), 0.25);
    s.run_frame(2.0);
    assert_eq!(u.get(), 0.0);
    assert_eq!(second.outcome(), Some(TweenOutcome::Completed));
}

#[test]
fn bounded_uniform_clamps_writes_and_targets() {
    let s = FrameScheduler::new();
    let u = Uniform::bounded(&s, Vec2::new(5.0, -5.0), Vec2::ZERO, Vec2::new(1.0, 1.0));
    assert_eq!(u.get(), Vec2::new(1.0, 0.0));
    u.set(Vec2::new(0.5, 2.0));
    assert_eq!(u.get(), Vec2::new(0.5, 1.0));
    u.tween_to(Vec2::new(-3.0, 0.5), 0.0);
    s.run_frame(0.0);
    assert_eq!(u.get(), Vec2::new(0.0, 0.5));
}

#[test]
fn dropping_the_uniform_cancels_its_tween() {
    let s = FrameScheduler::new();
    let u = Uniform::new(&s, 0.0);
    let h = u.tween_to(1.0, 1.0);
    drop(u);
    assert_eq!(h.outcome(), Some(TweenOutcome::Cancelled));
    assert_eq!(s.run_frame(0.0), 0);
}

#[test]
fn clones_share_one_slot() {
    let s = FrameScheduler::new();
    let a = Uniform::new(&s, 1.0);
    let b = a.clone();
    b.set(9.0);
    assert_eq!(a.get(), 9.0);
    assert_eq!(a.slot().id(), b.slot().id());
}

fn near_white(c: Color) -> bool {
    c.to_array().iter().all(|v| (v - 1.0).abs() < 1e-9)
}

#[test]
fn color_uniform_accepts_hex_and_oklch() {
    let s = FrameScheduler::new();
    let u = Uniform::new(&s, Color::default());
    u.set_hex("#ffffff").unwrap();
    assert!(near_white(u.get()));
    u.set_oklch("oklch(0 0 0)").unwrap();
    assert_eq!(u.get(), Color::new(0.0, 0.0, 0.0));
    assert!(u.set_hex("#zzz").is_err());
    assert!(u.set_oklch("oklch(nope)").is_err());

    let h = u.tween_to_hex("#fff", 1.0).unwrap();
    s.run_frame(0.0);
    s.run_frame(1.0);
    assert!(near_white(u.get()));
    assert!(h.is_finished());
}
