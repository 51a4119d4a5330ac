use super::*;
use crate::expr::{EvalInputs, evaluate};

fn source_at(start: f64, speed: f64) -> (FrameScheduler, TimeSource) {
    let s = FrameScheduler::new();
    s.run_frame(start);
    (s.clone(), TimeSource::new(&s, speed))
}

#[test]
fn elapsed_follows_frames_while_running() {
    let (s, t) = source_at(10.0, 1.0);
    assert!(!t.is_running());
    t.start();
    s.run_frame(11.0);
    assert_eq!(t.elapsed(), 1.0);
    s.run_frame(12.5);
    assert_eq!(t.elapsed(), 2.5);
}

#[test]
fn pause_freezes_and_resume_is_seamless() {
    let (s, t) = source_at(0.0, 1.0);
    t.start();
    s.run_frame(2.0);
    t.pause();
    assert_eq!(s.pending_frames(), 0);
    s.run_frame(50.0);
    assert_eq!(t.elapsed(), 2.0);
    t.resume();
    s.run_frame(51.0);
    assert_eq!(t.elapsed(), 3.0);
}

#[test]
fn speed_change_keeps_position() {
    let (s, t) = source_at(0.0, 1.0);
    t.start();
    s.run_frame(4.0);
    t.set_speed(2.0);
    assert_eq!(t.elapsed(), 4.0);
    assert_eq!(t.scaled(), 8.0);
    s.run_frame(5.0);
    assert_eq!(t.elapsed(), 6.0);
    assert_eq!(t.scaled(), 12.0);
    assert_eq!(t.speed(), 2.0);
}

#[test]
fn seek_and_reset() {
    let (s, t) = source_at(0.0, 1.0);
    t.start();
    t.set_time(100.0);
    s.run_frame(1.0);
    assert_eq!(t.elapsed(), 101.0);
    t.reset();
    assert!(!t.is_running());
    assert_eq!(t.elapsed(), 0.0);
    assert_eq!(t.scaled(), 0.0);
}

#[test]
fn nodes_track_published_values() {
    let (s, t) = source_at(0.0, 0.5);
    t.start();
    s.run_frame(4.0);
    let read = |e: &Expr| {
        evaluate(e, EvalInputs::default())
            .unwrap()
            .as_f64()
            .unwrap()
    };
    assert_eq!(read(&t.elapsed_node()), 2.0);
    assert_eq!(read(&t.speed_node()), 0.5);
    assert_eq!(read(&t.scaled_node()), 1.0);
}

#[test]
fn dropping_the_source_detaches_from_the_scheduler() {
    let (s, t) = source_at(0.0, 1.0);
    t.start();
    assert_eq!(s.pending_frames(), 1);
    drop(t);
    assert_eq!(s.pending_frames(), 0);
}
