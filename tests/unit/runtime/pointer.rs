use super::*;

fn viewport() -> Vec2 {
    Vec2::new(200.0, 100.0)
}

#[test]
fn normalizes_with_flipped_y() {
    let s = FrameScheduler::new();
    let p = PointerSource::new(&s, PointerOptions::default());
    assert_eq!(p.normalize(Vec2::new(50.0, 25.0), viewport()), Vec2::new(0.25, 0.75));
    assert_eq!(p.normalize(Vec2::new(0.0, 100.0), viewport()), Vec2::new(0.0, 0.0));
}

#[test]
fn zero_viewport_reads_as_center() {
    let s = FrameScheduler::new();
    let p = PointerSource::new(&s, PointerOptions::default());
    assert_eq!(p.normalize(Vec2::new(30.0, 40.0), Vec2::ZERO), Vec2::new(0.5, 0.5));
    let sym = PointerSource::new(
        &s,
        PointerOptions {
            symmetric: true,
            ..PointerOptions::default()
        },
    );
    assert_eq!(sym.normalize(Vec2::new(30.0, 40.0), Vec2::ZERO), Vec2::ZERO);
    assert_eq!(sym.position(), Vec2::ZERO);
}

#[test]
fn symmetric_range_spans_minus_one_to_one() {
    let s = FrameScheduler::new();
    let p = PointerSource::new(
        &s,
        PointerOptions {
            symmetric: true,
            ..PointerOptions::default()
        },
    );
    assert_eq!(p.normalize(Vec2::new(200.0, 0.0), viewport()), Vec2::new(1.0, 1.0));
    assert_eq!(p.normalize(Vec2::new(0.0, 100.0), viewport()), Vec2::new(-1.0, -1.0));
}

#[test]
fn smoothing_moves_a_fraction_per_frame() {
    let s = FrameScheduler::new();
    let p = PointerSource::new(
        &s,
        PointerOptions {
            smoothing: 0.5,
            symmetric: false,
        },
    );
    p.pointer_moved(Vec2::new(200.0, 0.0), viewport());
    assert_eq!(p.target(), Vec2::new(1.0, 1.0));
    p.start();
    s.run_frame(0.0);
    assert_eq!(p.position(), Vec2::new(0.75, 0.75));
    s.run_frame(0.016);
    assert_eq!(p.position(), Vec2::new(0.875, 0.875));
    p.stop();
    s.run_frame(0.032);
    assert_eq!(p.position(), Vec2::new(0.875, 0.875));
}

#[test]
fn set_position_is_immediate_and_sticks() {
    let s = FrameScheduler::new();
    let p = PointerSource::new(&s, PointerOptions::default());
    p.set_position(Vec2::new(0.1, 0.9));
    p.advance();
    assert_eq!(p.position(), Vec2::new(0.1, 0.9));
    let read = crate::expr::evaluate(&p.xy_node(), crate::expr::EvalInputs::default()).unwrap();
    assert_eq!(read, crate::expr::Value::vec2(0.1, 0.9));
}

#[test]
fn out_of_range_smoothing_is_clamped() {
    let s = FrameScheduler::new();
    let hi = PointerSource::new(
        &s,
        PointerOptions {
            smoothing: 4.0,
            symmetric: false,
        },
    );
    assert_eq!(hi.smoothing(), 1.0);
    let nan = PointerSource::new(
        &s,
        PointerOptions {
            smoothing: f64::NAN,
            symmetric: false,
        },
    );
    assert_eq!(nan.smoothing(), DEFAULT_SMOOTHING);
}
