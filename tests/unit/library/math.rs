use super::*;
use crate::expr::{EvalInputs, evaluate, float, uv, vec2};
use crate::foundation::core::Vec2;

fn eval_at(e: &Expr, x: f64, y: f64) -> f64 {
    evaluate(e, EvalInputs::at(Vec2::new(x, y)))
        .unwrap()
        .as_f64()
        .unwrap()
}

fn eval(e: &Expr) -> f64 {
    eval_at(e, 0.5, 0.5)
}

#[test]
fn safe_normalize_of_zero_is_zero() {
    let v = evaluate(&safe_normalize(&vec2(0.0, 0.0)), EvalInputs::default()).unwrap();
    assert!(v.is_finite());
    assert_eq!(v.lanes(), &[0.0, 0.0]);
}

#[test]
fn tanh_saturates_without_overflow() {
    assert!((eval(&tanh(1000.0)) - 1.0).abs() < 1e-12);
    assert!((eval(&tanh(-1000.0)) + 1.0).abs() < 1e-12);
    assert!((eval(&tanh(0.5)) - 0.5f64.tanh()).abs() < 1e-12);
}

#[test]
fn hyperbolic_helpers_match_std() {
    assert!((eval(&sinh(0.7)) - 0.7f64.sinh()).abs() < 1e-12);
    assert!((eval(&cosh(0.7)) - 0.7f64.cosh()).abs() < 1e-12);
}

#[test]
fn remap_clamps_to_output_range() {
    let x = uv().x();
    let r = remap(&x, 0.25, 0.75, 10.0, 20.0);
    assert_eq!(eval_at(&r, 0.5, 0.0), 15.0);
    assert_eq!(eval_at(&r, 0.0, 0.0), 10.0);
    assert_eq!(eval_at(&r, 1.0, 0.0), 20.0);
}

#[test]
fn smootherstep_hits_endpoints_and_midpoint() {
    let s = smootherstep(0.0, 1.0, uv().x());
    assert_eq!(eval_at(&s, 0.0, 0.0), 0.0);
    assert_eq!(eval_at(&s, 1.0, 0.0), 1.0);
    assert!((eval_at(&s, 0.5, 0.0) - 0.5).abs() < 1e-12);
}

#[test]
fn bias_and_gain_are_identity_at_one_half() {
    assert_eq!(eval(&bias(float(0.3), 0.5)), 0.3);
    assert!((eval(&gain(float(0.25), 0.5)) - 0.25).abs() < 1e-12);
    assert!((eval(&gain(float(0.5), 0.7)) - 0.5).abs() < 1e-12);
}

#[test]
fn bias_and_gain_bend_the_expected_way() {
    assert!(eval(&bias(float(0.3), 0.8)) > 0.3);
    assert!(eval(&bias(float(0.3), 0.2)) < 0.3);
    // more contrast: below the midpoint drops, above it rises
    assert!(eval(&gain(float(0.25), 0.8)) < 0.25);
    assert!(eval(&gain(float(0.75), 0.8)) > 0.75);
}

#[test]
fn bias_and_gain_stay_finite_for_degenerate_parameters() {
    for p in [0.0, 1.0, -3.0, 7.0] {
        for x in [0.0, 0.5, 1.0, -2.0, 4.0] {
            let b = eval(&bias(float(x), p));
            let g = eval(&gain(float(x), p));
            assert!(b.is_finite() && (0.0..=1.0).contains(&b), "bias({x}, {p}) = {b}");
            assert!(g.is_finite() && (0.0..=1.0).contains(&g), "gain({x}, {p}) = {g}");
        }
    }
}

#[test]
fn distances_are_measured_from_centers() {
    let p = uv();
    assert!((eval_at(&circular_distance(&p, [0.5, 0.5]), 0.5, 0.9) - 0.4).abs() < 1e-12);
    assert!(eval(&box_distance(&p, [0.5, 0.5], [0.1, 0.1])) < 0.0);
    assert!((eval_at(&box_distance(&p, [0.5, 0.5], [0.1, 0.1]), 0.8, 0.5) - 0.2).abs() < 1e-12);
    let seg = line_distance(&p, [0.0, 0.0], [1.0, 0.0]);
    assert!((eval_at(&seg, 0.5, 0.3) - 0.3).abs() < 1e-12);
}

#[test]
fn degenerate_segment_is_point_distance() {
    let d = line_distance(&uv(), [0.5, 0.5], [0.5, 0.5]);
    assert!((eval_at(&d, 0.5, 0.8) - 0.3).abs() < 1e-9);
}

#[test]
fn quantize_and_falloffs() {
    assert_eq!(eval(&quantize(float(0.74), 4.0)), 0.5);
    assert_eq!(eval(&exp_falloff(2.0, 1.0)), 0.25);
    assert_eq!(eval(&linear_falloff(0.5, 0.0, 1.0)), 0.5);
    assert_eq!(eval(&linear_falloff(3.0, 0.0, 1.0)), 0.0);
}
