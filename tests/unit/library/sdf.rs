use super::*;
use crate::expr::{EvalInputs, evaluate, uv};
use crate::foundation::core::Vec2;

fn at(e: &Expr, x: f64, y: f64) -> f64 {
    evaluate(e, EvalInputs::at(Vec2::new(x, y)))
        .unwrap()
        .as_f64()
        .unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn shapes_are_negative_at_origin_and_positive_far_away() {
    let p = uv();
    let shapes = [
        circle(&p, 0.3),
        ring(&p, 0.0, 0.1),
        rect(&p, [0.2, 0.1]),
        rounded_rect(&p, [0.2, 0.2], 0.05),
        diamond(&p, 0.3),
        hexagon(&p, 0.3),
        equilateral_triangle(&p, 0.3),
        triangle(&p, 0.2, 0.4),
        rhombus(&p, [0.3, 0.2]),
        parallelogram(&p, 0.3, 0.2, 0.1),
    ];
    for (i, d) in shapes.iter().enumerate() {
        assert!(at(d, 0.0, 0.0) < 0.0, "shape {i} not inside at origin");
        assert!(at(d, 3.0, 2.5) > 0.0, "shape {i} not outside far away");
    }
}

#[test]
fn exact_distances() {
    let p = uv();
    assert!(close(at(&circle(&p, 0.3), 0.5, 0.0), 0.2));
    assert!(close(at(&rect(&p, [0.2, 0.1]), 0.5, 0.0), 0.3));
    assert!(close(at(&rect(&p, [0.2, 0.1]), 0.0, 0.0), -0.1));
    assert!(close(at(&hexagon(&p, 0.3), 0.0, 0.5), 0.2));
    assert!(close(at(&segment(&p, [-1.0, 0.0], [1.0, 0.0]), 0.3, 0.4), 0.4));
    assert!(close(at(&triangle(&p, 0.2, 0.4), 0.0, -0.5), 0.3));
    let b = box3(&p.extend(0.0), [0.1, 0.1, 0.1]);
    assert!(close(at(&b, 0.5, 0.0), 0.4));
}

#[test]
fn booleans_combine_distances() {
    let p = uv();
    let a = circle(&p, 0.2);
    let b = circle(&(&p - [0.3, 0.0]), 0.2);
    assert!(close(at(&union(&a, &b), 0.3, 0.0), -0.2));
    assert!(at(&intersect(&a, &b), 0.0, 0.0) > 0.0);
    assert!(at(&subtract(&a, &b), 0.15, 0.0) > 0.0);
    assert!(at(&subtract(&a, &b), -0.1, 0.0) < 0.0);
}

#[test]
fn smooth_min_never_exceeds_hard_min() {
    let p = uv();
    let a = circle(&p, 0.2);
    let b = circle(&(&p - [0.3, 0.0]), 0.2);
    for x in [-0.3, 0.0, 0.15, 0.3, 0.6] {
        let hard = at(&union(&a, &b), x, 0.1);
        let soft = at(&smin(&a, &b, 0.1), x, 0.1);
        assert!(soft <= hard + 1e-12);
        assert!(at(&smax(&a, &b, 0.1), x, 0.1) >= at(&intersect(&a, &b), x, 0.1) - 1e-12);
    }
}

#[test]
fn fill_and_stroke_masks() {
    let d = circle(&uv(), 0.3);
    assert_eq!(at(&fill(&d, 0.01), 0.0, 0.0), 1.0);
    assert_eq!(at(&fill(&d, 0.01), 1.0, 0.0), 0.0);
    assert_eq!(at(&stroke(&d, 0.02, 0.005), 0.3, 0.0), 1.0);
    assert_eq!(at(&stroke(&d, 0.02, 0.005), 0.0, 0.0), 0.0);
    // zero softness still yields a hard edge instead of NaN
    assert_eq!(at(&fill(&d, 0.0), 0.0, 0.0), 1.0);
}
