use super::*;
use crate::expr::{EvalInputs, evaluate, uv};
use crate::foundation::core::Vec2;

fn at(e: &Expr, x: f64, y: f64) -> f64 {
    evaluate(e, EvalInputs::at(Vec2::new(x, y)))
        .unwrap()
        .as_f64()
        .unwrap()
}

#[test]
fn blob_is_solid_inside_and_soft_at_the_rim() {
    let b = blob(&uv(), [0.5, 0.5], 0.3, 0.1);
    assert_eq!(at(&b, 0.5, 0.5), 1.0);
    assert!((at(&b, 0.8, 0.5) - 0.5).abs() < 1e-9);
    assert_eq!(at(&b, 0.95, 0.5), 0.0);
}

#[test]
fn star_reaches_its_tips_but_not_between_them() {
    let s = star(&uv(), [0.5, 0.5], 5, 0.1, 0.3);
    assert_eq!(at(&s, 0.75, 0.5), 1.0);
    // halfway between the first two tips the edge is at the inner radius
    let a = TAU / 10.0;
    assert_eq!(at(&s, 0.5 + 0.2 * a.cos(), 0.5 + 0.2 * a.sin()), 0.0);
    assert_eq!(at(&s, 0.5 + 0.05 * a.cos(), 0.5 + 0.05 * a.sin()), 1.0);
}

#[test]
fn polygon_edges_sit_at_the_apothem() {
    let square = polygon(&uv(), [0.5, 0.5], 4, 0.4, 0.0);
    assert_eq!(at(&square, 0.5 + 0.95 * 0.4, 0.5), 1.0);
    assert_eq!(at(&square, 0.5 + 1.05 * 0.4, 0.5), 0.0);

    let diagonal = TAU / 8.0;
    let apothem = 0.4 * diagonal.cos();
    let along = |r: f64| (0.5 + r * diagonal.cos(), 0.5 + r * diagonal.sin());
    let (x, y) = along(0.97 * apothem);
    assert_eq!(at(&square, x, y), 1.0);
    let (x, y) = along(1.03 * apothem);
    assert_eq!(at(&square, x, y), 0.0);
}

#[test]
fn degenerate_counts_are_raised() {
    assert_eq!(star(&uv(), [0.5, 0.5], 0, 0.1, 0.3), star(&uv(), [0.5, 0.5], 2, 0.1, 0.3));
    assert_eq!(polygon(&uv(), [0.5, 0.5], 1, 0.3, 0.0), polygon(&uv(), [0.5, 0.5], 3, 0.3, 0.0));
}

#[test]
fn radial_gradient_falls_to_zero() {
    let g = radial_gradient(&uv(), [0.5, 0.5], 2.0);
    assert_eq!(at(&g, 0.5, 0.5), 1.0);
    assert!((at(&g, 0.75, 0.5) - 0.5).abs() < 1e-12);
    assert_eq!(at(&g, 1.0, 1.0), 0.0);
}
