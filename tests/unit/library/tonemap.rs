use super::*;
use crate::expr::{EvalInputs, evaluate, time};

fn eval_t(e: &Expr, t: f64) -> f64 {
    evaluate(e, EvalInputs::default().with_time(t))
        .unwrap()
        .as_f64()
        .unwrap()
}

const CURVES: [Tonemap; 10] = [
    Tonemap::Reinhard,
    Tonemap::ReinhardExtended { white_point: 4.0 },
    Tonemap::Aces,
    Tonemap::Uncharted2,
    Tonemap::Unreal,
    Tonemap::Tanh,
    Tonemap::CrossProcess,
    Tonemap::BleachBypass,
    Tonemap::Technicolor,
    Tonemap::Cinematic,
];

#[test]
fn scalar_curves_hit_known_points() {
    assert_eq!(eval_t(&reinhard(time()), 1.0), 0.5);
    assert!((eval_t(&reinhard_extended(time(), 4.0), 4.0) - 1.0).abs() < 1e-12);
    assert_eq!(eval_t(&aces(time()), 0.0), 0.0);
    assert!(eval_t(&uncharted2(time()), 0.0).abs() < 1e-12);
    assert!((eval_t(&tanh_tonemap(time()), 100.0) - 1.0).abs() < 1e-12);
}

#[test]
fn negative_radiance_maps_to_black() {
    assert_eq!(eval_t(&reinhard(time()), -5.0), 0.0);
    assert_eq!(eval_t(&unreal(time()), -5.0), 0.0);
    assert_eq!(eval_t(&gamma(time(), 2.2), -1.0), 0.0);
}

#[test]
fn every_curve_is_finite_and_bounded_on_rgb() {
    let color = time().extend(time() * 0.5).extend(time() * 2.0);
    for curve in CURVES {
        let e = curve.apply(&color);
        for i in 0..40 {
            let t = f64::from(i) * 2.5 - 10.0;
            let v = evaluate(&e, EvalInputs::default().with_time(t)).unwrap();
            assert_eq!(v.width(), 3);
            // the extended curve only saturates at its white point
            let hi = match curve {
                Tonemap::ReinhardExtended { .. } => f64::INFINITY,
                _ => 1.1,
            };
            assert!(
                v.lanes().iter().all(|x| x.is_finite() && *x >= -1e-9 && *x <= hi),
                "{curve:?} at {t}: {v:?}"
            );
        }
    }
}

#[test]
fn exposure_and_gamma() {
    assert_eq!(eval_t(&exposure(time(), 1.0), 1.0), 2.0);
    assert!((eval_t(&gamma(time(), 2.0), 0.25) - 0.5).abs() < 1e-12);
    let g = tonemap_with_gamma(time(), Tonemap::Reinhard, 1.0);
    assert_eq!(eval_t(&g, 1.0), 0.5);
}

#[test]
fn tonemap_selector_deserializes() {
    let t: Tonemap = serde_json::from_str(r#"{"kind":"reinhard_extended","white_point":2.0}"#)
        .unwrap();
    assert_eq!(t, Tonemap::ReinhardExtended { white_point: 2.0 });
    assert_eq!(Tonemap::default(), Tonemap::Aces);
}
