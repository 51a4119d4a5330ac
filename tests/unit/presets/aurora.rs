use super::*;
use crate::animation::FrameScheduler;
use crate::expr::{EvalInputs, evaluate, time, uv};
use crate::foundation::core::Vec2;
use crate::foundation::error::WeaveError;
use crate::runtime::RuntimeOptions;

fn sample(e: &Expr, x: f64, y: f64, t: f64) -> Vec<f64> {
    let inputs = EvalInputs::at(Vec2::new(x, y)).with_time(t);
    evaluate(e, inputs).unwrap().lanes().to_vec()
}

fn teal() -> AuroraOptions {
    AuroraOptions {
        colors: ["#336699".into(), "#336699".into(), "#336699".into()],
        sky_color: "#336699".into(),
        glow_intensity: 0.0,
        ..AuroraOptions::default()
    }
}

#[test]
fn layer_is_finite_across_the_frame() {
    let s = FrameScheduler::new();
    let rt = RuntimeContext::new(&s, RuntimeOptions::default()).unwrap();
    let aurora = Aurora::new(&rt, &AuroraOptions::default()).unwrap();
    let layer = aurora.layer(&uv(), &time());
    for t in [0.0, 3.7, 120.0] {
        for i in 0..6 {
            for j in 0..6 {
                let c = sample(&layer, i as f64 / 5.0, j as f64 / 5.0, t);
                assert_eq!(c.len(), 3);
                assert!(c.iter().all(|v| v.is_finite()), "{c:?} at t={t}");
            }
        }
    }
}

#[test]
fn matching_colors_without_glow_give_that_color() {
    let s = FrameScheduler::new();
    let rt = RuntimeContext::new(&s, RuntimeOptions::default()).unwrap();
    let aurora = Aurora::new(&rt, &teal()).unwrap();
    let expected = Color::parse("#336699").unwrap().to_array();
    let layer = aurora.layer(&uv(), &time());
    for (x, y) in [(0.1, 0.2), (0.5, 0.9), (0.8, 0.4)] {
        let c = sample(&layer, x, y, 2.5);
        for (got, want) in c.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{c:?}");
        }
    }
}

#[test]
fn apply_writes_uniforms_and_keeps_the_layer_shape() {
    let s = FrameScheduler::new();
    let rt = RuntimeContext::new(&s, RuntimeOptions::default()).unwrap();
    let aurora = Aurora::new(&rt, &AuroraOptions::default()).unwrap();
    let before = aurora.layer(&uv(), &time());

    aurora.apply(&teal()).unwrap();
    assert_eq!(aurora.glow_intensity.get(), 0.0);
    assert_eq!(aurora.colors[2].get(), Color::parse("#336699").unwrap());
    assert_eq!(aurora.layer(&uv(), &time()).fingerprint(), before.fingerprint());
}

#[test]
fn bad_colors_are_rejected_before_any_write() {
    let s = FrameScheduler::new();
    let rt = RuntimeContext::new(&s, RuntimeOptions::default()).unwrap();
    let broken = AuroraOptions {
        sky_color: "midnight".into(),
        ..AuroraOptions::default()
    };
    assert!(matches!(Aurora::new(&rt, &broken), Err(WeaveError::Validation(_))));

    let aurora = Aurora::new(&rt, &AuroraOptions::default()).unwrap();
    let update = AuroraOptions {
        speed: 9.0,
        ..broken
    };
    assert!(aurora.apply(&update).is_err());
    assert_eq!(aurora.speed.get(), 0.2);
}

#[test]
fn options_fill_from_partial_json() {
    let opts: AuroraOptions = serde_json::from_str(r#"{"density": 5.0}"#).unwrap();
    assert_eq!(opts.density, 5.0);
    assert_eq!(opts.colors, AuroraOptions::default().colors);
    assert_eq!(opts.fade_power, 1.5);
}
