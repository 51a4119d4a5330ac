use super::*;
use crate::expr::{EvalInputs, Value, evaluate, float, resolution, uv};
use crate::foundation::core::Vec2;

fn at(e: &Expr, x: f64, y: f64) -> Value {
    evaluate(e, EvalInputs::at(Vec2::new(x, y))).unwrap()
}

fn close(v: &Value, expected: &[f64]) -> bool {
    v.lanes().len() == expected.len()
        && v.lanes().iter().zip(expected).all(|(a, b)| (a - b).abs() < 1e-9)
}

/// The sampled position itself, as a color.
fn position(p: &Expr) -> Expr {
    p.clone()
}

#[test]
fn led_mask_is_lit_at_cell_centers_only() {
    let opts = LedOptions::default();
    let lit = led(|_| float(1.0), &uv(), &opts);
    assert!((at(&lit, 0.005, 0.005).as_f64().unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(at(&lit, 0.0, 0.0).as_f64().unwrap(), 0.0);
}

#[test]
fn pixellate_snaps_to_block_corners() {
    let p = pixellate(position, &uv(), 100.0, &resolution());
    let inputs = EvalInputs {
        uv: Vec2::new(0.123, 0.456),
        resolution: Vec2::new(100.0, 100.0),
        ..EvalInputs::default()
    };
    assert!(close(&evaluate(&p, inputs).unwrap(), &[0.1, 0.4]));

    let zero = EvalInputs {
        uv: Vec2::new(0.5, 0.5),
        resolution: Vec2::new(0.0, 0.0),
        ..EvalInputs::default()
    };
    assert!(evaluate(&p, zero).unwrap().is_finite());
}

#[test]
fn chromatic_aberration_splits_red_and_blue_radially() {
    let opts = ChromaticAberrationOptions {
        radial: 1.0,
        ..ChromaticAberrationOptions::default()
    };
    let split = chromatic_aberration(|p| vec3(p.x(), p.y(), p.x()), &uv(), &opts);
    assert!(close(&at(&split, 0.8, 0.5), &[0.808, 0.5, 0.792]));
    assert!(close(&at(&split, 0.5, 0.5), &[0.5, 0.5, 0.5]));
}

#[test]
fn bulge_effect_samples_through_the_uv_bulge() {
    let b = bulge(position, &uv(), &BulgeOptions::default());
    assert!(close(&at(&b, 0.5, 0.0), &[0.5, 0.0]));
    assert!(at(&b, 0.6, 0.5).lanes()[0] > 0.6);
}

#[test]
fn wave_distortion_respects_its_axis() {
    let along_x = WaveDistortionOptions {
        axis: WaveAxis::X,
        ..WaveDistortionOptions::default()
    };
    let w = wave_distortion(position, &uv(), 0.0, &along_x);
    let v = at(&w, 0.3, 0.7);
    assert!((v.lanes()[0] - (0.3 + (7.0f64).sin() * 0.02)).abs() < 1e-12);
    assert_eq!(v.lanes()[1], 0.7);

    let both = wave_distortion(position, &uv(), 0.0, &WaveDistortionOptions::default());
    let v = at(&both, 0.3, 0.7);
    assert!((v.lanes()[1] - (0.7 + (3.0f64).sin() * 0.02)).abs() < 1e-12);

    let opts: WaveDistortionOptions = serde_json::from_str(r#"{"axis": "y"}"#).unwrap();
    assert_eq!(opts.axis, WaveAxis::Y);
    assert_eq!(opts.frequency, 10.0);
}

#[test]
fn swirl_turns_the_center_and_spares_the_outside() {
    let opts = SwirlOptions {
        strength: std::f64::consts::PI,
        radius: 0.4,
        ..SwirlOptions::default()
    };
    let s = swirl(position, &uv(), &opts);
    assert!(close(&at(&s, 0.95, 0.5), &[0.95, 0.5]));
    assert!(close(&at(&s, 0.5, 0.5), &[0.5, 0.5]));
    let near = at(&s, 0.51, 0.5);
    assert!(near.lanes()[0] < 0.5);
}
