use super::*;
use crate::animation::FrameScheduler;
use crate::expr::{EvalInputs, evaluate, time, uv};
use crate::foundation::core::Vec2;
use crate::runtime::RuntimeOptions;

fn sample(e: &Expr, x: f64, y: f64, t: f64) -> Vec<f64> {
    let inputs = EvalInputs::at(Vec2::new(x, y)).with_time(t);
    evaluate(e, inputs).unwrap().lanes().to_vec()
}

#[test]
fn one_color_is_only_modulated_in_brightness() {
    let s = FrameScheduler::new();
    let rt = RuntimeContext::new(&s, RuntimeOptions::default()).unwrap();
    let hex = "#635bff";
    let opts = StripeOptions {
        colors: [hex.into(), hex.into(), hex.into(), hex.into(), hex.into()],
        ..StripeOptions::default()
    };
    let stripe = Stripe::new(&rt, &opts).unwrap();
    let layer = stripe.layer(&uv(), &time());
    let base = Color::parse(hex).unwrap().to_array();
    for (x, y, t) in [(0.1, 0.1, 0.0), (0.4, 0.9, 2.0), (0.95, 0.5, 30.0)] {
        let c = sample(&layer, x, y, t);
        let k = c[2] / base[2];
        assert!((0.75..=1.05).contains(&k), "brightness {k}");
        for (got, want) in c.iter().zip(base) {
            assert!((got - want * k).abs() < 1e-9);
        }
    }
}

#[test]
fn flow_angle_turns_the_field_about_the_center() {
    let s = FrameScheduler::new();
    let rt = RuntimeContext::new(&s, RuntimeOptions::default()).unwrap();
    let stripe = Stripe::new(&rt, &StripeOptions::default()).unwrap();
    let layer = stripe.layer(&uv(), &time());
    let center = sample(&layer, 0.5, 0.5, 1.0);
    let off_center = sample(&layer, 0.2, 0.7, 1.0);

    stripe.flow_angle.set(1.2);
    assert_eq!(sample(&layer, 0.5, 0.5, 1.0), center);
    assert_ne!(sample(&layer, 0.2, 0.7, 1.0), off_center);
}

#[test]
fn default_layer_is_finite() {
    let s = FrameScheduler::new();
    let rt = RuntimeContext::new(&s, RuntimeOptions::default()).unwrap();
    let stripe = Stripe::new(&rt, &StripeOptions::default()).unwrap();
    let layer = stripe.layer(&uv(), &time());
    for i in 0..8 {
        let c = sample(&layer, i as f64 / 7.0, 1.0 - i as f64 / 7.0, i as f64 * 3.3);
        assert!(c.iter().all(|v| v.is_finite()));
    }
    let parsed: StripeOptions = serde_json::from_str(r#"{"flow_angle": 0.5}"#).unwrap();
    assert_eq!(parsed.colors.len(), 5);
    assert_eq!(parsed.noise_scale, 1.5);
}
