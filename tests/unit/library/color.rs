use super::*;
use crate::expr::{EvalInputs, Value, evaluate, float, time, uv};
use crate::foundation::core::oklch_to_linear as host_oklch_to_linear;

fn eval(e: &Expr) -> Value {
    evaluate(e, EvalInputs::default()).unwrap()
}

fn eval_t(e: &Expr, t: f64) -> Value {
    evaluate(e, EvalInputs::default().with_time(t)).unwrap()
}

fn close3(v: &Value, expected: [f64; 3], tol: f64) -> bool {
    v.width() == 3
        && v
            .lanes()
            .iter()
            .zip(expected)
            .all(|(a, b)| (a - b).abs() < tol)
}

#[test]
fn rainbow_starts_at_full_red() {
    let v = eval(&Palette::Rainbow.sample(0.0));
    assert!((v.lanes()[0] - 1.0).abs() < 1e-12);
    let [a, b, c, d] = Palette::Sunset.coefficients();
    assert_eq!(
        Palette::Sunset.sample(time()),
        cosine_palette(time(), a, b, c, d)
    );
}

#[test]
fn palettes_stay_in_gamut() {
    let presets = [
        Palette::Rainbow,
        Palette::Sunset,
        Palette::Ocean,
        Palette::Fire,
        Palette::Ice,
        Palette::Neon,
        Palette::Pastel,
    ];
    for p in presets {
        let e = p.sample(time());
        for i in 0..20 {
            let v = eval_t(&e, f64::from(i) * 0.05);
            assert!(v.lanes().iter().all(|x| (-1e-12..=1.0 + 1e-12).contains(x)), "{p:?}");
        }
    }
}

#[test]
fn fixed_stop_gradients() {
    let black = [0.0, 0.0, 0.0];
    let white = [1.0, 1.0, 1.0];
    let red = [1.0, 0.0, 0.0];
    assert!(close3(&eval(&gradient2(0.5, black, white)), [0.5; 3], 1e-12));
    assert!(close3(&eval(&gradient3(0.5, black, red, white)), red, 1e-12));
    assert!(close3(&eval(&gradient4(1.0, black, red, black, white)), white, 1e-12));
    assert!(close3(&eval(&gradient2(-3.0, black, white)), black, 1e-12));
}

#[test]
fn multi_stop_gradient_interpolates_and_holds_ends() {
    let stops = [
        ColorStop::new(1.0, Color::new(1.0, 1.0, 1.0)),
        ColorStop::new(0.0, Color::new(0.0, 0.0, 0.0)),
        ColorStop::new(0.5, Color::new(1.0, 0.0, 0.0)),
    ];
    let g = gradient_multi(time(), &stops).unwrap();
    assert!(close3(&eval_t(&g, 0.25), [0.5, 0.0, 0.0], 1e-12));
    assert!(close3(&eval_t(&g, 0.5), [1.0, 0.0, 0.0], 1e-12));
    assert!(close3(&eval_t(&g, 1.5), [1.0, 1.0, 1.0], 1e-12));
    assert!(close3(&eval_t(&g, -1.0), [0.0, 0.0, 0.0], 1e-12));
}

#[test]
fn multi_stop_gradient_validates_stops() {
    let one = [ColorStop::new(0.0, Color::default())];
    assert!(matches!(
        gradient_multi(time(), &one),
        Err(WeaveError::Validation(_))
    ));
    let nan = [
        ColorStop::new(0.0, Color::default()),
        ColorStop::new(f64::NAN, Color::default()),
    ];
    assert!(gradient_multi(time(), &nan).is_err());
    let radial = gradient_radial(
        &uv(),
        [0.5, 0.5],
        &[
            ColorStop::new(0.0, Color::new(1.0, 1.0, 1.0)),
            ColorStop::new(0.0, Color::default()),
        ],
    );
    assert!(radial.is_ok());
}

#[test]
fn hsl_round_trip() {
    for rgb in [[0.2, 0.6, 0.4], [0.9, 0.1, 0.3], [0.5, 0.5, 0.5], [0.1, 0.2, 0.8]] {
        let back = hsl_to_rgb(&rgb_to_hsl(&Expr::from(rgb)));
        assert!(close3(&eval(&back), rgb, 1e-9), "{rgb:?}");
    }
}

#[test]
fn hsl_of_known_colors() {
    let hsl = eval(&rgb_to_hsl(&Expr::from([0.2, 0.6, 0.4])));
    assert!(close3(&hsl, [2.5 / 6.0, 0.5, 0.4], 1e-12));
    let gray = eval(&rgb_to_hsl(&Expr::from([0.3, 0.3, 0.3])));
    assert!(close3(&gray, [0.0, 0.0, 0.3], 1e-12));
}

#[test]
fn oklch_expression_matches_host_conversion() {
    let lch = [0.7, 0.1, 200.0];
    let e = oklch_to_linear(lch[0], float(lch[1]) + time(), lch[2]);
    assert!(close3(&eval(&e), host_oklch_to_linear(lch), 1e-12));
    assert!(close3(&eval(&oklch_to_linear(1.0, 0.0, 0.0)), [1.0; 3], 1e-4));
}

#[test]
fn oklch_round_trip_is_approximate() {
    let lin = oklch_to_linear(0.7, 0.1, 200.0);
    let back = eval(&linear_to_oklch(&lin));
    let [l, c, h] = [back.lanes()[0], back.lanes()[1], back.lanes()[2]];
    assert!((l - 0.7).abs() < 1e-3, "{back:?}");
    assert!((c - 0.1).abs() < 1e-3, "{back:?}");
    assert!((h - 200.0).abs() < 0.1, "{back:?}");
}

#[test]
fn hue_shift_turns_red_into_green() {
    let shifted = hue_shift(&Expr::from([1.0, 0.0, 0.0]), 1.0 / 3.0);
    assert!(close3(&eval(&shifted), [0.0, 1.0, 0.0], 1e-6));
    let same = hue_shift(&Expr::from([0.2, 0.6, 0.4]), 0.0);
    assert!(close3(&eval(&same), [0.2, 0.6, 0.4], 1e-6));
}

#[test]
fn grading_helpers() {
    let gray = Expr::from([0.5, 0.5, 0.5]);
    assert!(close3(&eval(&temperature(&gray, 0.0)), [0.425, 0.45, 0.425], 1e-12));
    assert!(close3(&eval(&vibrance(&gray, 1.0)), [0.5; 3], 1e-12));
    let p = posterize(&Expr::from([0.1, 0.4, 0.9]), 3.0);
    assert!(close3(&eval(&p), [0.0, 0.5, 1.0], 1e-12));
    assert!(close3(&eval(&grayscale(2.0)), [1.0; 3], 1e-12));
}
