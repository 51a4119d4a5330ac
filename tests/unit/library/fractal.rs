use super::*;
use crate::expr::{EvalInputs, evaluate, time, uv};
use crate::foundation::core::Vec2;

fn grid() -> impl Iterator<Item = EvalInputs> {
    (0..10).flat_map(|i| {
        (0..10).map(move |j| {
            EvalInputs::at(Vec2::new(f64::from(i) * 0.41 - 2.0, f64::from(j) * 0.29 - 1.0))
                .with_time(f64::from(i) * 0.3)
        })
    })
}

fn sample_f64(e: &Expr) -> Vec<f64> {
    grid()
        .map(|inputs| evaluate(e, inputs).unwrap().as_f64().unwrap())
        .collect()
}

#[test]
fn single_octave_fbm_is_scaled_base_noise() {
    let p = uv() * 2.0;
    let o = FractalOptions::default().with_octaves(1);
    assert_eq!(fbm(&p, &o), o.amplitude * simplex2(&(&p * o.frequency)));
}

#[test]
fn options_are_sanitized() {
    let o = FractalOptions::default()
        .with_octaves(0)
        .with_gain(-1.0)
        .with_lacunarity(f64::NAN);
    let s = o.sanitized();
    assert_eq!(s.octaves, 1);
    assert_eq!(s.gain, 0.0);
    assert_eq!(s.lacunarity, 2.0);
    assert_eq!(
        FractalOptions::default().with_octaves(99).sanitized().octaves,
        MAX_OCTAVES
    );
}

#[test]
fn normalized_preset_uses_simplex3_at_unit_amplitude() {
    let o = FractalOptions::normalized();
    assert_eq!(o.octaves, 4);
    assert_eq!(o.amplitude, 1.0);
    assert_eq!(o.basis, NoiseBasis::Simplex3);
}

#[test]
fn normalized_fbm_keeps_base_range() {
    let p = (uv() * 3.0).extend(time());
    let values = sample_f64(&fbm_normalized(&p, &FractalOptions::normalized().with_octaves(6)));
    assert!(values.iter().all(|v| v.abs() <= 1.2), "{values:?}");
}

#[test]
fn ridged_fbm_is_unit_interval() {
    let values = sample_f64(&ridged_fbm(&(uv() * 2.0), &FractalOptions::default()));
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)), "{values:?}");
}

#[test]
fn turbulence_is_non_negative() {
    let values = sample_f64(&turbulence(&uv(), &FractalOptions::default()));
    assert!(values.iter().all(|v| *v >= 0.0));
}

#[test]
fn domain_warp_is_finite() {
    let opts = DomainWarpOptions {
        fractal: FractalOptions::default().with_octaves(3),
        ..DomainWarpOptions::default()
    };
    assert!(sample_f64(&domain_warp(&uv(), &opts)).iter().all(|v| v.is_finite()));
}

#[test]
fn curl_noise_is_unit_or_zero_length() {
    let c = curl_noise(&(uv() * 2.0).extend(time()));
    for inputs in grid() {
        let v = evaluate(&c, inputs).unwrap();
        assert!(v.is_finite());
        let len = v.lanes().iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!(len < 1.0 + 1e-6, "{len}");
    }
}

#[test]
fn warped_coords_and_rotational_turbulence_are_finite() {
    let w = warped_fbm_coords(&uv(), &time(), &WarpedFbmOptions::default());
    assert!(sample_f64(&w).iter().all(|v| v.is_finite()));

    let t = turbulence_rotational(&uv(), &time(), &RotationalTurbulenceOptions::default());
    for inputs in grid() {
        let v = evaluate(&t, inputs).unwrap();
        assert_eq!(v.width(), 2);
        assert!(v.is_finite());
    }
}

#[test]
fn rotation_matrix_powers_compose() {
    let r2 = mat2_mul(TURB_ROTATION, TURB_ROTATION);
    // cos(2a) and sin(2a) for cos(a) = 0.6, sin(a) = 0.8
    assert!((r2[0][0] - -0.28).abs() < 1e-12);
    assert!((r2[1][1] - -0.28).abs() < 1e-12);
    assert!((r2[0][1].abs() - 0.96).abs() < 1e-12);
}
