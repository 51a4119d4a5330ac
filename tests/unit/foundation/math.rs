use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"shaderweave");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b's');
    b.write_bytes(b"haderweave");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_distinguishes_signed_zero() {
    let mut a = Fnv1a64::new_default();
    a.write_f64(0.0);
    let mut b = Fnv1a64::new_default();
    b.write_f64(-0.0);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn glsl_mod_follows_divisor_sign() {
    assert_eq!(glsl_mod(5.5, 2.0), 1.5);
    assert_eq!(glsl_mod(-0.5, 2.0), 1.5);
    assert!((glsl_mod(300.0, 289.0) - 11.0).abs() < 1e-12);
}

#[test]
fn fract_is_half_open() {
    assert_eq!(fract(1.0), 0.0);
    assert_eq!(fract(-0.25), 0.75);
    for x in [-1e-17, -1e-300, -f64::MIN_POSITIVE] {
        let f = fract(x);
        assert!((0.0..1.0).contains(&f), "fract({x}) = {f}");
    }
    assert!(fract(f64::NAN).is_nan());
}

#[test]
fn smoothstep_handles_degenerate_edges() {
    assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    assert_eq!(smoothstep(1.0, 1.0, 0.5), 0.0);
    assert_eq!(smoothstep(1.0, 1.0, 1.0), 1.0);
    assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
}
