use super::*;
use crate::expr::eval::{EvalInputs, evaluate};

fn eval(e: &Expr) -> Value {
    evaluate(e, EvalInputs::at(Vec2::new(0.25, 0.75))).unwrap()
}

#[test]
fn operators_cover_owned_borrowed_and_scalar_operands() {
    let a = uv();
    let b = uv() * 2.0;
    let sum = &a + &b;
    assert_eq!(eval(&sum), Value::vec2(0.75, 2.25));
    let scaled = 2.0 * &a - 1.0;
    assert_eq!(eval(&scaled), Value::vec2(-0.5, 0.5));
    let neg = -(a.clone() / 0.5);
    assert_eq!(eval(&neg), Value::vec2(-0.5, -1.5));
}

#[test]
fn constructors_accept_mixed_parts() {
    let p = uv().extend(1.0);
    assert_eq!(eval(&p), Value::from_lanes(&[0.25, 0.75, 1.0]).unwrap());
    let c = vec4(uv().x(), 0.5, [1.0, 2.0], 9.0);
    assert!(evaluate(&c, EvalInputs::default()).is_err());
    assert_eq!(eval(&splat3(0.5)), Value::vec3(0.5, 0.5, 0.5));
}

#[test]
fn host_types_convert_into_constants() {
    assert_eq!(
        Expr::from(Color::new(0.1, 0.2, 0.3)).as_const(),
        Some(Value::vec3(0.1, 0.2, 0.3))
    );
    assert_eq!(
        Expr::from(Vec2::new(1.0, 2.0)).as_const(),
        Some(Value::vec2(1.0, 2.0))
    );
}

#[test]
fn helper_functions_evaluate_like_glsl() {
    assert_eq!(eval(&mix(0.0, 10.0, uv().x())), Value::float(2.5));
    assert_eq!(eval(&smoothstep(0.0, 1.0, uv().x())), Value::float(0.15625));
    assert_eq!(eval(&step(0.5, uv())), Value::vec2(0.0, 1.0));
    assert_eq!(eval(&uv().one_minus()), Value::vec2(0.75, 0.25));
    assert_eq!(eval(&modulo(uv() * 5.0, 1.0)), Value::vec2(0.25, 0.75));
}

#[test]
fn swizzle_shortcuts() {
    let v = uv().extend(3.0);
    assert_eq!(eval(&v.z()), Value::float(3.0));
    assert_eq!(eval(&v.xy()), Value::vec2(0.25, 0.75));
    assert_eq!(eval(&v.swizzle("bgr")), Value::vec3(3.0, 0.75, 0.25));
}
