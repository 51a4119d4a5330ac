use super::*;

#[test]
fn binary_ops_broadcast_scalars() {
    let v = BinaryOp::Mul
        .apply(Value::vec3(1.0, 2.0, 3.0), Value::float(2.0))
        .unwrap();
    assert_eq!(v, Value::vec3(2.0, 4.0, 6.0));
    let v = BinaryOp::Sub
        .apply(Value::float(1.0), Value::vec2(0.25, 0.5))
        .unwrap();
    assert_eq!(v, Value::vec2(0.75, 0.5));
}

#[test]
fn mismatched_widths_are_evaluation_errors() {
    let err = BinaryOp::Add
        .apply(Value::vec2(1.0, 2.0), Value::vec3(1.0, 2.0, 3.0))
        .unwrap_err();
    assert!(matches!(err, WeaveError::Evaluation(_)));
    assert!(
        BinaryOp::Cross
            .apply(Value::vec2(1.0, 0.0), Value::vec2(0.0, 1.0))
            .is_err()
    );
}

#[test]
fn step_takes_edge_first() {
    assert_eq!(
        BinaryOp::Step
            .apply(Value::float(0.5), Value::float(0.5))
            .unwrap(),
        Value::float(1.0)
    );
    assert_eq!(
        BinaryOp::Step
            .apply(Value::float(0.5), Value::float(0.4))
            .unwrap(),
        Value::float(0.0)
    );
}

#[test]
fn cross_and_dot() {
    let x = Value::vec3(1.0, 0.0, 0.0);
    let y = Value::vec3(0.0, 1.0, 0.0);
    assert_eq!(
        BinaryOp::Cross.apply(x, y).unwrap(),
        Value::vec3(0.0, 0.0, 1.0)
    );
    assert_eq!(BinaryOp::Dot.apply(x, y).unwrap(), Value::float(0.0));
    assert_eq!(
        BinaryOp::Distance
            .apply(Value::vec2(0.0, 0.0), Value::vec2(3.0, 4.0))
            .unwrap(),
        Value::float(5.0)
    );
}

#[test]
fn sign_of_zero_is_zero() {
    assert_eq!(
        UnaryOp::Sign.apply(Value::vec3(-2.0, 0.0, 3.0)).unwrap(),
        Value::vec3(-1.0, 0.0, 1.0)
    );
}

#[test]
fn ternary_ops_match_shading_language_semantics() {
    let mixed = TernaryOp::Mix
        .apply(Value::float(0.0), Value::float(10.0), Value::float(0.25))
        .unwrap();
    assert_eq!(mixed, Value::float(2.5));
    let selected = TernaryOp::Select
        .apply(
            Value::vec2(1.0, 0.0),
            Value::vec2(5.0, 5.0),
            Value::float(7.0),
        )
        .unwrap();
    assert_eq!(selected, Value::vec2(5.0, 7.0));
}

#[test]
fn swizzles_and_constructs() {
    let v = Value::vec4(1.0, 2.0, 3.0, 4.0);
    let lanes: Vec<u8> = "wzx".chars().map(swizzle_lane).collect();
    assert_eq!(apply_swizzle(v, &lanes).unwrap(), Value::vec3(4.0, 3.0, 1.0));
    let bad: Vec<u8> = "xq".chars().map(swizzle_lane).collect();
    assert!(apply_swizzle(Value::vec2(1.0, 2.0), &bad).is_err());
    assert!(apply_swizzle(v, &[swizzle_lane('k')]).is_err());
    let built = apply_construct(&[Value::vec2(1.0, 2.0), Value::float(3.0)]).unwrap();
    assert_eq!(built, Value::vec3(1.0, 2.0, 3.0));
    assert!(apply_construct(&[v, Value::float(1.0)]).is_err());
}
