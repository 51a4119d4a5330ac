use super::*;
use crate::expr::build::{dot, float, time, uv, vec2};
use crate::expr::node::UniformSlot;

#[test]
fn builtins_read_bound_inputs() {
    let inputs = EvalInputs::at(Vec2::new(0.1, 0.2)).with_time(3.0);
    let mut ev = Evaluator::new(inputs);
    assert_eq!(ev.eval_f64(&time()).unwrap(), 3.0);
    assert_eq!(ev.eval(&uv()).unwrap(), Value::vec2(0.1, 0.2));
}

#[test]
fn uniform_writes_are_visible_without_rebuilding() {
    let slot = UniformSlot::new(Value::float(0.5));
    let e = Expr::uniform(&slot) * 2.0;
    let mut ev = Evaluator::new(EvalInputs::default());
    assert_eq!(ev.eval_f64(&e).unwrap(), 1.0);
    slot.set(Value::float(2.0));
    assert_eq!(ev.eval_f64(&e).unwrap(), 4.0);
}

#[test]
fn type_errors_surface_as_evaluation_errors() {
    let e = uv() + vec2(1.0, 2.0).swizzle("xyz");
    let err = evaluate(&e, EvalInputs::default()).unwrap_err();
    assert!(matches!(err, WeaveError::Evaluation(_)));

    let bad_dot = dot(uv(), float(1.0) + time());
    assert!(evaluate(&bad_dot, EvalInputs::default()).is_err());
}

#[test]
fn eval_f64_rejects_vectors() {
    assert!(Evaluator::new(EvalInputs::default()).eval_f64(&uv()).is_err());
}

#[test]
fn deep_shared_dags_evaluate_linearly() {
    let mut e = uv().x();
    for _ in 0..80 {
        e = &e + &e;
    }
    let v = Evaluator::new(EvalInputs::at(Vec2::new(1.0, 0.0)))
        .eval_f64(&e)
        .unwrap();
    assert_eq!(v, 2f64.powi(80));
}
