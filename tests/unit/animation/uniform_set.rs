use super::*;
use crate::expr::{EvalInputs, evaluate};

const DECLS: &str = r##"{
    "intensity": 0.5,
    "offset": [0.1, 0.2],
    "axis": [0.0, 1.0, 0.0],
    "tint": "#ff0000"
}"##;

#[test]
fn json_declarations_pick_types_by_shape() {
    let s = FrameScheduler::new();
    let set = UniformSet::from_json(&s, DECLS).unwrap();
    assert_eq!(set.len(), 4);
    assert_eq!(
        set.names().collect::<Vec<_>>(),
        ["axis", "intensity", "offset", "tint"]
    );
    assert!(matches!(set.get("intensity"), Some(AnyUniform::Float(_))));
    assert!(matches!(set.get("offset"), Some(AnyUniform::Vec2(_))));
    assert!(matches!(set.get("axis"), Some(AnyUniform::Vec3(_))));
    assert!(matches!(set.get("tint"), Some(AnyUniform::Color(_))));
}

#[test]
fn set_writes_through_the_node() {
    let s = FrameScheduler::new();
    let set = UniformSet::from_json(&s, DECLS).unwrap();
    let e = set.node("intensity").unwrap() * 2.0;
    set.set("intensity", 2.0).unwrap();
    assert_eq!(
        evaluate(&e, EvalInputs::default()).unwrap(),
        Value::float(4.0)
    );
}

#[test]
fn type_mismatch_and_unknown_names_are_rejected() {
    let s = FrameScheduler::new();
    let set = UniformSet::from_json(&s, DECLS).unwrap();
    assert!(matches!(
        set.set("intensity", [1.0, 2.0]),
        Err(WeaveError::Validation(_))
    ));
    assert!(matches!(set.node("missing"), Err(WeaveError::Validation(_))));
    assert!(set.set("tint", [0.2, 0.4, 0.6]).is_ok());
    assert_eq!(set.get("tint").unwrap().value(), Value::vec3(0.2, 0.4, 0.6));
}

#[test]
fn reset_restores_declared_values() {
    let s = FrameScheduler::new();
    let set = UniformSet::from_json(&s, DECLS).unwrap();
    set.set("offset", [9.0, 9.0]).unwrap();
    set.reset();
    assert_eq!(set.get("offset").unwrap().value(), Value::vec2(0.1, 0.2));
}

#[test]
fn bad_declarations_fail_construction() {
    let s = FrameScheduler::new();
    assert!(matches!(
        UniformSet::from_json(&s, r#"{"tint": "not a color"}"#),
        Err(WeaveError::Validation(_))
    ));
    assert!(matches!(
        UniformSet::from_json(&s, r#"{"v": [1, 2, 3, 4]}"#),
        Err(WeaveError::Serde(_))
    ));
    assert!(
        UniformSet::from_decls(&s, [("k", UniformDecl::from(1.0))])
            .unwrap()
            .node("k")
            .is_ok()
    );
}
