use super::*;
use crate::animation::FrameScheduler;
use crate::runtime::context::RuntimeOptions;

#[test]
fn empty_scope_fails_fast() {
    let scope = RuntimeScope::root();
    let err = scope.runtime().unwrap_err();
    assert!(matches!(err, WeaveError::Scope(_)));
    assert_eq!(err.to_string(), "scope error: no runtime in scope");
    assert!(matches!(scope.graph(), Err(WeaveError::Scope(_))));
}

#[test]
fn children_inherit_and_parents_stay_untouched() {
    let s = FrameScheduler::new();
    let rt = Rc::new(RuntimeContext::new(&s, RuntimeOptions::default()).unwrap());
    let root = RuntimeScope::root();
    let with_rt = root.with_runtime(Rc::clone(&rt));
    let graph = Rc::new(CompositionGraph::new());
    let leaf = with_rt.with_graph(Rc::clone(&graph));

    assert!(Rc::ptr_eq(&leaf.runtime().unwrap(), &rt));
    assert!(Rc::ptr_eq(&leaf.graph().unwrap(), &graph));
    assert!(with_rt.graph().is_err());
    assert!(root.runtime().is_err());
}

#[test]
fn nearest_graph_wins() {
    let outer = Rc::new(CompositionGraph::new());
    let inner = Rc::new(CompositionGraph::new());
    let scope = RuntimeScope::root()
        .with_graph(Rc::clone(&outer))
        .with_graph(Rc::clone(&inner));
    assert!(Rc::ptr_eq(&scope.graph().unwrap(), &inner));
}
