use super::*;
use crate::expr::build::uv;

#[derive(Default)]
struct CountingCompiler {
    calls: usize,
}

impl ProgramCompiler for CountingCompiler {
    type Program = usize;

    fn compile(&mut self, root: &Expr) -> WeaveResult<usize> {
        self.calls += 1;
        Ok(root.node_count())
    }
}

#[test]
fn structurally_equal_roots_reuse_the_program() {
    let mut cache = ProgramCache::new(CountingCompiler::default());
    let a = cache.program_for(&(uv() * 2.0)).unwrap();
    let b = cache.program_for(&(uv() * 2.0)).unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.compile_count(), 1);
    assert_eq!(*a, 3);
}

#[test]
fn changed_roots_recompile() {
    let mut cache = ProgramCache::new(CountingCompiler::default());
    cache.program_for(&uv()).unwrap();
    cache.program_for(&(uv() + 1.0)).unwrap();
    assert_eq!(cache.compiler().calls, 2);
    cache.invalidate();
    cache.program_for(&(uv() + 1.0)).unwrap();
    assert_eq!(cache.compile_count(), 3);
}
