use std::rc::Rc;

use crate::expr::node::Expr;
use crate::foundation::error::WeaveResult;

/// Boundary to the expression-to-GPU compiler.
///
/// Implementations must accept every [`crate::expr::NodeKind`] variant. Uniform nodes become
/// program inputs whose values are read from their slots at draw time, so the compiled
/// program stays valid while uniforms change.
pub trait ProgramCompiler {
    /// Opaque compiled artifact.
    type Program;

    /// Compile `root` into a program.
    fn compile(&mut self, root: &Expr) -> WeaveResult<Self::Program>;
}

/// Recompiles only when the root expression changes structurally.
pub struct ProgramCache<C: ProgramCompiler> {
    compiler: C,
    current: Option<(Expr, Rc<C::Program>)>,
    compiles: u64,
}

impl<C: ProgramCompiler> ProgramCache<C> {
    /// Empty cache around `compiler`.
    pub fn new(compiler: C) -> Self {
        Self {
            compiler,
            current: None,
            compiles: 0,
        }
    }

    /// Program for `root`, compiling on first use or after a structural change.
    pub fn program_for(&mut self, root: &Expr) -> WeaveResult<Rc<C::Program>> {
        if let Some((cached_root, program)) = &self.current
            && cached_root == root
        {
            return Ok(Rc::clone(program));
        }
        let program = Rc::new(self.compiler.compile(root)?);
        self.compiles += 1;
        tracing::debug!(
            nodes = root.node_count(),
            uniforms = root.uniforms().len(),
            compiles = self.compiles,
            "compiled program"
        );
        self.current = Some((root.clone(), Rc::clone(&program)));
        Ok(program)
    }

    /// Number of successful compilations so far.
    pub fn compile_count(&self) -> u64 {
        self.compiles
    }

    /// Drop the cached program.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    /// The wrapped compiler.
    pub fn compiler(&self) -> &C {
        &self.compiler
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expr/compile.rs"]
mod tests;
