use std::cell::Cell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::expr::ops::{
    BinaryOp, Builtin, TernaryOp, UnaryOp, apply_construct, apply_swizzle, swizzle_lane,
};
use crate::expr::value::{Value, ValueType};
use crate::foundation::math::Fnv1a64;

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

/// Lane indices selected by a swizzle node.
pub type SwizzleLanes = SmallVec<[u8; 4]>;

#[derive(Clone)]
/// Host-writable storage cell read by a uniform node.
///
/// Clones share the same cell. The value's shape is fixed at creation.
pub struct UniformSlot(Rc<SlotCell>);

struct SlotCell {
    id: u64,
    value: Cell<Value>,
}

impl UniformSlot {
    pub(crate) fn new(initial: Value) -> Self {
        Self(Rc::new(SlotCell {
            id: NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed),
            value: Cell::new(initial),
        }))
    }

    /// Process-unique slot id.
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// Current stored value.
    pub fn get(&self) -> Value {
        self.0.value.get()
    }

    /// Shape of the stored value.
    pub fn ty(&self) -> ValueType {
        self.0.value.get().ty()
    }

    pub(crate) fn set(&self, value: Value) {
        debug_assert_eq!(value.ty(), self.ty());
        self.0.value.set(value);
    }
}

impl fmt::Debug for UniformSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniformSlot")
            .field("id", &self.0.id)
            .field("value", &self.get())
            .finish()
    }
}

#[derive(Clone)]
/// The variants a compiler backend must understand.
pub enum NodeKind {
    /// Literal value.
    Const(Value),
    /// Read of a host-mutable storage cell.
    Uniform(UniformSlot),
    /// Render-attachment input.
    Input(Builtin),
    /// Single-operand operator.
    Unary(UnaryOp, Expr),
    /// Two-operand operator.
    Binary(BinaryOp, Expr, Expr),
    /// Three-operand operator.
    Ternary(TernaryOp, Expr, Expr, Expr),
    /// Vector built by concatenating the lanes of its parts.
    Construct(SmallVec<[Expr; 4]>),
    /// Lane selection.
    Swizzle(Expr, SwizzleLanes),
}

/// Immutable expression node. Reached through [`Expr`].
pub struct Node {
    kind: NodeKind,
    hash: u64,
}

#[derive(Clone)]
/// Shared handle to an immutable expression node.
///
/// Cloning is a reference-count bump; subtrees are shared freely between expressions.
pub struct Expr(Rc<Node>);

impl Expr {
    fn from_kind(kind: NodeKind) -> Self {
        let hash = hash_kind(&kind);
        Self(Rc::new(Node { kind, hash }))
    }

    /// Literal node.
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::from_kind(NodeKind::Const(value.into()))
    }

    /// Render-attachment input node.
    pub fn input(builtin: Builtin) -> Self {
        Self::from_kind(NodeKind::Input(builtin))
    }

    pub(crate) fn uniform(slot: &UniformSlot) -> Self {
        Self::from_kind(NodeKind::Uniform(slot.clone()))
    }

    /// Unary operator node, folded when the operand is constant.
    pub fn unary(op: UnaryOp, a: Expr) -> Self {
        if let Some(v) = a.as_const()
            && let Ok(folded) = op.apply(v)
        {
            return Self::constant(folded);
        }
        Self::from_kind(NodeKind::Unary(op, a))
    }

    /// Binary operator node, folded when both operands are constant.
    pub fn binary(op: BinaryOp, a: Expr, b: Expr) -> Self {
        if let (Some(x), Some(y)) = (a.as_const(), b.as_const())
            && let Ok(folded) = op.apply(x, y)
        {
            return Self::constant(folded);
        }
        Self::from_kind(NodeKind::Binary(op, a, b))
    }

    /// Ternary operator node, folded when all operands are constant.
    pub fn ternary(op: TernaryOp, a: Expr, b: Expr, c: Expr) -> Self {
        if let (Some(x), Some(y), Some(z)) = (a.as_const(), b.as_const(), c.as_const())
            && let Ok(folded) = op.apply(x, y, z)
        {
            return Self::constant(folded);
        }
        Self::from_kind(NodeKind::Ternary(op, a, b, c))
    }

    /// Vector construction from parts whose lanes are concatenated.
    pub fn construct(parts: impl IntoIterator<Item = Expr>) -> Self {
        let parts: SmallVec<[Expr; 4]> = parts.into_iter().collect();
        let consts: Option<Vec<Value>> = parts.iter().map(Expr::as_const).collect();
        if let Some(values) = consts
            && let Ok(folded) = apply_construct(&values)
        {
            return Self::constant(folded);
        }
        Self::from_kind(NodeKind::Construct(parts))
    }

    /// Swizzle by pattern (`"xy"`, `"bgr"`, ...). Unknown or out-of-range lanes are reported
    /// when the expression is evaluated.
    pub fn swizzle(&self, pattern: &str) -> Self {
        let lanes: SwizzleLanes = pattern.chars().map(swizzle_lane).collect();
        if let Some(v) = self.as_const()
            && let Ok(folded) = apply_swizzle(v, &lanes)
        {
            return Self::constant(folded);
        }
        Self::from_kind(NodeKind::Swizzle(self.clone(), lanes))
    }

    /// Same payload under a new allocation: structurally equal, never pointer-equal.
    pub(crate) fn detached(&self) -> Self {
        Self(Rc::new(Node {
            kind: self.0.kind.clone(),
            hash: self.0.hash,
        }))
    }

    /// Node payload.
    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    /// Structural hash cached at construction.
    pub fn structural_hash(&self) -> u64 {
        self.0.hash
    }

    /// Structural hash as 16 hex digits, usable as a program cache key.
    pub fn fingerprint(&self) -> String {
        format!("{:016x}", self.0.hash)
    }

    /// The literal value, if this is a constant node.
    pub fn as_const(&self) -> Option<Value> {
        match self.0.kind {
            NodeKind::Const(v) => Some(v),
            _ => None,
        }
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// Direct operands in evaluation order.
    pub fn children(&self) -> SmallVec<[&Expr; 4]> {
        match &self.0.kind {
            NodeKind::Const(_) | NodeKind::Uniform(_) | NodeKind::Input(_) => SmallVec::new(),
            NodeKind::Unary(_, a) | NodeKind::Swizzle(a, _) => smallvec::smallvec![a],
            NodeKind::Binary(_, a, b) => smallvec::smallvec![a, b],
            NodeKind::Ternary(_, a, b, c) => smallvec::smallvec![a, b, c],
            NodeKind::Construct(parts) => parts.iter().collect(),
        }
    }

    /// Number of distinct nodes reachable from this root.
    pub fn node_count(&self) -> usize {
        let mut seen = HashSet::new();
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            if seen.insert(e.addr()) {
                stack.extend(e.children());
            }
        }
        seen.len()
    }

    /// Distinct uniform slots read by this expression, in discovery order.
    pub fn uniforms(&self) -> Vec<UniformSlot> {
        let mut seen = HashSet::new();
        let mut ids = HashSet::new();
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            if !seen.insert(e.addr()) {
                continue;
            }
            if let NodeKind::Uniform(slot) = e.kind()
                && ids.insert(slot.id())
            {
                out.push(slot.clone());
            }
            stack.extend(e.children().into_iter().rev());
        }
        out
    }
}

fn hash_kind(kind: &NodeKind) -> u64 {
    let mut h = Fnv1a64::new_default();
    match kind {
        NodeKind::Const(v) => {
            h.write_u8(0);
            v.hash_into(&mut h);
        }
        NodeKind::Uniform(slot) => {
            h.write_u8(1);
            h.write_u64(slot.id());
        }
        NodeKind::Input(b) => {
            h.write_u8(2);
            h.write_u8(*b as u8);
        }
        NodeKind::Unary(op, a) => {
            h.write_u8(3);
            h.write_u8(*op as u8);
            h.write_u64(a.0.hash);
        }
        NodeKind::Binary(op, a, b) => {
            h.write_u8(4);
            h.write_u8(*op as u8);
            h.write_u64(a.0.hash);
            h.write_u64(b.0.hash);
        }
        NodeKind::Ternary(op, a, b, c) => {
            h.write_u8(5);
            h.write_u8(*op as u8);
            h.write_u64(a.0.hash);
            h.write_u64(b.0.hash);
            h.write_u64(c.0.hash);
        }
        NodeKind::Construct(parts) => {
            h.write_u8(6);
            h.write_u64(parts.len() as u64);
            for p in parts {
                h.write_u64(p.0.hash);
            }
        }
        NodeKind::Swizzle(a, lanes) => {
            h.write_u8(7);
            h.write_u64(a.0.hash);
            h.write_bytes(lanes);
        }
    }
    h.finish()
}

fn structurally_eq(a: &Expr, b: &Expr, proven: &mut HashSet<(usize, usize)>) -> bool {
    if Expr::ptr_eq(a, b) {
        return true;
    }
    if a.0.hash != b.0.hash {
        return false;
    }
    let key = (a.addr(), b.addr());
    if proven.contains(&key) {
        return true;
    }
    let eq = match (a.kind(), b.kind()) {
        (NodeKind::Const(x), NodeKind::Const(y)) => x.bit_eq(y),
        (NodeKind::Uniform(x), NodeKind::Uniform(y)) => x.id() == y.id(),
        (NodeKind::Input(x), NodeKind::Input(y)) => x == y,
        (NodeKind::Unary(o1, x), NodeKind::Unary(o2, y)) => {
            o1 == o2 && structurally_eq(x, y, proven)
        }
        (NodeKind::Binary(o1, x1, x2), NodeKind::Binary(o2, y1, y2)) => {
            o1 == o2 && structurally_eq(x1, y1, proven) && structurally_eq(x2, y2, proven)
        }
        (NodeKind::Ternary(o1, x1, x2, x3), NodeKind::Ternary(o2, y1, y2, y3)) => {
            o1 == o2
                && structurally_eq(x1, y1, proven)
                && structurally_eq(x2, y2, proven)
                && structurally_eq(x3, y3, proven)
        }
        (NodeKind::Construct(xs), NodeKind::Construct(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| structurally_eq(x, y, proven))
        }
        (NodeKind::Swizzle(x, l1), NodeKind::Swizzle(y, l2)) => {
            l1 == l2 && structurally_eq(x, y, proven)
        }
        _ => false,
    };
    if eq {
        proven.insert(key);
    }
    eq
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        structurally_eq(self, other, &mut HashSet::new())
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind() {
            NodeKind::Const(v) => return write!(f, "Expr(const {:?})", v.lanes()),
            NodeKind::Uniform(slot) => return write!(f, "Expr(uniform #{})", slot.id()),
            NodeKind::Input(b) => return write!(f, "Expr(input {b:?})"),
            NodeKind::Unary(op, _) => format!("{op:?}"),
            NodeKind::Binary(op, _, _) => format!("{op:?}"),
            NodeKind::Ternary(op, _, _, _) => format!("{op:?}"),
            NodeKind::Construct(parts) => format!("Construct[{}]", parts.len()),
            NodeKind::Swizzle(_, lanes) => format!("Swizzle{lanes:?}"),
        };
        write!(f, "Expr({tag} #{:016x})", self.0.hash)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expr/node.rs"]
mod tests;
