//! Arena-backed syntax trees.
//!
//! [`Ast`] is the manager for syntax tree nodes, much like a decision diagram manager is
//! for its nodes: every node lives in one flat [`Table`] and is referred to by a
//! lightweight [`NodeId`] handle. Children are owned exclusively by their parent, and each
//! node carries a non-owning back-reference to that parent. All mutation (child slot
//! overwrites, parent retargeting, freeing spliced-out subtrees) goes through `Ast`.
//!
//! One arena may host several independent trees, each anchored at its own `Root` node.
//!
//! ```
//! use boolopt::ast::Ast;
//!
//! let mut ast = Ast::new();
//! let x = ast.mk_id("x");
//! let y = ast.mk_id("y");
//! let or = ast.mk_or(x, y);
//! let root = ast.mk_root(or);
//!
//! assert_eq!(ast.parent(or), Some(root));
//! assert_eq!(ast.display(root).to_string(), "x OR y");
//! ```

use std::collections::BTreeSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::expr::Expr;
use crate::node::{BinOp, Node, NodeKind, Variant};
use crate::reference::NodeId;
use crate::table::Table;

#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Table<Node>,
    /// Roots in creation order.
    roots: Vec<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let children: Vec<NodeId> = kind.children().collect();
        let id = NodeId::new(self.nodes.add(Node::new(kind)));
        for child in children {
            self.set_parent(child, Some(id));
        }
        id
    }

    /// Wrap `child` into a new `Root` node.
    pub fn mk_root(&mut self, child: NodeId) -> NodeId {
        assert!(
            self.parent(child).is_none(),
            "Node {} is already attached to {:?}",
            child,
            self.parent(child)
        );
        let id = self.alloc(NodeKind::Root(child));
        self.roots.push(id);
        id
    }

    pub fn mk_binary(&mut self, op: BinOp, left: NodeId, right: NodeId) -> NodeId {
        assert_ne!(left, right, "A node cannot occupy two slots");
        self.alloc(NodeKind::BinaryOp { op, left, right })
    }

    pub fn mk_and(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.mk_binary(BinOp::And, left, right)
    }

    pub fn mk_or(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.mk_binary(BinOp::Or, left, right)
    }

    pub fn mk_not(&mut self, child: NodeId) -> NodeId {
        self.alloc(NodeKind::Not(child))
    }

    pub fn mk_parens(&mut self, child: NodeId) -> NodeId {
        self.alloc(NodeKind::Parens(child))
    }

    pub fn mk_id(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Id(name.into()))
    }

    pub fn mk_literal(&mut self, value: bool) -> NodeId {
        self.alloc(NodeKind::Literal(value))
    }

    pub fn mk_true(&mut self) -> NodeId {
        self.mk_literal(true)
    }

    pub fn mk_false(&mut self) -> NodeId {
        self.mk_literal(false)
    }
}

impl Ast {
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.index()].kind
    }

    pub fn variant(&self, node: NodeId) -> Variant {
        self.kind(node).variant()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    pub fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        self.nodes[node.index()].parent = parent;
    }

    pub fn child(&self, node: NodeId, slot: usize) -> Option<NodeId> {
        self.kind(node).child(slot)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.kind(node).children()
    }

    /// Overwrite a child slot of `node`, pointing `child`'s parent back at `node`.
    pub fn set_child(&mut self, node: NodeId, slot: usize, child: NodeId) {
        let Some(target) = self.nodes[node.index()].kind.child_mut(slot) else {
            panic!("Node {} has no child slot {}", node, slot);
        };
        *target = child;
        self.set_parent(child, Some(node));
    }

    /// Check whether the handle still refers to a node in the arena.
    pub fn is_live(&self, node: NodeId) -> bool {
        self.nodes.is_occupied(node.index())
    }

    /// Number of nodes currently stored in the arena.
    pub fn live_nodes(&self) -> usize {
        self.nodes.real_size()
    }

    /// Roots of all trees in the arena, in creation order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The expression wrapped by a `Root` node.
    pub fn root_child(&self, root: NodeId) -> NodeId {
        match self.kind(root) {
            NodeKind::Root(child) => *child,
            other => panic!("Node {} is not a root: {:?}", root, other),
        }
    }

    /// Follow `Parens` wrappers down to the first node that is not one.
    pub fn peel_parens(&self, mut node: NodeId) -> NodeId {
        while let NodeKind::Parens(child) = self.kind(node) {
            node = *child;
        }
        node
    }

    /// Operands of the maximal `op`-chain rooted at `node`, left to right.
    ///
    /// The chain extends through any `Parens` wrappers; operands are returned with their
    /// own wrappers peeled. A node that is not an `op` node forms a chain of one.
    pub fn chain_operands(&self, node: NodeId, op: BinOp) -> Vec<NodeId> {
        let mut operands = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let id = self.peel_parens(id);
            match self.kind(id) {
                NodeKind::BinaryOp { op: o, left, right } if *o == op => {
                    stack.push(*right);
                    stack.push(*left);
                }
                _ => operands.push(id),
            }
        }
        operands
    }
}

// Replacement
impl Ast {
    /// Put `new` into the parent slot currently held by `old`.
    ///
    /// `old` itself is left untouched (and still allocated); see [`Ast::substitute`] for the
    /// variant that also frees it.
    ///
    /// # Panics
    ///
    /// Panics if `old` has no parent.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        let Some(parent) = self.parent(old) else {
            panic!("Cannot replace parentless node {}", old);
        };
        let slot = self.slot_of(parent, old);
        self.set_child(parent, slot, new);
    }

    /// Index of the child slot of `parent` that holds `child`.
    fn slot_of(&self, parent: NodeId, child: NodeId) -> usize {
        match self.kind(parent) {
            NodeKind::BinaryOp { left, right, .. } => {
                if *left == child {
                    0
                } else {
                    assert_eq!(*right, child, "Parent {} does not hold {}", parent, child);
                    1
                }
            }
            NodeKind::Root(c) | NodeKind::Not(c) | NodeKind::Parens(c) => {
                assert_eq!(*c, child, "Parent {} does not hold {}", parent, child);
                0
            }
            NodeKind::Id(_) | NodeKind::Literal(_) => {
                unreachable!("Leaf {} cannot be a parent", parent)
            }
        }
    }

    /// Splice `candidate` into the position held by `old` and free the discarded nodes.
    ///
    /// Subtrees referenced by [`Expr::Existing`] are moved into the new position (this may
    /// include `old` itself); everything else below `old` is freed. Returns the handles of the
    /// freshly allocated nodes in post-order (the new top node, if fresh, comes last).
    pub fn substitute(&mut self, old: NodeId, candidate: Expr) -> Vec<NodeId> {
        let Some(parent) = self.parent(old) else {
            panic!("Cannot replace parentless node {}", old);
        };
        // The slot must be located before grafting: the candidate may adopt `old` itself.
        let slot = self.slot_of(parent, old);

        let mut fresh = Vec::with_capacity(candidate.fresh_count());
        let new = self.graft(candidate, &mut fresh);
        assert_ne!(new, old, "Node {} cannot replace itself", old);
        self.set_child(parent, slot, new);

        if self.parent(old) == Some(parent) {
            self.release(old);
        }
        fresh
    }

    fn graft(&mut self, candidate: Expr, fresh: &mut Vec<NodeId>) -> NodeId {
        let id = match candidate {
            Expr::Existing(id) => {
                assert!(self.is_live(id), "Candidate references freed node {}", id);
                return id;
            }
            Expr::BinaryOp(op, lhs, rhs) => {
                let left = self.graft(*lhs, fresh);
                let right = self.graft(*rhs, fresh);
                self.mk_binary(op, left, right)
            }
            Expr::Not(e) => {
                let child = self.graft(*e, fresh);
                self.mk_not(child)
            }
            Expr::Parens(e) => {
                let child = self.graft(*e, fresh);
                self.mk_parens(child)
            }
            Expr::Id(name) => self.mk_id(name),
            Expr::Literal(value) => self.mk_literal(value),
        };
        fresh.push(id);
        id
    }

    /// Free a single node outside every rooted tree. Its children are left alone.
    pub(crate) fn discard(&mut self, node: NodeId) {
        self.nodes.drop(node.index());
    }

    /// Free `node` and every descendant still owned through it. Returns the number of freed nodes.
    fn release(&mut self, node: NodeId) -> usize {
        let mut freed = 0;
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let removed = self.nodes.drop(id.index());
            for child in removed.kind.children() {
                // Children moved elsewhere now point at their new parent.
                if self.parent(child) == Some(id) {
                    stack.push(child);
                }
            }
            freed += 1;
        }
        freed
    }
}

// Equality
impl Ast {
    /// Structural equality of two subtrees of this arena.
    pub fn structural_eq(&self, a: NodeId, b: NodeId) -> bool {
        self.structural_eq_in(a, self, b)
    }

    /// Structural equality of `a` in this arena and `b` in `other`.
    ///
    /// Variant tags and leaf values must match recursively; `Parens` wrappers count.
    pub fn structural_eq_in(&self, a: NodeId, other: &Ast, b: NodeId) -> bool {
        let mut stack = vec![(a, b)];
        while let Some((a, b)) = stack.pop() {
            match (self.kind(a), other.kind(b)) {
                (NodeKind::Root(x), NodeKind::Root(y))
                | (NodeKind::Not(x), NodeKind::Not(y))
                | (NodeKind::Parens(x), NodeKind::Parens(y)) => stack.push((*x, *y)),
                (
                    NodeKind::BinaryOp { op: p, left: l1, right: r1 },
                    NodeKind::BinaryOp { op: q, left: l2, right: r2 },
                ) => {
                    if p != q {
                        return false;
                    }
                    stack.push((*r1, *r2));
                    stack.push((*l1, *l2));
                }
                (NodeKind::Id(x), NodeKind::Id(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (NodeKind::Literal(x), NodeKind::Literal(y)) => {
                    if x != y {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }

    /// Hash of the subtree shape, consistent with [`Ast::structural_eq`]: structurally equal
    /// subtrees hash equally. Distinct shapes may collide.
    pub fn structural_hash(&self, node: NodeId) -> u64 {
        let mut hasher = DefaultHasher::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let kind = self.kind(id);
            kind.variant().hash(&mut hasher);
            match kind {
                NodeKind::BinaryOp { op, left, right } => {
                    op.hash(&mut hasher);
                    stack.push(*right);
                    stack.push(*left);
                }
                NodeKind::Root(c) | NodeKind::Not(c) | NodeKind::Parens(c) => stack.push(*c),
                NodeKind::Id(name) => name.hash(&mut hasher),
                NodeKind::Literal(value) => value.hash(&mut hasher),
            }
        }
        hasher.finish()
    }

    /// Check whether grafting `candidate` in place of `node` would yield a structurally equal tree.
    pub fn matches(&self, node: NodeId, candidate: &Expr) -> bool {
        match (self.kind(node), candidate) {
            (_, Expr::Existing(id)) => self.structural_eq(node, *id),
            (NodeKind::BinaryOp { op, left, right }, Expr::BinaryOp(o, l, r)) => {
                op == o && self.matches(*left, l) && self.matches(*right, r)
            }
            (NodeKind::Not(c), Expr::Not(e)) | (NodeKind::Parens(c), Expr::Parens(e)) => {
                self.matches(*c, e)
            }
            (NodeKind::Id(x), Expr::Id(y)) => x == y,
            (NodeKind::Literal(x), Expr::Literal(y)) => x == y,
            _ => false,
        }
    }

    /// Equality modulo associativity and commutativity of `AND`/`OR` chains.
    ///
    /// `Parens` wrappers are ignored, and the operands of two chains of the same operator are
    /// compared as multisets, so `a OR b OR c` equals `c OR (a OR b)`.
    pub fn ac_eq(&self, a: NodeId, b: NodeId) -> bool {
        let a = self.peel_parens(a);
        let b = self.peel_parens(b);
        match (self.kind(a), self.kind(b)) {
            (NodeKind::Root(x), NodeKind::Root(y)) | (NodeKind::Not(x), NodeKind::Not(y)) => {
                self.ac_eq(*x, *y)
            }
            (NodeKind::BinaryOp { op: p, .. }, NodeKind::BinaryOp { op: q, .. }) => {
                if p != q {
                    return false;
                }
                let xs = self.chain_operands(a, *p);
                let ys = self.chain_operands(b, *q);
                if xs.len() != ys.len() {
                    return false;
                }
                let mut used = vec![false; ys.len()];
                xs.iter().all(|&x| {
                    let found = (0..ys.len()).find(|&i| !used[i] && self.ac_eq(x, ys[i]));
                    match found {
                        Some(i) => {
                            used[i] = true;
                            true
                        }
                        None => false,
                    }
                })
            }
            (NodeKind::Id(x), NodeKind::Id(y)) => x == y,
            (NodeKind::Literal(x), NodeKind::Literal(y)) => x == y,
            _ => false,
        }
    }
}

impl PartialEq for Ast {
    /// Two arenas are equal when their trees are pairwise structurally equal, in root creation order.
    fn eq(&self, other: &Self) -> bool {
        self.roots.len() == other.roots.len()
            && self
                .roots
                .iter()
                .zip(other.roots.iter())
                .all(|(&a, &b)| self.structural_eq_in(a, other, b))
    }
}

// Inspection
impl Ast {
    /// Evaluate the subtree under the given assignment of identifiers.
    pub fn eval<F>(&self, node: NodeId, assignment: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self.kind(node) {
            NodeKind::Root(c) | NodeKind::Parens(c) => self.eval(*c, assignment),
            NodeKind::Not(c) => !self.eval(*c, assignment),
            NodeKind::BinaryOp { op, left, right } => {
                let lhs = self.eval(*left, assignment);
                let rhs = self.eval(*right, assignment);
                op.apply(lhs, rhs)
            }
            NodeKind::Id(name) => assignment(name),
            NodeKind::Literal(value) => *value,
        }
    }

    /// Names of the identifiers occurring in the subtree.
    pub fn variables(&self, node: NodeId) -> BTreeSet<&str> {
        self.descendants(node)
            .into_iter()
            .filter_map(|id| match self.kind(id) {
                NodeKind::Id(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All nodes of the subtree in pre-order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            result.push(id);
            let children: Vec<NodeId> = self.children(id).collect();
            stack.extend(children.into_iter().rev());
        }
        result
    }

    /// Number of nodes in the subtree.
    pub fn size(&self, node: NodeId) -> usize {
        self.descendants(node).len()
    }

    /// Depth of the subtree (0 for leaves).
    pub fn depth(&self, node: NodeId) -> usize {
        self.children(node)
            .map(|child| 1 + self.depth(child))
            .max()
            .unwrap_or(0)
    }
}
