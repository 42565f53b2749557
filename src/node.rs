use std::fmt::{Display, Formatter};

use crate::reference::NodeId;

/// Binary connective.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinOp {
    And,
    Or,
}

impl BinOp {
    /// The De Morgan dual: `AND` <-> `OR`.
    pub const fn flip(self) -> Self {
        match self {
            BinOp::And => BinOp::Or,
            BinOp::Or => BinOp::And,
        }
    }

    /// The literal that makes the whole chain constant (`FALSE` for `AND`, `TRUE` for `OR`).
    pub const fn absorbing(self) -> bool {
        matches!(self, BinOp::Or)
    }

    /// The literal that vanishes from a chain (`TRUE` for `AND`, `FALSE` for `OR`).
    pub const fn neutral(self) -> bool {
        matches!(self, BinOp::And)
    }

    pub fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            BinOp::And => lhs && rhs,
            BinOp::Or => lhs || rhs,
        }
    }

    /// Binding strength in the concrete syntax (higher binds tighter).
    pub(crate) const fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
        }
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BinOp::And => write!(f, "AND"),
            BinOp::Or => write!(f, "OR"),
        }
    }
}

/// Variant tag of a node, used to route nodes to the strategies targeting them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Variant {
    Root,
    BinaryOp,
    Not,
    Parens,
    Id,
    Literal,
}

/// Payload of a node: its variant together with the handles of its children.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum NodeKind {
    Root(NodeId),
    BinaryOp { op: BinOp, left: NodeId, right: NodeId },
    Not(NodeId),
    Parens(NodeId),
    Id(String),
    Literal(bool),
}

impl NodeKind {
    pub fn variant(&self) -> Variant {
        match self {
            NodeKind::Root(_) => Variant::Root,
            NodeKind::BinaryOp { .. } => Variant::BinaryOp,
            NodeKind::Not(_) => Variant::Not,
            NodeKind::Parens(_) => Variant::Parens,
            NodeKind::Id(_) => Variant::Id,
            NodeKind::Literal(_) => Variant::Literal,
        }
    }

    /// Number of child slots.
    pub fn arity(&self) -> usize {
        match self {
            NodeKind::BinaryOp { .. } => 2,
            NodeKind::Root(_) | NodeKind::Not(_) | NodeKind::Parens(_) => 1,
            NodeKind::Id(_) | NodeKind::Literal(_) => 0,
        }
    }

    /// Child in the given slot (`0` is the only/left slot, `1` the right one).
    pub fn child(&self, slot: usize) -> Option<NodeId> {
        match (self, slot) {
            (NodeKind::Root(c) | NodeKind::Not(c) | NodeKind::Parens(c), 0) => Some(*c),
            (NodeKind::BinaryOp { left, .. }, 0) => Some(*left),
            (NodeKind::BinaryOp { right, .. }, 1) => Some(*right),
            _ => None,
        }
    }

    pub(crate) fn child_mut(&mut self, slot: usize) -> Option<&mut NodeId> {
        match (self, slot) {
            (NodeKind::Root(c) | NodeKind::Not(c) | NodeKind::Parens(c), 0) => Some(c),
            (NodeKind::BinaryOp { left, .. }, 0) => Some(left),
            (NodeKind::BinaryOp { right, .. }, 1) => Some(right),
            _ => None,
        }
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.arity()).filter_map(move |slot| self.child(slot))
    }
}

/// A node record stored in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Non-owning back-reference; `None` only for roots.
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, parent: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip() {
        assert_eq!(BinOp::And.flip(), BinOp::Or);
        assert_eq!(BinOp::Or.flip(), BinOp::And);
    }

    #[test]
    fn test_absorbing_and_neutral() {
        assert!(!BinOp::And.absorbing());
        assert!(BinOp::And.neutral());
        assert!(BinOp::Or.absorbing());
        assert!(!BinOp::Or.neutral());
        for op in [BinOp::And, BinOp::Or] {
            for x in [false, true] {
                assert_eq!(op.apply(x, op.neutral()), x);
                assert_eq!(op.apply(x, op.absorbing()), op.absorbing());
            }
        }
    }

    #[test]
    fn test_slots() {
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        let kind = NodeKind::BinaryOp {
            op: BinOp::And,
            left: a,
            right: b,
        };
        assert_eq!(kind.variant(), Variant::BinaryOp);
        assert_eq!(kind.arity(), 2);
        assert_eq!(kind.child(0), Some(a));
        assert_eq!(kind.child(1), Some(b));
        assert_eq!(kind.child(2), None);
        assert_eq!(kind.children().collect::<Vec<_>>(), vec![a, b]);

        let leaf = NodeKind::Literal(true);
        assert_eq!(leaf.arity(), 0);
        assert_eq!(leaf.children().count(), 0);
    }
}
