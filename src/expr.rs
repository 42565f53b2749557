//! Owned candidate trees.
//!
//! A strategy never touches the arena while it is deciding what to do. Instead it builds an
//! [`Expr`]: a boxed tree of brand-new nodes whose leaves may point back at existing subtrees
//! via [`Expr::Existing`]. Once the candidate is accepted, [`Ast::substitute`] grafts it into
//! the arena in a single step.
//!
//! [`Ast::substitute`]: crate::ast::Ast::substitute

use crate::node::BinOp;
use crate::reference::NodeId;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expr {
    /// An existing subtree, moved (not copied) into the new position.
    Existing(NodeId),
    BinaryOp(BinOp, Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Parens(Box<Expr>),
    Id(String),
    Literal(bool),
}

impl Expr {
    pub fn existing(node: NodeId) -> Self {
        Expr::Existing(node)
    }

    pub fn binary(op: BinOp, lhs: Self, rhs: Self) -> Self {
        Expr::BinaryOp(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinOp::And, lhs, rhs)
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::binary(BinOp::Or, lhs, rhs)
    }

    pub fn not(value: Self) -> Self {
        Expr::Not(Box::new(value))
    }

    pub fn parens(value: Self) -> Self {
        Expr::Parens(Box::new(value))
    }

    pub fn id(name: impl Into<String>) -> Self {
        Expr::Id(name.into())
    }

    pub fn literal(value: bool) -> Self {
        Expr::Literal(value)
    }

    /// Left-associated chain `((a op b) op c) op ...` over the given operands.
    ///
    /// Returns `None` for an empty sequence and the operand itself for a single one.
    pub fn left_chain<I>(op: BinOp, operands: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        operands
            .into_iter()
            .reduce(|acc, operand| Self::binary(op, acc, operand))
    }

    /// Number of nodes this candidate will allocate when grafted.
    pub fn fresh_count(&self) -> usize {
        match self {
            Expr::Existing(_) => 0,
            Expr::Id(_) | Expr::Literal(_) => 1,
            Expr::Not(e) | Expr::Parens(e) => 1 + e.fresh_count(),
            Expr::BinaryOp(_, l, r) => 1 + l.fresh_count() + r.fresh_count(),
        }
    }
}
