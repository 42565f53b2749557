//! Rewrite rules for boolean expressions.
//!
//! | Strategy | Target | Rewrite |
//! |----------|--------|---------|
//! | [`DeMorganStrategy`] | `Not` | `NOT (a op b)` => `NOT a flip(op) NOT b` |
//! | [`InvertLiteralStrategy`] | `Not` | `NOT TRUE` => `FALSE`, `NOT FALSE` => `TRUE` |
//! | [`NotNotStrategy`] | `Not` | `NOT NOT a` => `a` |
//! | [`BinaryLiteralStrategy`] | `BinaryOp` | `TRUE AND a` => `a`, `TRUE OR a` => `TRUE`, ... |
//! | [`ChainReducerStrategy`] | `BinaryOp` | `a OR (b OR a)` => `a OR b`, `a OR NOT a` => `TRUE` |
//! | [`RemoveParensStrategy`] | `Parens` | `(a)` => `a` |
//!
//! Rules targeting `Not` and `BinaryOp` look through `Parens` wrappers around the operands
//! they inspect, so they work even when [`RemoveParensStrategy`] is not registered.
//!
//! # Default order
//!
//! [`default_strategies`] returns all six rules in the order of the table above. Order
//! matters only between rules sharing a target: literal folding runs before chain reduction,
//! so `x OR y OR TRUE` collapses without rebuilding the chain first.

mod binary_literal;
mod chain_reducer;
mod de_morgan;
mod invert_literal;
mod not_not;
mod remove_parens;

pub use binary_literal::BinaryLiteralStrategy;
pub use chain_reducer::ChainReducerStrategy;
pub use de_morgan::DeMorganStrategy;
pub use invert_literal::InvertLiteralStrategy;
pub use not_not::NotNotStrategy;
pub use remove_parens::RemoveParensStrategy;

use crate::ast::Ast;
use crate::node::NodeKind;
use crate::reference::NodeId;
use crate::strategy::Strategy;

/// All rules, in the default registration order.
pub fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(DeMorganStrategy),
        Box::new(InvertLiteralStrategy),
        Box::new(NotNotStrategy),
        Box::new(BinaryLiteralStrategy),
        Box::new(ChainReducerStrategy),
        Box::new(RemoveParensStrategy),
    ]
}

/// The operand of a `Not` node, with `Parens` wrappers peeled.
fn negated(ast: &Ast, node: NodeId) -> NodeId {
    match ast.kind(node) {
        NodeKind::Not(child) => ast.peel_parens(*child),
        other => unreachable!("Expected NOT at {}, got {:?}", node, other),
    }
}
