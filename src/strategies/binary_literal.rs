use crate::ast::Ast;
use crate::expr::Expr;
use crate::node::{NodeKind, Variant};
use crate::reference::NodeId;
use crate::strategy::Strategy;

/// Literal folding in binary nodes.
///
/// A neutral literal vanishes (`TRUE AND a` => `a`, `FALSE OR a` => `a`) and an absorbing one
/// takes over (`FALSE AND a` => `FALSE`, `TRUE OR a` => `TRUE`). The left operand is
/// inspected first.
#[derive(Debug, Default, Copy, Clone)]
pub struct BinaryLiteralStrategy;

impl BinaryLiteralStrategy {
    /// The first literal operand's value together with the other operand.
    fn literal_operand(ast: &Ast, node: NodeId) -> Option<(bool, NodeId)> {
        let NodeKind::BinaryOp { left, right, .. } = ast.kind(node) else {
            return None;
        };
        [(*left, *right), (*right, *left)]
            .into_iter()
            .find_map(|(this, other)| match ast.kind(ast.peel_parens(this)) {
                NodeKind::Literal(value) => Some((*value, other)),
                _ => None,
            })
    }
}

impl Strategy for BinaryLiteralStrategy {
    fn name(&self) -> &'static str {
        "binary-literal"
    }

    fn target(&self) -> Variant {
        Variant::BinaryOp
    }

    fn is_appropriate(&self, ast: &Ast, node: NodeId) -> bool {
        Self::literal_operand(ast, node).is_some()
    }

    fn propose(&self, ast: &Ast, node: NodeId) -> Expr {
        let (NodeKind::BinaryOp { op, .. }, Some((value, other))) =
            (ast.kind(node), Self::literal_operand(ast, node))
        else {
            unreachable!("binary-literal applied to {:?}", ast.kind(node));
        };
        if value == op.neutral() {
            Expr::existing(other)
        } else {
            Expr::literal(op.absorbing())
        }
    }
}
