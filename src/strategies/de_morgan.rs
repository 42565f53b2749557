use super::negated;
use crate::ast::Ast;
use crate::expr::Expr;
use crate::node::{NodeKind, Variant};
use crate::reference::NodeId;
use crate::strategy::Strategy;

/// De Morgan expansion: `NOT (a AND b)` => `NOT a OR NOT b`, `NOT (a OR b)` => `NOT a AND NOT b`.
#[derive(Debug, Default, Copy, Clone)]
pub struct DeMorganStrategy;

impl Strategy for DeMorganStrategy {
    fn name(&self) -> &'static str {
        "de-morgan"
    }

    fn target(&self) -> Variant {
        Variant::Not
    }

    fn is_appropriate(&self, ast: &Ast, node: NodeId) -> bool {
        matches!(ast.kind(negated(ast, node)), NodeKind::BinaryOp { .. })
    }

    fn propose(&self, ast: &Ast, node: NodeId) -> Expr {
        match ast.kind(negated(ast, node)) {
            NodeKind::BinaryOp { op, left, right } => Expr::binary(
                op.flip(),
                Expr::not(Expr::existing(*left)),
                Expr::not(Expr::existing(*right)),
            ),
            other => unreachable!("de-morgan applied to NOT {:?}", other),
        }
    }
}
