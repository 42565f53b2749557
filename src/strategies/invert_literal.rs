use super::negated;
use crate::ast::Ast;
use crate::expr::Expr;
use crate::node::{NodeKind, Variant};
use crate::reference::NodeId;
use crate::strategy::Strategy;

/// Literal inversion: `NOT TRUE` => `FALSE`, `NOT FALSE` => `TRUE`.
#[derive(Debug, Default, Copy, Clone)]
pub struct InvertLiteralStrategy;

impl Strategy for InvertLiteralStrategy {
    fn name(&self) -> &'static str {
        "invert-literal"
    }

    fn target(&self) -> Variant {
        Variant::Not
    }

    fn is_appropriate(&self, ast: &Ast, node: NodeId) -> bool {
        matches!(ast.kind(negated(ast, node)), NodeKind::Literal(_))
    }

    fn propose(&self, ast: &Ast, node: NodeId) -> Expr {
        match ast.kind(negated(ast, node)) {
            NodeKind::Literal(value) => Expr::literal(!value),
            other => unreachable!("invert-literal applied to NOT {:?}", other),
        }
    }
}
