use super::negated;
use crate::ast::Ast;
use crate::expr::Expr;
use crate::node::{NodeKind, Variant};
use crate::reference::NodeId;
use crate::strategy::Strategy;

/// Double-negation elimination: `NOT NOT a` => `a`.
#[derive(Debug, Default, Copy, Clone)]
pub struct NotNotStrategy;

impl Strategy for NotNotStrategy {
    fn name(&self) -> &'static str {
        "not-not"
    }

    fn target(&self) -> Variant {
        Variant::Not
    }

    fn is_appropriate(&self, ast: &Ast, node: NodeId) -> bool {
        matches!(ast.kind(negated(ast, node)), NodeKind::Not(_))
    }

    fn propose(&self, ast: &Ast, node: NodeId) -> Expr {
        match ast.kind(negated(ast, node)) {
            NodeKind::Not(inner) => Expr::existing(*inner),
            other => unreachable!("not-not applied to NOT {:?}", other),
        }
    }
}
