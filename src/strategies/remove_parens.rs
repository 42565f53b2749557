use crate::ast::Ast;
use crate::expr::Expr;
use crate::node::{NodeKind, Variant};
use crate::reference::NodeId;
use crate::strategy::Strategy;

/// Drops syntactic parentheses: `(a)` => `a`.
#[derive(Debug, Default, Copy, Clone)]
pub struct RemoveParensStrategy;

impl Strategy for RemoveParensStrategy {
    fn name(&self) -> &'static str {
        "remove-parens"
    }

    fn target(&self) -> Variant {
        Variant::Parens
    }

    fn is_appropriate(&self, _ast: &Ast, _node: NodeId) -> bool {
        true
    }

    fn propose(&self, ast: &Ast, node: NodeId) -> Expr {
        match ast.kind(node) {
            NodeKind::Parens(child) => Expr::existing(*child),
            other => unreachable!("remove-parens applied to {:?}", other),
        }
    }
}
