use std::collections::HashMap;

use crate::ast::Ast;
use crate::expr::Expr;
use crate::node::{BinOp, NodeKind, Variant};
use crate::reference::NodeId;
use crate::strategy::Strategy;

/// Associative chain reduction.
///
/// The maximal chain of one operator below the node (looking through parentheses) is
/// flattened into its operands. Structural duplicates are dropped, keeping first occurrences
/// in order. If the chain holds both `a` and `NOT a`, the whole chain collapses to the
/// absorbing literal of its operator (`TRUE` for `OR`, `FALSE` for `AND`). Otherwise the
/// survivors are rebuilt into a left-associated chain, or returned directly if only one is left.
///
/// Only the top node of a maximal chain is reduced; inner links are left to it.
/// A proposal that would reproduce the original tree is rejected.
#[derive(Debug, Default, Copy, Clone)]
pub struct ChainReducerStrategy;

/// Operands bucketed by structural hash.
struct OperandIndex<'a> {
    ast: &'a Ast,
    buckets: HashMap<u64, Vec<NodeId>>,
}

impl<'a> OperandIndex<'a> {
    fn new(ast: &'a Ast) -> Self {
        Self {
            ast,
            buckets: HashMap::new(),
        }
    }

    fn contains(&self, node: NodeId) -> bool {
        self.buckets
            .get(&self.ast.structural_hash(node))
            .is_some_and(|bucket| bucket.iter().any(|&seen| self.ast.structural_eq(seen, node)))
    }

    /// Returns `false` if a structurally equal operand is already indexed.
    fn insert(&mut self, node: NodeId) -> bool {
        let bucket = self.buckets.entry(self.ast.structural_hash(node)).or_default();
        if bucket.iter().any(|&seen| self.ast.structural_eq(seen, node)) {
            return false;
        }
        bucket.push(node);
        true
    }
}

impl ChainReducerStrategy {
    /// Check whether `node` heads its chain: no `op` node above it, looking through parentheses.
    pub fn is_chain_top(ast: &Ast, node: NodeId, op: BinOp) -> bool {
        let mut up = ast.parent(node);
        while let Some(parent) = up {
            match ast.kind(parent) {
                NodeKind::Parens(_) => up = ast.parent(parent),
                NodeKind::BinaryOp { op: o, .. } => return *o != op,
                _ => return true,
            }
        }
        true
    }

    /// Operands of the chain at `node` without structural duplicates, in first-occurrence order.
    pub fn unique_operands(ast: &Ast, node: NodeId) -> Vec<NodeId> {
        let NodeKind::BinaryOp { op, .. } = ast.kind(node) else {
            return vec![node];
        };
        let mut index = OperandIndex::new(ast);
        ast.chain_operands(node, *op)
            .into_iter()
            .filter(|&operand| index.insert(operand))
            .collect()
    }

    /// Check whether some operand is the negation of another one.
    pub fn has_complementary_pair(ast: &Ast, operands: &[NodeId]) -> bool {
        let mut index = OperandIndex::new(ast);
        for &operand in operands {
            index.insert(operand);
        }
        operands.iter().any(|&operand| match ast.kind(operand) {
            NodeKind::Not(inner) => index.contains(ast.peel_parens(*inner)),
            _ => false,
        })
    }
}

impl Strategy for ChainReducerStrategy {
    fn name(&self) -> &'static str {
        "chain-reducer"
    }

    fn target(&self) -> Variant {
        Variant::BinaryOp
    }

    fn is_appropriate(&self, ast: &Ast, node: NodeId) -> bool {
        match ast.kind(node) {
            NodeKind::BinaryOp { op, .. } => Self::is_chain_top(ast, node, *op),
            _ => false,
        }
    }

    fn propose(&self, ast: &Ast, node: NodeId) -> Expr {
        let NodeKind::BinaryOp { op, .. } = ast.kind(node) else {
            unreachable!("chain-reducer applied to {:?}", ast.kind(node));
        };
        let unique = Self::unique_operands(ast, node);
        if Self::has_complementary_pair(ast, &unique) {
            return Expr::literal(op.absorbing());
        }
        Expr::left_chain(*op, unique.into_iter().map(Expr::existing))
            .unwrap_or_else(|| unreachable!("Chain at {} has no operands", node))
    }

    fn accept(&self, ast: &Ast, original: NodeId, candidate: &Expr) -> bool {
        !ast.matches(original, candidate)
    }
}
