use crate::ast::Ast;
use crate::expr::Expr;
use crate::node::Variant;
use crate::reference::NodeId;

/// A single rewrite law.
///
/// A strategy targets exactly one node [`Variant`]. The optimizer only hands it nodes of that
/// variant, and only calls [`propose`][Strategy::propose] after
/// [`is_appropriate`][Strategy::is_appropriate] returned `true` for the same node.
pub trait Strategy {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// The variant of the nodes this strategy rewrites.
    fn target(&self) -> Variant;

    /// Cheap structural precondition.
    fn is_appropriate(&self, ast: &Ast, node: NodeId) -> bool;

    /// Build the replacement for `node`. Must not modify the tree.
    ///
    /// # Panics
    ///
    /// May panic if `is_appropriate` does not hold for `node`.
    fn propose(&self, ast: &Ast, node: NodeId) -> Expr;

    /// Decide whether `candidate` is worth splicing in place of `original`.
    ///
    /// Strategies whose proposal can reproduce the original tree must reject it here,
    /// otherwise the rewrite would be a no-op reported as progress.
    fn accept(&self, ast: &Ast, original: NodeId, candidate: &Expr) -> bool {
        let _ = (ast, original, candidate);
        true
    }
}
