use crate::ast::Ast;
use crate::reference::NodeId;

/// Visit every node below (and including) `start` in post-order, calling `attempt` once per node.
///
/// `attempt` may replace the node it is given with a different subtree; it reports whether it
/// did so. The walker never revisits a position after a replacement and simply continues with
/// the parent. Child slots are re-read from the parent each time the walker moves to the next
/// sibling, so a replaced child never leaves the walker holding a stale handle.
///
/// Returns the number of visits on which `attempt` reported a replacement.
pub fn walk_post_order<F>(ast: &mut Ast, start: NodeId, mut attempt: F) -> usize
where
    F: FnMut(&mut Ast, NodeId) -> bool,
{
    let mut replaced = 0;
    // Each frame is a node together with the next child slot to descend into.
    let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, slot) = *frame;
        match ast.child(node, slot) {
            Some(child) => {
                frame.1 += 1;
                stack.push((child, 0));
            }
            None => {
                stack.pop();
                if attempt(ast, node) {
                    replaced += 1;
                }
            }
        }
    }

    replaced
}
