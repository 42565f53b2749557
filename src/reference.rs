use std::fmt::{Display, Formatter};

/// Handle of a node stored in an [`Ast`][crate::ast::Ast] arena.
///
/// Handles are plain indices: copying one never copies the subtree it points to.
/// A handle stays valid until the node is spliced out of its tree, after which
/// the slot may be recycled for a different node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        assert!(index != 0, "NodeId 0 is reserved");
        Self(index as u32)
    }

    /// Return the index of the node in the arena.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
