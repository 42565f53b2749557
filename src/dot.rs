//! AST to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Root nodes** are rendered as rectangles at the top (source rank)
//! - **Operators** (`AND`, `OR`, `NOT`, `( )`) are rendered as ellipses
//! - **Leaves** (identifiers and literals) are rendered as boxes at the bottom (sink rank)
//! - **Edges** go from parent to child; binary operators label theirs `L` and `R`
//! - Optionally, dashed edges go back from every node to its recorded parent
//!
//! # Examples
//!
//! ```
//! use boolopt::ast::Ast;
//!
//! let (ast, root) = Ast::parse("a AND NOT b").unwrap();
//! let dot = ast.to_dot(&[root]).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! assert!(dot.starts_with("digraph {"));
//! ```

use std::fmt::Write as _;

use crate::ast::Ast;
use crate::node::NodeKind;
use crate::reference::NodeId;

/// Configuration options for DOT output generation.
///
/// ```
/// use boolopt::ast::Ast;
/// use boolopt::dot::DotConfig;
///
/// let (ast, root) = Ast::parse("x OR y").unwrap();
/// let config = DotConfig {
///     parent_links: true,
///     ..DotConfig::default()
/// };
/// let dot = ast.to_dot_with_config(&[root], &config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for operator nodes (default: "ellipse")
    pub node_shape: &'static str,
    /// Shape for identifiers and literals (default: "box")
    pub leaf_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for parent-to-child edges (default: "solid")
    pub child_edge_style: &'static str,
    /// Style for back-links to the parent (default: "dashed")
    pub parent_edge_style: &'static str,
    /// Whether to draw back-links from each node to its parent (default: false)
    pub parent_links: bool,
    /// Whether to append the arena handle to every label (default: false)
    pub show_ids: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "ellipse",
            leaf_shape: "box",
            root_shape: "rect",
            child_edge_style: "solid",
            parent_edge_style: "dashed",
            parent_links: false,
            show_ids: false,
        }
    }
}

impl Ast {
    /// Render the trees below `roots` in DOT format with the default configuration.
    pub fn to_dot(&self, roots: &[NodeId]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Render the trees below `roots` in DOT format.
    ///
    /// `roots` need not be `Root` nodes: any node renders the subtree below it. A node
    /// reachable from several of the given handles is emitted once.
    pub fn to_dot_with_config(&self, roots: &[NodeId], config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut nodes: Vec<NodeId> = Vec::new();
        for &root in roots {
            for id in self.descendants(root) {
                if !nodes.contains(&id) {
                    nodes.push(id);
                }
            }
        }
        let (leaves, inner): (Vec<NodeId>, Vec<NodeId>) = nodes
            .iter()
            .copied()
            .partition(|&id| matches!(self.kind(id), NodeKind::Id(_) | NodeKind::Literal(_)));
        let (tops, inner): (Vec<NodeId>, Vec<NodeId>) =
            inner.into_iter().partition(|&id| matches!(self.kind(id), NodeKind::Root(_)));

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        if !tops.is_empty() {
            writeln!(dot, "{{ rank=source")?;
            for &id in &tops {
                writeln!(dot, "{} [shape={}, label=\"{}\"];", id.index(), config.root_shape, self.label(id, config))?;
            }
            writeln!(dot, "}}")?;
        }

        for &id in &inner {
            writeln!(dot, "{} [label=\"{}\"];", id.index(), self.label(id, config))?;
        }

        if !leaves.is_empty() {
            writeln!(dot, "{{ rank=sink")?;
            for &id in &leaves {
                writeln!(dot, "{} [shape={}, label=\"{}\"];", id.index(), config.leaf_shape, self.label(id, config))?;
            }
            writeln!(dot, "}}")?;
        }

        for &id in &nodes {
            match self.kind(id) {
                NodeKind::BinaryOp { left, right, .. } => {
                    writeln!(dot, "{} -> {} [style={}, label=\"L\"];", id.index(), left.index(), config.child_edge_style)?;
                    writeln!(dot, "{} -> {} [style={}, label=\"R\"];", id.index(), right.index(), config.child_edge_style)?;
                }
                kind => {
                    for child in kind.children() {
                        writeln!(dot, "{} -> {} [style={}];", id.index(), child.index(), config.child_edge_style)?;
                    }
                }
            }
        }

        if config.parent_links {
            for &id in &nodes {
                if let Some(parent) = self.parent(id) {
                    writeln!(
                        dot,
                        "{} -> {} [style={}, constraint=false];",
                        id.index(),
                        parent.index(),
                        config.parent_edge_style
                    )?;
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }

    fn label(&self, id: NodeId, config: &DotConfig) -> String {
        let label = match self.kind(id) {
            NodeKind::Root(_) => "root".to_string(),
            NodeKind::BinaryOp { op, .. } => op.to_string(),
            NodeKind::Not(_) => "NOT".to_string(),
            NodeKind::Parens(_) => "( )".to_string(),
            NodeKind::Id(name) => name.replace('"', "\\\""),
            NodeKind::Literal(true) => "TRUE".to_string(),
            NodeKind::Literal(false) => "FALSE".to_string(),
        };
        if config.show_ids {
            format!("{} {}", label, id)
        } else {
            label
        }
    }
}
