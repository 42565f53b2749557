//! Infix rendering of syntax trees.
//!
//! Explicit `Parens` nodes are printed as written. Wherever the tree shape would be lost
//! in flat text (an `OR` below an `AND`, a binary node below `NOT`, or a right operand of
//! the same operator), parentheses are added so that the text parses back into an
//! equivalent tree.

use std::fmt::{self, Display, Formatter};

use crate::ast::Ast;
use crate::node::NodeKind;
use crate::reference::NodeId;

const NOT_PRECEDENCE: u8 = 3;

/// Display adapter returned by [`Ast::display`].
#[derive(Debug, Copy, Clone)]
pub struct DisplayNode<'a> {
    ast: &'a Ast,
    node: NodeId,
}

impl Ast {
    pub fn display(&self, node: NodeId) -> DisplayNode<'_> {
        DisplayNode { ast: self, node }
    }
}

impl DisplayNode<'_> {
    fn write(&self, f: &mut Formatter<'_>, node: NodeId, context: u8, is_right: bool) -> fmt::Result {
        match self.ast.kind(node) {
            NodeKind::Root(child) => self.write(f, *child, 0, false),
            NodeKind::Parens(child) => {
                write!(f, "(")?;
                self.write(f, *child, 0, false)?;
                write!(f, ")")
            }
            NodeKind::Not(child) => {
                write!(f, "NOT ")?;
                self.write(f, *child, NOT_PRECEDENCE, false)
            }
            NodeKind::BinaryOp { op, left, right } => {
                let precedence = op.precedence();
                let grouped = precedence < context || (precedence == context && is_right);
                if grouped {
                    write!(f, "(")?;
                }
                self.write(f, *left, precedence, false)?;
                write!(f, " {} ", op)?;
                self.write(f, *right, precedence, true)?;
                if grouped {
                    write!(f, ")")?;
                }
                Ok(())
            }
            NodeKind::Id(name) => write!(f, "{}", name),
            NodeKind::Literal(true) => write!(f, "TRUE"),
            NodeKind::Literal(false) => write!(f, "FALSE"),
        }
    }
}

impl Display for DisplayNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write(f, self.node, 0, false)
    }
}
