//! # boolopt: Boolean expression simplification by AST rewriting
//!
//! **`boolopt`** parses boolean expressions over `AND`, `OR`, `NOT`, identifiers and the
//! literals `TRUE`/`FALSE` into a mutable syntax tree, and simplifies that tree in place by
//! applying a registry of small rewrite rules bottom-up.
//!
//! ## How it works
//!
//! The tree lives in an arena ([`Ast`][crate::ast::Ast]) and is addressed by lightweight
//! [`NodeId`][crate::reference::NodeId] handles. Every node knows its parent, so a rule can
//! replace any node in its parent's slot without knowing where the parent keeps it.
//!
//! A rule ([`Strategy`][crate::strategy::Strategy]) targets one node variant. It checks a
//! cheap precondition, proposes a replacement tree ([`Expr`][crate::expr::Expr]) that may
//! reuse existing subtrees, and may veto its own proposal. The
//! [`Optimizer`][crate::optimizer::Optimizer] walks the tree in post-order, so children are
//! fully reduced before their parent is inspected, and applies the first rule that succeeds.
//!
//! ## Basic Usage
//!
//! ```rust
//! use boolopt::ast::Ast;
//! use boolopt::optimizer::Optimizer;
//!
//! // 1. Parse an expression (the arena and its root node)
//! let (mut ast, root) = Ast::parse("NOT (NOT a OR NOT b) AND (c OR c OR FALSE)").unwrap();
//!
//! // 2. Simplify it in place with the default rules
//! let optimizer = Optimizer::default();
//! optimizer.optimize(&mut ast, root);
//!
//! // 3. Inspect the result
//! assert_eq!(ast.display(root).to_string(), "a AND b AND c");
//! assert!(ast.eval(root, &|name: &str| name != "d"));
//! ```
//!
//! ## Core Components
//!
//! - **[`ast`]**: The arena, node constructors, replacement, equality and inspection.
//! - **[`strategies`]**: The built-in rewrite rules and their default order.
//! - **[`optimizer`]**: Rule registry and the bottom-up driver.
//! - **[`parser`]**: Text to tree; [`display`] and [`dot`] go the other way.

pub mod ast;
pub mod display;
pub mod dot;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod node;
pub mod optimizer;
pub mod parser;
pub mod reference;
pub mod strategies;
pub mod strategy;
pub mod table;
pub mod walker;
