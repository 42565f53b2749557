//! Rule dispatch.
//!
//! The [`Optimizer`] groups its strategies by the node variant they target and drives them
//! with a post-order walk: every node is offered to the strategies registered for its
//! variant, in registration order, and the first one that is appropriate and accepts its
//! own proposal rewrites the node.
//!
//! ```
//! use boolopt::ast::Ast;
//! use boolopt::optimizer::Optimizer;
//!
//! let (mut ast, root) = Ast::parse("NOT (NOT dog AND NOT cat AND NOT FALSE)").unwrap();
//! Optimizer::default().optimize(&mut ast, root);
//! assert_eq!(ast.display(root).to_string(), "dog OR cat");
//! ```

use std::collections::HashMap;
use std::fmt::Debug;

use log::{debug, log_enabled, trace, Level};

use crate::ast::Ast;
use crate::node::Variant;
use crate::reference::NodeId;
use crate::strategies::default_strategies;
use crate::strategy::Strategy;
use crate::walker::walk_post_order;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OptimizerConfig {
    /// Offer the nodes created by a rewrite, and a subtree moved into the rewritten slot, to
    /// the strategies before moving on.
    ///
    /// This departs from a strict one-rewrite-per-position pass: the node now occupying the
    /// rewritten slot is offered again, so one position may be rewritten several times in a
    /// single pass. With this off, every position is rewritten at most once per pass and
    /// [`Optimizer::optimize_until_stable`] is needed to reach a fixpoint.
    pub settle_rewrites: bool,
    /// Upper bound on passes for [`Optimizer::optimize_until_stable`].
    pub max_passes: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            settle_rewrites: true,
            max_passes: 16,
        }
    }
}

impl OptimizerConfig {
    pub fn with_settle_rewrites(mut self, settle_rewrites: bool) -> Self {
        self.settle_rewrites = settle_rewrites;
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

pub struct Optimizer {
    strategies: HashMap<Variant, Vec<Box<dyn Strategy>>>,
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self::with_config(strategies, OptimizerConfig::default())
    }

    pub fn with_config(strategies: Vec<Box<dyn Strategy>>, config: OptimizerConfig) -> Self {
        let mut map: HashMap<Variant, Vec<Box<dyn Strategy>>> = HashMap::new();
        for strategy in strategies {
            map.entry(strategy.target()).or_default().push(strategy);
        }
        Self {
            strategies: map,
            config,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Strategies registered for the given variant, in registration order.
    pub fn strategies_for(&self, variant: Variant) -> &[Box<dyn Strategy>] {
        self.strategies.get(&variant).map_or(&[], Vec::as_slice)
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(default_strategies())
    }
}

impl Debug for Optimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<(String, Vec<&'static str>)> = self
            .strategies
            .iter()
            .map(|(variant, list)| (format!("{:?}", variant), list.iter().map(|s| s.name()).collect()))
            .collect();
        names.sort();
        f.debug_struct("Optimizer")
            .field("strategies", &names)
            .field("config", &self.config)
            .finish()
    }
}

impl Optimizer {
    /// Simplify the tree anchored at `root` in place with a single bottom-up pass.
    pub fn optimize(&self, ast: &mut Ast, root: NodeId) {
        self.run_pass(ast, root);
    }

    /// Single bottom-up pass. Returns the number of rewrites performed.
    pub fn run_pass(&self, ast: &mut Ast, root: NodeId) -> usize {
        let mut rewrites = 0;
        walk_post_order(ast, root, |ast, node| {
            let count = self.apply(ast, node);
            rewrites += count;
            count > 0
        });
        debug!("Pass over {} done: {} rewrites, {} live nodes", root, rewrites, ast.live_nodes());
        rewrites
    }

    /// Repeat passes until one makes no rewrite, at most `max_passes` times.
    /// Returns the total number of rewrites.
    pub fn optimize_until_stable(&self, ast: &mut Ast, root: NodeId) -> usize {
        let mut total = 0;
        for pass in 1..=self.config.max_passes {
            let rewrites = self.run_pass(ast, root);
            total += rewrites;
            if rewrites == 0 {
                debug!("Stable after {} passes", pass);
                return total;
            }
        }
        debug!("Gave up after {} passes", self.config.max_passes);
        total
    }

    /// Try the strategies for `node`'s variant and rewrite it with the first one that succeeds.
    ///
    /// Returns the number of rewrites performed: zero if the node was left alone, otherwise one
    /// plus any rewrites made while settling the freshly created nodes.
    fn apply(&self, ast: &mut Ast, node: NodeId) -> usize {
        // Roots have no slot to be replaced in.
        let Some(parent) = ast.parent(node) else {
            return 0;
        };

        for strategy in self.strategies_for(ast.variant(node)) {
            if !strategy.is_appropriate(ast, node) {
                continue;
            }
            let candidate = strategy.propose(ast, node);
            if !strategy.accept(ast, node, &candidate) {
                trace!("{} rejected its proposal for {}", strategy.name(), node);
                continue;
            }

            let slot = ast.children(parent).position(|c| c == node).unwrap_or_default();
            let before = log_enabled!(Level::Debug).then(|| ast.display(node).to_string());
            let fresh = ast.substitute(node, candidate);
            let Some(after) = ast.child(parent, slot) else {
                unreachable!("Slot {} of {} vanished", slot, parent);
            };
            if let Some(before) = before {
                debug!("{} at {}: `{}` => `{}`", strategy.name(), node, before, ast.display(after));
            }

            let mut rewrites = 1;
            if self.config.settle_rewrites {
                // Post-order: settling a node never frees a fresh node that comes after it.
                for id in fresh.iter().copied() {
                    debug_assert!(ast.is_live(id));
                    rewrites += self.apply(ast, id);
                }
                // A subtree moved up into the slot may now head a chain it used to sit inside.
                if !fresh.contains(&after) {
                    rewrites += self.apply(ast, after);
                }
            }
            return rewrites;
        }

        0
    }
}
