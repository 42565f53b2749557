use boolopt::ast::Ast;
use boolopt::node::BinOp;
use boolopt::optimizer::Optimizer;
use boolopt::parser::parse;
use boolopt::reference::NodeId;
use boolopt::strategies::{
    default_strategies, BinaryLiteralStrategy, DeMorganStrategy, InvertLiteralStrategy, NotNotStrategy,
    RemoveParensStrategy,
};
use boolopt::strategy::Strategy;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use test_log::test;

/// Optimize `input` and check the result is structurally equal to `expected`.
fn check_with(strategies: Vec<Box<dyn Strategy>>, input: &str, expected: &str) {
    let mut ast = Ast::new();
    let root = parse(&mut ast, input).unwrap();
    let target = parse(&mut ast, expected).unwrap();
    Optimizer::new(strategies).optimize(&mut ast, root);
    assert!(
        ast.structural_eq(root, target),
        "`{}` optimized to `{}`, expected `{}`",
        input,
        ast.display(root),
        expected
    );
}

fn check(input: &str, expected: &str) {
    check_with(default_strategies(), input, expected);
}

#[test]
fn test_double_negation() {
    check("NOT (NOT x)", "x");
    check_with(
        vec![Box::new(NotNotStrategy), Box::new(RemoveParensStrategy)],
        "NOT (NOT x)",
        "x",
    );
}

#[test]
fn test_duplicate_in_chain() {
    check("(x OR y) OR y", "x OR y");
}

#[test]
fn test_distinct_chain_unchanged() {
    check("x OR y OR z OR w", "x OR y OR z OR w");
}

#[test]
fn test_invert_literal() {
    check("NOT TRUE", "FALSE");
    check_with(vec![Box::new(InvertLiteralStrategy)], "NOT TRUE", "FALSE");
}

#[test]
fn test_de_morgan() {
    check("NOT (x OR y)", "NOT x AND NOT y");
    check_with(vec![Box::new(DeMorganStrategy)], "NOT (x OR y)", "NOT x AND NOT y");
}

#[test]
fn test_binary_literal() {
    check("TRUE AND id", "id");
    check("TRUE OR NOT id", "TRUE");
    check_with(vec![Box::new(BinaryLiteralStrategy)], "TRUE AND id", "id");
    check_with(vec![Box::new(BinaryLiteralStrategy)], "TRUE OR NOT id", "TRUE");
}

#[test]
fn test_complementary_pair_after_dedup() {
    check("x OR x OR NOT x OR x", "TRUE");
}

#[test]
fn test_parens() {
    check("(((x)))", "x");
    check("NOT (x)", "NOT x");
}

#[test]
fn test_complex() {
    check("NOT(NOT dog AND NOT cat AND NOT FALSE)", "dog OR cat");
}

#[test]
fn test_chain_reduction() {
    check("x OR y OR TRUE", "TRUE");
    check("x OR x", "x");
    check("x OR x OR x OR x", "x");
    check("x OR NOT x", "TRUE");
}

#[test]
fn test_complementary_pairs() {
    check("x AND NOT x", "FALSE");
    check("a AND b AND NOT a", "FALSE");
    check("x OR NOT x OR y OR NOT y", "TRUE");
    check("NOT x AND (y OR z) AND NOT NOT x", "FALSE");
}

#[test]
fn test_symmetry() {
    let mut ast = Ast::new();
    let ab = parse(&mut ast, "a OR b").unwrap();
    let ba = parse(&mut ast, "b OR a").unwrap();
    assert!(ast.ac_eq(ab, ba));
    assert!(!ast.structural_eq(ab, ba));

    let abc = parse(&mut ast, "a OR b OR c").unwrap();
    let cab = parse(&mut ast, "c OR a OR b").unwrap();
    let c_ab = parse(&mut ast, "c OR (a OR b)").unwrap();
    assert!(ast.ac_eq(abc, cab));
    assert!(ast.ac_eq(abc, c_ab));

    let and = parse(&mut ast, "a AND b AND c").unwrap();
    assert!(!ast.ac_eq(abc, and));
}

#[test]
fn test_optimized_symmetric_inputs_are_ac_equal() {
    let optimizer = Optimizer::default();
    let mut ast = Ast::new();
    let left = parse(&mut ast, "NOT (NOT a AND NOT b) OR c OR a").unwrap();
    let right = parse(&mut ast, "c OR (b OR NOT NOT a)").unwrap();
    optimizer.optimize(&mut ast, left);
    optimizer.optimize(&mut ast, right);
    assert!(ast.ac_eq(left, right), "{} vs {}", ast.display(left), ast.display(right));
}

#[test]
fn test_optimize_is_in_place() {
    let (mut ast, root) = Ast::parse("NOT NOT (x AND TRUE)").unwrap();
    let before = ast.live_nodes();
    Optimizer::default().optimize(&mut ast, root);
    assert_eq!(ast.roots(), &[root]);
    assert_eq!(ast.display(root).to_string(), "x");
    assert!(ast.live_nodes() < before);
    assert_eq!(ast.live_nodes(), ast.size(root));
}

#[test]
fn test_other_trees_untouched() {
    let optimizer = Optimizer::default();
    let mut ast = Ast::new();
    let first = parse(&mut ast, "NOT NOT a").unwrap();
    let second = parse(&mut ast, "NOT NOT b").unwrap();
    optimizer.optimize(&mut ast, first);
    assert_eq!(ast.display(first).to_string(), "a");
    assert_eq!(ast.display(second).to_string(), "NOT NOT b");
}

// ============================================================================
// Randomised properties
// ============================================================================

const VARIABLES: [&str; 4] = ["a", "b", "c", "d"];

fn random_node(ast: &mut Ast, rng: &mut ChaCha8Rng, depth: usize) -> NodeId {
    let leaf = depth == 0 || rng.random_bool(0.25);
    if leaf {
        return if rng.random_bool(0.8) {
            ast.mk_id(*VARIABLES.choose(rng).unwrap())
        } else {
            ast.mk_literal(rng.random_bool(0.5))
        };
    }
    match rng.random_range(0..6) {
        0 | 1 => {
            let left = random_node(ast, rng, depth - 1);
            let right = random_node(ast, rng, depth - 1);
            ast.mk_and(left, right)
        }
        2 | 3 => {
            let left = random_node(ast, rng, depth - 1);
            let right = random_node(ast, rng, depth - 1);
            ast.mk_or(left, right)
        }
        4 => {
            let child = random_node(ast, rng, depth - 1);
            ast.mk_not(child)
        }
        _ => {
            let child = random_node(ast, rng, depth - 1);
            ast.mk_parens(child)
        }
    }
}

fn random_tree(seed: u64, depth: usize) -> (Ast, NodeId) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ast = Ast::new();
    let node = random_node(&mut ast, &mut rng, depth);
    let root = ast.mk_root(node);
    (ast, root)
}

fn truth_table(ast: &Ast, root: NodeId) -> Vec<bool> {
    (0..1u32 << VARIABLES.len())
        .map(|mask| {
            ast.eval(root, &|name: &str| {
                let index = VARIABLES.iter().position(|&v| v == name).unwrap();
                mask >> index & 1 == 1
            })
        })
        .collect()
}

#[test]
fn test_random_soundness() {
    let optimizer = Optimizer::default();
    for seed in 0..300 {
        let (mut ast, root) = random_tree(seed, 6);
        let expected = truth_table(&ast, root);
        let input = ast.display(root).to_string();
        optimizer.optimize(&mut ast, root);
        assert_eq!(
            truth_table(&ast, root),
            expected,
            "seed {}: `{}` optimized to `{}`",
            seed,
            input,
            ast.display(root)
        );
    }
}

#[test]
fn test_random_idempotence() {
    let optimizer = Optimizer::default();
    for seed in 0..300 {
        let (mut ast, root) = random_tree(seed, 6);
        optimizer.optimize(&mut ast, root);
        let once = ast.clone();
        let rewrites = optimizer.run_pass(&mut ast, root);
        assert_eq!(rewrites, 0, "seed {}: `{}` is not a fixpoint", seed, ast.display(root));
        assert_eq!(ast, once);
    }
}

#[test]
fn test_random_no_leaks() {
    let optimizer = Optimizer::default();
    for seed in 0..100 {
        let (mut ast, root) = random_tree(seed, 7);
        optimizer.optimize(&mut ast, root);
        assert_eq!(ast.live_nodes(), ast.size(root), "seed {}", seed);
    }
}

#[test]
fn test_random_never_grows_variables() {
    let optimizer = Optimizer::default();
    for seed in 0..100 {
        let (mut ast, root) = random_tree(seed, 6);
        let before: Vec<String> = ast.variables(root).into_iter().map(String::from).collect();
        optimizer.optimize(&mut ast, root);
        let after: Vec<String> = ast.variables(root).into_iter().map(String::from).collect();
        assert!(after.iter().all(|v| before.contains(v)), "seed {}", seed);
    }
}

const CHAIN_OPERANDS: [&str; 6] = ["a", "b", "c", "d", "a AND b", "b AND a"];

fn chain_operand(ast: &mut Ast, index: usize) -> NodeId {
    match CHAIN_OPERANDS[index].split_once(" AND ") {
        Some((l, r)) => {
            let left = ast.mk_id(l);
            let right = ast.mk_id(r);
            ast.mk_and(left, right)
        }
        None => ast.mk_id(CHAIN_OPERANDS[index]),
    }
}

/// OR chain over `operands` with random bracketing and random `Parens` wrappers.
fn random_chain(ast: &mut Ast, rng: &mut ChaCha8Rng, operands: &[usize]) -> NodeId {
    let node = if operands.len() == 1 {
        chain_operand(ast, operands[0])
    } else {
        let split = rng.random_range(1..operands.len());
        let left = random_chain(ast, rng, &operands[..split]);
        let right = random_chain(ast, rng, &operands[split..]);
        ast.mk_or(left, right)
    };
    if rng.random_bool(0.2) {
        ast.mk_parens(node)
    } else {
        node
    }
}

#[test]
fn test_random_chain_dedup() {
    let optimizer = Optimizer::default();
    for seed in 0..300 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let len = rng.random_range(1..=12);
        let operands: Vec<usize> = (0..len).map(|_| rng.random_range(0..CHAIN_OPERANDS.len())).collect();

        let mut expected: Vec<&str> = Vec::new();
        for &i in &operands {
            if !expected.contains(&CHAIN_OPERANDS[i]) {
                expected.push(CHAIN_OPERANDS[i]);
            }
        }

        let mut ast = Ast::new();
        let node = random_chain(&mut ast, &mut rng, &operands);
        let root = ast.mk_root(node);
        let input = ast.display(root).to_string();
        optimizer.optimize(&mut ast, root);

        let result = ast.chain_operands(ast.root_child(root), BinOp::Or);
        let actual: Vec<String> = result.iter().map(|&id| ast.display(id).to_string()).collect();
        assert_eq!(actual, expected, "seed {}: `{}` optimized to `{}`", seed, input, ast.display(root));
        for (i, &x) in result.iter().enumerate() {
            for &y in &result[i + 1..] {
                assert!(!ast.structural_eq(x, y), "seed {}: duplicate operands remain", seed);
            }
        }
    }
}

#[test]
fn test_failed_parse_keeps_arena_consistent() {
    let optimizer = Optimizer::default();
    let mut ast = Ast::new();
    let root = parse(&mut ast, "NOT NOT a OR a").unwrap();
    assert!(parse(&mut ast, "x AND").is_err());
    optimizer.optimize(&mut ast, root);
    assert_eq!(ast.display(root).to_string(), "a");
    assert_eq!(ast.live_nodes(), ast.size(root));
}

#[test]
fn test_long_chain() {
    let names: Vec<String> = (0..2000).map(|i| format!("x{}", i)).collect();
    let input = names.join(" OR ");
    let (mut ast, root) = Ast::parse(&input).unwrap();
    let before = ast.live_nodes();
    assert_eq!(Optimizer::default().run_pass(&mut ast, root), 0);
    assert_eq!(ast.live_nodes(), before);
}
