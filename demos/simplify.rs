use clap::Parser;
use log::info;

use boolopt::ast::Ast;
use boolopt::dot::DotConfig;
use boolopt::optimizer::{Optimizer, OptimizerConfig};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Boolean expressions to simplify, e.g. "NOT (NOT a OR b)".
    #[arg(value_name = "EXPR", required = true)]
    exprs: Vec<String>,

    /// Repeat passes until nothing changes.
    #[clap(long)]
    stable: bool,

    /// Do not settle freshly created nodes within a pass.
    #[clap(long)]
    no_settle: bool,

    /// Print the simplified trees in DOT format.
    #[clap(long)]
    dot: bool,

    /// Draw parent back-links in DOT output.
    #[clap(long)]
    parent_links: bool,

    /// Log every rewrite.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let config = OptimizerConfig::default().with_settle_rewrites(!args.no_settle);
    let optimizer = Optimizer::with_config(boolopt::strategies::default_strategies(), config);
    info!("optimizer = {:?}", optimizer);

    let mut ast = Ast::new();
    let mut roots = Vec::new();
    for expr in &args.exprs {
        let root = boolopt::parser::parse(&mut ast, expr)?;
        let size = ast.size(root);
        let rewrites = if args.stable {
            optimizer.optimize_until_stable(&mut ast, root)
        } else {
            optimizer.run_pass(&mut ast, root)
        };
        println!("{}", expr);
        println!("  => {}", ast.display(root));
        println!("  {} rewrites, size {} -> {}", rewrites, size, ast.size(root));
        roots.push(root);
    }

    if args.dot {
        let config = DotConfig {
            parent_links: args.parent_links,
            ..DotConfig::default()
        };
        print!("{}", ast.to_dot_with_config(&roots, &config)?);
    }

    Ok(())
}
