//! Command-line front end: load a resolved tree from JSON, then dump and/or
//! evaluate it.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use quickbeam::{evaluate_program, print_program, Context, Program};

/// Pretty-print or evaluate a resolved Tiger AST serialized as JSON.
#[derive(Debug, Parser)]
#[command(name = "quickbeam", version, about)]
struct Cli {
    /// JSON file holding the program; reads stdin when absent or `-`
    file: Option<PathBuf>,

    /// Print the tree as Tiger source
    #[arg(long)]
    dump_ast: bool,

    /// Evaluate the tree and print the resulting integer
    #[arg(long)]
    eval: bool,

    /// Annotate the dump with resolution results and log evaluator steps
    #[arg(short, long)]
    verbose: bool,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Maximum nesting depth accepted by either traversal
    #[arg(long, default_value_t = 10_000)]
    max_depth: usize,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_program(file: Option<&PathBuf>) -> Result<Program> {
    let text = match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read standard input")?;
            text
        }
    };
    Program::from_json(&text).context("input is not a serialized program")
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let ctx = Context::new()
        .with_verbose(cli.verbose)
        .with_indent_width(cli.indent)
        .with_max_depth(cli.max_depth);
    let program = read_program(cli.file.as_ref())?;
    tracing::debug!(
        decls = program.symbols.decl_count(),
        loops = program.symbols.loop_count(),
        "loaded program"
    );

    if cli.dump_ast || !cli.eval {
        let text = print_program(&program, &ctx).context("cannot dump the tree")?;
        println!("{}", text);
    }
    if cli.eval {
        let value = evaluate_program(&program, &ctx).context("cannot evaluate the tree")?;
        println!("{}", value);
    }
    Ok(())
}
