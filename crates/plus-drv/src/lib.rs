//! plus-drv - CLI entry point and pipeline orchestration.
//!
//! Thin orchestration only: the interesting work lives in `plus-lex`,
//! `plus-par`, and `plus-eval`. This crate reads a source file, wires
//! the lexer's token stream and symbol table into a parser built from
//! the fixed PLUS grammar, walks the resulting AST with the evaluator,
//! and prints any phase's error in one uniform line.

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser as ClapParser;

use plus_eval::Evaluator;
use plus_lex::Lexer;
use plus_par::ParserBuilder;
use plus_util::format_diagnostic;

/// `plusc` - interpret a PLUS source file.
#[derive(ClapParser, Debug)]
#[command(name = "plusc")]
#[command(author = "The Plus Language Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpret a PLUS source file", long_about = None)]
pub struct Cli {
    /// Path to the PLUS source file to run.
    pub path: PathBuf,

    /// Raise the tracing filter to `debug` (lexer and table-construction
    /// traces).
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the synthesized ACTION/GOTO tables and canonical collection
    /// before parsing.
    #[arg(long)]
    pub dump_tables: bool,

    /// Print the parsed AST before evaluation.
    #[arg(long)]
    pub dump_ast: bool,
}

/// Exit code for a lexical, parse, or runtime error.
pub const EXIT_PHASE_ERROR: i32 = 1;
/// Exit code for a grammar build-time conflict (never expected for the
/// shipped grammar; surfaced only because table construction is a
/// fallible step in the pipeline's type signature).
pub const EXIT_BUILD_ERROR: i32 = 2;

/// Runs the full pipeline for `cli`, printing `write` output to `out`
/// and any error to `err`. Returns the process exit code.
pub fn run(cli: &Cli, out: &mut impl std::io::Write, err: &mut impl std::io::Write) -> i32 {
    match run_inner(cli, out) {
        Ok(()) => 0,
        Err(PipelineError::Build(message)) => {
            let _ = writeln!(err, "plusc: error: {message}");
            EXIT_BUILD_ERROR
        }
        Err(PipelineError::Phase(message)) => {
            let _ = writeln!(err, "{message}");
            EXIT_PHASE_ERROR
        }
    }
}

enum PipelineError {
    Build(String),
    Phase(String),
}

fn run_inner(cli: &Cli, out: &mut impl std::io::Write) -> Result<(), PipelineError> {
    let (grammar, tables) = ParserBuilder::build().map_err(|e| PipelineError::Build(e.to_string()))?;

    if cli.dump_tables {
        println!("{:#?}", tables.action);
        println!("{:#?}", tables.goto);
    }

    let source = read_source(&cli.path).map_err(|e| PipelineError::Phase(e.to_string()))?;
    let source_name: Rc<str> = cli.path.display().to_string().into();

    let mut lexer = Lexer::new(&source, source_name);
    let tokens = lexer
        .tokenize_all()
        .map_err(|e| PipelineError::Phase(format_diagnostic(&e)))?;

    let parser = plus_par::Parser::new(&grammar, &tables, lexer.symbols());
    let program = parser
        .parse(&tokens)
        .map_err(|e| PipelineError::Phase(format_diagnostic(&e)))?;

    if cli.dump_ast {
        println!("{program:#?}");
    }

    let mut evaluator = Evaluator::new(&mut *out);
    evaluator
        .eval_program(&program)
        .map_err(|e| PipelineError::Phase(format_diagnostic(&e)))?;

    Ok(())
}

fn read_source(path: &PathBuf) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}
