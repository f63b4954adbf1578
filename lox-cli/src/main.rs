use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lox_core::printer::to_sexpr;
use lox_core::{CoreError, interpret, parse_source};

/// Exit status for scan and syntax errors.
const EXIT_COMPILE_ERROR: u8 = 65;
/// Exit status for runtime errors.
const EXIT_RUNTIME_ERROR: u8 = 70;

/// Evaluate Lox expressions from a script or an interactive prompt.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Script to run. Starts an interactive prompt when omitted.
    script: Option<PathBuf>,

    #[arg(
        long,
        help = "Print the parsed expression in prefix form instead of evaluating it"
    )]
    ast: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<ExitCode> {
    match &cli.script {
        Some(path) => run_file(path, cli.ast),
        None => {
            run_prompt(cli.ast)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_file(path: &Path, ast: bool) -> Result<ExitCode> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;

    match run(&source, ast) {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::from(exit_status(&err)))
        }
    }
}

/// Each line is an independent scan/parse/evaluate cycle; errors are
/// reported and the prompt continues.
fn run_prompt(ast: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        stdout.flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match run(&line, ast) {
            Ok(output) => println!("{output}"),
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}

fn run(source: &str, ast: bool) -> Result<String, CoreError> {
    if ast {
        parse_source(source).map(|expr| to_sexpr(&expr))
    } else {
        interpret(source).map(|value| value.to_string())
    }
}

fn exit_status(err: &CoreError) -> u8 {
    match err {
        CoreError::Compile(_) => EXIT_COMPILE_ERROR,
        CoreError::Runtime(_) => EXIT_RUNTIME_ERROR,
    }
}
