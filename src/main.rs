//! para Compiler
//!
//! Translates para source into Python and optionally runs it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use para_lang::backend::{ExecutionBackend, PythonBackend};
use para_lang::feedback::{CompilationFeedback, CompilationStats, ErrorReport};
use para_lang::frontend::ast_printer::print_ast;
use para_lang::frontend::semantic::AnalyzedRecord;
use para_lang::{Compilation, Compiler, Error, Result};

/// para Compiler
#[derive(Parser, Debug)]
#[command(name = "parac")]
#[command(version)]
#[command(about = "para compiler - translates para loops into Python")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print an intermediate stage
    #[arg(long, value_enum, global = true)]
    emit: Option<Stage>,

    /// Compile only this line of the input (1-based)
    #[arg(long, value_name = "N", global = true)]
    line: Option<usize>,

    /// Print structured JSON feedback instead of plain diagnostics
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a source file and write the Python code
    Build {
        /// Input source file
        input: PathBuf,

        /// Output file (defaults to FILE with a .py extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a source file for errors
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Translate a source file and execute it with Python
    Run {
        /// Input source file
        input: PathBuf,

        /// Python interpreter to use
        #[arg(long, env = "PARA_PYTHON")]
        python: Option<PathBuf>,
    },
    /// Generate Python from analyzed records saved with `--emit records`
    Generate {
        /// JSON file holding the records
        records: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print version information
    Version,
}

/// Pipeline stage to dump
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Tokens,
    Ast,
    Records,
    Code,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = dispatch(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Build { input, output }) => build_file(cli, input, output.clone()),
        Some(Commands::Check { input }) => check_file(cli, input),
        Some(Commands::Run { input, python }) => run_file(cli, input, python.as_deref()),
        Some(Commands::Generate { records, output }) => {
            generate_from_records(cli, records, output.as_deref())
        }
        Some(Commands::Version) => {
            println!("parac {}", env!("CARGO_PKG_VERSION"));
            println!("para Compiler");
            println!("License: Apache-2.0");
            Ok(())
        }
        None => match &cli.input {
            Some(input) => print_file(cli, input),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: parac <FILE> or parac build <FILE>");
                process::exit(1);
            }
        },
    }
}

/// Compile and print the Python code (default command)
fn print_file(cli: &Cli, input: &Path) -> anyhow::Result<()> {
    let compilation = compile_or_exit(cli, input, true)?;

    if cli.emit.is_some() {
        return Ok(());
    }
    if cli.json {
        finish_json(input, &compilation);
    } else {
        println!("{}", compilation.code.unwrap_or_default());
    }
    Ok(())
}

/// Compile a source file and write the generated code
fn build_file(cli: &Cli, input: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let compilation = compile_or_exit(cli, input, true)?;
    let code = compilation.code.clone().unwrap_or_default();

    let out_path = output.unwrap_or_else(|| input.with_extension("py"));
    fs::write(&out_path, format!("{}\n", code))
        .with_context(|| format!("writing {}", out_path.display()))?;

    if cli.json {
        finish_json(input, &compilation);
    } else {
        println!("  [✓] Generated Python: {}", out_path.display());
    }
    Ok(())
}

/// Check a source file for errors without generating code
fn check_file(cli: &Cli, input: &Path) -> anyhow::Result<()> {
    let compilation = compile_or_exit(cli, input, false)?;

    if cli.json {
        finish_json(input, &compilation);
    } else if cli.emit.is_none() {
        println!("✅ No errors found ({} loops)", compilation.records.len());
    }
    Ok(())
}

/// Compile and hand the result to the Python interpreter
fn run_file(cli: &Cli, input: &Path, python: Option<&Path>) -> anyhow::Result<()> {
    let compilation = compile_or_exit(cli, input, true)?;
    let code = compilation.code.unwrap_or_default();

    let backend = match python {
        Some(path) => PythonBackend::with_interpreter(path),
        None => PythonBackend::discover(),
    }
    .unwrap_or_else(|e| fail(cli, input, &e));

    info!("running with {}", backend.interpreter().display());
    let output = backend.execute(&code).unwrap_or_else(|e| fail(cli, input, &e));

    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
    Ok(())
}

/// Render records saved as JSON
fn generate_from_records(cli: &Cli, path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let text = read_file(path).unwrap_or_else(|e| fail(cli, path, &e));
    let records: Vec<AnalyzedRecord> = serde_json::from_str(&text)
        .with_context(|| format!("{} does not hold analyzed records", path.display()))?;

    let code = Compiler::python()
        .generate(&records)
        .unwrap_or_else(|e| fail(cli, path, &e));

    match output {
        Some(out) => {
            fs::write(out, format!("{}\n", code)).with_context(|| format!("writing {}", out.display()))?;
            println!("  [✓] Generated Python: {}", out.display());
        }
        None => println!("{}", code),
    }
    Ok(())
}

// ==================== Helpers ====================

/// Read the input, narrowed to one line when `--line` is given
fn read_source(input: &Path, line: Option<usize>) -> Result<String> {
    let text = read_file(input)?;

    let text = match line {
        Some(n) => n
            .checked_sub(1)
            .and_then(|index| text.lines().nth(index))
            .map(str::to_string)
            .ok_or_else(|| Error::EmptySource(format!("{} line {}", input.display(), n)))?,
        None => text,
    };

    if text.trim().is_empty() {
        return Err(Error::EmptySource(input.display().to_string()));
    }
    Ok(text)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Io(format!("reading {}: {}", path.display(), e)))
}

fn compile_or_exit(cli: &Cli, input: &Path, generate: bool) -> anyhow::Result<Compilation> {
    let source = read_source(input, cli.line).unwrap_or_else(|e| fail(cli, input, &e));
    info!("compiling {} ({} bytes)", input.display(), source.len());

    let mut compiler = Compiler::python();
    let result = if generate {
        compiler.compile(&source)
    } else {
        compiler.check(&source)
    };
    let compilation = result.unwrap_or_else(|e| fail(cli, input, &e));

    if let Some(stage) = cli.emit {
        emit_stage(stage, &compilation)?;
    }
    Ok(compilation)
}

fn emit_stage(stage: Stage, compilation: &Compilation) -> anyhow::Result<()> {
    match stage {
        Stage::Tokens => {
            for token in &compilation.tokens {
                println!("{}", token);
            }
        }
        Stage::Ast => print!("{}", print_ast(&compilation.program)),
        Stage::Records => println!("{}", serde_json::to_string_pretty(&compilation.records)?),
        Stage::Code => match &compilation.code {
            Some(code) => println!("{}", code),
            None => eprintln!("(no code generated by `check`)"),
        },
    }
    Ok(())
}

fn finish_json(input: &Path, compilation: &Compilation) {
    let feedback = CompilationFeedback::success(
        input.display().to_string(),
        compilation.stats.clone(),
        compilation.code.clone(),
    );
    println!("{}", feedback.to_json());
}

/// Report a pipeline error and exit
fn fail(cli: &Cli, input: &Path, error: &Error) -> ! {
    let file = input.display().to_string();
    if cli.json {
        let feedback = CompilationFeedback::failure(file, error, CompilationStats::default());
        println!("{}", feedback.to_json());
    } else {
        eprintln!("{}", ErrorReport::from_error(error, &file).render());
    }
    process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("parac-{}-{}", process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("parac-does-not-exist.para");
        let err = read_source(&path, None).unwrap_err();
        assert!(matches!(err, Error::Io(ref msg) if msg.contains("parac-does-not-exist.para")));
        assert_eq!(err.stage(), "input");
    }

    #[test]
    fn test_blank_file_is_empty_source() {
        let path = write_temp("blank.para", "  \n\n");
        let err = read_source(&path, None).unwrap_err();
        assert!(matches!(err, Error::EmptySource(_)));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_line_selection() {
        let path = write_temp(
            "lines.para",
            "para i no intervalo 2 : escreva i\npara i no intervalo 3 : escreva 'b'\n",
        );
        assert_eq!(
            read_source(&path, Some(2)).unwrap(),
            "para i no intervalo 3 : escreva 'b'"
        );
        assert!(matches!(read_source(&path, Some(0)), Err(Error::EmptySource(_))));
        assert!(matches!(read_source(&path, Some(9)), Err(Error::EmptySource(_))));
        fs::remove_file(path).unwrap();
    }
}
