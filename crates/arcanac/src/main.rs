//! The Arcana compiler CLI.
//!
//! Provides the `arcanac` command with the `exsecutio` subcommand:
//! compile a `.arkhe` file to Python and, unless `--non-run` is given,
//! run it with the host's `python3`.

use std::io::Write as _;
use std::path::PathBuf;
use std::process;

use arcanac::{diagnostics, pipeline};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arcanac", version, about = "The Arcana compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile (and by default run) an Arcana source file.
    Exsecutio {
        /// Path to the `.arkhe` source file.
        file: PathBuf,

        /// Print the emitted Python source to stdout.
        #[arg(long)]
        perscribere: bool,

        /// Compile only; do not invoke python3.
        #[arg(long = "non-run")]
        non_run: bool,

        /// Trace pipeline stage boundaries to stderr.
        #[arg(long)]
        vestigium: bool,

        /// On an internal error, print the full wrapped message.
        #[arg(long)]
        pytrace: bool,

        /// Loop nesting depth cap (not part of the user-facing surface).
        #[arg(long = "max-loop-depth", default_value = "3", hide = true)]
        max_loop_depth: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Exsecutio { file, perscribere, non_run, vestigium, pytrace, max_loop_depth } => {
            if let Err(code) = exsecutio(&file, perscribere, non_run, vestigium, pytrace, max_loop_depth) {
                process::exit(code);
            }
        }
    }
}

fn tr(vestigium: bool, message: &str) {
    if vestigium {
        eprintln!("[arcana: trace]> {message}");
    }
}

fn exsecutio(
    file: &std::path::Path,
    perscribere: bool,
    non_run: bool,
    vestigium: bool,
    pytrace: bool,
    max_loop_depth: u32,
) -> Result<(), i32> {
    let source = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("error: {}: {e}", file.display());
        1
    })?;

    tr(vestigium, "lex+parse+semantic");
    let result = pipeline::compile_source(&source, max_loop_depth)
        .map_err(|e| report_error(&source, file, e, vestigium, pytrace))?;

    tr(vestigium, "emit");
    let emitted = arcana_emit::emit(&result.program);

    if perscribere {
        println!("{emitted}");
    }

    if non_run {
        return Ok(());
    }

    tr(vestigium, "exsecutio");
    run_python(&emitted)
}

fn report_error(
    source: &str,
    file: &std::path::Path,
    err: pipeline::CompileError,
    vestigium: bool,
    pytrace: bool,
) -> i32 {
    if vestigium {
        diagnostics::report(source, &file.display().to_string(), &err);
    } else {
        eprintln!("{err}");
    }
    if pytrace && err.code() == "P0099_INTERNAL" {
        eprintln!("[arcana: internal]> {}", err.message());
    }
    1
}

fn run_python(source: &str) -> Result<(), i32> {
    let mut tmp = tempfile::Builder::new()
        .suffix(".py")
        .tempfile()
        .map_err(|e| {
            eprintln!("error: failed to create temp file: {e}");
            1
        })?;
    tmp.write_all(source.as_bytes()).map_err(|e| {
        eprintln!("error: failed to write emitted source: {e}");
        1
    })?;
    tmp.flush().map_err(|e| {
        eprintln!("error: failed to flush emitted source: {e}");
        1
    })?;

    let status = process::Command::new("python3")
        .arg(tmp.path())
        .status()
        .map_err(|e| {
            eprintln!("error: failed to launch python3: {e}");
            1
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(status.code().unwrap_or(1))
    }
}
