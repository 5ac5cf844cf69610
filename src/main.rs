// kannadapy: Kannada-keyword script to C-like source transpiler

use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kannadapy::compiler::{self, CompileOptions};
use kannadapy::constants::{COMPILER_NAME, DEFAULT_INDENT_WIDTH};
use kannadapy::CompileError;

/// Transpile a Kannada-keyword script into C-like source
#[derive(Debug, Parser)]
#[command(name = "kannadapy", version, about, long_about = None)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// File to write the generated code to
    output: PathBuf,

    /// Print the token stream to stdout
    #[arg(long)]
    dump_tokens: bool,

    /// Print the syntax tree to stdout
    #[arg(long)]
    dump_ast: bool,

    /// Print the symbol table to stdout after checking
    #[arg(long)]
    dump_symbols: bool,

    /// Spaces per nesting level in generated blocks
    #[arg(long, default_value_t = DEFAULT_INDENT_WIDTH)]
    indent: usize,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!(
                "{} cannot read '{}': {}",
                "error:".red().bold(),
                cli.input.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&cli.input, &source, &e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli, source: &str) -> Result<(), CompileError> {
    let options = CompileOptions {
        indent_width: cli.indent,
        ..CompileOptions::default()
    };

    info!(compiler = COMPILER_NAME, input = %cli.input.display(), "compiling");

    let tokens = compiler::lex(source)?;
    if cli.dump_tokens {
        for token in &tokens {
            println!("{:>4}  {}", token.line, token);
        }
    }

    let program = compiler::parse(tokens)?;
    if cli.dump_ast {
        print!("{}", program.dump());
    }

    let symbols = compiler::check(&program, &options)?;
    if cli.dump_symbols {
        print!("{}", symbols);
    }

    // The output file is only created once the program is known to be valid
    let file = fs::File::create(&cli.output)?;
    compiler::generate(&program, BufWriter::new(file), &options)?;

    info!(output = %cli.output.display(), "wrote generated code");
    Ok(())
}

/// Print `err` with the offending source line, if there is one.
fn report(path: &Path, source: &str, err: &CompileError) {
    debug!(kind = err.kind(), "compilation failed");
    eprintln!("{}", err.to_string().red().bold());

    let Some(line) = err.line() else {
        return;
    };
    eprintln!("  {} {}:{}", "-->".blue(), path.display(), line);

    if let Some(text) = line.checked_sub(1).and_then(|i| source.lines().nth(i)) {
        let gutter = format!("{:>4} |", line);
        eprintln!("{} {}", gutter.blue(), text);
    }
}
