use std::{
    fs,
    path::{Path, PathBuf},
    process,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use pythonpoint::{
    analyzer::analyzer::analyze, ast::ast::outline, compiler::compiler::generate,
    errors::errors::Error, lexer::lexer::tokenize, optimizer::optimizer::optimize,
    parser::parser::parse, SourceFile,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pythonpoint")]
#[command(about = "Compile PythOnPoint source to JavaScript")]
struct Cli {
    /// Source file
    file: PathBuf,

    /// What to output
    #[arg(long, value_enum, default_value = "js")]
    emit: Emit,

    /// Fold constants before emitting
    #[arg(short = 'O', long)]
    optimize: bool,

    /// Output file (stdout when absent)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// JavaScript
    Js,
    /// The analyzed IR
    Ir,
    /// The token stream
    Tokens,
    /// The parse tree
    Tree,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pythonpoint=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.file)?;
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let output = match run(&cli, &source, &file_name) {
        Ok(output) => output,
        Err(error) => {
            display_error(&error, &cli.file);
            process::exit(1);
        }
    };

    match &cli.out {
        Some(path) => fs::write(path, output)?,
        None => print!("{}", output),
    }

    Ok(())
}

fn run(cli: &Cli, source: &str, file_name: &str) -> Result<String, Error> {
    let start = Instant::now();

    let file = SourceFile::new(file_name, source);
    let tokens = tokenize(&file)?;
    info!("Tokenized in {:?}", start.elapsed());

    if cli.emit == Emit::Tokens {
        return Ok(tokens
            .iter()
            .map(|token| format!("{}:{} {}\n", token.line(), token.column(), token))
            .collect());
    }

    let parse_start = Instant::now();
    let tree = parse(tokens, file)?;
    info!("Parsed in {:?}", parse_start.elapsed());

    if cli.emit == Emit::Tree {
        return Ok(outline(&tree));
    }

    let analyze_start = Instant::now();
    let mut program = analyze(&tree)?;
    info!("Analyzed in {:?}", analyze_start.elapsed());

    if cli.optimize {
        let optimize_start = Instant::now();
        program = optimize(program);
        info!("Optimized in {:?}", optimize_start.elapsed());
    }

    let output = match cli.emit {
        Emit::Ir => format!("{:#?}\n", program),
        _ => generate(&program),
    };
    info!("Total time: {:?}", start.elapsed());

    Ok(output)
}

fn display_error(error: &Error, file: &Path) {
    /*
        Error: DuplicateDeclaration
        -> hello.pop
        Line 2, col 5:
          1 | let x = 1
        > 2 | let x = 2
            |     ^
        Identifier x already declared
    */

    eprintln!("Error: {}", error.get_error_name());
    eprintln!("-> {}", file.display());
    eprintln!("{}", error);
}
