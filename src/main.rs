//! macrogen binary
//!
//! Run with: `macrogen [-n COUNT] [FILE]`

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use macrogen::{emit, Error, MacroTable};

#[derive(Parser)]
#[command(name = "macrogen")]
#[command(about = "Generate random text from a cookie-jar macro grammar")]
#[command(version)]
struct Cli {
    /// Number of times to expand the entry macro
    #[arg(short = 'n', long = "count", default_value_t = 1)]
    count: usize,

    /// Seed for the random number generator, for repeatable output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Macro to expand instead of the last one defined
    #[arg(short, long)]
    entry: Option<String>,

    /// Give up on an expansion after this many rewrite rounds
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Read the grammar as a JSON object instead of a cookie jar
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Grammar file (default: standard input)
    files: Vec<PathBuf>,
}

/// Opens the one input file, or stdin when there is none
fn open_input(files: &[PathBuf]) -> Result<Box<dyn Read>> {
    match files {
        [] => Ok(Box::new(io::stdin())),
        [path] => {
            let file = File::open(path)
                .map_err(Error::from)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            Ok(Box::new(file))
        }
        _ => Err(Error::SourceError(format!("too many arguments: {}", files.len())).into()),
    }
}

#[cfg(feature = "json")]
fn load_json(mut input: Box<dyn Read>) -> Result<MacroTable> {
    let mut source = String::new();
    input.read_to_string(&mut source).map_err(Error::from)?;
    Ok(MacroTable::from_json(source)?)
}

#[cfg(not(feature = "json"))]
fn load_json(_: Box<dyn Read>) -> Result<MacroTable> {
    anyhow::bail!("this build of macrogen was compiled without JSON support")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for generated text
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let input = match open_input(&cli.files) {
        Ok(input) => input,
        Err(e) if cli.files.len() > 1 => Cli::command().error(ErrorKind::TooManyValues, e).exit(),
        Err(e) => return Err(e),
    };
    let mut table = if cli.json {
        load_json(input)?
    } else {
        MacroTable::from_reader(BufReader::new(input))?
    };
    if let Some(entry) = cli.entry {
        table.set_entry(entry);
    }
    table.set_round_limit(cli.max_rounds);
    debug!(macros = table.len(), entry = ?table.entry(), "loaded grammar");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit(&table, cli.count, &mut rng, &mut out)?;
    Ok(())
}
