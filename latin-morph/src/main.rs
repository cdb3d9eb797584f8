use std::error::Error;
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use latin_morph_lib::output::{self, text_to_segmented};
use latin_morph_lib::{
    analyze_text, ClosedClassTables, Dictionary, Morphologizer, MorphologizerConfig,
    ParadigmBuilder,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "latin-morph", about = "Latin morphological analyser")]
struct Cli {
    /// Latin text to analyse. If omitted, reads from stdin.
    input: Option<String>,

    /// Print one line per token with its segmentations instead of JSON.
    #[arg(long)]
    segmented: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Lexicon JSON to use instead of the embedded one.
    #[arg(long, value_name = "PATH")]
    lexicon: Option<PathBuf>,

    /// Memoize analyses of repeated tokens.
    #[arg(long)]
    cache: bool,

    /// Log analysis steps to stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = MorphologizerConfig { cache: cli.cache };
    let dictionary = match &cli.lexicon {
        Some(path) => {
            info!(path = %path.display(), "loading lexicon");
            Dictionary::from_json(&fs::read_to_string(path)?)?
        }
        None => Dictionary::new(),
    };
    let tables = Arc::new(ClosedClassTables::load()?);
    let morphologizer = Morphologizer::with_parts(tables, dictionary, ParadigmBuilder, config);

    match cli.input {
        Some(ref text) => process_line(text, &morphologizer, &cli)?,
        None => {
            for line in io::stdin().lock().lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    process_line(&line, &morphologizer, &cli)?;
                }
            }
        }
    }
    Ok(())
}

fn process_line(line: &str, morphologizer: &Morphologizer, cli: &Cli) -> serde_json::Result<()> {
    let text = analyze_text(line, morphologizer);
    if cli.segmented {
        println!("{}", text_to_segmented(&text));
    } else {
        println!("{}", output::to_json(&text, cli.pretty)?);
    }
    Ok(())
}
