//! Command-line interface for tokprep-rs
//!
//! Usage:
//!   tokprep [OPTIONS] <TREEBANK>...
//!   tokprep ud_all
//!
//! Paths default to the `UDBASE` and `TOKENIZE_DATA_DIR` environment
//! variables.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{error, info, LevelFilter};
use tokprep_rs::config::{DEFAULT_OUTPUT_DIR, DEFAULT_UD_BASE};
use tokprep_rs::{process_all, ExtractorConfig, PrepConfig};

/// Prepare tokenizer train/dev/test data from UD treebanks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Treebanks to prepare, e.g. UD_English-EWT, or ud_all / all_ud
    #[arg(required = true, value_name = "TREEBANK")]
    treebanks: Vec<String>,

    /// Directory holding the UD_* treebank directories
    #[arg(long, env = "UDBASE", value_name = "DIR", default_value = DEFAULT_UD_BASE)]
    ud_base: PathBuf,

    /// Directory for the prepared files
    #[arg(short, long, env = "TOKENIZE_DATA_DIR", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// conllu_to_text.pl script used to derive text for synthesized splits
    #[arg(long, env = "CONLLU_TO_TEXT", value_name = "SCRIPT")]
    conllu_to_text: Option<PathBuf>,

    /// Interpreter for --conllu-to-text
    #[arg(long, value_name = "BIN", default_value = "perl")]
    perl: String,

    /// Print a JSON summary of the outcomes
    #[arg(short, long)]
    json: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

impl Cli {
    fn config(&self) -> PrepConfig {
        let extractor = match &self.conllu_to_text {
            Some(script) => ExtractorConfig::Script {
                interpreter: self.perl.clone(),
                script: script.clone(),
            },
            None => ExtractorConfig::Builtin,
        };
        PrepConfig {
            ud_base: self.ud_base.clone(),
            output_dir: self.output_dir.clone(),
            extractor,
        }
    }
}

fn init_logging(verbose: u8, quiet: u8) -> Result<(), log::SetLoggerError> {
    let level = match (quiet, verbose) {
        (0, 0) => LevelFilter::Info,
        (0, 1) => LevelFilter::Debug,
        (0, _) => LevelFilter::Trace,
        (1, _) => LevelFilter::Warn,
        _ => LevelFilter::Error,
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    builder.filter_level(level);
    builder.try_init()
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config();
    let outcomes = process_all(&cli.treebanks, &config).with_context(|| {
        format!(
            "preparing treebanks from {} into {}",
            config.ud_base.display(),
            config.output_dir.display()
        )
    })?;

    let skipped = outcomes.iter().filter(|o| o.is_skipped()).count();
    info!(
        "Done: {} prepared, {} skipped",
        outcomes.len() - skipped,
        skipped
    );

    if cli.json {
        let json =
            serde_json::to_string_pretty(&outcomes).context("serializing outcome summary")?;
        println!("{}", json);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("warning: logging disabled: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
