//! forest-vote command line entry point.
//!
//! ```text
//! forest-vote --model model_data.json \
//!     --feature sepal_length=5.1 --feature sepal_width=3.5 \
//!     --feature petal_length=1.4 --feature petal_width=0.2
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use forest_vote::{ConfigError, LoadError, ModelSlot, PredictError, PredictorConfig, ReportConfig};

/// Classify one sample with a pre-trained decision forest.
#[derive(Debug, Parser)]
#[command(name = "forest-vote", version, about)]
struct Cli {
    /// Model file (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// Feature value, repeatable
    #[arg(short, long = "feature", value_name = "NAME=VALUE", value_parser = parse_field)]
    features: Vec<(String, String)>,

    /// Worker threads; 1 votes on the calling thread
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Unit printed after each feature value
    #[arg(long, default_value = "cm")]
    unit: String,

    /// Also print per-class vote counts
    #[arg(long)]
    votes: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Predict(#[from] PredictError),
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {arg:?}")),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let predictor = PredictorConfig::builder()
        .maybe_n_threads(cli.threads)
        .build()?;
    let report = ReportConfig::builder().unit(cli.unit).build()?;

    let slot = ModelSlot::with_config(&predictor, report)?;
    slot.load_path(&cli.model)?;

    let report = slot.submit(&cli.features)?;
    println!("{report}");
    if cli.votes {
        println!("Votes:");
        for class in &report.votes {
            println!("- {}: {}", class.class, class.votes);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "forest_vote=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
