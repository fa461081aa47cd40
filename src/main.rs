//! Command-line predictor.
//!
//! Without values the form defaults are used. Nine values, in schema order,
//! replace them. Log verbosity follows `RUST_LOG` (default `warn`).
//!
//! Exits 1 when the input is rejected or the prediction fails.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use ghgp::{
    FeatureError, FeatureField, FeatureVector, GhgpConfig, InferenceContext, PredictError,
    Prediction,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ghgp")]
#[command(about = "Predict GHG emissions (kg CO₂e) from nine emission-factor inputs", long_about = None)]
struct Cli {
    /// Pipeline config file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Industry code, year, kg CO₂e per USD, then the supply chain, transport,
    /// manufacturing, material, energy and other GHG factors
    #[arg(allow_negative_numbers = true, value_name = "VALUE")]
    values: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => GhgpConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GhgpConfig::default(),
    };

    let ctx = InferenceContext::from_config(&cfg).context("failed to load model or scaler")?;

    match run(&ctx, &cli.values) {
        Ok(prediction) => {
            println!("Predicted GHG Emission: {prediction}");
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            process::exit(1);
        }
    }
}

fn run(ctx: &InferenceContext, raw: &[String]) -> Result<Prediction, PredictError> {
    let input = if raw.is_empty() {
        FeatureVector::default()
    } else {
        parse_args(raw)?
    };
    print_inputs(&input);
    ctx.predict(&input)
}

fn parse_args(raw: &[String]) -> Result<FeatureVector, FeatureError> {
    if raw.len() != FeatureField::ALL.len() {
        return Err(FeatureError::WrongLength {
            expected: FeatureField::ALL.len(),
            got: raw.len(),
        });
    }
    let values = FeatureField::ALL
        .iter()
        .zip(raw)
        .map(|(field, text)| ghgp::parse_text(*field, text))
        .collect::<Result<Vec<_>, _>>()?;
    FeatureVector::from_slice(&values)
}

fn print_inputs(input: &FeatureVector) {
    for (field, value) in input.iter_named() {
        println!("{:<32} {value}", field.label());
    }
}
