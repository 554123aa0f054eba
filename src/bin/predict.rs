//! Score localities with a trained pipeline
//!
//! Usage:
//!   cargo run --bin predict -- --model safety_model.json --input record.json
//!   cargo run --bin predict -- --model safety_model.json --example
//!
//! The input file holds either a single JSON object of named numeric fields
//! or an array of such objects for batch scoring.

use anyhow::{bail, Context, Result};
use clap::Parser;
use safety_ml::data::RawRecord;
use safety_ml::pipeline::ScoringService;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score localities with a trained pipeline")]
struct Args {
    /// Fitted pipeline artifact
    #[arg(short, long, default_value = "safety_model.json")]
    model: PathBuf,

    /// JSON input: one record object, or an array for batch scoring
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Score the built-in example record instead of a file
    #[arg(long)]
    example: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("safety_ml=info")
        .init();

    let args = Args::parse();

    let service = ScoringService::from_artifact(&args.model)?;
    println!(
        "Loaded pipeline: {} ({} features, trained {})\n",
        service.state().model.kind(),
        service.state().selector.n_selected(),
        service.state().trained_at.format("%Y-%m-%d %H:%M UTC")
    );

    if args.example {
        print_prediction(&service, &RawRecord::example())?;
        return Ok(());
    }

    let path = match args.input {
        Some(path) => path,
        None => bail!("provide --input <file> or --example"),
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read input file: {:?}", path))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).context("Input is not valid JSON")?;

    match &value {
        serde_json::Value::Array(items) => {
            let records: Vec<RawRecord> = items
                .iter()
                .map(|v| RawRecord::from_json(v).unwrap_or_default())
                .collect();

            let results = service.predict_batch(&records)?;
            for (i, result) in results.iter().enumerate() {
                match result {
                    Ok(p) => {
                        println!("[{}] score {:6.2}  {}", i, p.score, p.category);
                        if !p.missing_features.is_empty() {
                            println!("    missing: {}", p.missing_features.join(", "));
                        }
                    }
                    Err(e) => println!("[{}] error: {}", i, e),
                }
            }
        }
        _ => {
            let record = RawRecord::from_json(&value)
                .context("Input must be a JSON object of numeric fields")?;
            print_prediction(&service, &record)?;
        }
    }

    Ok(())
}

fn print_prediction(service: &ScoringService, record: &RawRecord) -> Result<()> {
    let prediction = service.predict(record)?;

    println!("Safety score:  {:.2}", prediction.score);
    println!("Risk category: {}", prediction.category);
    if !prediction.missing_features.is_empty() {
        println!(
            "Missing features filled with 0: {}",
            prediction.missing_features.join(", ")
        );
    }
    Ok(())
}
