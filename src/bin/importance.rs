//! Report feature importances from a trained pipeline
//!
//! Usage: cargo run --bin importance -- --model safety_model.json

use anyhow::Result;
use clap::Parser;
use safety_ml::pipeline::{feature_importance, ScoringService};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Report feature importances from a trained pipeline")]
struct Args {
    /// Fitted pipeline artifact
    #[arg(short, long, default_value = "safety_model.json")]
    model: PathBuf,

    /// How many features to show
    #[arg(short, long, default_value = "20")]
    top: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("safety_ml=info")
        .init();

    let args = Args::parse();

    let service = ScoringService::from_artifact(&args.model)?;
    let state = service.state();

    println!("===========================================");
    println!("  Feature Importance Report");
    println!("===========================================\n");
    println!(
        "Model: {} (CV R2 {:.4}, trained {})",
        state.model.kind(),
        state.cv_r2,
        state.trained_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "Selected {} of {} candidate features\n",
        state.selector.n_selected(),
        state.feature_names.len()
    );

    let ranked = feature_importance(state);
    if ranked.is_empty() {
        println!("Model exposes no importances.");
        return Ok(());
    }

    let top = ranked.first().map(|(_, v)| *v).unwrap_or(1.0).max(1e-12);
    let width = ranked
        .iter()
        .take(args.top)
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    for (i, (name, imp)) in ranked.iter().take(args.top).enumerate() {
        let bar = "█".repeat((imp / top * 30.0).round() as usize);
        println!("{:>3}. {:width$}  {:.4}  {}", i + 1, name, imp, bar);
    }

    Ok(())
}
