//! Train the safety-score pipeline on a locality indicator CSV
//!
//! Usage: cargo run --bin train -- --data localities.csv --output safety_model.json

use anyhow::Result;
use clap::Parser;
use safety_ml::data::DataLoader;
use safety_ml::ml::{Trainer, TrainerConfig};
use safety_ml::pipeline::feature_importance;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train the safety score pipeline")]
struct Args {
    /// Training CSV with indicator columns and the target
    #[arg(short, long)]
    data: PathBuf,

    /// Where to write the fitted pipeline artifact
    #[arg(short, long, default_value = "safety_model.json")]
    output: PathBuf,

    /// Target column name
    #[arg(long, default_value = "composite_safety_score")]
    target: String,

    /// Held-out fraction
    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    /// Cross-validation folds
    #[arg(long, default_value = "5")]
    folds: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("safety_ml=info")
        .init();

    let args = Args::parse();

    println!("===========================================");
    println!("  Safety Score Pipeline Training");
    println!("===========================================\n");

    info!("Loading {} ...", args.data.display());
    let table = DataLoader::load_table(&args.data)?;
    println!(
        "Dataset: {} rows, {} columns, {} missing cells\n",
        table.n_rows(),
        table.columns.len(),
        table.missing_cells()
    );

    let trainer = Trainer::new(TrainerConfig {
        target_column: args.target,
        test_ratio: args.test_ratio,
        seed: args.seed,
        n_folds: args.folds,
        ..Default::default()
    });

    let start = std::time::Instant::now();
    let (state, report) = trainer.train(&table)?;
    println!("Training completed in {:.2}s\n", start.elapsed().as_secs_f64());

    println!("=== Model Comparison ===\n");
    println!("{}", report.comparison_table());

    println!("=== Performance Summary ===\n");
    println!("{}", report.summary());

    println!("=== Feature Importance ===\n");
    let ranking = feature_importance(&state);
    let top = ranking.first().map(|(_, v)| *v).unwrap_or(1.0).max(1e-12);
    for (i, (name, imp)) in ranking.iter().take(15).enumerate() {
        let bar = "█".repeat((imp / top * 30.0).round() as usize);
        println!("{:2}. {:32} {:.4} {}", i + 1, name, imp, bar);
    }

    state.save(&args.output)?;
    println!("\nPipeline saved to {}", args.output.display());

    Ok(())
}
