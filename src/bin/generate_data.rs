//! Generate a synthetic locality indicator CSV for pipeline experiments
//!
//! Usage: cargo run --bin generate_data -- --rows 500 --output localities.csv

use anyhow::Result;
use clap::Parser;
use safety_ml::data::synthetic::generate_localities;
use safety_ml::data::DataLoader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a synthetic locality indicator CSV")]
struct Args {
    /// Number of localities to generate
    #[arg(short, long, default_value = "500")]
    rows: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output CSV path
    #[arg(short, long, default_value = "localities.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("safety_ml=info")
        .init();

    let args = Args::parse();

    println!("===========================================");
    println!("  Synthetic Locality Data Generator");
    println!("===========================================\n");

    let table = generate_localities(args.rows, args.seed);
    println!(
        "Generated {} localities with {} columns (seed {})",
        table.n_rows(),
        table.columns.len(),
        args.seed
    );

    DataLoader::save_table(&table, &args.output)?;
    println!("Wrote {}", args.output.display());

    Ok(())
}
