//! Data loading and saving utilities
//!
//! Reads locality indicator tables from CSV. Columns are discovered from the
//! header row; cells that parse as numbers become record fields, empty cells
//! stay missing, and purely textual columns (state names, category labels)
//! are dropped.

use super::record::{RawRecord, RawTable};
use anyhow::{Context, Result};
use csv::{Reader, Writer};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Data loader for CSV files
pub struct DataLoader;

impl DataLoader {
    /// Load a raw indicator table from a CSV file
    pub fn load_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let mut reader = Reader::from_reader(file);
        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = Vec::new();
        let mut numeric: HashSet<usize> = HashSet::new();

        for result in reader.records() {
            let csv_row = result.context("Failed to read CSV row")?;
            let mut record = RawRecord::new();
            for (j, cell) in csv_row.iter().enumerate() {
                let cell = cell.trim();
                if cell.is_empty() {
                    continue;
                }
                if let Ok(value) = cell.parse::<f64>() {
                    record.insert(headers[j].clone(), value);
                    numeric.insert(j);
                }
            }
            rows.push(record);
        }

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(j, _)| numeric.contains(j))
            .map(|(_, h)| h.clone())
            .collect();

        let table = RawTable::new(columns, rows);
        info!(
            rows = table.n_rows(),
            columns = table.columns.len(),
            missing_cells = table.missing_cells(),
            "loaded indicator table"
        );

        Ok(table)
    }

    /// Save a raw indicator table to a CSV file
    pub fn save_table<P: AsRef<Path>>(table: &RawTable, path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        let mut writer = Writer::from_writer(file);
        writer.write_record(&table.columns)?;

        for row in &table.rows {
            let cells: Vec<String> = table
                .columns
                .iter()
                .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            writer.write_record(&cells)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_table() {
        let mut rows = Vec::new();
        let mut r1 = RawRecord::new();
        r1.insert("population", 5739.0);
        r1.insert("flood_events", 2.0);
        let mut r2 = RawRecord::new();
        r2.insert("population", 5796.0);
        r2.insert("flood_events", 8.0);
        rows.push(r1);
        rows.push(r2);

        let table = RawTable::new(
            vec!["population".to_string(), "flood_events".to_string()],
            rows,
        );

        let dir = tempdir().unwrap();
        let path = dir.path().join("localities.csv");

        DataLoader::save_table(&table, &path).unwrap();
        let loaded = DataLoader::load_table(&path).unwrap();

        assert_eq!(loaded.n_rows(), 2);
        assert_eq!(loaded.rows[0].get("population"), Some(5739.0));
        assert_eq!(loaded.rows[1].get("flood_events"), Some(8.0));
    }

    #[test]
    fn test_load_drops_textual_columns_and_keeps_missing_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.csv");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "locality_name,population,flood_events").unwrap();
        writeln!(file, "Pasighat New,5739,2").unwrap();
        writeln!(file, "Pasighat Old,,3").unwrap();
        drop(file);

        let table = DataLoader::load_table(&path).unwrap();

        assert!(!table.has_column("locality_name"));
        assert!(table.has_column("population"));
        assert_eq!(table.rows[1].get("population"), None);
        assert_eq!(table.missing_cells(), 1);
    }
}
