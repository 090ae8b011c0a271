//! CSV dataset provider.
//!
//! Loads the two read-only tables (generation, emissions) once at startup.
//! Missing files and columns degrade to empty tables and zero values, and
//! unparseable rows are skipped with a warning; the dataset never fails to
//! load. The tables are immutable for the life of the process.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

pub const GENERATION_FILE: &str = "generation.csv";
pub const EMISSIONS_FILE: &str = "emissions.csv";

/// One row of the generation table. A row without a region still counts
/// towards national totals; a row without a source is left out of the
/// per-source breakdown.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRow {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "zero_if_blank")]
    pub generation_mwh: f64,
    #[serde(default)]
    pub source: Option<String>,
}

/// One row of the emissions table.
#[derive(Debug, Clone, Deserialize)]
pub struct EmissionsRow {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "emissions_tCO2", default, deserialize_with = "zero_if_blank")]
    pub emissions_tco2: f64,
}

/// Blank cells parse as 0.0 instead of failing the whole row.
fn zero_if_blank<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(de)?.unwrap_or(0.0))
}

#[derive(Debug, Default)]
pub struct Dataset {
    pub generation: Vec<GenerationRow>,
    pub emissions: Vec<EmissionsRow>,
}

impl Dataset {
    pub fn new(generation: Vec<GenerationRow>, emissions: Vec<EmissionsRow>) -> Self {
        Self {
            generation,
            emissions,
        }
    }

    /// Load both tables from `dir`. A missing or unreadable file yields an
    /// empty table, not an error.
    pub fn load(dir: &Path) -> Self {
        let generation = read_table(&dir.join(GENERATION_FILE));
        let emissions = read_table(&dir.join(EMISSIONS_FILE));
        tracing::info!(
            "dataset loaded: {} generation rows, {} emissions rows",
            generation.len(),
            emissions.len()
        );
        Self {
            generation,
            emissions,
        }
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(_) => {
            tracing::warn!("dataset file {} missing, using empty table", path.display());
            return Vec::new();
        }
    };
    parse_table(file, &path.display().to_string())
}

fn parse_table<T: DeserializeOwned, R: Read>(reader: R, label: &str) -> Vec<T> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!("skipping malformed row in {}: {}", label, e),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generation_rows() {
        let csv = "region,source,generation_mwh\n\
                   Nairobi,geothermal,80.0\n\
                   ,solar,12.5\n";
        let rows: Vec<GenerationRow> = parse_table(csv.as_bytes(), "test");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region.as_deref(), Some("Nairobi"));
        assert_eq!(rows[0].source.as_deref(), Some("geothermal"));
        assert_eq!(rows[0].generation_mwh, 80.0);
        assert_eq!(rows[1].region, None);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "date,region,source,generation_mwh\n\
                   2024-01-01,Turkana,wind,310.0\n";
        let rows: Vec<GenerationRow> = parse_table(csv.as_bytes(), "test");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region.as_deref(), Some("Turkana"));
        assert_eq!(rows[0].generation_mwh, 310.0);
    }

    #[test]
    fn test_missing_emissions_column_degrades_to_zero() {
        let csv = "region\nNairobi\nMombasa\n";
        let rows: Vec<EmissionsRow> = parse_table(csv.as_bytes(), "test");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].emissions_tco2, 0.0);
    }

    #[test]
    fn test_blank_numeric_cell_is_zero() {
        let csv = "region,generation_mwh,source\nNairobi,,solar\n";
        let rows: Vec<GenerationRow> = parse_table(csv.as_bytes(), "test");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].generation_mwh, 0.0);
    }

    #[test]
    fn test_malformed_row_skipped() {
        let csv = "region,emissions_tCO2\n\
                   Nairobi,not-a-number\n\
                   Mombasa,45.2\n";
        let rows: Vec<EmissionsRow> = parse_table(csv.as_bytes(), "test");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region.as_deref(), Some("Mombasa"));
    }

    #[test]
    fn test_missing_files_yield_empty_tables() {
        let dataset = Dataset::load(Path::new("/nonexistent/neis-data"));
        assert!(dataset.generation.is_empty());
        assert!(dataset.emissions.is_empty());
    }
}
