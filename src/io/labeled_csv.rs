//! Headered CSV reader for labeled feature tables.
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use csv::StringRecord;
use ndarray::{Array1, Array2};

use crate::data_handling::LabeledDataset;

/// Configuration for reading a labeled feature table.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// Column holding the class labels.
    pub target_column: String,
    pub delimiter: u8,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            target_column: "target".to_string(),
            delimiter: b',',
        }
    }
}

/// Read a comma separated file whose `target_column` holds the labels; every
/// other column is a numeric feature.
pub fn read_labeled_csv<P: AsRef<Path>>(path: P, target_column: &str) -> Result<LabeledDataset> {
    let config = CsvReaderConfig {
        target_column: target_column.to_string(),
        ..Default::default()
    };
    read_labeled_csv_with_config(path, &config)
}

pub fn read_labeled_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &CsvReaderConfig,
) -> Result<LabeledDataset> {
    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {}", path.as_ref().display()))?;
    read_labeled_csv_from_reader(file, config)
}

pub fn read_labeled_csv_from_reader<R: Read>(
    rdr: R,
    config: &CsvReaderConfig,
) -> Result<LabeledDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();

    let target_idx = find_column(&headers, &config.target_column)
        .ok_or_else(|| anyhow!("Missing target column '{}'", config.target_column))?;
    let feature_indices: Vec<usize> = (0..headers.len()).filter(|&i| i != target_idx).collect();
    if feature_indices.is_empty() {
        bail!("No feature columns besides '{}'", config.target_column);
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let raw = record
            .get(target_idx)
            .ok_or_else(|| anyhow!("Missing target value at row {}", row_idx + 1))?;
        labels.push(parse_label(raw).with_context(|| format!("Invalid label at row {}", row_idx + 1))?);

        for &idx in &feature_indices {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            let parsed = value.parse::<f32>().with_context(|| {
                format!(
                    "Invalid feature '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            features.push(parsed);
        }
    }

    let x = Array2::from_shape_vec((labels.len(), feature_indices.len()), features)
        .context("Failed to build feature matrix")?;
    let feature_names = feature_indices
        .iter()
        .map(|&idx| headers.get(idx).unwrap_or("").to_string())
        .collect();

    let dataset = LabeledDataset::new(x, Array1::from_vec(labels), feature_names)?;
    log::debug!(
        "read {} rows with {} features",
        dataset.n_samples(),
        dataset.n_features()
    );
    Ok(dataset)
}

/// Integer labels; integral floats such as `3.0` are accepted too.
fn parse_label(raw: &str) -> Result<i32> {
    if let Ok(label) = raw.parse::<i32>() {
        return Ok(label);
    }
    let value = raw
        .parse::<f64>()
        .with_context(|| format!("'{}' is not a number", raw))?;
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        bail!("'{}' is not an integer class label", raw);
    }
    Ok(value as i32)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}
