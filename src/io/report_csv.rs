//! CSV output of pairwise evaluation reports.
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::evaluator::PairReport;

#[derive(Serialize)]
struct ReportRow {
    class_1: i32,
    class_2: i32,
    accuracy: f64,
    false_detect_class_1: usize,
    false_detect_class_2: usize,
    n_train: usize,
    n_test: usize,
}

impl From<&PairReport> for ReportRow {
    fn from(report: &PairReport) -> Self {
        ReportRow {
            class_1: report.pair.first,
            class_2: report.pair.second,
            accuracy: report.accuracy,
            false_detect_class_1: report.false_detect_first,
            false_detect_class_2: report.false_detect_second,
            n_train: report.n_train,
            n_test: report.n_test,
        }
    }
}

/// Write one headered CSV row per report.
pub fn write_reports<W: Write>(writer: W, reports: &[PairReport]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for report in reports {
        wtr.serialize(ReportRow::from(report))
            .with_context(|| format!("Failed to write report for pair {}", report.pair))?;
    }
    wtr.flush().context("Failed to flush report CSV")?;
    Ok(())
}
