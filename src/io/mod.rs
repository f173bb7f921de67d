pub mod labeled_csv;
pub mod report_csv;
