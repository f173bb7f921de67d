//! Reading labeled tables and writing pair reports.

mod common;

use pairwise_classifiers::io::labeled_csv::{read_labeled_csv_from_reader, CsvReaderConfig};
use pairwise_classifiers::io::report_csv::write_reports;
use pairwise_classifiers::models::knn::KNNClassifier;
use pairwise_classifiers::{LabelPair, PairwiseEvaluator};

fn table() -> String {
    let mut csv = String::from("pixel_0,pixel_1,target\n");
    for i in 0..30 {
        let (label, base) = if i % 2 == 0 { (3, 0.0) } else { (8, 10.0) };
        csv.push_str(&format!("{},{},{}\n", base + (i as f32) * 0.1, base, label));
    }
    csv
}

#[test]
fn csv_table_evaluates_and_reports() {
    common::init_logging();
    let data = read_labeled_csv_from_reader(table().as_bytes(), &CsvReaderConfig::default()).unwrap();
    assert_eq!(data.n_samples(), 30);
    assert_eq!(data.classes(), vec![3, 8]);

    let report = PairwiseEvaluator::new(&data)
        .evaluate(LabelPair::new(8, 3), KNNClassifier::with_k(3))
        .unwrap();
    assert_eq!(report.accuracy, 1.0);

    let mut out = Vec::new();
    write_reports(&mut out, &[report]).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("class_1,class_2,accuracy,false_detect_class_1,false_detect_class_2,n_train,n_test")
    );
    assert_eq!(lines.next(), Some("8,3,1.0,0,0,20,10"));
}
