use anyhow::Result;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pairwise_classifiers::config::{ModelConfig, ModelType};
use pairwise_classifiers::io::labeled_csv::read_labeled_csv;
use pairwise_classifiers::io::report_csv::write_reports;
use pairwise_classifiers::{LabeledDataset, PairwiseEvaluator};

/// Noisy 8x8 "digit" images: each class lights up its own band of pixels.
fn synthetic_digits(n_per_class: usize, n_classes: i32) -> Result<LabeledDataset> {
    let mut rng = StdRng::seed_from_u64(0);
    let n_pixels = 64;
    let mut pixels = Vec::with_capacity(n_per_class * n_classes as usize * n_pixels);
    let mut labels = Vec::new();
    for label in 0..n_classes {
        let band = (label as usize * 6)..(label as usize * 6 + 10);
        for _ in 0..n_per_class {
            for p in 0..n_pixels {
                let base = if band.contains(&p) { 12.0 } else { 1.0 };
                pixels.push(base + rng.gen_range(0.0..4.0f32));
            }
            labels.push(label);
        }
    }
    let x = Array2::from_shape_vec((labels.len(), n_pixels), pixels)?;
    Ok(LabeledDataset::from_arrays(x, Array1::from_vec(labels))?)
}

fn main() -> Result<()> {
    env_logger::init();

    // Pass a CSV path with a "target" column to evaluate your own table
    let data = match std::env::args().nth(1) {
        Some(path) => read_labeled_csv(path, "target")?,
        None => synthetic_digits(60, 10)?,
    };
    data.log_input_data_summary();

    let evaluator = PairwiseEvaluator::new(&data);
    let knn = ModelConfig::new(
        0.0,
        ModelType::KNN {
            n_neighbors: 5,
            distance_weighted: false,
        },
    );

    let reports = evaluator.evaluate_all_pairs(&knn)?;
    let worst = reports
        .iter()
        .min_by(|a, b| a.accuracy.total_cmp(&b.accuracy));
    if let Some(worst) = worst {
        println!("Hardest pair: {}", worst);
        print!("{}", worst.confusion);
    }

    write_reports(std::io::stdout().lock(), &reports)?;
    Ok(())
}
