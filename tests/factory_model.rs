use ndarray::{array, Array1};
use pairwise_classifiers::config::{ModelConfig, ModelType};
use pairwise_classifiers::models::factory;

#[test]
fn test_factory_builds_and_predicts() {
    // tiny dataset
    let x = array![
        [1.0, 0.0], // class 4
        [0.0, 1.0], // class 2
        [1.0, 0.1], // class 4
        [0.0, 0.9], // class 2
        [1.1, 0.0], // class 4
        [0.0, 1.2], // class 2
    ];
    let y: Array1<i32> = array![4, 2, 4, 2, 4, 2];

    for model_type in [
        ModelType::GBDT {
            max_depth: 3,
            num_boost_round: 10,
            debug: false,
            training_optimization_level: 2,
            loss_type: "LogLikelyhood".to_string(),
        },
        ModelType::KNN {
            n_neighbors: 1,
            distance_weighted: false,
        },
    ] {
        let params = ModelConfig::new(0.1, model_type);
        let mut model = factory::build_model(&params);
        model.fit(&x, &y).expect("fit failed");
        let predictions = model.predict(&x).expect("predict failed");
        assert_eq!(predictions.len(), x.nrows());
        assert!(predictions.iter().all(|p| *p == 2 || *p == 4));
    }
}
