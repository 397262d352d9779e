//! Tests for the reference dense engine

use latent_bridge_core_rs::network::{
    Datum, NetworkConfig, NetworkError, NeuralNetwork, TrainOptions, DEFAULT_ENGINE_LEARNING_RATE,
};
use latent_bridge_core_rs::TrainingPair;

fn or_data() -> Vec<Datum> {
    vec![
        TrainingPair::new(vec![0.0, 0.0], vec![0.0]),
        TrainingPair::new(vec![0.0, 1.0], vec![1.0]),
        TrainingPair::new(vec![1.0, 0.0], vec![1.0]),
        TrainingPair::new(vec![1.0, 1.0], vec![1.0]),
    ]
}

fn or_network() -> NeuralNetwork {
    NeuralNetwork::new(NetworkConfig::new(2, vec![3], 1).with_seed(2024)).unwrap()
}

#[test]
fn test_sizes_follow_config() {
    let net = NeuralNetwork::new(NetworkConfig::new(4, vec![4, 2], 3)).unwrap();
    assert_eq!(net.sizes(), &[4, 4, 2, 3]);
    assert_eq!(net.output_layer(), 3);
}

#[test]
fn test_or_function_converges() {
    let mut net = or_network();

    let result = net.train(&or_data(), &TrainOptions::new()).unwrap();

    assert!(result.error <= 0.005, "error {} above threshold", result.error);
    assert!(result.iterations < 20_000);

    let report = net.evaluate(&or_data()).unwrap();
    assert_eq!(report.misclasses, 0);
    assert_eq!(report.accuracy(), 1.0);
}

#[test]
fn test_training_is_reproducible() {
    let mut a = or_network();
    let mut b = or_network();
    let options = TrainOptions::new().with_iterations(200);

    let ra = a.train(&or_data(), &options).unwrap();
    let rb = b.train(&or_data(), &options).unwrap();

    assert_eq!(ra, rb);
    assert_eq!(a.run(&[1.0, 0.0]).unwrap(), b.run(&[1.0, 0.0]).unwrap());
}

#[test]
fn test_iteration_cap_respected() {
    let mut net = or_network();
    let options = TrainOptions::new().with_iterations(3).with_error_thresh(0.0);

    let result = net.train(&or_data(), &options).unwrap();

    assert_eq!(result.iterations, 3);
}

#[test]
fn test_empty_training_data_rejected() {
    let mut net = or_network();
    let err = net.train(&[], &TrainOptions::new()).unwrap_err();
    assert_eq!(err, NetworkError::EmptyTrainingData);
}

#[test]
fn test_ragged_training_data_rejected() {
    let mut net = or_network();
    let mut data = or_data();
    data.push(TrainingPair::new(vec![1.0], vec![1.0]));

    let err = net.train(&data, &TrainOptions::new()).unwrap_err();

    assert_eq!(err, NetworkError::DimensionMismatch { expected: 2, actual: 1 });
}

#[test]
fn test_run_rejects_wrong_input_length() {
    let net = or_network();
    let err = net.run(&[1.0, 0.0, 1.0]).unwrap_err();
    assert_eq!(err, NetworkError::DimensionMismatch { expected: 2, actual: 3 });
}

#[test]
fn test_nan_input_reports_divergence() {
    let mut net = or_network();
    let data = vec![TrainingPair::new(vec![f64::NAN, 0.0], vec![1.0])];

    let err = net.train(&data, &TrainOptions::new()).unwrap_err();

    assert_eq!(err, NetworkError::Diverged { iteration: 1 });
}

#[test]
fn test_non_positive_learning_rate_rejected() {
    let mut net = or_network();
    let options = TrainOptions::new().with_learning_rate(0.0);

    let err = net.train(&or_data(), &options).unwrap_err();

    assert!(matches!(err, NetworkError::InvalidConfig(_)));
}

#[test]
fn test_evaluate_uses_binary_threshold() {
    // Untrained outputs hover near 0.5; a threshold of 0.99 reads them all as 0
    let net = NeuralNetwork::new(NetworkConfig::new(2, vec![3], 1).with_binary_thresh(0.99)).unwrap();

    let report = net.evaluate(&or_data()).unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.misclasses, 3);
}

#[test]
fn test_train_options_from_json() {
    let options: TrainOptions =
        serde_json::from_str(r#"{"iterations": 25000, "error_thresh": 0.007, "learning_rate": 0.2}"#).unwrap();

    assert_eq!(options.iterations, 25_000);
    assert_eq!(options.error_thresh, 0.007);
    assert_eq!(options.effective_learning_rate(), 0.2);
    assert_eq!(options.momentum, 0.1);
    assert_eq!(TrainOptions::new().effective_learning_rate(), DEFAULT_ENGINE_LEARNING_RATE);
}

#[test]
fn test_network_config_from_json() {
    let config: NetworkConfig =
        serde_json::from_str(r#"{"input_size": 5, "hidden_layers": [5, 3], "output_size": 5}"#).unwrap();

    let net = NeuralNetwork::new(config).unwrap();

    assert_eq!(net.sizes(), &[5, 5, 3, 5]);
    assert_eq!(net.binary_thresh(), 0.5);
}
