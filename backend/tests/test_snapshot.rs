//! Snapshot Tests - Save/Load Network Parameters
//!
//! Critical invariants tested:
//! - Fidelity: a restored network produces identical outputs
//! - Integrity: tampered parameters are rejected
//! - Shape: parameters that disagree with the config are rejected

use latent_bridge_core_rs::network::{
    compute_fingerprint, Datum, NetworkConfig, NetworkError, NeuralNetwork, TrainOptions,
};
use latent_bridge_core_rs::TrainingPair;

fn trained_network() -> NeuralNetwork {
    let data: Vec<Datum> = vec![
        TrainingPair::new(vec![0.0, 1.0], vec![1.0, 0.0]),
        TrainingPair::new(vec![1.0, 0.0], vec![0.0, 1.0]),
    ];
    let mut net = NeuralNetwork::new(NetworkConfig::new(2, vec![3], 2).with_seed(31)).unwrap();
    net.train(&data, &TrainOptions::new().with_iterations(500)).unwrap();
    net
}

#[test]
fn test_json_round_trip_preserves_outputs() {
    let net = trained_network();

    let json = net.to_json().unwrap();
    let restored = NeuralNetwork::from_json(&json).unwrap();

    assert_eq!(restored.sizes(), net.sizes());
    assert_eq!(restored.config(), net.config());
    for input in [[0.0, 1.0], [1.0, 0.0], [0.5, 0.5]] {
        assert_eq!(restored.run(&input).unwrap(), net.run(&input).unwrap());
    }
}

#[test]
fn test_snapshot_round_trip_without_json() {
    let net = trained_network();

    let restored = NeuralNetwork::from_snapshot(net.snapshot().unwrap()).unwrap();

    assert_eq!(restored.weights(), net.weights());
}

#[test]
fn test_tampered_weight_rejected() {
    let mut snapshot = trained_network().snapshot().unwrap();
    snapshot.weights[1][0][0] += 1.0;

    let err = NeuralNetwork::from_snapshot(snapshot).unwrap_err();

    assert!(matches!(err, NetworkError::CorruptSnapshot(_)));
}

#[test]
fn test_shape_mismatch_rejected_even_with_valid_fingerprint() {
    let mut snapshot = trained_network().snapshot().unwrap();
    snapshot.biases[1].pop();
    snapshot.fingerprint =
        compute_fingerprint(&snapshot.config, &snapshot.biases, &snapshot.weights).unwrap();

    let err = NeuralNetwork::from_snapshot(snapshot).unwrap_err();

    assert!(matches!(err, NetworkError::CorruptSnapshot(_)));
}

#[test]
fn test_malformed_json_rejected() {
    let err = NeuralNetwork::from_json("{\"config\": 3}").unwrap_err();
    assert!(matches!(err, NetworkError::Serialization(_)));
}

#[test]
fn test_restored_network_keeps_training() {
    let net = trained_network();
    let mut restored = NeuralNetwork::from_json(&net.to_json().unwrap()).unwrap();
    let data: Vec<Datum> = vec![TrainingPair::new(vec![0.0, 1.0], vec![1.0, 0.0])];

    let result = restored.train(&data, &TrainOptions::new().with_iterations(10)).unwrap();

    assert!(result.error.is_finite());
}
