//! Snapshot - Save/Load Network Parameters
//!
//! A snapshot captures everything needed to rebuild a trained network:
//! its config, weights and biases. A SHA-256 fingerprint over the parameters
//! guards against truncated or hand-edited files.
//!
//! # Critical Invariants
//!
//! - **Fidelity**: a restored network produces the same outputs as the original
//! - **Integrity**: restore fails if the fingerprint does not match
//! - **Shape**: restore fails if weights/biases disagree with the config sizes

use crate::network::engine::{NetworkConfig, NetworkError, NeuralNetwork};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

/// Serializable network parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub config: NetworkConfig,

    /// `biases[layer][node]`; layer 0 is empty
    pub biases: Vec<Vec<f64>>,

    /// `weights[layer][node][k]`; layer 0 is empty
    pub weights: Vec<Vec<Vec<f64>>>,

    /// SHA-256 of config, biases and weights
    pub fingerprint: String,
}

/// Compute the fingerprint of a set of network parameters
///
/// Hashes the JSON encoding of the parameters; struct fields and vectors
/// serialize in a fixed order so the hash is stable.
pub fn compute_fingerprint(
    config: &NetworkConfig,
    biases: &[Vec<f64>],
    weights: &[Vec<Vec<f64>>],
) -> Result<String, NetworkError> {
    let json = serde_json::to_string(&(config, biases, weights))
        .map_err(|e| NetworkError::Serialization(format!("Parameter serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

impl NeuralNetwork {
    /// Capture the current parameters
    pub fn snapshot(&self) -> Result<NetworkSnapshot, NetworkError> {
        let biases: Vec<Vec<f64>> = (0..self.sizes().len())
            .map(|layer| self.layer_state().biases(layer).to_vec())
            .collect();
        let weights = self.weights().to_vec();
        let fingerprint = compute_fingerprint(self.config(), &biases, &weights)?;

        Ok(NetworkSnapshot {
            config: self.config().clone(),
            biases,
            weights,
            fingerprint,
        })
    }

    /// Rebuild a network from a snapshot
    ///
    /// Momentum history is not part of a snapshot, so a restored network
    /// starts its next training run without it.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Result<Self, NetworkError> {
        let expected = compute_fingerprint(&snapshot.config, &snapshot.biases, &snapshot.weights)?;
        if expected != snapshot.fingerprint {
            warn!(
                expected = %expected,
                found = %snapshot.fingerprint,
                "rejecting snapshot with mismatched fingerprint"
            );
            return Err(NetworkError::CorruptSnapshot(
                "fingerprint does not match parameters".to_string(),
            ));
        }

        snapshot.config.validate()?;
        validate_shapes(&snapshot)?;

        Ok(NeuralNetwork::assemble(
            snapshot.config,
            snapshot.weights,
            snapshot.biases,
        ))
    }

    /// Serialize a snapshot to JSON
    pub fn to_json(&self) -> Result<String, NetworkError> {
        let snapshot = self.snapshot()?;
        serde_json::to_string(&snapshot)
            .map_err(|e| NetworkError::Serialization(format!("Snapshot serialization failed: {}", e)))
    }

    /// Restore from JSON produced by [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let snapshot: NetworkSnapshot = serde_json::from_str(json)
            .map_err(|e| NetworkError::Serialization(format!("Snapshot parse failed: {}", e)))?;
        Self::from_snapshot(snapshot)
    }
}

fn validate_shapes(snapshot: &NetworkSnapshot) -> Result<(), NetworkError> {
    let sizes = snapshot.config.sizes();
    let corrupt = |msg: String| Err(NetworkError::CorruptSnapshot(msg));

    if snapshot.biases.len() != sizes.len() || snapshot.weights.len() != sizes.len() {
        return corrupt(format!(
            "expected {} layers, found {} bias and {} weight layers",
            sizes.len(),
            snapshot.biases.len(),
            snapshot.weights.len()
        ));
    }
    if !snapshot.biases[0].is_empty() || !snapshot.weights[0].is_empty() {
        return corrupt("input layer must not carry parameters".to_string());
    }

    for layer in 1..sizes.len() {
        if snapshot.biases[layer].len() != sizes[layer] || snapshot.weights[layer].len() != sizes[layer] {
            return corrupt(format!("layer {} should have {} units", layer, sizes[layer]));
        }
        if snapshot.weights[layer].iter().any(|row| row.len() != sizes[layer - 1]) {
            return corrupt(format!(
                "layer {} weight rows should have {} inputs",
                layer,
                sizes[layer - 1]
            ));
        }
    }
    Ok(())
}
