//! Autoencoders
//!
//! [`AutoencoderPort`] is the contract the orchestrator consumes: a trained
//! encode/decode pair for one data domain. [`Autoencoder`] is the reference
//! implementation backed by a symmetric [`NeuralNetwork`] whose narrowest
//! hidden layer holds the latent vector.
//!
//! # Architecture
//!
//! ```text
//! hidden_layers = [6, 5]
//!
//! decoded(3) → 6 → latent(5) → 6 → decoded(3)
//! └──────── encode ───────┘└────── decode ──────┘
//! ```

use crate::network::{Datum, NetworkConfig, NetworkError, NeuralNetwork, TrainOptions, TrainingResult};
use crate::network::{DEFAULT_BINARY_THRESH, DEFAULT_SEED};
use crate::models::TrainingPair;
use serde::{Deserialize, Serialize};

/// A trained encode/decode pair for one data domain
///
/// Implementations must be deterministic once trained: the same input
/// always encodes to the same latent vector. Ports are shared read-only
/// between orchestrators, hence `Send + Sync`.
pub trait AutoencoderPort<D>: Send + Sync {
    /// Map a domain value to its fixed-length latent vector
    fn encode(&self, input: &D) -> Result<Vec<f64>, NetworkError>;

    /// Map a latent vector back to a domain value
    fn decode(&self, latent: &[f64]) -> Result<D, NetworkError>;
}

/// Shape of a reference autoencoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoencoderConfig {
    /// Length of the decoded (domain) vectors
    pub decoded_size: usize,

    /// Encoder hidden layers; the last one is the latent layer
    pub hidden_layers: Vec<usize>,

    pub binary_thresh: f64,

    pub seed: u64,
}

impl Default for AutoencoderConfig {
    fn default() -> Self {
        Self {
            decoded_size: 1,
            hidden_layers: vec![1],
            binary_thresh: DEFAULT_BINARY_THRESH,
            seed: DEFAULT_SEED,
        }
    }
}

impl AutoencoderConfig {
    pub fn new(decoded_size: usize, hidden_layers: Vec<usize>) -> Self {
        Self {
            decoded_size,
            hidden_layers,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Hidden layers of the full encode+decode network
    ///
    /// The encoder layers followed by their mirror image, without repeating
    /// the latent layer.
    fn mirrored_hidden_layers(&self) -> Vec<usize> {
        let mut layers = self.hidden_layers.clone();
        layers.extend(self.hidden_layers.iter().rev().skip(1));
        layers
    }
}

/// Reference autoencoder for numeric vectors
#[derive(Debug, Clone)]
pub struct Autoencoder {
    network: NeuralNetwork,

    /// Index of the latent layer inside `network`
    latent_layer: usize,

    trained: bool,
}

impl Autoencoder {
    /// Build an untrained autoencoder
    ///
    /// # Example
    /// ```
    /// use latent_bridge_core_rs::autoencoder::{Autoencoder, AutoencoderConfig};
    ///
    /// let ae = Autoencoder::new(AutoencoderConfig::new(3, vec![6, 5])).unwrap();
    /// assert_eq!(ae.latent_size(), 5);
    /// assert_eq!(ae.network().sizes(), &[3, 6, 5, 6, 3]);
    /// ```
    pub fn new(config: AutoencoderConfig) -> Result<Self, NetworkError> {
        if config.hidden_layers.is_empty() {
            return Err(NetworkError::InvalidConfig(
                "autoencoder needs at least one hidden layer".to_string(),
            ));
        }

        let network_config = NetworkConfig::new(
            config.decoded_size,
            config.mirrored_hidden_layers(),
            config.decoded_size,
        )
        .with_binary_thresh(config.binary_thresh)
        .with_seed(config.seed);

        Ok(Self {
            network: NeuralNetwork::new(network_config)?,
            latent_layer: config.hidden_layers.len(),
            trained: false,
        })
    }

    /// Train the network to reproduce its own input
    pub fn train(&mut self, data: &[Vec<f64>], options: &TrainOptions) -> Result<TrainingResult, NetworkError> {
        let pairs: Vec<Datum> = data
            .iter()
            .map(|row| TrainingPair::new(row.clone(), row.clone()))
            .collect();
        let result = self.network.train(&pairs, options)?;
        self.trained = true;
        Ok(result)
    }

    /// Full encode+decode pass
    pub fn reconstruct(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.network.run(input)
    }

    /// Mean squared difference between `input` and its reconstruction
    pub fn reconstruction_error(&self, input: &[f64]) -> Result<f64, NetworkError> {
        let output = self.reconstruct(input)?;
        let sum: f64 = output.iter().zip(input).map(|(o, i)| (o - i) * (o - i)).sum();
        Ok(sum / input.len() as f64)
    }

    pub fn latent_size(&self) -> usize {
        self.network.sizes()[self.latent_layer]
    }

    pub fn decoded_size(&self) -> usize {
        self.network.input_size()
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn network(&self) -> &NeuralNetwork {
        &self.network
    }
}

impl AutoencoderPort<Vec<f64>> for Autoencoder {
    fn encode(&self, input: &Vec<f64>) -> Result<Vec<f64>, NetworkError> {
        self.network.run_span(input, 0, self.latent_layer)
    }

    fn decode(&self, latent: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.network
            .run_span(latent, self.latent_layer, self.network.output_layer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hidden_layer_is_latent() {
        let ae = Autoencoder::new(AutoencoderConfig::new(4, vec![2])).unwrap();
        assert_eq!(ae.network().sizes(), &[4, 2, 4]);
        assert_eq!(ae.latent_size(), 2);
    }

    #[test]
    fn test_empty_hidden_layers_rejected() {
        let err = Autoencoder::new(AutoencoderConfig::new(3, vec![])).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidConfig(_)));
    }

    #[test]
    fn test_encode_then_decode_equals_full_pass() {
        let ae = Autoencoder::new(AutoencoderConfig::new(3, vec![4, 2])).unwrap();
        let input = vec![1.0, 0.0, 1.0];
        let latent = ae.encode(&input).unwrap();
        let decoded = ae.decode(&latent).unwrap();
        let full = ae.reconstruct(&input).unwrap();
        for (a, b) in decoded.iter().zip(&full) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
