//! Randomized learner
//!
//! An extreme-learning-machine style simplification of backpropagation:
//! the output layer trains on the genuine squared-error gradient, while every
//! interior layer receives independent noise drawn uniformly from
//! `[0, learning_rate)` in place of its delta and error signals.
//!
//! # Step
//!
//! ```text
//! for layer in (1..=output).rev():
//!     drop previous deltas/errors of layer
//!     if layer == output: deltas, errors = backprop(outputs[output], target)
//!     else:               deltas = delta_noise[layer](lr)
//!                         errors = error_noise[layer](lr)
//! ```
//!
//! The noise is a speed/fidelity trade-off kept as-is: interior layers never
//! see the target, regardless of depth.

use crate::network::{Datum, DeltaRule, LayerState, NetworkConfig, NetworkError, NeuralNetwork};
use crate::network::{TrainOptions, TrainingResult};
use crate::rng::RngManager;
use tracing::debug;

/// Learning rate used when train options leave it unset
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Mixed into the network seed so noise streams differ from weight init
const NOISE_SALT: u64 = 0xE1A5_7105_0000_0000;

/// Produces one noise vector per call, shaped to a single layer
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    size: usize,
    rng: RngManager,
}

impl NoiseGenerator {
    pub fn new(size: usize, rng: RngManager) -> Self {
        Self { size, rng }
    }

    /// Units per generated vector
    pub fn size(&self) -> usize {
        self.size
    }

    /// One value per unit, each uniform in `[0, learning_rate)`
    pub fn generate(&mut self, learning_rate: f64) -> Vec<f64> {
        (0..self.size)
            .map(|_| self.rng.next_f64() * learning_rate)
            .collect()
    }
}

/// Delta rule substituting noise for interior-layer gradients
#[derive(Debug, Clone)]
pub struct RandomizedDeltas {
    learning_rate: f64,

    /// One generator per non-output layer, indexed by layer
    delta_generators: Vec<NoiseGenerator>,
    error_generators: Vec<NoiseGenerator>,
}

impl RandomizedDeltas {
    /// Allocate a delta and an error generator for every layer but the output
    pub fn new(sizes: &[usize], seed: u64) -> Self {
        let mut root = RngManager::new(seed ^ NOISE_SALT);
        let non_output = &sizes[..sizes.len().saturating_sub(1)];

        let mut delta_generators = Vec::with_capacity(non_output.len());
        let mut error_generators = Vec::with_capacity(non_output.len());
        for &size in non_output {
            error_generators.push(NoiseGenerator::new(size, root.fork()));
            delta_generators.push(NoiseGenerator::new(size, root.fork()));
        }

        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            delta_generators,
            error_generators,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    /// Number of generators held (two per non-output layer)
    pub fn generator_count(&self) -> usize {
        self.delta_generators.len() + self.error_generators.len()
    }
}

impl DeltaRule for RandomizedDeltas {
    fn calculate_deltas(&mut self, layers: &mut LayerState, _weights: &[Vec<Vec<f64>>], target: &[f64]) {
        let output_layer = layers.output_layer();
        for layer in (1..=output_layer).rev() {
            let (deltas, errors) = if layer == output_layer {
                layers.output_signal(target)
            } else {
                (
                    self.delta_generators[layer].generate(self.learning_rate),
                    self.error_generators[layer].generate(self.learning_rate),
                )
            };
            layers.replace_signal(layer, deltas, errors);
        }
    }
}

/// Dense network trained with [`RandomizedDeltas`]
///
/// # Example
/// ```
/// use latent_bridge_core_rs::learner::RandomizedLearner;
/// use latent_bridge_core_rs::network::NetworkConfig;
///
/// let learner = RandomizedLearner::new(NetworkConfig::new(2, vec![4, 3], 1)).unwrap();
/// assert_eq!(learner.learning_rate(), 0.1);
/// assert_eq!(learner.generator_count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct RandomizedLearner {
    network: NeuralNetwork,
    rule: RandomizedDeltas,
}

impl RandomizedLearner {
    pub fn new(config: NetworkConfig) -> Result<Self, NetworkError> {
        Ok(Self::from_network(NeuralNetwork::new(config)?))
    }

    /// Wrap an existing network; noise streams are seeded from its config
    pub fn from_network(network: NeuralNetwork) -> Self {
        let rule = RandomizedDeltas::new(network.sizes(), network.config().seed);
        Self { network, rule }
    }

    pub fn learning_rate(&self) -> f64 {
        self.rule.learning_rate()
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.rule.set_learning_rate(learning_rate);
    }

    pub fn generator_count(&self) -> usize {
        self.rule.generator_count()
    }

    pub fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    pub fn into_network(self) -> NeuralNetwork {
        self.network
    }

    pub fn run(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.network.run(input)
    }

    /// Train with the randomized rule
    ///
    /// `options.learning_rate` (default 0.1) replaces the current noise scale,
    /// then the options go unchanged to the engine's training loop.
    pub fn train(&mut self, data: &[Datum], options: &TrainOptions) -> Result<TrainingResult, NetworkError> {
        let learning_rate = options.learning_rate.unwrap_or(DEFAULT_LEARNING_RATE);
        self.rule.set_learning_rate(learning_rate);
        debug!(learning_rate, "randomized training run");

        self.network.train_with(data, options, &mut self.rule)
    }

    /// Run one forward pass and one adjustment step without updating weights
    ///
    /// The resulting buffers are readable through `network().layer_state()`.
    pub fn calculate_deltas(&mut self, input: &[f64], target: &[f64]) -> Result<(), NetworkError> {
        self.network.step_deltas(input, target, &mut self.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_skip_output_layer() {
        let rule = RandomizedDeltas::new(&[3, 5, 4, 2], 1);
        assert_eq!(rule.generator_count(), 6);
        let sizes: Vec<usize> = rule.delta_generators.iter().map(|g| g.size()).collect();
        assert_eq!(sizes, vec![3, 5, 4]);
    }

    #[test]
    fn test_noise_bounded_by_learning_rate() {
        let mut generator = NoiseGenerator::new(64, RngManager::new(5));
        for value in generator.generate(0.05) {
            assert!((0.0..0.05).contains(&value));
        }
    }

    #[test]
    fn test_delta_and_error_streams_are_independent() {
        let mut rule = RandomizedDeltas::new(&[2, 3, 1], 11);
        let deltas = rule.delta_generators[1].generate(1.0);
        let errors = rule.error_generators[1].generate(1.0);
        assert_ne!(deltas, errors);
    }
}
