//! Dense feed-forward network engine
//!
//! A fully connected sigmoid network trained with per-example gradient
//! descent and momentum. The delta computation is pluggable through
//! [`DeltaRule`], which is how the randomized learner swaps interior
//! gradients for noise while reusing this training loop.
//!
//! # Training loop
//!
//! ```text
//! while iterations < max && error > error_thresh:
//!     for each example:
//!         1. forward pass (fills outputs)
//!         2. rule.calculate_deltas (fills deltas/errors)
//!         3. adjust weights and biases
//!     error = mean output-layer MSE over the set
//! ```

use crate::network::layers::{sigmoid, Backpropagation, DeltaRule, LayerState};
use crate::network::train::{Datum, EvaluationReport, TrainOptions, TrainingResult};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Default seed for weight initialization
pub const DEFAULT_SEED: u64 = 0x5EED_0B1D_6E00_0001;

/// Default threshold separating 0 from 1 when outputs are read as binary
pub const DEFAULT_BINARY_THRESH: f64 = 0.5;

/// Initial weights and biases are drawn from [-INIT_RANGE, INIT_RANGE)
const INIT_RANGE: f64 = 0.2;

/// Errors raised by the engine
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("Invalid network config: {0}")]
    InvalidConfig(String),

    #[error("Training data is empty")]
    EmptyTrainingData,

    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Training diverged at iteration {iteration}")]
    Diverged { iteration: usize },

    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Shape and decision threshold of a network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Units in the input layer
    pub input_size: usize,

    /// Units per hidden layer, in order
    pub hidden_layers: Vec<usize>,

    /// Units in the output layer
    pub output_size: usize,

    /// Threshold used when outputs are read as binary
    pub binary_thresh: f64,

    /// Seed for weight initialization
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_size: 1,
            hidden_layers: vec![3],
            output_size: 1,
            binary_thresh: DEFAULT_BINARY_THRESH,
            seed: DEFAULT_SEED,
        }
    }
}

impl NetworkConfig {
    pub fn new(input_size: usize, hidden_layers: Vec<usize>, output_size: usize) -> Self {
        Self {
            input_size,
            hidden_layers,
            output_size,
            ..Self::default()
        }
    }

    pub fn with_binary_thresh(mut self, binary_thresh: f64) -> Self {
        self.binary_thresh = binary_thresh;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Unit count of every layer, input first
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(self.input_size);
        sizes.extend_from_slice(&self.hidden_layers);
        sizes.push(self.output_size);
        sizes
    }

    pub(crate) fn validate(&self) -> Result<(), NetworkError> {
        if self.input_size == 0 {
            return Err(NetworkError::InvalidConfig("input_size must be > 0".to_string()));
        }
        if self.output_size == 0 {
            return Err(NetworkError::InvalidConfig("output_size must be > 0".to_string()));
        }
        if let Some(index) = self.hidden_layers.iter().position(|&size| size == 0) {
            return Err(NetworkError::InvalidConfig(format!(
                "hidden layer {} must have at least one unit",
                index
            )));
        }
        if !self.binary_thresh.is_finite() {
            return Err(NetworkError::InvalidConfig("binary_thresh must be finite".to_string()));
        }
        Ok(())
    }
}

/// Dense sigmoid network
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    config: NetworkConfig,

    /// `weights[layer][node][k]` connects unit `k` of `layer - 1` to `node`
    weights: Vec<Vec<Vec<f64>>>,

    /// Previous weight changes, same shape as `weights` (momentum term)
    changes: Vec<Vec<Vec<f64>>>,

    layers: LayerState,
}

impl NeuralNetwork {
    /// Build a network with freshly initialized weights
    ///
    /// # Example
    /// ```
    /// use latent_bridge_core_rs::network::{NetworkConfig, NeuralNetwork};
    ///
    /// let net = NeuralNetwork::new(NetworkConfig::new(2, vec![3], 1)).unwrap();
    /// assert_eq!(net.sizes(), &[2, 3, 1]);
    /// ```
    pub fn new(config: NetworkConfig) -> Result<Self, NetworkError> {
        config.validate()?;

        let sizes = config.sizes();
        let mut rng = RngManager::new(config.seed);

        let mut biases = vec![Vec::new()];
        let mut weights = vec![Vec::new()];
        for layer in 1..sizes.len() {
            biases.push(
                (0..sizes[layer])
                    .map(|_| rng.uniform(-INIT_RANGE, INIT_RANGE))
                    .collect(),
            );
            weights.push(
                (0..sizes[layer])
                    .map(|_| {
                        (0..sizes[layer - 1])
                            .map(|_| rng.uniform(-INIT_RANGE, INIT_RANGE))
                            .collect()
                    })
                    .collect(),
            );
        }

        Ok(Self::assemble(config, weights, biases))
    }

    /// Build a network from known parameters (shapes already checked)
    pub(crate) fn assemble(
        config: NetworkConfig,
        weights: Vec<Vec<Vec<f64>>>,
        biases: Vec<Vec<f64>>,
    ) -> Self {
        let changes = weights
            .iter()
            .map(|layer| layer.iter().map(|row| vec![0.0; row.len()]).collect())
            .collect();
        let layers = LayerState::new(config.sizes(), biases);
        Self {
            config,
            weights,
            changes,
            layers,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn sizes(&self) -> &[usize] {
        self.layers.sizes()
    }

    pub fn input_size(&self) -> usize {
        self.config.input_size
    }

    pub fn output_size(&self) -> usize {
        self.config.output_size
    }

    pub fn output_layer(&self) -> usize {
        self.layers.output_layer()
    }

    pub fn binary_thresh(&self) -> f64 {
        self.config.binary_thresh
    }

    /// Buffers left by the most recent training step
    pub fn layer_state(&self) -> &LayerState {
        &self.layers
    }

    pub fn weights(&self) -> &[Vec<Vec<f64>>] {
        &self.weights
    }

    // ========================================================================
    // Inference
    // ========================================================================

    /// Forward pass from the input layer to the output layer
    pub fn run(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.run_span(input, 0, self.output_layer())
    }

    /// Forward pass from layer `from` to layer `to`
    ///
    /// `input` is taken as the activations of layer `from`; the result is the
    /// activations of layer `to`. Autoencoders use this to split a network at
    /// its latent layer.
    pub fn run_span(&self, input: &[f64], from: usize, to: usize) -> Result<Vec<f64>, NetworkError> {
        if from >= to || to > self.output_layer() {
            return Err(NetworkError::InvalidConfig(format!(
                "cannot run layers {}..={} of a network with output layer {}",
                from,
                to,
                self.output_layer()
            )));
        }
        check_len(self.sizes()[from], input.len())?;

        let mut activations = input.to_vec();
        for layer in (from + 1)..=to {
            activations = activate(&self.weights[layer], &self.layers.biases[layer], &activations);
        }
        Ok(activations)
    }

    /// Error and binary misclassification count over `data`
    pub fn evaluate(&self, data: &[Datum]) -> Result<EvaluationReport, NetworkError> {
        if data.is_empty() {
            return Err(NetworkError::EmptyTrainingData);
        }

        let thresh = self.config.binary_thresh;
        let mut error_sum = 0.0;
        let mut misclasses = 0;
        for datum in data {
            check_len(self.output_size(), datum.output.len())?;
            let output = self.run(&datum.input)?;
            error_sum += mse(output.iter().zip(&datum.output).map(|(o, t)| t - o));
            let wrong = output
                .iter()
                .zip(&datum.output)
                .any(|(o, t)| (*o > thresh) != (*t > thresh));
            if wrong {
                misclasses += 1;
            }
        }

        Ok(EvaluationReport {
            error: error_sum / data.len() as f64,
            misclasses,
            total: data.len(),
        })
    }

    // ========================================================================
    // Training
    // ========================================================================

    /// Train with standard backpropagation
    pub fn train(&mut self, data: &[Datum], options: &TrainOptions) -> Result<TrainingResult, NetworkError> {
        self.train_with(data, options, &mut Backpropagation)
    }

    /// Train with a custom delta rule
    ///
    /// Runs until the mean error reaches `options.error_thresh` or
    /// `options.iterations` passes have been made.
    pub fn train_with<R: DeltaRule>(
        &mut self,
        data: &[Datum],
        options: &TrainOptions,
        rule: &mut R,
    ) -> Result<TrainingResult, NetworkError> {
        self.validate_training_data(data)?;
        let learning_rate = options.effective_learning_rate();
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NetworkError::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                learning_rate
            )));
        }

        let mut error = 1.0;
        let mut iterations = 0;
        while iterations < options.iterations && error > options.error_thresh {
            error = self.train_patterns(data, rule, learning_rate, options.momentum);
            iterations += 1;

            if !error.is_finite() {
                return Err(NetworkError::Diverged { iteration: iterations });
            }
            if options.log_period > 0 && iterations % options.log_period == 0 {
                debug!(iterations, error, "training progress");
            }
        }

        info!(iterations, error, sizes = ?self.sizes(), "training finished");
        Ok(TrainingResult { error, iterations })
    }

    /// One forward pass plus delta computation, without touching weights
    ///
    /// Leaves the step's buffers in [`layer_state`](Self::layer_state).
    pub fn step_deltas<R: DeltaRule>(
        &mut self,
        input: &[f64],
        target: &[f64],
        rule: &mut R,
    ) -> Result<(), NetworkError> {
        check_len(self.input_size(), input.len())?;
        check_len(self.output_size(), target.len())?;
        self.run_input(input);
        rule.calculate_deltas(&mut self.layers, &self.weights, target);
        Ok(())
    }

    fn validate_training_data(&self, data: &[Datum]) -> Result<(), NetworkError> {
        if data.is_empty() {
            return Err(NetworkError::EmptyTrainingData);
        }
        for datum in data {
            check_len(self.input_size(), datum.input.len())?;
            check_len(self.output_size(), datum.output.len())?;
        }
        Ok(())
    }

    /// One pass over the set; returns the mean output-layer MSE
    fn train_patterns<R: DeltaRule>(
        &mut self,
        data: &[Datum],
        rule: &mut R,
        learning_rate: f64,
        momentum: f64,
    ) -> f64 {
        let output_layer = self.output_layer();
        let mut sum = 0.0;
        for datum in data {
            self.run_input(&datum.input);
            rule.calculate_deltas(&mut self.layers, &self.weights, &datum.output);
            self.adjust_weights(learning_rate, momentum);
            sum += mse(self.layers.errors[output_layer].iter().copied());
        }
        sum / data.len() as f64
    }

    /// Forward pass that records every layer's activations
    fn run_input(&mut self, input: &[f64]) {
        self.layers.outputs[0] = input.to_vec();
        for layer in 1..=self.output_layer() {
            let next = activate(
                &self.weights[layer],
                &self.layers.biases[layer],
                &self.layers.outputs[layer - 1],
            );
            self.layers.outputs[layer] = next;
        }
    }

    fn adjust_weights(&mut self, learning_rate: f64, momentum: f64) {
        for layer in 1..=self.output_layer() {
            let incoming = &self.layers.outputs[layer - 1];
            let deltas = &self.layers.deltas[layer];
            let biases = &mut self.layers.biases[layer];
            for (node, delta) in deltas.iter().enumerate() {
                let weights = &mut self.weights[layer][node];
                let changes = &mut self.changes[layer][node];
                for (k, input) in incoming.iter().enumerate() {
                    let change = learning_rate * delta * input + momentum * changes[k];
                    changes[k] = change;
                    weights[k] += change;
                }
                biases[node] += learning_rate * delta;
            }
        }
    }
}

fn activate(weights: &[Vec<f64>], biases: &[f64], incoming: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .zip(biases)
        .map(|(row, bias)| {
            let sum: f64 = row.iter().zip(incoming).map(|(w, x)| w * x).sum::<f64>() + bias;
            sigmoid(sum)
        })
        .collect()
}

fn mse(errors: impl Iterator<Item = f64>) -> f64 {
    let mut count = 0usize;
    let mut sum = 0.0;
    for error in errors {
        sum += error * error;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), NetworkError> {
    if expected != actual {
        return Err(NetworkError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
