//! Training options and results

use crate::models::TrainingPair;
use serde::{Deserialize, Serialize};

/// Numeric training example consumed by the engine
pub type Datum = TrainingPair<Vec<f64>, Vec<f64>>;

/// Learning rate used by the engine when options leave it unset
pub const DEFAULT_ENGINE_LEARNING_RATE: f64 = 0.3;

/// Options for one training run
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```
/// use latent_bridge_core_rs::network::TrainOptions;
///
/// let options: TrainOptions = serde_json::from_str(r#"{"iterations": 500}"#).unwrap();
/// assert_eq!(options.iterations, 500);
/// assert_eq!(options.error_thresh, 0.005);
/// assert_eq!(options.learning_rate, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    /// Maximum number of passes over the training set
    pub iterations: usize,

    /// Stop once the mean error drops to this value
    pub error_thresh: f64,

    /// Step size (None = engine default of 0.3)
    pub learning_rate: Option<f64>,

    /// Fraction of the previous weight change added to the next one
    pub momentum: f64,

    /// Log progress every N iterations (0 = never)
    pub log_period: usize,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            iterations: 20_000,
            error_thresh: 0.005,
            learning_rate: None,
            momentum: 0.1,
            log_period: 10,
        }
    }
}

impl TrainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_error_thresh(mut self, error_thresh: f64) -> Self {
        self.error_thresh = error_thresh;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = Some(learning_rate);
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_log_period(mut self, log_period: usize) -> Self {
        self.log_period = log_period;
        self
    }

    /// Learning rate the engine will actually use
    pub fn effective_learning_rate(&self) -> f64 {
        self.learning_rate.unwrap_or(DEFAULT_ENGINE_LEARNING_RATE)
    }
}

/// Outcome of a training run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Mean error over the training set after the last iteration
    pub error: f64,

    /// Number of iterations actually run
    pub iterations: usize,
}

/// Accuracy summary produced by `NeuralNetwork::evaluate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean squared error across all examples
    pub error: f64,

    /// Examples whose thresholded outputs disagree with the thresholded target
    pub misclasses: usize,

    /// Number of examples evaluated
    pub total: usize,
}

impl EvaluationReport {
    /// Fraction of examples classified correctly
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.total - self.misclasses) as f64 / self.total as f64
    }
}
