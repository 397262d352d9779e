//! Reference dense network engine
//!
//! - **engine**: `NeuralNetwork` construction, inference and the training loop
//! - **layers**: per-layer buffers and the `DeltaRule` seam
//! - **train**: options and results of a training run
//! - **snapshot**: fingerprinted save/restore of parameters

pub mod engine;
pub mod layers;
pub mod snapshot;
pub mod train;

pub use engine::{NetworkConfig, NetworkError, NeuralNetwork, DEFAULT_BINARY_THRESH, DEFAULT_SEED};
pub use layers::{sigmoid, Backpropagation, DeltaRule, LayerState};
pub use snapshot::{compute_fingerprint, NetworkSnapshot};
pub use train::{Datum, EvaluationReport, TrainOptions, TrainingResult, DEFAULT_ENGINE_LEARNING_RATE};
