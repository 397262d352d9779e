//! Latent Bridge Core - Rust Engine
//!
//! Moves data between two dissimilar representations by chaining two
//! pre-trained autoencoders through a translator network that only ever sees
//! their latent vectors. Also ships a randomized training rule that keeps true
//! gradients at the output layer and feeds noise to every interior layer.
//!
//! # Architecture
//!
//! - **rng**: Deterministic random number generation
//! - **models**: Training pairs and sequence alignment
//! - **network**: Reference dense sigmoid engine (run, train, snapshots)
//! - **autoencoder**: Port trait and reference autoencoder
//! - **orchestrator**: Bridge/proxy over two autoencoder ports
//! - **learner**: Randomized (noise-driven) learner
//!
//! # Critical Invariants
//!
//! 1. The translator exists only after a successful `train()`; a failed call changes nothing
//! 2. Each `train()` builds a fresh translator sized from the first encoded pair
//! 3. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod autoencoder;
pub mod learner;
pub mod models;
pub mod network;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use autoencoder::{Autoencoder, AutoencoderConfig, AutoencoderPort};
pub use learner::RandomizedLearner;
pub use models::{align, AlignmentError, TrainingPair};
pub use network::{NetworkConfig, NetworkError, NeuralNetwork, TrainOptions, TrainingResult};
pub use orchestrator::{
    AutoencoderBridge, AutoencoderProxy, Orchestrator, OrchestratorConfig, OrchestratorError, PortSide,
};
pub use rng::RngManager;
