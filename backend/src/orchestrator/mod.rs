//! Orchestrator - latent-space bridge between two autoencoders
//!
//! See `engine.rs` for the lifecycle and `flavor.rs` for the bridge/proxy split.

pub mod engine;
pub mod flavor;


// Re-export main types for convenience
pub use engine::{
    AutoencoderBridge, AutoencoderProxy, Orchestrator, OrchestratorConfig, OrchestratorError, PortSide,
    TranslatorShape, HIDDEN_SIZE_RATIO,
};
pub use flavor::{Bridge, Flavor, Proxy};
