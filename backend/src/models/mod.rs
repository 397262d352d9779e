//! Domain models shared by the orchestrator and the engine

pub mod pair;

// Re-exports
pub use pair::{align, AlignmentError, TrainingPair};
