//! Alternative training rules for the dense engine
//!
//! - **randomized**: true gradients at the output layer, scaled noise everywhere else

pub mod randomized;

pub use randomized::{NoiseGenerator, RandomizedDeltas, RandomizedLearner, DEFAULT_LEARNING_RATE};
