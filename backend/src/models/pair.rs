//! Training pairs
//!
//! A `TrainingPair` couples one input example with its expected output.
//! Cross-domain pairs are only ever produced by index alignment of two
//! ordered sequences; the orchestrator encodes them into latent pairs
//! before handing them to the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while pairing two domain sequences
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("Cannot align {inputs} inputs with {outputs} outputs")]
    LengthMismatch { inputs: usize, outputs: usize },
}

/// One supervised example: `input` should map to `output`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPair<A, B> {
    pub input: A,
    pub output: B,
}

impl<A, B> TrainingPair<A, B> {
    pub fn new(input: A, output: B) -> Self {
        Self { input, output }
    }
}

/// Zip two ordered sequences into index-aligned training pairs
///
/// `pairs[i]` is built from `inputs[i]` and `outputs[i]`. Both sequences
/// must have the same length; a mismatch is rejected up front rather than
/// silently truncating or reading past the shorter side.
///
/// # Example
/// ```
/// use latent_bridge_core_rs::models::align;
///
/// let pairs = align(&["a", "b"], &[1, 2]).unwrap();
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[1].input, "b");
/// assert_eq!(pairs[1].output, 2);
/// ```
pub fn align<A: Clone, B: Clone>(
    inputs: &[A],
    outputs: &[B],
) -> Result<Vec<TrainingPair<A, B>>, AlignmentError> {
    if inputs.len() != outputs.len() {
        return Err(AlignmentError::LengthMismatch {
            inputs: inputs.len(),
            outputs: outputs.len(),
        });
    }

    Ok(inputs
        .iter()
        .zip(outputs)
        .map(|(input, output)| TrainingPair::new(input.clone(), output.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_empty_sequences() {
        let pairs = align::<u8, u8>(&[], &[]).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_align_rejects_shorter_output() {
        let err = align(&[1, 2, 3], &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            AlignmentError::LengthMismatch {
                inputs: 3,
                outputs: 2
            }
        );
    }
}
