//! Per-layer buffers and the delta rule seam
//!
//! After a forward pass every layer's activations sit in `outputs`. A
//! `DeltaRule` then fills `deltas` and `errors` for layers 1..=output, and the
//! engine adjusts weights from those buffers. Swapping the rule changes how a
//! network learns without touching the training loop.

/// Logistic activation used by every non-input layer
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Layer-indexed buffers exposed to delta rules
///
/// Index 0 is the input layer. Its bias, delta and error vectors stay empty.
#[derive(Debug, Clone)]
pub struct LayerState {
    pub(crate) sizes: Vec<usize>,
    pub(crate) biases: Vec<Vec<f64>>,
    pub(crate) outputs: Vec<Vec<f64>>,
    pub(crate) deltas: Vec<Vec<f64>>,
    pub(crate) errors: Vec<Vec<f64>>,
}

impl LayerState {
    pub(crate) fn new(sizes: Vec<usize>, biases: Vec<Vec<f64>>) -> Self {
        let outputs = sizes.iter().map(|&size| vec![0.0; size]).collect();
        let signal = |layer: usize, size: usize| if layer == 0 { Vec::new() } else { vec![0.0; size] };
        let deltas = sizes.iter().enumerate().map(|(l, &s)| signal(l, s)).collect();
        let errors = sizes.iter().enumerate().map(|(l, &s)| signal(l, s)).collect();
        Self {
            sizes,
            biases,
            outputs,
            deltas,
            errors,
        }
    }

    /// Unit count of every layer, input first
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Index of the output layer
    pub fn output_layer(&self) -> usize {
        self.sizes.len() - 1
    }

    pub fn biases(&self, layer: usize) -> &[f64] {
        &self.biases[layer]
    }

    /// Activations from the most recent forward pass
    pub fn outputs(&self, layer: usize) -> &[f64] {
        &self.outputs[layer]
    }

    pub fn deltas(&self, layer: usize) -> &[f64] {
        &self.deltas[layer]
    }

    pub fn errors(&self, layer: usize) -> &[f64] {
        &self.errors[layer]
    }

    /// Replace a layer's delta and error buffers
    ///
    /// The previous buffers are dropped; nothing carries over between steps.
    pub fn replace_signal(&mut self, layer: usize, deltas: Vec<f64>, errors: Vec<f64>) {
        debug_assert_eq!(deltas.len(), self.sizes[layer]);
        debug_assert_eq!(errors.len(), self.sizes[layer]);
        self.deltas[layer] = deltas;
        self.errors[layer] = errors;
    }

    /// True gradient signal of the output layer against `target`
    ///
    /// Returns `(deltas, errors)`. Depends only on the output buffer and the
    /// target.
    pub fn output_signal(&self, target: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let outputs = &self.outputs[self.output_layer()];
        let errors: Vec<f64> = outputs
            .iter()
            .zip(target)
            .map(|(output, expected)| expected - output)
            .collect();
        let deltas = outputs
            .iter()
            .zip(&errors)
            .map(|(output, error)| error * output * (1.0 - output))
            .collect();
        (deltas, errors)
    }

    /// Backpropagated signal of hidden `layer` through the next layer's weights
    ///
    /// `next_weights[k][node]` is the weight from `node` in `layer` to unit `k`
    /// in `layer + 1`.
    pub fn hidden_signal(&self, layer: usize, next_weights: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
        let next_deltas = &self.deltas[layer + 1];
        let outputs = &self.outputs[layer];
        let mut deltas = Vec::with_capacity(outputs.len());
        let mut errors = Vec::with_capacity(outputs.len());
        for (node, output) in outputs.iter().enumerate() {
            let error: f64 = next_deltas
                .iter()
                .zip(next_weights)
                .map(|(delta, row)| delta * row[node])
                .sum();
            errors.push(error);
            deltas.push(error * output * (1.0 - output));
        }
        (deltas, errors)
    }
}

/// Strategy that fills delta/error buffers after a forward pass
///
/// Called once per training example, between the forward pass and the
/// weight adjustment.
pub trait DeltaRule {
    fn calculate_deltas(&mut self, layers: &mut LayerState, weights: &[Vec<Vec<f64>>], target: &[f64]);
}

/// Standard backpropagation of the squared error
#[derive(Debug, Clone, Copy, Default)]
pub struct Backpropagation;

impl DeltaRule for Backpropagation {
    fn calculate_deltas(&mut self, layers: &mut LayerState, weights: &[Vec<Vec<f64>>], target: &[f64]) {
        let output_layer = layers.output_layer();
        for layer in (1..=output_layer).rev() {
            let (deltas, errors) = if layer == output_layer {
                layers.output_signal(target)
            } else {
                layers.hidden_signal(layer, &weights[layer + 1])
            };
            layers.replace_signal(layer, deltas, errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_layer_state() -> LayerState {
        let mut state = LayerState::new(vec![2, 2], vec![vec![], vec![0.0, 0.0]]);
        state.outputs[1] = vec![0.5, 0.25];
        state
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn test_output_signal_matches_squared_error_gradient() {
        let state = two_layer_state();
        let (deltas, errors) = state.output_signal(&[1.0, 0.0]);
        assert_eq!(errors, vec![0.5, -0.25]);
        assert_eq!(deltas, vec![0.5 * 0.5 * 0.5, -0.25 * 0.25 * 0.75]);
    }

    #[test]
    fn test_input_layer_has_no_signal_buffers() {
        let state = two_layer_state();
        assert!(state.deltas(0).is_empty());
        assert!(state.errors(0).is_empty());
        assert_eq!(state.deltas(1).len(), 2);
    }
}
