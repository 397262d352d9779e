//! Orchestrator Engine
//!
//! Chains two pre-trained autoencoders through a translator network that
//! lives entirely in their latent spaces:
//!
//! ```text
//! forward:   input ─encode(input AE)→ latent_in ─translator→ latent_out ─decode(output AE)→ output
//! reverse:   output ─encode(output AE)→ latent ─translator→ latent ─decode(input AE)→ input
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! Constructed ──train() ok──▶ Trained ──train() ok──▶ Trained (fresh translator)
//!      │                         │
//!      └─ forward/reverse ✗      └─ forward/reverse ✓
//! ```
//!
//! A failed `train()` leaves the orchestrator exactly as it was.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use latent_bridge_core_rs::orchestrator::{AutoencoderBridge, OrchestratorConfig};
//! use latent_bridge_core_rs::network::TrainOptions;
//!
//! let mut bridge: AutoencoderBridge<Vec<f64>, Vec<f64>> =
//!     AutoencoderBridge::new(OrchestratorConfig::new(Arc::new(xor_ae), Arc::new(xnor_ae)))?;
//! let pairs = bridge.align(&xor_rows, &xnor_rows)?;
//! let result = bridge.train(&pairs, &TrainOptions::new().with_error_thresh(0.007))?;
//! let translated = bridge.forward(&vec![0.0, 1.0, 1.0])?;
//! let back = bridge.backward(&translated)?;
//! ```

use crate::autoencoder::AutoencoderPort;
use crate::models::{self, AlignmentError, TrainingPair};
use crate::network::{Datum, NetworkConfig, NetworkError, NeuralNetwork, TrainOptions, TrainingResult};
use crate::network::{DEFAULT_BINARY_THRESH, DEFAULT_SEED};
use crate::orchestrator::flavor::{Bridge, Flavor, Proxy};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Hidden width of the translator relative to its output width
pub const HIDDEN_SIZE_RATIO: f64 = 0.6;

// ============================================================================
// Errors
// ============================================================================

/// Which autoencoder a message refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSide {
    Input,
    Output,
}

impl fmt::Display for PortSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSide::Input => write!(f, "input"),
            PortSide::Output => write!(f, "output"),
        }
    }
}

/// Orchestrator error types
#[derive(Debug, Error, PartialEq)]
pub enum OrchestratorError {
    #[error("Cannot initialize {flavor}: missing {side} autoencoder ({reason})")]
    Initialization {
        flavor: &'static str,
        side: PortSide,
        reason: &'static str,
    },

    #[error("The neural network must be trained before running")]
    NotTrained,

    #[error("Training set is empty: cannot size the translator network")]
    EmptyTrainingSet,

    #[error("Cannot align {inputs} inputs with {outputs} outputs")]
    LengthMismatch { inputs: usize, outputs: usize },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

impl From<AlignmentError> for OrchestratorError {
    fn from(err: AlignmentError) -> Self {
        match err {
            AlignmentError::LengthMismatch { inputs, outputs } => {
                OrchestratorError::LengthMismatch { inputs, outputs }
            }
        }
    }
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Orchestrator configuration
///
/// Both ports are optional here so that a missing one is reported as a
/// typed error by [`Orchestrator::new`] instead of being unrepresentable.
pub struct OrchestratorConfig<I, O> {
    /// Decision threshold handed to the translator network
    pub binary_thresh: f64,

    /// Autoencoder of the input domain
    pub input_port: Option<Arc<dyn AutoencoderPort<I>>>,

    /// Autoencoder of the output domain
    pub output_port: Option<Arc<dyn AutoencoderPort<O>>>,

    /// Weight-init seed of every translator built by this orchestrator
    pub seed: u64,
}

impl<I, O> Default for OrchestratorConfig<I, O> {
    fn default() -> Self {
        Self {
            binary_thresh: DEFAULT_BINARY_THRESH,
            input_port: None,
            output_port: None,
            seed: DEFAULT_SEED,
        }
    }
}

impl<I, O> Clone for OrchestratorConfig<I, O> {
    fn clone(&self) -> Self {
        Self {
            binary_thresh: self.binary_thresh,
            input_port: self.input_port.clone(),
            output_port: self.output_port.clone(),
            seed: self.seed,
        }
    }
}

impl<I, O> fmt::Debug for OrchestratorConfig<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrchestratorConfig")
            .field("binary_thresh", &self.binary_thresh)
            .field("input_port", &self.input_port.is_some())
            .field("output_port", &self.output_port.is_some())
            .field("seed", &self.seed)
            .finish()
    }
}

impl<I, O> OrchestratorConfig<I, O> {
    /// Config with both ports set and default threshold
    pub fn new(input_port: Arc<dyn AutoencoderPort<I>>, output_port: Arc<dyn AutoencoderPort<O>>) -> Self {
        Self {
            input_port: Some(input_port),
            output_port: Some(output_port),
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
}

/// Layer sizes of a translator network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorShape {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl TranslatorShape {
    /// Derive the translator shape from the latent widths of the two ports
    ///
    /// # Example
    /// ```
    /// use latent_bridge_core_rs::orchestrator::TranslatorShape;
    ///
    /// let shape = TranslatorShape::from_latent(4, 5);
    /// assert_eq!(shape.hidden_size, 3); // round(5 × 0.6)
    /// assert_eq!(TranslatorShape::from_latent(1, 1).hidden_size, 1);
    /// ```
    pub fn from_latent(input_size: usize, output_size: usize) -> Self {
        let hidden_size = ((output_size as f64 * HIDDEN_SIZE_RATIO).round() as usize).max(1);
        Self {
            input_size,
            hidden_size,
            output_size,
        }
    }

    /// Hidden layers of the translator: `[input_size, hidden_size]`
    pub fn hidden_layers(&self) -> Vec<usize> {
        vec![self.input_size, self.hidden_size]
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Cross-domain orchestrator over two autoencoders
///
/// Owns its translator exclusively; the ports are shared and only read.
pub struct Orchestrator<I, O, F: Flavor> {
    binary_thresh: f64,
    seed: u64,
    input_port: Arc<dyn AutoencoderPort<I>>,
    output_port: Arc<dyn AutoencoderPort<O>>,

    /// Empty until the first successful `train()`
    translator: Option<NeuralNetwork>,

    _flavor: PhantomData<F>,
}

/// Orchestrator whose reverse direction is `backward`
pub type AutoencoderBridge<I, O> = Orchestrator<I, O, Bridge>;

/// Orchestrator whose reverse direction is `reverse`
pub type AutoencoderProxy<I, O> = Orchestrator<I, O, Proxy>;

impl<I, O, F: Flavor> Orchestrator<I, O, F> {
    /// Create an orchestrator in the Constructed state
    ///
    /// # Errors
    ///
    /// `Initialization` if either port is missing; the input side is
    /// checked first.
    pub fn new(config: OrchestratorConfig<I, O>) -> Result<Self, OrchestratorError> {
        let input_port = config
            .input_port
            .ok_or_else(|| F::missing_port(PortSide::Input))?;
        let output_port = config
            .output_port
            .ok_or_else(|| F::missing_port(PortSide::Output))?;

        Ok(Self {
            binary_thresh: config.binary_thresh,
            seed: config.seed,
            input_port,
            output_port,
            translator: None,
            _flavor: PhantomData,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn binary_thresh(&self) -> f64 {
        self.binary_thresh
    }

    /// True once a translator has been installed by `train()`
    pub fn is_trained(&self) -> bool {
        self.translator.is_some()
    }

    /// The installed translator network, if any
    pub fn translator(&self) -> Option<&NeuralNetwork> {
        self.translator.as_ref()
    }

    pub fn translator_shape(&self) -> Option<TranslatorShape> {
        self.translator.as_ref().map(|net| {
            let sizes = net.sizes();
            TranslatorShape {
                input_size: sizes[0],
                hidden_size: sizes[2],
                output_size: sizes[3],
            }
        })
    }

    // ========================================================================
    // Training
    // ========================================================================

    /// Zip two equal-length domain sequences into training pairs
    pub fn align(&self, inputs: &[I], outputs: &[O]) -> Result<Vec<TrainingPair<I, O>>, OrchestratorError>
    where
        I: Clone,
        O: Clone,
    {
        Ok(models::align(inputs, outputs)?)
    }

    /// Train a fresh translator on the latent encodings of `pairs`
    ///
    /// The translator is sized from the first encoded pair, trained to
    /// completion, and only then installed in place of any previous one.
    /// The engine's result is returned as-is.
    pub fn train(
        &mut self,
        pairs: &[TrainingPair<I, O>],
        options: &TrainOptions,
    ) -> Result<TrainingResult, OrchestratorError> {
        if pairs.is_empty() {
            return Err(OrchestratorError::EmptyTrainingSet);
        }

        let latent_pairs = self.encode_pairs(pairs)?;
        let first = &latent_pairs[0];
        let shape = TranslatorShape::from_latent(first.input.len(), first.output.len());

        info!(
            flavor = F::NAME,
            pairs = pairs.len(),
            input_size = shape.input_size,
            hidden_size = shape.hidden_size,
            output_size = shape.output_size,
            "building translator network"
        );

        let config = NetworkConfig::new(shape.input_size, shape.hidden_layers(), shape.output_size)
            .with_binary_thresh(self.binary_thresh)
            .with_seed(self.seed);
        let mut translator = NeuralNetwork::new(config)?;
        let result = translator.train(&latent_pairs, options)?;

        let replaced = self.translator.replace(translator).is_some();
        debug!(flavor = F::NAME, replaced, "translator installed");

        Ok(result)
    }

    fn encode_pairs(&self, pairs: &[TrainingPair<I, O>]) -> Result<Vec<Datum>, OrchestratorError> {
        pairs
            .iter()
            .map(|pair| {
                Ok(TrainingPair::new(
                    self.input_port.encode(&pair.input)?,
                    self.output_port.encode(&pair.output)?,
                ))
            })
            .collect()
    }

    // ========================================================================
    // Inference
    // ========================================================================

    /// Translate an input-domain value into the output domain
    pub fn forward(&self, input: &I) -> Result<O, OrchestratorError> {
        let translator = self.translator.as_ref().ok_or(OrchestratorError::NotTrained)?;
        let encoded = self.input_port.encode(input)?;
        let translated = translator.run(&encoded)?;
        Ok(self.output_port.decode(&translated)?)
    }

    /// Translate an output-domain value back into the input domain
    ///
    /// The same translator runs on the output port's encoding, so this only
    /// works when both latent spaces have the same width.
    fn translate_back(&self, output: &O) -> Result<I, OrchestratorError> {
        let translator = self.translator.as_ref().ok_or(OrchestratorError::NotTrained)?;
        let encoded = self.output_port.encode(output)?;
        let translated = translator.run(&encoded)?;
        Ok(self.input_port.decode(&translated)?)
    }
}

impl<I, O> Orchestrator<I, O, Bridge> {
    /// Translate an output-domain value back into the input domain
    pub fn backward(&self, output: &O) -> Result<I, OrchestratorError> {
        self.translate_back(output)
    }
}

impl<I, O> Orchestrator<I, O, Proxy> {
    /// Translate an output-domain value back into the input domain
    pub fn reverse(&self, output: &O) -> Result<I, OrchestratorError> {
        self.translate_back(output)
    }
}
