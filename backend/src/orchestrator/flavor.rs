//! Orchestrator flavors
//!
//! The bridge and the proxy share all of their encode/train/run/decode logic.
//! They differ only in how a missing port is reported and in the name of the
//! reverse operation (`backward` for the bridge, `reverse` for the proxy).
//! A `Flavor` carries the first difference; the second is an inherent method
//! on `Orchestrator<_, _, Bridge>` / `Orchestrator<_, _, Proxy>`.

use crate::orchestrator::engine::{OrchestratorError, PortSide};

/// Error-reporting strategy of an orchestrator kind
pub trait Flavor {
    /// Name used in errors and logs
    const NAME: &'static str;

    /// Error raised when construction finds a port missing
    fn missing_port(side: PortSide) -> OrchestratorError;
}

/// Autoencoder bridge: reverse direction is `backward`
#[derive(Debug, Clone, Copy, Default)]
pub struct Bridge;

/// Autoencoder proxy: reverse direction is `reverse`
#[derive(Debug, Clone, Copy, Default)]
pub struct Proxy;

impl Flavor for Bridge {
    const NAME: &'static str = "autoencoder bridge";

    fn missing_port(side: PortSide) -> OrchestratorError {
        OrchestratorError::Initialization {
            flavor: Self::NAME,
            side,
            reason: "a bridge needs a trained autoencoder on each side",
        }
    }
}

impl Flavor for Proxy {
    const NAME: &'static str = "autoencoder proxy";

    fn missing_port(side: PortSide) -> OrchestratorError {
        OrchestratorError::Initialization {
            flavor: Self::NAME,
            side,
            reason: "a proxy needs a trained autoencoder on each side",
        }
    }
}
