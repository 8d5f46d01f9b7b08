//! Minimal feed-forward neural network: layered units, forward inference
//! and backpropagation training with plain stochastic gradient descent.

#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::similar_names,
)]

pub mod data;
pub mod error;
pub mod network;
pub mod optimisers;
pub mod persistence;

pub use error::{NetworkError, Result};
pub use network::{Activation, Layer, Network, Unit};
pub use optimisers::{EpochReport, StochasticGradientDescent};
