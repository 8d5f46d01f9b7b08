use serde::{Serialize, Deserialize};

/// Scalar nonlinearity shared by every unit of a network
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Sigmoid,
    Tanh,
    /// Fires `1` once the weighted sum reaches `threshold`, `0` otherwise
    Step { threshold: f64 },
    Linear,
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Sigmoid
    }
}

impl Activation {
    /// Applies the function to a weighted sum
    pub fn apply(&self, z: f64) -> f64 {
        match *self {
            Activation::Sigmoid => 1.0 / (1.0 + (-z).exp()),
            Activation::Tanh => z.tanh(),
            Activation::Step { threshold } => {
                if z < threshold { 0.0 } else { 1.0 }
            },
            Activation::Linear => z,
        }
    }

    /// Derivative expressed in terms of the unit's output `y = apply(z)`
    ///
    /// The step function has no useful derivative, so it passes the error
    /// through unchanged as in the classic perceptron learning rule.
    pub fn derivative(&self, y: f64) -> f64 {
        match *self {
            Activation::Sigmoid => y * (1.0 - y),
            Activation::Tanh => 1.0 - y * y,
            Activation::Step { .. } | Activation::Linear => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::Step { .. } => "step",
            Activation::Linear => "linear",
        }
    }
}
