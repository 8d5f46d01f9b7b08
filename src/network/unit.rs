use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{NetworkError, Result};
use super::activation::Activation;

/// Single computational node of a layer
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    weights: Vec<f64>,
    bias: f64,
}

impl Unit {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Unit {
            weights,
            bias,
        }
    }

    /// Creates a unit with `fan_in` weights drawn from `Uniform[-1, 1)` and a zero bias
    pub fn random<R: Rng + ?Sized>(fan_in: usize, rng: &mut R) -> Self {
        let dist = Uniform::new(-1.0, 1.0);
        Unit {
            weights: (0..fan_in).map(|_i| dist.sample(rng)).collect(),
            bias: 0.0,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    /// Weighted sum of `inputs` plus bias, before activation
    pub fn weighted_sum(&self, inputs: &[f64]) -> Result<f64> {
        NetworkError::check_dimension("unit input", self.weights.len(), inputs.len())?;
        let sum: f64 = self.weights.iter().zip(inputs).map(|(w, x)| w * x).sum();

        //Return
        Ok(self.bias + sum)
    }

    pub fn fire(&self, inputs: &[f64], activation: &Activation) -> Result<f64> {
        Ok(activation.apply(self.weighted_sum(inputs)?))
    }

    /// Gradient step for error signal `delta` given the inputs the unit last fired on
    pub(crate) fn descend(&mut self, delta: f64, inputs: &[f64], learn_rate: f64) {
        let step = learn_rate * delta;
        for (weight, input) in self.weights.iter_mut().zip(inputs) {
            *weight -= step * input;
        }
        self.bias -= step;
    }
}
