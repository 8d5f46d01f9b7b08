use rand::Rng;

use crate::error::{NetworkError, Result};
use super::activation::Activation;
use super::unit::Unit;

/// Ordered group of units sharing one input vector
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    units: Vec<Unit>,
    input_dimension: usize,
}

impl Layer {
    /// Builds a layer from explicit units, checking every unit's fan-in
    pub fn new(units: Vec<Unit>, input_dimension: usize) -> Result<Self> {
        if units.is_empty() {
            return Err(NetworkError::configuration("a layer needs at least one unit"));
        }
        if let Some((index, unit)) = units.iter().enumerate().find(|(_, unit)| unit.fan_in() != input_dimension) {
            return Err(NetworkError::configuration(format!(
                "unit {} has {} weights but the layer receives {} inputs",
                index, unit.fan_in(), input_dimension,
            )));
        }

        //Return
        Ok(Layer {
            units,
            input_dimension,
        })
    }

    /// Builds `output_dimension` randomly initialised units, see `Unit::random`
    pub fn random<R: Rng + ?Sized>(input_dimension: usize, output_dimension: usize, rng: &mut R) -> Result<Self> {
        let units = (0..output_dimension).map(|_i| Unit::random(input_dimension, rng)).collect();
        Layer::new(units, input_dimension)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub(crate) fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    pub fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    pub fn output_dimension(&self) -> usize {
        self.units.len()
    }

    pub fn forward(&self, input: &[f64], activation: &Activation) -> Result<Vec<f64>> {
        self.units.iter().map(|unit| unit.fire(input, activation)).collect()
    }
}
