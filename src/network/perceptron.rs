use std::fmt;
use std::ops::ControlFlow;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{NetworkError, Result};
use crate::optimisers::{EpochReport, StochasticGradientDescent};
use super::activation::Activation;
use super::cost;
use super::layer::Layer;
use super::unit::Unit;

/// Fully connected feed-forward network with one activation shared by every unit
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    activation: Activation,
    input_width: usize,
    hidden_layers: Vec<Layer>,
    output_layer: Layer,
}

impl Network {
    /// Creates a network whose weights are drawn from `rng`
    pub fn random<R: Rng + ?Sized>(activation: Activation,
                                   input_width: usize,
                                   output_width: usize,
                                   hidden_widths: &[usize],
                                   rng: &mut R,) -> Result<Self> {
        check_widths(input_width, output_width, hidden_widths)?;

        let mut current_output = input_width;
        let mut hidden_layers: Vec<Layer> = Vec::with_capacity(hidden_widths.len());
        for &width in hidden_widths {
            hidden_layers.push(Layer::random(current_output, width, rng)?);
            current_output = width;
        }
        let output_layer = Layer::random(current_output, output_width, rng)?;
        debug!("Created random network {} -> {:?} -> {}", input_width, hidden_widths, output_width);

        //Return
        Ok(Network {
            activation,
            input_width,
            hidden_layers,
            output_layer,
        })
    }

    /// Same as `random` with a `StdRng` seeded from `seed`
    pub fn seeded(activation: Activation,
                  input_width: usize,
                  output_width: usize,
                  hidden_widths: &[usize],
                  seed: u64,) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::random(activation, input_width, output_width, hidden_widths, &mut rng)
    }

    /// Creates a network from `weights[layer][unit][incoming]` with zero biases
    ///
    /// Hidden layers come first in `weights`, the output layer last.
    pub fn with_weights(activation: Activation,
                        weights: Vec<Vec<Vec<f64>>>,
                        input_width: usize,
                        output_width: usize,
                        hidden_widths: &[usize],) -> Result<Self> {
        let biases = weights.iter()
            .map(|layer| vec![0.0; layer.len()])
            .collect();
        Network::with_parameters(activation, weights, biases, input_width, output_width, hidden_widths)
    }

    /// Creates a network from explicit weights and `biases[layer][unit]`
    pub fn with_parameters(activation: Activation,
                           weights: Vec<Vec<Vec<f64>>>,
                           biases: Vec<Vec<f64>>,
                           input_width: usize,
                           output_width: usize,
                           hidden_widths: &[usize],) -> Result<Self> {
        if weights.len() != hidden_widths.len() + 1 {
            return Err(NetworkError::configuration(format!(
                "{} hidden layers need {} weight matrices, got {}",
                hidden_widths.len(), hidden_widths.len() + 1, weights.len(),
            )));
        }
        if biases.len() != weights.len() {
            return Err(NetworkError::configuration(format!(
                "{} weight matrices but {} bias vectors",
                weights.len(), biases.len(),
            )));
        }
        check_widths(input_width, output_width, hidden_widths)?;

        let widths = hidden_widths.iter().copied().chain(std::iter::once(output_width));
        let mut current_output = input_width;
        let mut layers: Vec<Layer> = Vec::with_capacity(weights.len());
        for (index, ((layer_weights, layer_biases), width)) in weights.into_iter().zip(biases).zip(widths).enumerate() {
            if layer_weights.len() != width || layer_biases.len() != width {
                return Err(NetworkError::configuration(format!(
                    "layer {} is declared with {} units but has {} weight rows and {} biases",
                    index, width, layer_weights.len(), layer_biases.len(),
                )));
            }
            let units = layer_weights.into_iter()
                .zip(layer_biases)
                .map(|(unit_weights, bias)| Unit::new(unit_weights, bias))
                .collect();
            let layer = Layer::new(units, current_output)
                .map_err(|e| NetworkError::configuration(format!("layer {}: {}", index, e)))?;
            layers.push(layer);
            current_output = width;
        }

        let output_layer = layers.pop()
            .ok_or_else(|| NetworkError::configuration("missing output layer"))?;
        debug!("Created network {} -> {:?} -> {}", input_width, hidden_widths, output_width);

        //Return
        Ok(Network {
            activation,
            input_width,
            hidden_layers: layers,
            output_layer,
        })
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn output_width(&self) -> usize {
        self.output_layer.output_dimension()
    }

    pub fn hidden_widths(&self) -> Vec<usize> {
        self.hidden_layers.iter().map(Layer::output_dimension).collect()
    }

    pub fn hidden_layers(&self) -> &[Layer] {
        &self.hidden_layers
    }

    pub fn output_layer(&self) -> &Layer {
        &self.output_layer
    }

    /// Every layer in evaluation order, output layer last
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.hidden_layers.iter().chain(std::iter::once(&self.output_layer))
    }

    fn layer_count(&self) -> usize {
        self.hidden_layers.len() + 1
    }

    fn layer(&self, index: usize) -> &Layer {
        self.hidden_layers.get(index).unwrap_or(&self.output_layer)
    }

    fn layer_mut(&mut self, index: usize) -> &mut Layer {
        match self.hidden_layers.get_mut(index) {
            Some(layer) => layer,
            None => &mut self.output_layer,
        }
    }

    /// Output-layer activations for `input`
    pub fn compute(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut trace = self.forward_trace(input)?;

        //Return
        Ok(trace.pop().unwrap_or_default())
    }

    /// Runs the forward pass and keeps every layer's output, output layer last
    pub fn forward_trace(&self, input: &[f64]) -> Result<Vec<Vec<f64>>> {
        NetworkError::check_dimension("network input", self.input_width, input.len())?;

        let mut trace: Vec<Vec<f64>> = Vec::with_capacity(self.layer_count());
        for layer in self.layers() {
            let layer_input = trace.last().map_or(input, Vec::as_slice);
            let output = layer.forward(layer_input, &self.activation)?;
            trace.push(output);
        }

        //Return
        Ok(trace)
    }

    /// Forward pass, cost bookkeeping and one gradient step on a single example
    ///
    /// Returns the example's squared error and whether its argmax matched the label.
    pub fn train_example(&mut self, input: &[f64], label: &[f64], learn_rate: f64) -> Result<(f64, bool)> {
        NetworkError::check_dimension("training label", self.output_width(), label.len())?;
        let trace = self.forward_trace(input)?;
        let output = trace.last().map_or(&[][..], Vec::as_slice);
        let example_cost = cost::squared_error(output, label);
        let correct = cost::is_correct(output, label);

        self.backpropagate(input, &trace, label, learn_rate);

        //Return
        Ok((example_cost, correct))
    }

    /// Chain-rule backpropagation through every layer, updating weights in place
    ///
    /// Each layer's error signal is derived from the following layer's weights
    /// before those weights are updated, and each weight moves against the
    /// output of the unit feeding it.
    fn backpropagate(&mut self, input: &[f64], trace: &[Vec<f64>], label: &[f64], learn_rate: f64) {
        let activation = self.activation;
        let layer_count = self.layer_count();
        let output = &trace[layer_count - 1];

        let mut delta: Vec<f64> = cost::squared_error_prime(output, label)
            .into_iter()
            .zip(output)
            .map(|(grad, &y)| grad * activation.derivative(y))
            .collect();

        for index in (0..layer_count).rev() {
            let layer_input: &[f64] = if index == 0 { input } else { &trace[index - 1] };

            //Error signal for the layer below
            let input_delta = (index > 0).then(|| {
                let layer = self.layer(index);
                (0..layer.input_dimension()).map(|j| {
                    let backprop_grad: f64 = layer.units().iter()
                        .zip(&delta)
                        .map(|(unit, d)| unit.weights()[j] * d)
                        .sum();
                    backprop_grad * activation.derivative(layer_input[j])
                }).collect::<Vec<f64>>()
            });

            for (unit, &d) in self.layer_mut(index).units_mut().iter_mut().zip(&delta) {
                unit.descend(d, layer_input, learn_rate);
            }

            match input_delta {
                Some(next) => delta = next,
                None => break,
            }
        }
    }

    /// Trains on `inputs`/`labels` for `repetitions` passes in order
    pub fn train(&mut self,
                 inputs: &[Vec<f64>],
                 labels: &[Vec<f64>],
                 repetitions: usize,
                 learn_rate: f64,) -> Result<Vec<EpochReport>> {
        self.train_with(inputs, labels, repetitions, learn_rate, |_report| ControlFlow::Continue(()))
    }

    /// Like `train`, calling `callback` after every repetition; `Break` stops training
    pub fn train_with<F>(&mut self,
                         inputs: &[Vec<f64>],
                         labels: &[Vec<f64>],
                         repetitions: usize,
                         learn_rate: f64,
                         callback: F,) -> Result<Vec<EpochReport>>
    where
        F: FnMut(&EpochReport) -> ControlFlow<()>,
    {
        StochasticGradientDescent::new(learn_rate, repetitions).run_rows(self, inputs, labels, callback)
    }
}

fn check_widths(input_width: usize, output_width: usize, hidden_widths: &[usize]) -> Result<()> {
    if input_width == 0 {
        return Err(NetworkError::configuration("input width must be positive"));
    }
    if output_width == 0 {
        return Err(NetworkError::configuration("output width must be positive"));
    }
    if let Some(index) = hidden_widths.iter().position(|&width| width == 0) {
        return Err(NetworkError::configuration(format!("hidden layer {} has width 0", index)));
    }
    Ok(())
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network ({}) {} -> {:?} -> {}",
                 self.activation.name(), self.input_width, self.hidden_widths(), self.output_width())?;
        let layer_count = self.layer_count();
        for (index, layer) in self.layers().enumerate() {
            let kind = if index + 1 == layer_count { "output" } else { "hidden" };
            writeln!(f, "Layer {} ({}, {} units)", index, kind, layer.output_dimension())?;
            for (unit_index, unit) in layer.units().iter().enumerate() {
                writeln!(f, "  Unit {}: bias {:.6}, weights {:.6?}", unit_index, unit.bias(), unit.weights())?;
            }
        }
        Ok(())
    }
}
