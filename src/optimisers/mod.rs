//! Plain stochastic gradient descent over a labelled training set

use std::ops::ControlFlow;

use log::info;
use serde::{Serialize, Deserialize};

use crate::data::DataSet;
use crate::error::{NetworkError, Result};
use crate::network::perceptron::Network;

/// Aggregate cost and accuracy of one pass over the training set
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EpochReport {
    pub repetition: usize,
    pub cost: f64,
    pub correct: usize,
    pub total: usize,
}

impl EpochReport {
    /// Fraction of examples whose argmax matched the label
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Training configuration, deserializable with defaults for missing fields
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StochasticGradientDescent {
    pub learning_rate: f64,
    pub repetitions: usize,
}

impl Default for StochasticGradientDescent {
    fn default() -> Self {
        StochasticGradientDescent {
            learning_rate: 0.1,
            repetitions: 100,
        }
    }
}

impl StochasticGradientDescent {
    pub fn new(learning_rate: f64, repetitions: usize) -> Self {
        StochasticGradientDescent {
            learning_rate,
            repetitions,
        }
    }

    /// Trains `network` on `dataset`, see `run_rows`
    pub fn run<F>(&self, network: &mut Network, dataset: &DataSet, callback: F) -> Result<Vec<EpochReport>>
    where
        F: FnMut(&EpochReport) -> ControlFlow<()>,
    {
        self.run_rows(network, dataset.inputs(), dataset.labels(), callback)
    }

    /// Repeats the full set in order, one gradient step per example
    ///
    /// Every example is checked against the network's widths before any
    /// weight changes. `callback` sees each repetition's report and may
    /// return `Break` to stop early.
    pub fn run_rows<F>(&self,
                       network: &mut Network,
                       inputs: &[Vec<f64>],
                       labels: &[Vec<f64>],
                       mut callback: F,) -> Result<Vec<EpochReport>>
    where
        F: FnMut(&EpochReport) -> ControlFlow<()>,
    {
        validate(network, inputs, labels)?;

        let mut reports: Vec<EpochReport> = Vec::with_capacity(self.repetitions);
        for repetition in 0..self.repetitions {
            let mut cost = 0.0;
            let mut correct = 0;
            for (input, label) in inputs.iter().zip(labels) {
                let (example_cost, example_correct) = network.train_example(input, label, self.learning_rate)?;
                cost += example_cost;
                if example_correct {
                    correct += 1;
                }
            }

            let report = EpochReport {
                repetition,
                cost,
                correct,
                total: inputs.len(),
            };
            info!("Repetition {}: cost {:.6}, correct {} of {}", repetition, cost, correct, inputs.len());

            let flow = callback(&report);
            reports.push(report);
            if flow.is_break() {
                break;
            }
        }

        //Return
        Ok(reports)
    }
}

fn validate(network: &Network, inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<()> {
    NetworkError::check_dimension("training labels", inputs.len(), labels.len())?;
    for (input, label) in inputs.iter().zip(labels) {
        NetworkError::check_dimension("training input", network.input_width(), input.len())?;
        NetworkError::check_dimension("training label", network.output_width(), label.len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::activation::Activation;

    fn or_table() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let inputs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let labels = vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]];
        (inputs, labels)
    }

    #[test]
    fn one_report_per_repetition() {
        let (inputs, labels) = or_table();
        let mut network = Network::seeded(Activation::Sigmoid, 2, 1, &[], 5).unwrap();
        let reports = StochasticGradientDescent::new(0.5, 7).run_rows(&mut network, &inputs, &labels, |_| ControlFlow::Continue(())).unwrap();
        assert_eq!(reports.len(), 7);
        assert!(reports.iter().enumerate().all(|(i, report)| report.repetition == i && report.total == 4));
    }

    #[test]
    fn callback_can_stop_training() {
        let (inputs, labels) = or_table();
        let mut network = Network::seeded(Activation::Sigmoid, 2, 1, &[], 5).unwrap();
        let reports = StochasticGradientDescent::new(0.5, 50)
            .run_rows(&mut network, &inputs, &labels, |report| {
                if report.repetition == 2 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
            })
            .unwrap();
        assert_eq!(reports.len(), 3);
    }

    #[test]
    fn malformed_example_leaves_network_untouched() {
        let (mut inputs, labels) = or_table();
        inputs[3] = vec![1.0];
        let mut network = Network::seeded(Activation::Sigmoid, 2, 1, &[2], 5).unwrap();
        let before = network.clone();
        let err = StochasticGradientDescent::default().run_rows(&mut network, &inputs, &labels, |_| ControlFlow::Continue(())).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { expected: 2, actual: 1, .. }));
        assert_eq!(network, before);
    }

    #[test]
    fn unequal_input_and_label_counts_are_rejected() {
        let (inputs, mut labels) = or_table();
        labels.pop();
        let mut network = Network::seeded(Activation::Sigmoid, 2, 1, &[], 5).unwrap();
        assert!(network.train(&inputs, &labels, 1, 0.1).is_err());
    }

    #[test]
    fn accuracy_of_empty_report_is_zero() {
        let report = EpochReport { repetition: 0, cost: 0.0, correct: 0, total: 0 };
        assert_eq!(report.accuracy(), 0.0);
        let report = EpochReport { repetition: 0, cost: 0.0, correct: 3, total: 4 };
        assert_eq!(report.accuracy(), 0.75);
    }
}
