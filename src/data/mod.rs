//! For handling labeled data that gets ingested into neural network

pub mod idx;

use crate::error::{NetworkError, Result};

/// Ordered collection of inputs and their labels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    inputs: Vec<Vec<f64>>,
    labels: Vec<Vec<f64>>,
}

impl DataSet {
    pub fn new() -> Self {
        DataSet::default()
    }

    /// Pairs `inputs[i]` with `labels[i]`
    pub fn from_rows(inputs: Vec<Vec<f64>>, labels: Vec<Vec<f64>>) -> Result<Self> {
        NetworkError::check_dimension("data set labels", inputs.len(), labels.len())?;
        Ok(DataSet {
            inputs,
            labels,
        })
    }

    pub fn push(&mut self, data: &[f64], labels: &[f64]) {
        self.inputs.push(data.to_vec());
        self.labels.push(labels.to_vec());
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn labels(&self) -> &[Vec<f64>] {
        &self.labels
    }

    /// Return size of `DataSet`
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.inputs.iter()
            .zip(&self.labels)
            .map(|(data, labels)| (data.as_slice(), labels.as_slice()))
    }
}
