//! Saving and loading networks through their public introspection

use log::debug;
use serde::{Serialize, Deserialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::network::activation::Activation;
use crate::network::perceptron::Network;

/// Topology and parameters of a network in serializable form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NetworkRecord {
    pub activation: Activation,
    pub input_width: usize,
    pub output_width: usize,
    pub hidden_widths: Vec<usize>,
    /// `weights[layer][unit][incoming]`, output layer last
    pub weights: Vec<Vec<Vec<f64>>>,
    /// `biases[layer][unit]`, output layer last
    pub biases: Vec<Vec<f64>>,
}

impl From<&Network> for NetworkRecord {
    fn from(network: &Network) -> Self {
        NetworkRecord {
            activation: network.activation(),
            input_width: network.input_width(),
            output_width: network.output_width(),
            hidden_widths: network.hidden_widths(),
            weights: network.layers()
                .map(|layer| layer.units().iter().map(|unit| unit.weights().to_vec()).collect())
                .collect(),
            biases: network.layers()
                .map(|layer| layer.units().iter().map(|unit| unit.bias()).collect())
                .collect(),
        }
    }
}

impl NetworkRecord {
    /// Rebuilds the network, validating the record like any explicit construction
    pub fn into_network(self) -> Result<Network> {
        Network::with_parameters(
            self.activation,
            self.weights,
            self.biases,
            self.input_width,
            self.output_width,
            &self.hidden_widths,
        )
    }
}

pub fn save<W: Write>(network: &Network, writer: W) -> Result<()> {
    bincode::serialize_into(writer, &NetworkRecord::from(network))?;
    Ok(())
}

pub fn load<R: Read>(reader: R) -> Result<Network> {
    let record: NetworkRecord = bincode::deserialize_from(reader)?;
    record.into_network()
}

pub fn save_to_file<P: AsRef<Path>>(network: &Network, filelocation: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(filelocation.as_ref())?);
    save(network, &mut writer)?;
    writer.flush()?;
    debug!("Saved network to {}", filelocation.as_ref().display());
    Ok(())
}

pub fn load_from_file<P: AsRef<Path>>(filelocation: P) -> Result<Network> {
    let file = File::open(filelocation.as_ref())?;
    let network = load(BufReader::new(file))?;
    debug!("Loaded network from {}", filelocation.as_ref().display());

    //Return
    Ok(network)
}
