use anyhow::Result;
use log::info;

use perceptron::{Activation, Network};

/// The main function for the program
fn main() -> Result<()> {
    //Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = rand::thread_rng();
    let network = Network::random(Activation::Sigmoid, 3, 1, &[4, 6], &mut rng)?;
    info!("Constructed network with hidden widths {:?}", network.hidden_widths());

    println!("{}", network);
    Ok(())
}
