use perceptron::persistence::{self, NetworkRecord};
use perceptron::{Activation, Network};

#[test]
fn round_trip_preserves_topology_and_outputs() {
    let network = Network::seeded(Activation::Sigmoid, 3, 2, &[4, 6], 2024).unwrap();

    let mut bytes: Vec<u8> = Vec::new();
    persistence::save(&network, &mut bytes).unwrap();
    let loaded = persistence::load(bytes.as_slice()).unwrap();

    assert_eq!(loaded.input_width(), 3);
    assert_eq!(loaded.output_width(), 2);
    assert_eq!(loaded.hidden_widths(), vec![4, 6]);
    assert_eq!(loaded.activation(), Activation::Sigmoid);
    for input in [[0.0, 0.0, 0.0], [1.0, -1.0, 0.5], [0.3, 0.7, -2.0]] {
        assert_eq!(loaded.compute(&input).unwrap(), network.compute(&input).unwrap());
    }
}

#[test]
fn round_trip_keeps_activation_parameters() {
    let network = Network::with_parameters(
        Activation::Step { threshold: 0.75 },
        vec![vec![vec![0.5, 0.5]]],
        vec![vec![0.25]],
        2,
        1,
        &[],
    ).unwrap();

    let mut bytes: Vec<u8> = Vec::new();
    persistence::save(&network, &mut bytes).unwrap();
    let loaded = persistence::load(bytes.as_slice()).unwrap();
    assert_eq!(loaded, network);
    assert_eq!(NetworkRecord::from(&loaded), NetworkRecord::from(&network));
}

#[test]
fn trained_network_survives_file_round_trip() {
    let mut network = Network::seeded(Activation::Tanh, 2, 1, &[3], 5).unwrap();
    let inputs = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
    let labels = vec![vec![1.0], vec![-1.0]];
    network.train(&inputs, &labels, 20, 0.1).unwrap();

    let path = std::env::temp_dir().join(format!("perceptron-roundtrip-{}.bin", std::process::id()));
    persistence::save_to_file(&network, &path).unwrap();
    let loaded = persistence::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, network);
}
