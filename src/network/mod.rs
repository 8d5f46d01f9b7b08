pub mod activation;
pub mod cost;
pub mod layer;
pub mod perceptron;
pub mod unit;

pub use activation::Activation;
pub use layer::Layer;
pub use perceptron::Network;
pub use unit::Unit;
