pub mod layer;
pub mod topology;

pub use layer::{Activation, Layer, LayerKind};
pub use topology::{LayerUpdate, NetworkTopology};
