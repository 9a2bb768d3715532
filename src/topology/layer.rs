use serde::{Serialize, Deserialize};

/// Activation function attached to a hidden or output layer.
///
/// Purely descriptive in this system; nothing evaluates it. It exists so
/// the diagram and the studio controls can round-trip the user's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    Sigmoid,
    Tanh,
    Linear,
}

impl Activation {
    /// Parses an activation name. Unknown names fall back to `Relu`, the
    /// same default the add-layer operation uses.
    pub fn parse(s: &str) -> Activation {
        match s {
            "sigmoid" => Activation::Sigmoid,
            "tanh"    => Activation::Tanh,
            "linear"  => Activation::Linear,
            _         => Activation::Relu,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Activation::Relu    => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh    => "tanh",
            Activation::Linear  => "linear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Input,
    Hidden,
    Output,
}

/// One layer in the topology.
///
/// `activation` is `None` exactly when `kind` is `Input`: input layers
/// carry no activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub neurons: usize,
    pub activation: Option<Activation>,
}

impl Layer {
    pub fn input(neurons: usize) -> Layer {
        Layer { kind: LayerKind::Input, neurons, activation: None }
    }

    pub fn hidden(neurons: usize, activation: Activation) -> Layer {
        Layer { kind: LayerKind::Hidden, neurons, activation: Some(activation) }
    }

    pub fn output(neurons: usize, activation: Activation) -> Layer {
        Layer { kind: LayerKind::Output, neurons, activation: Some(activation) }
    }
}
