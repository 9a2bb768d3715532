use serde::{Serialize, Deserialize};

use crate::topology::layer::{Activation, Layer, LayerKind};

/// Neuron counts on hidden layers clamp to this range at the boundary.
pub const MIN_NEURONS: usize = 1;
pub const MAX_NEURONS: usize = 20;

const DEFAULT_HIDDEN_NEURONS: usize = 4;

/// Partial update applied to one layer; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerUpdate {
    pub neurons: Option<usize>,
    pub activation: Option<Activation>,
}

/// Ordered list of layers, input first, output last.
///
/// The first and last layers are structural: they can be edited but never
/// removed, and every insertion lands strictly between them. The topology is
/// transient UI state and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkTopology {
    layers: Vec<Layer>,
}

impl Default for NetworkTopology {
    /// The starting topology: 2-neuron input, 4-neuron relu hidden,
    /// 1-neuron sigmoid output.
    fn default() -> Self {
        NetworkTopology {
            layers: vec![
                Layer::input(2),
                Layer::hidden(4, Activation::Relu),
                Layer::output(1, Activation::Sigmoid),
            ],
        }
    }
}

impl NetworkTopology {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Inserts a hidden layer (4 neurons, relu) immediately before the
    /// output layer, so the output layer stays literally last.
    pub fn add_hidden_layer(&mut self) {
        let at = self.layers.len().saturating_sub(1);
        self.layers.insert(at, Layer::hidden(DEFAULT_HIDDEN_NEURONS, Activation::Relu));
    }

    /// Removes the layer at `index`. Silently ignored when `index` points at
    /// the input layer, the output layer, or past the end.
    pub fn remove_layer(&mut self, index: usize) {
        if index == 0 || index + 1 >= self.layers.len() {
            return;
        }
        self.layers.remove(index);
    }

    /// Merges `update` into the layer at `index`.
    ///
    /// Neuron counts clamp to [`MIN_NEURONS`, `MAX_NEURONS`]. Activation
    /// updates addressed at the input layer are ignored (input layers have
    /// none). Out-of-bounds indices are a silent no-op.
    pub fn update_layer(&mut self, index: usize, update: LayerUpdate) {
        let layer = match self.layers.get_mut(index) {
            Some(l) => l,
            None    => return,
        };
        if let Some(neurons) = update.neurons {
            layer.neurons = neurons.clamp(MIN_NEURONS, MAX_NEURONS);
        }
        if let Some(activation) = update.activation {
            if layer.kind != LayerKind::Input {
                layer.activation = Some(activation);
            }
        }
    }

    /// Number of edges a full bipartite wiring between adjacent layers draws.
    pub fn edge_count(&self) -> usize {
        self.layers.windows(2).map(|w| w[0].neurons * w[1].neurons).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_topology_is_2_4_1() {
        let topo = NetworkTopology::default();
        let layers = topo.layers();
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0], Layer::input(2));
        assert_eq!(layers[1], Layer::hidden(4, Activation::Relu));
        assert_eq!(layers[2], Layer::output(1, Activation::Sigmoid));
    }

    #[test]
    fn add_hidden_layer_keeps_output_last() {
        let mut topo = NetworkTopology::default();
        topo.add_hidden_layer();
        topo.add_hidden_layer();

        let layers = topo.layers();
        assert_eq!(layers.len(), 5);
        assert_eq!(layers[0].kind, LayerKind::Input);
        assert_eq!(layers.last().unwrap().kind, LayerKind::Output);
        assert!(layers[1..4].iter().all(|l| l.kind == LayerKind::Hidden));
    }

    #[test]
    fn protected_indices_are_never_removed() {
        let mut topo = NetworkTopology::default();
        topo.remove_layer(0);
        assert_eq!(topo.len(), 3);
        topo.remove_layer(2);
        assert_eq!(topo.len(), 3);
        topo.remove_layer(99);
        assert_eq!(topo.len(), 3);
    }

    #[test]
    fn removing_a_hidden_layer_preserves_order() {
        let mut topo = NetworkTopology::default();
        topo.add_hidden_layer();
        topo.update_layer(1, LayerUpdate { neurons: Some(7), ..Default::default() });
        topo.update_layer(2, LayerUpdate { neurons: Some(9), ..Default::default() });

        topo.remove_layer(1);

        assert_eq!(topo.len(), 3);
        assert_eq!(topo.layers()[1].neurons, 9);
        assert_eq!(topo.layers()[2].kind, LayerKind::Output);
    }

    #[test]
    fn update_clamps_neuron_counts() {
        let mut topo = NetworkTopology::default();
        topo.update_layer(1, LayerUpdate { neurons: Some(500), ..Default::default() });
        assert_eq!(topo.layers()[1].neurons, MAX_NEURONS);
        topo.update_layer(1, LayerUpdate { neurons: Some(0), ..Default::default() });
        assert_eq!(topo.layers()[1].neurons, MIN_NEURONS);
    }

    #[test]
    fn input_layer_never_gains_an_activation() {
        let mut topo = NetworkTopology::default();
        topo.update_layer(0, LayerUpdate {
            neurons: Some(3),
            activation: Some(Activation::Tanh),
        });
        assert_eq!(topo.layers()[0].neurons, 3);
        assert_eq!(topo.layers()[0].activation, None);
    }

    #[test]
    fn edge_count_is_the_bipartite_sum() {
        let topo = NetworkTopology::default();
        // 2*4 + 4*1
        assert_eq!(topo.edge_count(), 12);
    }
}
