use image::RgbaImage;

use crate::render::draw;
use crate::topology::layer::LayerKind;
use crate::topology::topology::NetworkTopology;

const MAX_NEURON_RADIUS: f64 = 14.0;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Horizontal center of each layer column: an even split of the width.
pub fn layer_x_positions(layer_count: usize, width: f64) -> Vec<f64> {
    (0..layer_count)
        .map(|i| width * (i as f64 + 0.5) / layer_count as f64)
        .collect()
}

/// Vertical centers of a layer's neurons: an even split of the height,
/// which centers the column as a whole.
pub fn neuron_y_positions(neuron_count: usize, height: f64) -> Vec<f64> {
    (0..neuron_count)
        .map(|j| height * (j as f64 + 0.5) / neuron_count as f64)
        .collect()
}

fn neuron_radius(topology: &NetworkTopology, height: f64) -> f64 {
    let densest = topology.layers().iter().map(|l| l.neurons).max().unwrap_or(1);
    (height / (densest as f64 * 3.0)).min(MAX_NEURON_RADIUS).max(2.0)
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws the topology diagram: one column per layer, one disc per neuron,
/// and a straight edge between every neuron pair of adjacent layers. No
/// weights exist in this system, so edges are uniform.
pub fn render_topology(topology: &NetworkTopology, width: u32, height: u32) -> RgbaImage {
    let mut img = draw::blank_canvas(width, height, draw::WHITE);
    let (w, h) = (width as f64, height as f64);

    let xs = layer_x_positions(topology.len(), w);
    let columns: Vec<Vec<f64>> = topology.layers().iter()
        .map(|layer| neuron_y_positions(layer.neurons, h))
        .collect();

    // Edges first so discs paint over their endpoints.
    for i in 0..columns.len().saturating_sub(1) {
        for &y_from in &columns[i] {
            for &y_to in &columns[i + 1] {
                draw::draw_line(&mut img, (xs[i], y_from), (xs[i + 1], y_to), draw::EDGE_GREY);
            }
        }
    }

    let radius = neuron_radius(topology, h);
    for (layer, (&x, ys)) in topology.layers().iter().zip(xs.iter().zip(columns.iter())) {
        let fill = match layer.kind {
            LayerKind::Input  => draw::INPUT_GREEN,
            LayerKind::Hidden => draw::HIDDEN_BLUE,
            LayerKind::Output => draw::OUTPUT_ORANGE,
        };
        for &y in ys {
            draw::fill_disc(&mut img, (x, y), radius, fill);
        }
    }

    img
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_columns_split_the_width_evenly() {
        let xs = layer_x_positions(4, 400.0);
        assert_eq!(xs, vec![50.0, 150.0, 250.0, 350.0]);
    }

    #[test]
    fn neuron_rows_are_vertically_centered() {
        let ys = neuron_y_positions(3, 300.0);
        assert_eq!(ys, vec![50.0, 150.0, 250.0]);
        // The column's mean sits at the canvas middle.
        let mean: f64 = ys.iter().sum::<f64>() / ys.len() as f64;
        assert!((mean - 150.0).abs() < 1e-9);

        let single = neuron_y_positions(1, 300.0);
        assert_eq!(single, vec![150.0]);
    }

    #[test]
    fn diagram_paints_neurons_with_kind_colors() {
        let topo = NetworkTopology::default();
        let img = render_topology(&topo, 300, 200);
        assert_eq!(img.dimensions(), (300, 200));

        // Input column center: first of 3 columns, single-split rows.
        let xs = layer_x_positions(3, 300.0);
        let input_ys = neuron_y_positions(2, 200.0);
        assert_eq!(
            *img.get_pixel(xs[0] as u32, input_ys[0] as u32),
            draw::INPUT_GREEN
        );

        let output_ys = neuron_y_positions(1, 200.0);
        assert_eq!(
            *img.get_pixel(xs[2] as u32, output_ys[0] as u32),
            draw::OUTPUT_ORANGE
        );
    }
}
