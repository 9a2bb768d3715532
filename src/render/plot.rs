use image::RgbaImage;
use rand::Rng;

use crate::dataset::generator::{Dataset, DatasetId, DatasetKind};
use crate::render::draw;

/// Fraction of the observed span added on each side of the data frame.
pub const FRAME_PADDING: f64 = 0.1;
/// Resolution of the heuristic decision-boundary grid.
pub const GRID_CELLS: usize = 50;

const SAMPLE_RADIUS: f64 = 4.0;
const PREDICTION_RADIUS: f64 = 2.0;
const MAX_OVERLAY_NOISE: f64 = 0.3;

// ---------------------------------------------------------------------------
// Data-space → canvas mapping
// ---------------------------------------------------------------------------

/// Axis-aligned data frame used to normalize points into canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Observed min/max of a point set. `None` when the set is empty.
    pub fn from_points<I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds { min_x: first.0, max_x: first.0, min_y: first.1, max_y: first.1 };
        for (x, y) in iter {
            b.min_x = b.min_x.min(x);
            b.max_x = b.max_x.max(x);
            b.min_y = b.min_y.min(y);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    /// Expands each axis by `frac` of its span. Degenerate spans widen by a
    /// fixed unit so a constant series still renders.
    pub fn padded(self, frac: f64) -> Bounds {
        let span_x = if self.max_x > self.min_x { self.max_x - self.min_x } else { 1.0 };
        let span_y = if self.max_y > self.min_y { self.max_y - self.min_y } else { 1.0 };
        Bounds {
            min_x: self.min_x - span_x * frac,
            max_x: self.max_x + span_x * frac,
            min_y: self.min_y - span_y * frac,
            max_y: self.max_y + span_y * frac,
        }
    }

    /// Maps a data point into canvas pixels; the y axis points up in data
    /// space and down on the canvas.
    pub fn to_px(&self, point: (f64, f64), width: f64, height: f64) -> (f64, f64) {
        let fx = (point.0 - self.min_x) / (self.max_x - self.min_x);
        let fy = (point.1 - self.min_y) / (self.max_y - self.min_y);
        (fx * width, (1.0 - fy) * height)
    }

    /// Inverse of `to_px` on the x/y fractions, used to find the data-space
    /// center of a grid cell.
    pub fn from_frac(&self, fx: f64, fy: f64) -> (f64, f64) {
        (
            self.min_x + fx * (self.max_x - self.min_x),
            self.min_y + fy * (self.max_y - self.min_y),
        )
    }
}

// ---------------------------------------------------------------------------
// Decision-boundary heuristic
// ---------------------------------------------------------------------------

/// Hard-coded geometric rule standing in for a learned boundary: the radius
/// threshold when the circle dataset is active, the quadrant-XOR rule
/// otherwise. This is deliberately not real inference; there is no model
/// to query in this system.
pub fn boundary_class(id: DatasetId, x: f64, y: f64) -> bool {
    match id {
        DatasetId::Circle => (x * x + y * y).sqrt() < 0.5,
        _ => (x >= 0.5) != (y >= 0.5),
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws the dataset view.
///
/// Classification with 2D inputs: a 50×50 heuristic boundary grid under a
/// scatter of the samples, colored by label. Regression: the true curve as
/// a polyline plus simulated prediction points whose vertical noise shrinks
/// as `progress` approaches 1.
pub fn render_data_plot(
    dataset: &Dataset,
    progress: f64,
    width: u32,
    height: u32,
) -> RgbaImage {
    let mut img = draw::blank_canvas(width, height, draw::WHITE);
    if dataset.samples.is_empty() {
        return img;
    }

    match dataset.kind {
        DatasetKind::Classification => {
            render_classification(&mut img, dataset, width as f64, height as f64)
        }
        DatasetKind::Regression => {
            render_regression(&mut img, dataset, progress, width as f64, height as f64)
        }
    }

    img
}

fn render_classification(img: &mut RgbaImage, dataset: &Dataset, w: f64, h: f64) {
    // Scatter and boundary grid are defined over a 2D input plane.
    if dataset.input_width() != 2 {
        return;
    }

    let bounds = match Bounds::from_points(
        dataset.samples.iter().map(|s| (s.input[0], s.input[1])),
    ) {
        Some(b) => b.padded(FRAME_PADDING),
        None => return,
    };

    let cell_w = w / GRID_CELLS as f64;
    let cell_h = h / GRID_CELLS as f64;
    for gy in 0..GRID_CELLS {
        for gx in 0..GRID_CELLS {
            let fx = (gx as f64 + 0.5) / GRID_CELLS as f64;
            // Row 0 is the top of the canvas, which is the frame's max y.
            let fy = 1.0 - (gy as f64 + 0.5) / GRID_CELLS as f64;
            let (x, y) = bounds.from_frac(fx, fy);
            let color = if boundary_class(dataset.id, x, y) {
                draw::REGION_PALE_BLUE
            } else {
                draw::REGION_PALE_RED
            };
            draw::fill_rect(
                img,
                (gx as f64 * cell_w) as i64,
                (gy as f64 * cell_h) as i64,
                cell_w.ceil() as i64,
                cell_h.ceil() as i64,
                color,
            );
        }
    }

    for sample in &dataset.samples {
        let px = bounds.to_px((sample.input[0], sample.input[1]), w, h);
        let color = if sample.output[0] >= 0.5 { draw::CLASS_BLUE } else { draw::CLASS_RED };
        draw::fill_disc(img, px, SAMPLE_RADIUS, color);
    }
}

fn render_regression(img: &mut RgbaImage, dataset: &Dataset, progress: f64, w: f64, h: f64) {
    let bounds = match Bounds::from_points(
        dataset.samples.iter().map(|s| (s.input[0], s.output[0])),
    ) {
        Some(b) => b.padded(FRAME_PADDING),
        None => return,
    };

    let curve: Vec<(f64, f64)> = dataset.samples.iter()
        .map(|s| bounds.to_px((s.input[0], s.output[0]), w, h))
        .collect();
    draw::draw_polyline(img, &curve, draw::DARK);

    // Simulated predictions hug the curve more tightly as training advances.
    let amplitude = MAX_OVERLAY_NOISE * (1.0 - progress.clamp(0.0, 1.0));
    let mut rng = rand::thread_rng();
    for sample in &dataset.samples {
        let noise = if amplitude > 0.0 {
            rng.gen_range(-amplitude..amplitude)
        } else {
            0.0
        };
        let px = bounds.to_px((sample.input[0], sample.output[0] + noise), w, h);
        draw::fill_disc(img, px, PREDICTION_RADIUS, draw::PREDICTION_AMBER);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generator::generate;

    #[test]
    fn bounds_capture_observed_extremes() {
        let b = Bounds::from_points(vec![(0.0, 2.0), (4.0, -2.0), (1.0, 0.0)]).unwrap();
        assert_eq!(b, Bounds { min_x: 0.0, max_x: 4.0, min_y: -2.0, max_y: 2.0 });
    }

    #[test]
    fn padding_adds_a_tenth_of_the_span_per_side() {
        let b = Bounds { min_x: 0.0, max_x: 10.0, min_y: 0.0, max_y: 1.0 }.padded(0.1);
        assert!((b.min_x - -1.0).abs() < 1e-12);
        assert!((b.max_x - 11.0).abs() < 1e-12);
        assert!((b.min_y - -0.1).abs() < 1e-12);
        assert!((b.max_y - 1.1).abs() < 1e-12);
    }

    #[test]
    fn degenerate_spans_still_produce_a_frame() {
        let b = Bounds::from_points(vec![(3.0, 5.0)]).unwrap().padded(0.1);
        assert!(b.max_x > b.min_x);
        assert!(b.max_y > b.min_y);
    }

    #[test]
    fn px_mapping_inverts_the_y_axis() {
        let b = Bounds { min_x: 0.0, max_x: 1.0, min_y: 0.0, max_y: 1.0 };
        assert_eq!(b.to_px((0.0, 0.0), 100.0, 100.0), (0.0, 100.0));
        assert_eq!(b.to_px((1.0, 1.0), 100.0, 100.0), (100.0, 0.0));
        assert_eq!(b.to_px((0.5, 0.5), 100.0, 100.0), (50.0, 50.0));
    }

    #[test]
    fn circle_rule_is_a_radius_threshold() {
        assert!(boundary_class(DatasetId::Circle, 0.1, 0.1));
        assert!(!boundary_class(DatasetId::Circle, 0.6, 0.3));
    }

    #[test]
    fn fallback_rule_is_quadrant_xor() {
        assert!(boundary_class(DatasetId::Xor, 0.2, 0.8));
        assert!(boundary_class(DatasetId::Xor, 0.8, 0.2));
        assert!(!boundary_class(DatasetId::Xor, 0.2, 0.2));
        assert!(!boundary_class(DatasetId::Xor, 0.8, 0.8));
    }

    #[test]
    fn classification_plot_paints_the_boundary_grid() {
        let ds = generate("xor");
        let img = render_data_plot(&ds, 0.0, 200, 200);
        assert_eq!(img.dimensions(), (200, 200));

        // Away from the corner samples, the region tint shows through. The
        // frame is [−0.1, 1.1]²; data point (0.25, 0.75) is in the XOR-true
        // quadrant.
        let bounds = Bounds { min_x: -0.1, max_x: 1.1, min_y: -0.1, max_y: 1.1 };
        let (px, py) = bounds.to_px((0.25, 0.75), 200.0, 200.0);
        assert_eq!(*img.get_pixel(px as u32, py as u32), draw::REGION_PALE_BLUE);
        let (px, py) = bounds.to_px((0.25, 0.25), 200.0, 200.0);
        assert_eq!(*img.get_pixel(px as u32, py as u32), draw::REGION_PALE_RED);
    }

    #[test]
    fn regression_plot_renders_without_panicking_at_any_progress() {
        let ds = generate("sine");
        for progress in [0.0, 0.5, 1.0, 2.0] {
            let img = render_data_plot(&ds, progress, 300, 150);
            assert_eq!(img.dimensions(), (300, 150));
        }
    }
}
