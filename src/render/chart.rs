use image::RgbaImage;

use crate::render::draw;
use crate::sim::progress::TrainingRun;

const PAD: f64 = 10.0;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Maps a series into canvas points: epoch index across the width, value
/// into the fixed [0, 1] vertical range (values above 1 clamp to the top).
pub fn series_points(series: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    let n = series.len();
    series.iter().enumerate()
        .map(|(i, &v)| {
            let fx = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.5 };
            let x = PAD + fx * (width - 2.0 * PAD);
            let y = PAD + (1.0 - v.clamp(0.0, 1.0)) * (height - 2.0 * PAD);
            (x, y)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws the loss and accuracy series as two polylines over a quarter grid.
/// Empty or single-point series render as an empty frame or a single dot.
pub fn render_metrics_chart(run: &TrainingRun, width: u32, height: u32) -> RgbaImage {
    let mut img = draw::blank_canvas(width, height, draw::WHITE);
    let (w, h) = (width as f64, height as f64);

    for g in 0..=4 {
        let y = PAD + g as f64 / 4.0 * (h - 2.0 * PAD);
        draw::draw_line(&mut img, (PAD, y), (w - PAD, y), draw::GRID_GREY);
    }

    draw_series(&mut img, &run.loss_series, w, h, draw::LOSS_RED);
    draw_series(&mut img, &run.accuracy_series, w, h, draw::ACCURACY_BLUE);

    img
}

fn draw_series(img: &mut RgbaImage, series: &[f64], w: f64, h: f64, color: image::Rgba<u8>) {
    let points = series_points(series, w, h);
    match points.len() {
        0 => {}
        1 => draw::fill_disc(img, points[0], 2.0, color),
        _ => draw::draw_polyline(img, &points, color),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::progress::SimState;

    fn run_with(loss: Vec<f64>, accuracy: Vec<f64>) -> TrainingRun {
        TrainingRun {
            current_epoch: loss.len(),
            total_epochs: loss.len().max(1),
            loss_series: loss,
            accuracy_series: accuracy,
            state: SimState::Idle,
        }
    }

    #[test]
    fn points_span_the_padded_frame() {
        let points = series_points(&[1.0, 0.5, 0.0], 120.0, 100.0);
        assert_eq!(points[0], (10.0, 10.0));
        assert_eq!(points[1], (60.0, 50.0));
        assert_eq!(points[2], (110.0, 90.0));
    }

    #[test]
    fn values_above_one_clamp_to_the_top_edge() {
        let points = series_points(&[1.08, 0.9], 120.0, 100.0);
        assert_eq!(points[0].1, 10.0);
    }

    #[test]
    fn empty_and_single_point_series_render() {
        let img = render_metrics_chart(&run_with(vec![], vec![]), 100, 80);
        assert_eq!(img.dimensions(), (100, 80));

        let img = render_metrics_chart(&run_with(vec![0.9], vec![0.1]), 100, 80);
        assert_eq!(img.dimensions(), (100, 80));
        // The single loss point sits at mid-width.
        assert_eq!(*img.get_pixel(50, 14), draw::LOSS_RED);
    }

    #[test]
    fn both_polylines_are_painted() {
        let run = run_with(vec![1.0, 0.8, 0.6, 0.4], vec![0.1, 0.3, 0.5, 0.7]);
        let img = render_metrics_chart(&run, 200, 100);

        let loss_start = series_points(&run.loss_series, 200.0, 100.0)[0];
        assert_eq!(
            *img.get_pixel(loss_start.0 as u32, loss_start.1 as u32),
            draw::LOSS_RED
        );
        let acc_start = series_points(&run.accuracy_series, 200.0, 100.0)[0];
        assert_eq!(
            *img.get_pixel(acc_start.0 as u32, acc_start.1 as u32),
            draw::ACCURACY_BLUE
        );
    }
}
