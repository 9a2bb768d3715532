use std::io::Cursor;
use tiny_http::Response;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};

use netsketch::render::{render_data_plot, render_metrics_chart, render_topology};

use crate::state::SharedState;
use crate::util::form::FormData;

const MIN_DIM: u32 = 64;
const MAX_DIM: u32 = 2000;

// ---------------------------------------------------------------------------
// GET /render/topology.png
// ---------------------------------------------------------------------------

pub fn handle_topology(query: &str, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let (w, h) = parse_dims(query, 640, 360);

    let topology = state.lock().unwrap().topology.clone();
    let img = render_topology(&topology, w, h);

    crate::routes::png_response(encode_png(img))
}

// ---------------------------------------------------------------------------
// GET /render/data.png
// ---------------------------------------------------------------------------

pub fn handle_data(query: &str, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let (w, h) = parse_dims(query, 480, 360);

    let (dataset, progress) = {
        let st = state.lock().unwrap();
        (st.dataset.clone(), st.sim.snapshot().progress())
    };
    let img = render_data_plot(&dataset, progress, w, h);

    crate::routes::png_response(encode_png(img))
}

// ---------------------------------------------------------------------------
// GET /render/metrics.png
// ---------------------------------------------------------------------------

pub fn handle_metrics(query: &str, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let (w, h) = parse_dims(query, 640, 240);

    let run = state.lock().unwrap().sim.snapshot();
    let img = render_metrics_chart(&run, w, h);

    crate::routes::png_response(encode_png(img))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Optional `w`/`h` query parameters, clamped to sane canvas bounds.
fn parse_dims(query: &str, default_w: u32, default_h: u32) -> (u32, u32) {
    let form = FormData::parse(query);
    let w = form.get_parsed::<u32>("w").unwrap_or(default_w).clamp(MIN_DIM, MAX_DIM);
    let h = form.get_parsed::<u32>("h").unwrap_or(default_h).clamp(MIN_DIM, MAX_DIM);
    (w, h)
}

fn encode_png(img: RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    if let Err(err) = DynamicImage::ImageRgba8(img).write_to(&mut buf, ImageOutputFormat::Png) {
        log::warn!("png encode failed: {}", err);
    }
    buf.into_inner()
}
