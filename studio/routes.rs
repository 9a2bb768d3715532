use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::state::SharedState;
use crate::handlers;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"text/html; charset=utf-8").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn png_response(bytes: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![
            Header::from_bytes(b"Content-Type", b"image/png").unwrap(),
            Header::from_bytes(b"Cache-Control", b"no-store").unwrap(),
        ],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(303),
        vec![
            Header::from_bytes(b"Location", location.as_bytes()).unwrap(),
            Header::from_bytes(b"Content-Length", b"0").unwrap(),
        ],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// All handlers (except SSE) receive a `&mut Request` so that the dispatcher
/// retains ownership and can call `request.respond(response)` at the end.
/// The SSE handler takes ownership to perform long-lived streaming.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();

    let (path, query) = if let Some(pos) = url.find('?') {
        (url[..pos].to_owned(), url[pos + 1..].to_owned())
    } else {
        (url.clone(), String::new())
    };

    log::debug!("{} {}", method, path);

    // SSE — long-lived; handler takes ownership and drives the stream loop.
    if method == Method::Get && path == "/train/events" {
        handlers::train_sse::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        // ── Page ─────────────────────────────────────────────────────────
        (Method::Get, "/") => handlers::page::handle_get(state),

        // ── Topology ─────────────────────────────────────────────────────
        (Method::Post, "/topology/add")    => handlers::topology::handle_add(state),
        (Method::Post, "/topology/remove") => handlers::topology::handle_remove(&mut request, state),
        (Method::Post, "/topology/update") => handlers::topology::handle_update(&mut request, state),

        // ── Dataset & hyperparameters ────────────────────────────────────
        (Method::Post, "/dataset/select") => handlers::dataset::handle_select(&mut request, state),
        (Method::Post, "/config/save")    => handlers::config::handle_save(&mut request, state),

        // ── Train ────────────────────────────────────────────────────────
        (Method::Post, "/train/start") => handlers::train::handle_start(state),
        (Method::Post, "/train/stop")  => handlers::train::handle_stop(state),
        (Method::Post, "/train/reset") => handlers::train::handle_reset(state),

        // ── Predictions ──────────────────────────────────────────────────
        (Method::Post, "/predict") => handlers::predict::handle_run(state),

        // ── Rendered charts ──────────────────────────────────────────────
        (Method::Get, "/render/topology.png") => handlers::charts::handle_topology(&query, state),
        (Method::Get, "/render/data.png")     => handlers::charts::handle_data(&query, state),
        (Method::Get, "/render/metrics.png")  => handlers::charts::handle_metrics(&query, state),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    };

    let _ = request.respond(response);
}
