/// netsketch Studio
///
/// A browser-based teaching playground for feed-forward neural networks.
/// The user sketches a layer structure, picks a synthetic dataset, watches a
/// *simulated* training run tick forward, and inspects jittered predictions.
/// Served by a synchronous tiny_http server; no JavaScript frameworks.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878
///
/// Panels:
///   1. Network  — add/remove/update layers on the topology diagram
///   2. Dataset  — pick xor / circle / sine and view the data plot
///   3. Train    — start/stop/reset the tick simulator, live SSE chart
///   4. Predict  — run simulated predictions once training has ticked

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;

use state::StudioState;

fn main() {
    env_logger::init();

    let addr = "127.0.0.1:7878";
    let server = Server::http(addr).expect("Failed to bind HTTP server");

    let shared_state = Arc::new(Mutex::new(StudioState::new()));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          netsketch Studio                    ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{}                 ║", addr);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Panels: Network > Dataset > Train >         ║");
    println!("║          Predict                             ║");
    println!("╚══════════════════════════════════════════════╝");

    // Each request is dispatched on its own thread so the SSE handler
    // (which blocks while a training run is streamed) does not stall
    // regular page loads and form submissions.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
