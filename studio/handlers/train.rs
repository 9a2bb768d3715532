use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tiny_http::Response;

use crate::state::{FlashMessage, SharedState};

// ---------------------------------------------------------------------------
// POST /train/start
// ---------------------------------------------------------------------------

/// Starts a simulated run over the configured epoch count. The simulator
/// cancels any ticker that is still alive before spawning a new one, so
/// repeated starts can never double-tick.
pub fn handle_start(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();

    let epochs = st.config.epochs();
    let rx = st.sim.start(epochs);
    st.tick_rx = Some(Arc::new(Mutex::new(rx)));
    st.predictions.clear();
    st.flash = Some(FlashMessage::success(format!("Training started: {} epochs.", epochs)));
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// POST /train/stop
// ---------------------------------------------------------------------------

pub fn handle_stop(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    st.sim.stop();
    let epoch = st.sim.current_epoch();
    st.flash = Some(FlashMessage::success(format!("Training stopped at epoch {}.", epoch)));
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// POST /train/reset
// ---------------------------------------------------------------------------

pub fn handle_reset(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    st.reset_run();
    st.flash = Some(FlashMessage::success("Run reset: series and predictions cleared."));
    drop(st);

    crate::routes::redirect("/")
}
