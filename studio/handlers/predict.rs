use std::io::Cursor;
use tiny_http::Response;

use netsketch::predict;

use crate::state::{FlashMessage, SharedState};

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

/// Runs the prediction simulator over the active dataset, replacing any
/// previous results wholesale. The page keeps the button disabled before
/// the first tick; the library guard backs that up for direct posts.
pub fn handle_run(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();

    let epoch = st.sim.current_epoch();
    match predict(&st.dataset, epoch) {
        Ok(results) => {
            log::info!("predictions run: {} samples at epoch {}", results.len(), epoch);
            st.flash = Some(FlashMessage::success(format!(
                "Ran predictions for {} samples.",
                results.len()
            )));
            st.predictions = results;
        }
        Err(err) => {
            st.flash = Some(FlashMessage::error(err.to_string()));
        }
    }
    drop(st);

    crate::routes::redirect("/")
}
