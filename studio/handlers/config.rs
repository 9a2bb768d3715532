use std::io::Cursor;
use tiny_http::{Request, Response};

use crate::state::{FlashMessage, SharedState};
use crate::util::form::FormData;

// ---------------------------------------------------------------------------
// POST /config/save
// ---------------------------------------------------------------------------

/// Stores the hyperparameters. Values outside the documented ranges clamp
/// inside the config's setters; malformed numbers leave the old value alone.
pub fn handle_save(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let form = FormData::parse(&body);

    let lr     = form.get_parsed::<f64>("learning_rate");
    let epochs = form.get_parsed::<usize>("epochs");
    let batch  = form.get_parsed::<usize>("batch_size");

    let mut st = state.lock().unwrap();
    if let Some(lr) = lr {
        st.config.set_learning_rate(lr);
    }
    if let Some(epochs) = epochs {
        st.config.set_epochs(epochs);
    }
    if let Some(batch) = batch {
        st.config.set_batch_size(batch);
    }

    st.flash = if lr.is_none() || epochs.is_none() || batch.is_none() {
        Some(FlashMessage::error("Some values could not be parsed; unchanged fields kept."))
    } else {
        Some(FlashMessage::success("Hyperparameters saved."))
    };
    drop(st);

    crate::routes::redirect("/")
}
