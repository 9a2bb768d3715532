use std::io::Cursor;
use tiny_http::{Request, Response};

use crate::state::{FlashMessage, SharedState};
use crate::util::form::FormData;

// ---------------------------------------------------------------------------
// POST /dataset/select
// ---------------------------------------------------------------------------

pub fn handle_select(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let form = FormData::parse(&body);

    // Unknown names fall back to xor inside the generator.
    let id = form.get("dataset").unwrap_or("xor").to_owned();

    let mut st = state.lock().unwrap();
    st.select_dataset(&id);
    let resolved = st.dataset.id.as_str();
    log::info!("dataset selected: {} ({} samples)", resolved, st.dataset.samples.len());
    st.flash = Some(FlashMessage::success(format!("Dataset '{}' loaded.", resolved)));
    drop(st);

    crate::routes::redirect("/")
}
