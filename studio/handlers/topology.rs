use std::io::Cursor;
use tiny_http::{Request, Response};

use netsketch::{Activation, LayerUpdate};

use crate::state::{FlashMessage, SharedState};
use crate::util::form::FormData;

// ---------------------------------------------------------------------------
// POST /topology/add
// ---------------------------------------------------------------------------

pub fn handle_add(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    st.topology.add_hidden_layer();
    st.flash = Some(FlashMessage::success("Hidden layer added before the output layer."));
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// POST /topology/remove
// ---------------------------------------------------------------------------

pub fn handle_remove(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let form = FormData::parse(&body);

    let index = match form.get_parsed::<usize>("index") {
        Some(i) => i,
        None => {
            let mut st = state.lock().unwrap();
            st.flash = Some(FlashMessage::error("Missing layer index."));
            drop(st);
            return crate::routes::redirect("/");
        }
    };

    let mut st = state.lock().unwrap();
    let before = st.topology.len();
    st.topology.remove_layer(index);
    // The model silently ignores protected indices; the surface says why.
    st.flash = if st.topology.len() == before {
        Some(FlashMessage::error("Input and output layers are protected."))
    } else {
        Some(FlashMessage::success("Layer removed."))
    };
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// POST /topology/update
// ---------------------------------------------------------------------------

pub fn handle_update(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let form = FormData::parse(&body);

    let index = match form.get_parsed::<usize>("index") {
        Some(i) => i,
        None => {
            let mut st = state.lock().unwrap();
            st.flash = Some(FlashMessage::error("Missing layer index."));
            drop(st);
            return crate::routes::redirect("/");
        }
    };

    let update = LayerUpdate {
        neurons: form.get_parsed::<usize>("neurons"),
        activation: form.get("activation").map(Activation::parse),
    };

    let mut st = state.lock().unwrap();
    st.topology.update_layer(index, update);
    st.flash = Some(FlashMessage::success("Layer updated."));
    drop(st);

    crate::routes::redirect("/")
}
