use std::io::Cursor;
use tiny_http::Response;

use netsketch::{
    Dataset, DatasetKind, LayerKind, NetworkTopology, PredictionResult, SimState, TrainingConfig,
    TrainingRun,
};

use crate::render::render_page;
use crate::state::{FlashKind, FlashMessage, SharedState};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let flash       = st.take_flash();
    let topology    = st.topology.clone();
    let config      = st.config.clone();
    let dataset     = st.dataset.clone();
    let run         = st.sim.snapshot();
    let predictions = st.predictions.clone();
    drop(st);

    crate::routes::html_response(build_page(
        &topology, &config, &dataset, &run, &predictions, flash,
    ))
}

// ---------------------------------------------------------------------------
// Page builder
// ---------------------------------------------------------------------------

fn build_page(
    topology: &NetworkTopology,
    config: &TrainingConfig,
    dataset: &Dataset,
    run: &TrainingRun,
    predictions: &[PredictionResult],
    flash: Option<FlashMessage>,
) -> String {
    let is_running = run.state == SimState::Running;

    let status_badge = match run.state {
        SimState::Idle if run.current_epoch == 0 => "Idle",
        SimState::Idle      => "Stopped",
        SimState::Running   => "Running",
        SimState::Completed => "Completed",
    };

    let sel = |id: &str| if config.dataset_id == id { " selected" } else { "" };

    // A run that never started shows the configured epoch target.
    let total_display = if run.total_epochs > 0 { run.total_epochs } else { config.epochs() };

    let predict_disabled = if run.current_epoch == 0 || is_running { "disabled" } else { "" };
    let start_disabled   = if is_running { "disabled" } else { "" };
    let stop_disabled    = if is_running { "" } else { "disabled" };

    render_page(is_running, |tmpl| {
        tmpl
            .replace("{{FLASH}}", &render_flash_html(flash.as_ref()))
            .replace("{{LAYER_ROWS}}", &build_layer_rows(topology))
            .replace("{{TOPOLOGY_SUMMARY}}", &build_topology_summary(topology, dataset))
            .replace("{{SEL_XOR}}", sel("xor"))
            .replace("{{SEL_CIRCLE}}", sel("circle"))
            .replace("{{SEL_SINE}}", sel("sine"))
            .replace("{{DS_SUMMARY}}", &build_dataset_summary(dataset))
            .replace("{{CFG_LR}}", &config.learning_rate().to_string())
            .replace("{{CFG_EP}}", &config.epochs().to_string())
            .replace("{{CFG_BS}}", &config.batch_size().to_string())
            .replace("{{TRAIN_STATUS}}", status_badge)
            .replace("{{EPOCH}}", &run.current_epoch.to_string())
            .replace("{{TOTAL_EPOCHS}}", &total_display.to_string())
            .replace("{{START_DISABLED}}", start_disabled)
            .replace("{{STOP_DISABLED}}", stop_disabled)
            .replace("{{PREDICT_DISABLED}}", predict_disabled)
            .replace("{{PREDICTIONS}}", &build_predictions_html(predictions, dataset))
    })
}

fn build_layer_rows(topology: &NetworkTopology) -> String {
    let last = topology.len() - 1;
    topology.layers().iter().enumerate().map(|(i, layer)| {
        let kind_label = match layer.kind {
            LayerKind::Input  => "Input",
            LayerKind::Hidden => "Hidden",
            LayerKind::Output => "Output",
        };

        let activation_cell = match layer.activation {
            None => "<td class=\"act-none\">—</td>".to_owned(),
            Some(current) => {
                let opts: String = ["relu", "sigmoid", "tanh", "linear"].iter().map(|&a| {
                    let sel = if a == current.as_str() { " selected" } else { "" };
                    let label = a[..1].to_uppercase() + &a[1..];
                    format!("<option value=\"{}\"{}>{}</option>", a, sel, label)
                }).collect();
                format!("<td><select name=\"activation\" form=\"upd-{i}\">{opts}</select></td>")
            }
        };

        let remove_cell = if i == 0 || i == last {
            "<td><span class=\"hint\">protected</span></td>".to_owned()
        } else {
            format!(
                r#"<td><form method="POST" action="/topology/remove"><input type="hidden" name="index" value="{i}"><button type="submit" class="btn btn-secondary btn-sm">Remove</button></form></td>"#
            )
        };

        format!(
            r#"<tr>
  <td>{kind_label}</td>
  <td><form id="upd-{i}" method="POST" action="/topology/update"><input type="hidden" name="index" value="{i}"><input type="number" name="neurons" value="{n}" min="1" max="20"></form></td>
  {activation_cell}
  <td><button type="submit" form="upd-{i}" class="btn btn-secondary btn-sm">Update</button></td>
  {remove_cell}
</tr>"#,
            kind_label = kind_label,
            i = i,
            n = layer.neurons,
            activation_cell = activation_cell,
            remove_cell = remove_cell,
        )
    }).collect::<Vec<_>>().join("\n")
}

fn build_topology_summary(topology: &NetworkTopology, dataset: &Dataset) -> String {
    let neurons: usize = topology.layers().iter().map(|l| l.neurons).sum();
    format!(
        r#"<p class="hint">{layers} layers, {neurons} neurons, {edges} connections.
Active dataset expects {inputs} input / {outputs} output neuron(s).</p>"#,
        layers  = topology.len(),
        neurons = neurons,
        edges   = topology.edge_count(),
        inputs  = dataset.input_width(),
        outputs = dataset.output_width(),
    )
}

fn build_dataset_summary(dataset: &Dataset) -> String {
    let kind = match dataset.kind {
        DatasetKind::Classification => "classification",
        DatasetKind::Regression    => "regression",
    };
    format!(
        r#"<p class="hint">{name}: {count} samples, {kind}.</p>"#,
        name  = dataset.id.as_str(),
        count = dataset.samples.len(),
        kind  = kind,
    )
}

fn build_predictions_html(predictions: &[PredictionResult], dataset: &Dataset) -> String {
    if predictions.is_empty() {
        return "<p class=\"hint\">No predictions yet. Train first, then run predictions.</p>"
            .to_owned();
    }

    let is_classification = dataset.kind == DatasetKind::Classification;
    let rows: String = predictions.iter().enumerate().map(|(i, p)| {
        let input_str: String = p.input.iter()
            .map(|v| format!("{:.3}", v))
            .collect::<Vec<_>>()
            .join(", ");
        let verdict = if is_classification {
            let hit = (p.predicted >= 0.5) == (p.actual >= 0.5);
            if hit { "<td class=\"ok\">✓</td>" } else { "<td class=\"miss\">✗</td>" }
        } else {
            "<td>—</td>"
        };
        format!(
            "<tr><td>{}</td><td>{}</td><td>{:.3}</td><td>{:.3}</td>{}</tr>",
            i + 1, html_escape(&input_str), p.actual, p.predicted, verdict
        )
    }).collect();

    format!(
        r#"<table class="preview-table">
  <thead><tr><th>#</th><th>Input</th><th>Actual</th><th>Predicted</th><th></th></tr></thead>
  <tbody>{rows}</tbody>
</table>"#,
        rows = rows
    )
}

// ---------------------------------------------------------------------------
// Shared helpers (also used by other handlers)
// ---------------------------------------------------------------------------

pub fn render_flash_html(flash: Option<&FlashMessage>) -> String {
    match flash {
        None    => String::new(),
        Some(f) => {
            let cls = match f.kind {
                FlashKind::Success => "flash-success",
                FlashKind::Error   => "flash-error",
            };
            format!(r#"<div class="flash {}">{}</div>"#, cls, html_escape(&f.text))
        }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}
