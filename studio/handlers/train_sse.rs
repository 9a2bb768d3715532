use std::time::Duration;
use tiny_http::Request;

use netsketch::{SimState, TickStats};

use crate::state::SharedState;
use crate::util::sse;

/// `GET /train/events` — Server-Sent Events handler.
///
/// Consumes `request` (takes ownership so we can call `into_writer`) and
/// drives a long-lived loop that:
/// 1. Replays the ticks already recorded in the run so a late-joining
///    client starts with a full chart.
/// 2. Tries to receive a `TickStats` from the tick channel with a 500 ms
///    timeout; on success writes an `event: tick` frame.
/// 3. On timeout — writes a keep-alive `: ping` comment.
/// 4. On channel disconnect (run completed, stopped, or restarted) —
///    writes a `done` event with the final state, then closes.
///
/// Client reconnection is handled natively by `EventSource`.
pub fn handle(request: Request, state: SharedState) {
    // tiny_http's `into_writer()` gives us the raw TCP stream so we can
    // write the HTTP response and then stream SSE frames directly.
    let mut writer = request.into_writer();

    let header = "HTTP/1.1 200 OK\r\n\
                  Content-Type: text/event-stream\r\n\
                  Cache-Control: no-cache\r\n\
                  Connection: keep-alive\r\n\
                  X-Accel-Buffering: no\r\n\
                  \r\n";
    if sse::send(&mut writer, header).is_err() {
        return;
    }

    // Clone the receiver Arc and a replay snapshot out of the state so the
    // lock is never held across a stream write.
    let (rx_arc, replay) = {
        let st = state.lock().unwrap();
        (st.tick_rx.clone(), st.sim.snapshot())
    };

    for frame in replay_frames(&replay) {
        if sse::send(&mut writer, &frame).is_err() {
            return;
        }
    }

    let rx_arc = match rx_arc {
        Some(r) => r,
        None => {
            // No run to observe; close with a done event.
            let _ = sse::send(&mut writer, &done_frame(&state));
            return;
        }
    };

    loop {
        let result = {
            let rx = rx_arc.lock().unwrap();
            rx.recv_timeout(Duration::from_millis(500))
        };

        match result {
            Ok(stats) => {
                match serde_json::to_string(&stats) {
                    Ok(json) => {
                        let frame = sse::event_frame("tick", &json);
                        if sse::send(&mut writer, &frame).is_err() {
                            return;
                        }
                    }
                    Err(_) => continue,
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                if sse::send(&mut writer, sse::keepalive_frame()).is_err() {
                    return;
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                // The ticker dropped its sender — report the final state.
                let _ = sse::send(&mut writer, &done_frame(&state));
                return;
            }
        }
    }
}

/// Rebuilds tick frames from the recorded series for replay.
fn replay_frames(run: &netsketch::TrainingRun) -> Vec<String> {
    run.loss_series.iter()
        .zip(run.accuracy_series.iter())
        .enumerate()
        .filter_map(|(i, (&loss, &accuracy))| {
            let stats = TickStats {
                epoch: i + 1,
                total_epochs: run.total_epochs,
                loss,
                accuracy,
            };
            serde_json::to_string(&stats).ok()
        })
        .map(|json| sse::event_frame("tick", &json))
        .collect()
}

fn done_frame(state: &SharedState) -> String {
    let run = state.lock().unwrap().sim.snapshot();
    let state_name = match run.state {
        SimState::Idle      => "idle",
        SimState::Running   => "running",
        SimState::Completed => "completed",
    };
    let payload = format!(
        "{{\"state\":\"{}\",\"epoch\":{},\"total_epochs\":{}}}",
        state_name, run.current_epoch, run.total_epochs
    );
    sse::event_frame("done", &payload)
}
