use serde::{Serialize, Deserialize};

/// Per-tick statistics emitted by the progress simulator.
///
/// One `TickStats` value is sent over the progress channel for every tick
/// that appends to the series. Receivers (the studio SSE handler) use it to
/// drive the live chart and the epoch counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Synthetic loss value appended on this tick.
    pub loss: f64,
    /// Synthetic accuracy value appended on this tick.
    pub accuracy: f64,
}
