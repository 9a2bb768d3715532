use std::sync::{Arc, Mutex, mpsc};

use netsketch::{
    generate, Dataset, NetworkTopology, PredictionResult, ProgressSimulator, TickStats,
    TrainingConfig,
};

// ---------------------------------------------------------------------------
// Flash messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum FlashKind { Success, Error }

#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Success, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Error, text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    /// The network under construction.
    pub topology: NetworkTopology,
    /// Clamped hyperparameters plus the active dataset id.
    pub config: TrainingConfig,
    /// The active dataset; regenerated wholesale on selector change.
    pub dataset: Dataset,
    /// The simulated training run and its ticker.
    pub sim: ProgressSimulator,
    /// Receiving end of the live tick channel while a run is observable.
    pub tick_rx: Option<Arc<Mutex<mpsc::Receiver<TickStats>>>>,
    /// Latest simulated predictions; replaced wholesale on each run.
    pub predictions: Vec<PredictionResult>,
    /// One-shot flash message for the next page render.
    pub flash: Option<FlashMessage>,
}

impl StudioState {
    pub fn new() -> Self {
        let config = TrainingConfig::default();
        let dataset = generate(&config.dataset_id);
        StudioState {
            topology: NetworkTopology::default(),
            config,
            dataset,
            sim: ProgressSimulator::new(),
            tick_rx: None,
            predictions: Vec::new(),
            flash: None,
        }
    }

    /// Switches the active dataset, discarding the old one and any
    /// predictions derived from it. The config records the *resolved* id so
    /// an unknown name shows up as the xor fallback it produced.
    pub fn select_dataset(&mut self, id: &str) {
        self.dataset = generate(id);
        self.config.dataset_id = self.dataset.id.as_str().to_owned();
        self.predictions.clear();
    }

    /// Clears the run back to its initial snapshot. Stored predictions are
    /// part of the same action; a reset leaves nothing to inspect.
    pub fn reset_run(&mut self) {
        self.sim.reset();
        self.tick_rx = None;
        self.predictions.clear();
    }

    /// Takes and returns the current flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<FlashMessage> {
        self.flash.take()
    }
}

/// Shared state type — an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
