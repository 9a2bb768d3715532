use std::sync::{Arc, Mutex, atomic::{AtomicBool, Ordering}, mpsc};
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::sim::tick_stats::TickStats;

/// Period of the simulated training tick.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Loss never reports below this floor.
pub const LOSS_FLOOR: f64 = 0.1;
/// Accuracy never reports above this ceiling.
pub const ACCURACY_CEILING: f64 = 0.98;

const NOISE_AMPLITUDE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// No run in flight. Series may retain values from a stopped run.
    Idle,
    /// A ticker thread is advancing the epoch counter.
    Running,
    /// The epoch counter reached the requested total.
    Completed,
}

/// Transient state of one simulated training run.
///
/// Nothing here is the result of optimization: the series are manufactured
/// from the progress fraction plus uniform noise, tick by tick.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub current_epoch: usize,
    pub total_epochs: usize,
    pub loss_series: Vec<f64>,
    pub accuracy_series: Vec<f64>,
    pub state: SimState,
}

impl TrainingRun {
    fn idle() -> TrainingRun {
        TrainingRun {
            current_epoch: 0,
            total_epochs: 0,
            loss_series: Vec::new(),
            accuracy_series: Vec::new(),
            state: SimState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    /// Fraction of the run completed, in [0, 1]. Zero before any start.
    pub fn progress(&self) -> f64 {
        if self.total_epochs == 0 {
            0.0
        } else {
            self.current_epoch as f64 / self.total_epochs as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

struct Ticker {
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

/// Drives a `TrainingRun` with a cancellable periodic tick.
///
/// Invariant: at most one live ticker per simulator. `start` cancels and
/// joins any previous ticker before spawning a new one, so two concurrent
/// tick sources (and the accelerated double-ticking they would cause) are
/// impossible.
pub struct ProgressSimulator {
    run: Arc<Mutex<TrainingRun>>,
    ticker: Option<Ticker>,
    tick_interval: Duration,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSimulator {
    pub fn new() -> ProgressSimulator {
        Self::with_tick_interval(DEFAULT_TICK_INTERVAL)
    }

    /// Simulator with a custom tick period. Tests use millisecond ticks so
    /// a full run finishes quickly.
    pub fn with_tick_interval(tick_interval: Duration) -> ProgressSimulator {
        ProgressSimulator {
            run: Arc::new(Mutex::new(TrainingRun::idle())),
            ticker: None,
            tick_interval,
        }
    }

    /// Starts a fresh run of `epochs` ticks.
    ///
    /// Any live ticker is cancelled and joined first; the run is reset to
    /// epoch 0 with empty series before the first tick fires. Returns the
    /// receiving end of the per-tick stats channel; dropping it does not
    /// stop the run.
    pub fn start(&mut self, epochs: usize) -> mpsc::Receiver<TickStats> {
        self.cancel_ticker();

        let (tx, rx) = mpsc::channel::<TickStats>();

        {
            let mut run = self.run.lock().unwrap();
            *run = TrainingRun::idle();
            run.total_epochs = epochs;
            // A zero-epoch run has nothing to tick through.
            run.state = if epochs == 0 { SimState::Completed } else { SimState::Running };
        }
        if epochs == 0 {
            return rx;
        }
        let stop = Arc::new(AtomicBool::new(false));
        let run = self.run.clone();
        let stop_clone = stop.clone();
        let interval = self.tick_interval;

        log::info!("training run started: {} epochs", epochs);

        let handle = thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if stop_clone.load(Ordering::Relaxed) {
                    break;
                }

                let (stats, completed) = {
                    let mut run = run.lock().unwrap();
                    // A stop may have landed between the flag check and the
                    // lock; never advance a run that is no longer Running.
                    if run.state != SimState::Running {
                        break;
                    }

                    run.current_epoch += 1;
                    let frac = run.progress();
                    let mut rng = rand::thread_rng();
                    let loss = (1.0 - frac + rng.gen_range(0.0..NOISE_AMPLITUDE))
                        .max(LOSS_FLOOR);
                    let accuracy = (frac + rng.gen_range(0.0..NOISE_AMPLITUDE))
                        .min(ACCURACY_CEILING);
                    run.loss_series.push(loss);
                    run.accuracy_series.push(accuracy);

                    let completed = run.current_epoch >= run.total_epochs;
                    if completed {
                        run.state = SimState::Completed;
                    }

                    let stats = TickStats {
                        epoch: run.current_epoch,
                        total_epochs: run.total_epochs,
                        loss,
                        accuracy,
                    };
                    (stats, completed)
                };

                // Observers are optional; a dropped receiver never ends the run.
                let _ = tx.send(stats);

                if completed {
                    break;
                }
            }
        });

        self.ticker = Some(Ticker { stop, handle });
        rx
    }

    /// Running → Idle. Cancels the ticker; the epoch counter and both series
    /// retain their last values.
    pub fn stop(&mut self) {
        self.cancel_ticker();
        let mut run = self.run.lock().unwrap();
        if run.state == SimState::Running {
            run.state = SimState::Idle;
            log::info!("training run stopped at epoch {}", run.current_epoch);
        }
    }

    /// Any state → Idle with epoch 0 and empty series. The control surface
    /// discards stored predictions in the same action.
    pub fn reset(&mut self) {
        self.cancel_ticker();
        let mut run = self.run.lock().unwrap();
        *run = TrainingRun::idle();
        log::info!("training run reset");
    }

    pub fn state(&self) -> SimState {
        self.run.lock().unwrap().state
    }

    pub fn current_epoch(&self) -> usize {
        self.run.lock().unwrap().current_epoch
    }

    /// Clone of the current run state for rendering and page builds.
    pub fn snapshot(&self) -> TrainingRun {
        self.run.lock().unwrap().clone()
    }

    /// Signals the ticker thread and waits for it to exit. After this
    /// returns no further tick can touch the run.
    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop.store(true, Ordering::Relaxed);
            let _ = ticker.handle.join();
        }
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_sim() -> ProgressSimulator {
        ProgressSimulator::with_tick_interval(Duration::from_millis(1))
    }

    #[test]
    fn run_produces_exactly_the_requested_ticks() {
        let mut sim = fast_sim();
        let rx = sim.start(10);

        let ticks: Vec<TickStats> = rx.iter().collect();
        assert_eq!(ticks.len(), 10);
        for (i, stats) in ticks.iter().enumerate() {
            assert_eq!(stats.epoch, i + 1);
            assert_eq!(stats.total_epochs, 10);
        }

        let run = sim.snapshot();
        assert_eq!(run.state, SimState::Completed);
        assert_eq!(run.current_epoch, 10);
        assert_eq!(run.loss_series.len(), 10);
        assert_eq!(run.accuracy_series.len(), 10);
    }

    #[test]
    fn series_values_respect_floor_ceiling_and_trend() {
        let mut sim = fast_sim();
        let rx = sim.start(20);
        let ticks: Vec<TickStats> = rx.iter().collect();

        for stats in &ticks {
            let frac = stats.epoch as f64 / stats.total_epochs as f64;
            assert!(stats.loss >= LOSS_FLOOR);
            assert!(stats.loss <= 1.0 - frac + NOISE_AMPLITUDE + 1e-9);
            assert!(stats.accuracy <= ACCURACY_CEILING);
            assert!(stats.accuracy + 1e-9 >= frac.min(ACCURACY_CEILING));
        }
    }

    #[test]
    fn stop_retains_the_accumulated_series() {
        let mut sim = fast_sim();
        let rx = sim.start(10_000);

        // Wait until a few ticks have landed, then stop.
        for _ in 0..3 {
            rx.recv().unwrap();
        }
        sim.stop();

        let run = sim.snapshot();
        assert_eq!(run.state, SimState::Idle);
        assert!(run.current_epoch >= 3);
        assert_eq!(run.loss_series.len(), run.current_epoch);
        assert_eq!(run.accuracy_series.len(), run.current_epoch);

        // The ticker is gone: the counter must not move any more.
        let epoch_after_stop = run.current_epoch;
        thread::sleep(Duration::from_millis(10));
        assert_eq!(sim.current_epoch(), epoch_after_stop);
    }

    #[test]
    fn restart_replaces_the_ticker_without_doubling() {
        let mut sim = fast_sim();
        let first_rx = sim.start(10_000);
        first_rx.recv().unwrap();

        // Starting again must cancel the first ticker; the old channel
        // disconnects and the new run counts from 1.
        let rx = sim.start(5);
        let ticks: Vec<TickStats> = rx.iter().collect();

        assert_eq!(ticks.len(), 5);
        let epochs: Vec<usize> = ticks.iter().map(|t| t.epoch).collect();
        assert_eq!(epochs, vec![1, 2, 3, 4, 5]);
        assert_eq!(sim.snapshot().state, SimState::Completed);

        // The first run's sender is dropped once its thread exits.
        assert!(first_rx.iter().all(|t| t.total_epochs == 10_000));
    }

    #[test]
    fn reset_clears_from_any_state() {
        let mut sim = fast_sim();

        // Running → reset.
        let rx = sim.start(10_000);
        rx.recv().unwrap();
        sim.reset();
        let run = sim.snapshot();
        assert_eq!(run.state, SimState::Idle);
        assert_eq!(run.current_epoch, 0);
        assert!(run.loss_series.is_empty());
        assert!(run.accuracy_series.is_empty());

        // Completed → reset.
        let rx = sim.start(10);
        let _ = rx.iter().count();
        assert_eq!(sim.state(), SimState::Completed);
        sim.reset();
        assert_eq!(sim.state(), SimState::Idle);
        assert_eq!(sim.current_epoch(), 0);

        // Idle → reset is harmless.
        sim.reset();
        assert_eq!(sim.state(), SimState::Idle);
    }

    #[test]
    fn zero_epoch_run_completes_without_ticking() {
        let mut sim = fast_sim();
        let rx = sim.start(0);
        assert_eq!(rx.iter().count(), 0);
        let run = sim.snapshot();
        assert_eq!(run.state, SimState::Completed);
        assert_eq!(run.current_epoch, 0);
        assert!(run.loss_series.is_empty());
    }

    #[test]
    fn completed_run_can_be_started_again() {
        let mut sim = fast_sim();
        let _ = sim.start(10).iter().count();
        assert_eq!(sim.state(), SimState::Completed);

        let rx = sim.start(12);
        let ticks: Vec<TickStats> = rx.iter().collect();
        assert_eq!(ticks.len(), 12);
        assert_eq!(sim.current_epoch(), 12);
    }
}
