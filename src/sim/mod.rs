pub mod config;
pub mod tick_stats;
pub mod progress;
pub mod predict;

pub use config::TrainingConfig;
pub use predict::{predict, PredictError, PredictionResult};
pub use progress::{ProgressSimulator, SimState, TrainingRun};
pub use tick_stats::TickStats;
