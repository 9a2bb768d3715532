pub mod dataset;
pub mod topology;
pub mod sim;
pub mod render;

// Convenience re-exports
pub use dataset::generator::{generate, Dataset, DatasetId, DatasetKind, Sample};
pub use topology::layer::{Activation, Layer, LayerKind};
pub use topology::topology::{LayerUpdate, NetworkTopology};
pub use sim::config::TrainingConfig;
pub use sim::predict::{predict, PredictError, PredictionResult};
pub use sim::progress::{ProgressSimulator, SimState, TrainingRun};
pub use sim::tick_stats::TickStats;
