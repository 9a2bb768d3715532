pub mod generator;

pub use generator::{generate, Dataset, DatasetId, DatasetKind, Sample};
