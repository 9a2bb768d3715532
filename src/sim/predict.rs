use rand::Rng;

use crate::dataset::generator::Dataset;

/// Half-width of the uniform jitter applied to each true output value.
pub const JITTER: f64 = 0.15;

/// Simulated prediction for one sample. `predicted` is the true value plus
/// bounded random jitter, clamped to [0, 1]; no model is consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub input: Vec<f64>,
    pub actual: f64,
    pub predicted: f64,
}

/// Predictions were requested before any training tick had occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictError;

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "predictions require at least one completed training tick")
    }
}

impl std::error::Error for PredictError {}

/// Produces one `PredictionResult` per sample, in original sample order.
///
/// Rejected while `current_epoch` is 0: the studio keeps the affordance
/// disabled until the first tick, and this guard backs that up at the seam.
pub fn predict(
    dataset: &Dataset,
    current_epoch: usize,
) -> Result<Vec<PredictionResult>, PredictError> {
    if current_epoch == 0 {
        return Err(PredictError);
    }

    let mut rng = rand::thread_rng();
    let results = dataset.samples.iter()
        .map(|sample| {
            let actual = sample.output.first().copied().unwrap_or(0.0);
            let predicted = (actual + rng.gen_range(-JITTER..JITTER)).clamp(0.0, 1.0);
            PredictionResult { input: sample.input.clone(), actual, predicted }
        })
        .collect();
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generator::generate;

    #[test]
    fn rejected_before_the_first_tick() {
        let ds = generate("xor");
        assert_eq!(predict(&ds, 0), Err(PredictError));
    }

    #[test]
    fn one_result_per_sample_in_order() {
        let ds = generate("xor");
        let results = predict(&ds, 1).unwrap();

        assert_eq!(results.len(), ds.samples.len());
        for (result, sample) in results.iter().zip(ds.samples.iter()) {
            assert_eq!(result.input, sample.input);
            assert_eq!(result.actual, sample.output[0]);
        }
    }

    #[test]
    fn predictions_stay_near_labels_and_inside_the_unit_interval() {
        let ds = generate("xor");
        for _ in 0..50 {
            for result in predict(&ds, 5).unwrap() {
                assert!((0.0..=1.0).contains(&result.predicted));
                // Labels are in [0, 1], so clamping can only shrink the jitter.
                assert!((result.predicted - result.actual).abs() <= JITTER);
            }
        }
    }

    #[test]
    fn regression_outputs_clamp_into_the_unit_interval() {
        let ds = generate("sine");
        for result in predict(&ds, 1).unwrap() {
            assert!((0.0..=1.0).contains(&result.predicted));
        }
    }
}
