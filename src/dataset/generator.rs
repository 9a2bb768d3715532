use std::f64::consts::PI;

use rand::Rng;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Identifies one of the built-in synthetic datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetId {
    Xor,
    Circle,
    Sine,
}

impl DatasetId {
    /// Parses a dataset identifier string. Unknown identifiers fall back to
    /// `Xor`, matching the generator's fallback contract.
    pub fn parse(s: &str) -> DatasetId {
        match s {
            "circle" => DatasetId::Circle,
            "sine"   => DatasetId::Sine,
            _        => DatasetId::Xor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetId::Xor    => "xor",
            DatasetId::Circle => "circle",
            DatasetId::Sine   => "sine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Classification,
    Regression,
}

/// One labeled input/output pair.
#[derive(Debug, Clone)]
pub struct Sample {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
}

/// A fully materialized synthetic dataset. Regenerated wholesale whenever
/// the dataset selector changes; there is no incremental update path.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: DatasetId,
    pub kind: DatasetKind,
    pub samples: Vec<Sample>,
}

impl Dataset {
    /// Width of the input vectors (0 for an empty dataset).
    pub fn input_width(&self) -> usize {
        self.samples.first().map(|s| s.input.len()).unwrap_or(0)
    }

    /// Width of the output vectors (0 for an empty dataset).
    pub fn output_width(&self) -> usize {
        self.samples.first().map(|s| s.output.len()).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Builds the dataset named by `id`.
///
/// - `"xor"`    — the 4 boolean pairs with XOR truth values (classification)
/// - `"circle"` — 100 uniformly random points inside the unit disk, labeled
///                1 when the radius is under 0.5 (classification)
/// - `"sine"`   — 100 evenly spaced x values over [0, 2π) with sin(x)
///                outputs (regression)
///
/// Anything else falls back to `"xor"`. Shape is deterministic; the circle
/// samples are drawn fresh on every call (no seed control).
pub fn generate(id: &str) -> Dataset {
    match DatasetId::parse(id) {
        DatasetId::Xor    => generate_xor(),
        DatasetId::Circle => generate_circle(),
        DatasetId::Sine   => generate_sine(),
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn generate_xor() -> Dataset {
    let truth_table: [([f64; 2], f64); 4] = [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ];

    let samples = truth_table.iter()
        .map(|(input, output)| Sample {
            input: input.to_vec(),
            output: vec![*output],
        })
        .collect();

    Dataset { id: DatasetId::Xor, kind: DatasetKind::Classification, samples }
}

fn generate_circle() -> Dataset {
    let mut rng = rand::thread_rng();
    let mut samples = Vec::with_capacity(100);

    for _ in 0..100 {
        let angle: f64 = rng.gen_range(0.0..2.0 * PI);
        let radius: f64 = rng.gen_range(0.0..1.0);
        let x = radius * angle.cos();
        let y = radius * angle.sin();
        let label = if radius < 0.5 { 1.0 } else { 0.0 };
        samples.push(Sample { input: vec![x, y], output: vec![label] });
    }

    Dataset { id: DatasetId::Circle, kind: DatasetKind::Classification, samples }
}

fn generate_sine() -> Dataset {
    let samples = (0..100)
        .map(|i| {
            let x = i as f64 / 100.0 * 2.0 * PI;
            Sample { input: vec![x], output: vec![x.sin()] }
        })
        .collect();

    Dataset { id: DatasetId::Sine, kind: DatasetKind::Regression, samples }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
