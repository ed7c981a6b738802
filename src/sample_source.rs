use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that can hand the pipeline its next raw reading.
pub trait SampleSource {
    fn next_sample(&mut self) -> i32;
}

/// Simulated sensor producing uniform readings in `[min, max)`.
pub struct RandomSampleSource {
    min: i32,
    max: i32,
    rng: StdRng,
}

impl RandomSampleSource {
    /// Panics if `min >= max`; `PipelineConfig` validates this before we get here.
    pub fn new(min: i32, max: i32, seed: Option<u64>) -> Self {
        assert!(min < max, "empty sample range {min}..{max}");
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { min, max, rng }
    }
}

impl SampleSource for RandomSampleSource {
    fn next_sample(&mut self) -> i32 {
        self.rng.gen_range(self.min..self.max)
    }
}

/// Replays a fixed list of readings, wrapping around at the end.
pub struct ScriptedSamples {
    values: Vec<i32>,
    position: usize,
}

impl ScriptedSamples {
    pub fn new(values: Vec<i32>) -> Self {
        assert!(!values.is_empty(), "scripted source needs at least one value");
        Self {
            values,
            position: 0,
        }
    }
}

impl SampleSource for ScriptedSamples {
    fn next_sample(&mut self) -> i32 {
        let value = self.values[self.position];
        self.position = (self.position + 1) % self.values.len();
        value
    }
}
