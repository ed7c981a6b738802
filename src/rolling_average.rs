use crate::error::WindowError;
use serde_derive::Serialize;

/// Physical capacity of the sample buffer, and so the largest usable window.
pub const MAX_WINDOW_SIZE: usize = 9;
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Emitted every time the window fills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleComplete {
    pub window_size: usize,
    pub samples: Vec<i32>,
    pub average: f32,
}

/// A block averager over integer readings.
///
/// Samples are written into a fixed buffer until `window_size` of them have
/// arrived, at which point the mean of that cycle is computed and the cursor
/// starts over. Unlike a sliding average nothing is carried between cycles.
#[derive(Debug, Clone)]
pub struct RollingAverage {
    buffer: [i32; MAX_WINDOW_SIZE],
    window_size: usize,
    cursor: usize,
    total: i64,
    last_average: f32,
}

impl RollingAverage {
    /// Creates an averager with the default window of 3 and an empty buffer
    pub fn new() -> Self {
        Self {
            buffer: [0; MAX_WINDOW_SIZE],
            window_size: DEFAULT_WINDOW_SIZE,
            cursor: 0,
            total: 0,
            last_average: 0.0,
        }
    }

    /// Creates an averager starting at `window_size` instead of the default.
    pub fn with_window_size(window_size: usize) -> Result<Self, WindowError> {
        let mut avg = Self::new();
        avg.resize(window_size)?;
        Ok(avg)
    }

    /// Records one reading.
    /// Returns the completed cycle when this reading fills the window.
    pub fn record_sample(&mut self, value: i32) -> Option<CycleComplete> {
        self.buffer[self.cursor] = value;
        self.cursor += 1;

        if self.cursor < self.window_size {
            return None;
        }

        self.cursor = 0;
        let samples = &self.buffer[..self.window_size];
        self.total = samples.iter().map(|&s| i64::from(s)).sum();
        self.last_average = (self.total as f64 / self.window_size as f64) as f32;

        Some(CycleComplete {
            window_size: self.window_size,
            samples: samples.to_vec(),
            average: self.last_average,
        })
    }

    /// Changes the window size, dropping whatever the current cycle had collected.
    /// Sizes outside `1..=MAX_WINDOW_SIZE` are rejected and leave the state untouched.
    pub fn resize(&mut self, new_size: usize) -> Result<(), WindowError> {
        if !(1..=MAX_WINDOW_SIZE).contains(&new_size) {
            return Err(WindowError::OutOfRange {
                requested: new_size,
                capacity: MAX_WINDOW_SIZE,
            });
        }
        self.window_size = new_size;
        self.cursor = 0;
        Ok(())
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of samples written in the current cycle
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Sum of the last completed cycle
    pub fn running_total(&self) -> i64 {
        self.total
    }

    /// Mean of the last completed cycle, 0.0 until one completes
    pub fn last_average(&self) -> f32 {
        self.last_average
    }

    pub fn capacity(&self) -> usize {
        MAX_WINDOW_SIZE
    }
}

impl Default for RollingAverage {
    fn default() -> Self {
        Self::new()
    }
}
