//! Rolling Sensor Average Library
//!
//! Simulates a sensor sampling pipeline: raw integer readings are buffered into a
//! resizable window, averaged every time the window fills, and reported through an
//! event channel so the core stays free of any console output.

pub mod config;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod reporter;
pub mod rolling_average;
pub mod sample_source;
pub mod temperature;

// Re-export commonly used types for easier access
pub use config::PipelineConfig;
pub use error::WindowError;
pub use events::{EventSink, PipelineEvent};
pub use pipeline::{RunSummary, SamplePipeline};
pub use reporter::{ReportFormat, Reporter};
pub use rolling_average::{CycleComplete, RollingAverage, MAX_WINDOW_SIZE};
pub use sample_source::{RandomSampleSource, SampleSource, ScriptedSamples};
pub use temperature::TemperatureUnit;
