use crate::reporter::ReportFormat;
use crate::rolling_average::{RollingAverage, DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE};
use crate::temperature::TemperatureUnit;
use anyhow::{bail, Context};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings for the sampling driver and the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub sample_count: u64,
    pub resize_every: u64,
    pub resize_max: usize,
    pub initial_window: usize,
    pub sample_min: i32,
    pub sample_max: i32,
    pub sample_interval: Option<Duration>,
    pub seed: Option<u64>,
    pub temperature_unit: TemperatureUnit,
    pub report_format: ReportFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_count: 99,
            resize_every: 10,
            resize_max: MAX_WINDOW_SIZE,
            initial_window: DEFAULT_WINDOW_SIZE,
            sample_min: 1500,
            sample_max: 1600,
            sample_interval: None,
            seed: None,
            temperature_unit: TemperatureUnit::Celsius,
            report_format: ReportFormat::Text,
        }
    }
}

impl PipelineConfig {
    /// Reads the configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let interval_ms: u64 = parse_var(&lookup, "SAMPLE_INTERVAL_MS")?.unwrap_or(0);

        let config = Self {
            sample_count: parse_var(&lookup, "SAMPLE_COUNT")?.unwrap_or(defaults.sample_count),
            resize_every: parse_var(&lookup, "RESIZE_EVERY")?.unwrap_or(defaults.resize_every),
            resize_max: parse_var(&lookup, "RESIZE_MAX")?.unwrap_or(defaults.resize_max),
            initial_window: parse_var(&lookup, "INITIAL_WINDOW")?
                .unwrap_or(defaults.initial_window),
            sample_min: parse_var(&lookup, "SAMPLE_MIN")?.unwrap_or(defaults.sample_min),
            sample_max: parse_var(&lookup, "SAMPLE_MAX")?.unwrap_or(defaults.sample_max),
            sample_interval: (interval_ms > 0).then(|| Duration::from_millis(interval_ms)),
            seed: parse_var(&lookup, "SAMPLE_SEED")?,
            temperature_unit: parse_var(&lookup, "TEMP_UNITS")?
                .unwrap_or(defaults.temperature_unit),
            report_format: parse_var(&lookup, "REPORT_FORMAT")?.unwrap_or(defaults.report_format),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.resize_every == 0 {
            bail!("RESIZE_EVERY must be at least 1");
        }
        if self.resize_max == 0 {
            bail!("RESIZE_MAX must be at least 1");
        }
        if self.sample_min >= self.sample_max {
            bail!(
                "SAMPLE_MIN ({}) must be below SAMPLE_MAX ({})",
                self.sample_min,
                self.sample_max
            );
        }
        RollingAverage::with_window_size(self.initial_window).context("Invalid INITIAL_WINDOW")?;
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(e) => bail!("Invalid value `{raw}` for {name}: {e}"),
        },
    }
}
