use crate::events::PipelineEvent;
use crate::rolling_average::CycleComplete;
use crate::temperature::{adc_to_temperature, TemperatureUnit};
use std::str::FromStr;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => anyhow::bail!("unknown report format `{other}`"),
        }
    }
}

/// Tally of what the reporter has seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportTotals {
    pub samples: u64,
    pub cycles: u64,
    pub resizes: u64,
    pub rejected_resizes: u64,
}

/// Logs pipeline events as they arrive on a channel.
pub struct Reporter {
    unit: TemperatureUnit,
    format: ReportFormat,
    totals: ReportTotals,
}

impl Reporter {
    pub fn new(unit: TemperatureUnit, format: ReportFormat) -> Self {
        Self {
            unit,
            format,
            totals: ReportTotals::default(),
        }
    }

    /// Spawns the reporter task. It exits once every sender has been dropped
    /// and hands back what it saw.
    pub fn spawn(self, mut events: UnboundedReceiver<PipelineEvent>) -> JoinHandle<ReportTotals> {
        tokio::spawn(async move {
            let mut reporter = self;
            debug!("Reporter started");

            while let Some(event) = events.recv().await {
                reporter.handle(&event);
            }

            debug!("Reporter exiting");
            reporter.totals
        })
    }

    /// Logs a single event and updates the totals
    pub fn handle(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Sample { value } => {
                self.totals.samples += 1;
                debug!("rand: {value}");
            }
            PipelineEvent::CycleComplete(cycle) => {
                self.totals.cycles += 1;
                info!("{}", describe_cycle(cycle, self.unit));
                if self.format == ReportFormat::Json {
                    match serde_json::to_string(event) {
                        Ok(line) => info!(target: "rolling_sensor_average::json", "{line}"),
                        Err(e) => warn!("Failed to encode cycle as JSON: {e}"),
                    }
                }
            }
            PipelineEvent::WindowResized { from, to } => {
                self.totals.resizes += 1;
                info!("Window size changed from {from} to {to}");
            }
            PipelineEvent::ResizeRejected { requested, reason } => {
                self.totals.rejected_resizes += 1;
                warn!("Resize to {requested} rejected: {reason}");
            }
        }
    }

    pub fn totals(&self) -> ReportTotals {
        self.totals
    }
}

/// Human readable one-liner for a completed cycle
pub fn describe_cycle(cycle: &CycleComplete, unit: TemperatureUnit) -> String {
    let samples = cycle
        .samples
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let temperature = adc_to_temperature(cycle.average, unit);
    format!(
        "samples: {samples} | average (n = {}): {} ({temperature:.1}{})",
        cycle.window_size,
        cycle.average,
        unit.symbol()
    )
}
