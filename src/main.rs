use anyhow::Context;
use rolling_sensor_average::{PipelineConfig, RandomSampleSource, Reporter, SamplePipeline};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PipelineConfig::from_env().context("Failed to load configuration")?;
    info!(
        "Starting rolling average simulation: {} samples, resize every {}",
        config.sample_count, config.resize_every
    );

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let reporter = Reporter::new(config.temperature_unit, config.report_format).spawn(event_rx);

    let source = RandomSampleSource::new(config.sample_min, config.sample_max, config.seed);
    let mut pipeline = SamplePipeline::new(config, source)?;

    let mut sink = event_tx;
    let summary = pipeline.run(&mut sink).await;
    // Closing the channel lets the reporter drain and exit
    drop(sink);
    let totals = reporter.await.context("Reporter task failed")?;

    info!(
        "Done: {} samples, {} cycles, {} resizes ({} rejected), last average {}",
        summary.samples,
        summary.cycles,
        summary.resizes,
        summary.rejected_resizes,
        summary.last_average
    );
    if totals.cycles != summary.cycles {
        tracing::warn!(
            "Reporter saw {} cycles but pipeline produced {}",
            totals.cycles,
            summary.cycles
        );
    }

    Ok(())
}
