use crate::config::PipelineConfig;
use crate::events::{EventSink, PipelineEvent};
use crate::rolling_average::RollingAverage;
use crate::sample_source::SampleSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// Counters describing a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub samples: u64,
    pub cycles: u64,
    pub resizes: u64,
    pub rejected_resizes: u64,
    pub last_average: f32,
}

/// Drives the averager: pulls readings from a source, feeds them in, and
/// resizes the window every `resize_every` samples.
pub struct SamplePipeline<S: SampleSource> {
    averager: RollingAverage,
    source: S,
    config: PipelineConfig,
    resize_rng: StdRng,
    summary: RunSummary,
}

impl<S: SampleSource> SamplePipeline<S> {
    pub fn new(config: PipelineConfig, source: S) -> anyhow::Result<Self> {
        config.validate()?;
        let averager = RollingAverage::with_window_size(config.initial_window)?;
        // Offset the seed so window sizes don't mirror the sample sequence
        let resize_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            averager,
            source,
            config,
            resize_rng,
            summary: RunSummary::default(),
        })
    }

    pub fn averager(&self) -> &RollingAverage {
        &self.averager
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Takes one reading and handles a scheduled resize if this sample is due one.
    pub fn step<E: EventSink>(&mut self, sink: &mut E) {
        let value = self.source.next_sample();
        self.summary.samples += 1;
        sink.publish(PipelineEvent::Sample { value });

        if let Some(cycle) = self.averager.record_sample(value) {
            self.summary.cycles += 1;
            self.summary.last_average = cycle.average;
            sink.publish(PipelineEvent::CycleComplete(cycle));
        }

        if self.summary.samples % self.config.resize_every == 0 {
            let requested = self.resize_rng.gen_range(1..=self.config.resize_max);
            self.resize(requested, sink);
        }
    }

    /// Resizes the window, reporting either the change or the rejection.
    pub fn resize<E: EventSink>(&mut self, requested: usize, sink: &mut E) {
        let from = self.averager.window_size();
        match self.averager.resize(requested) {
            Ok(()) => {
                self.summary.resizes += 1;
                sink.publish(PipelineEvent::WindowResized {
                    from,
                    to: requested,
                });
            }
            Err(e) => {
                self.summary.rejected_resizes += 1;
                sink.publish(PipelineEvent::ResizeRejected {
                    requested,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Runs the configured number of samples, pacing them when a sample
    /// interval is set.
    pub async fn run<E: EventSink>(&mut self, sink: &mut E) -> RunSummary {
        debug!("Running {} samples", self.config.sample_count);

        let mut ticker = self.config.sample_interval.map(|period| {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        for _ in 0..self.config.sample_count {
            if let Some(ticker) = ticker.as_mut() {
                ticker.tick().await; // Wait for next sample time
            }
            self.step(sink);
        }

        self.summary.clone()
    }
}
