use rolling_sensor_average::{
    CycleComplete, EventSink, PipelineConfig, PipelineEvent, RandomSampleSource, ReportFormat,
    Reporter, RollingAverage, SamplePipeline, ScriptedSamples, TemperatureUnit, WindowError,
    MAX_WINDOW_SIZE,
};
use tokio::sync::mpsc;

fn cycles(events: &[PipelineEvent]) -> Vec<CycleComplete> {
    events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::CycleComplete(c) => Some(c.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_averager_concrete_scenarios() {
    let mut avg = RollingAverage::new();
    assert!(avg.record_sample(10).is_none());
    assert!(avg.record_sample(20).is_none());
    let cycle = avg.record_sample(30).unwrap();
    assert_eq!(cycle.samples, vec![10, 20, 30]);
    assert_eq!(cycle.average, 20.0);
    assert!(avg.record_sample(5).is_none());
    assert_eq!(avg.cursor(), 1);

    let mut avg = RollingAverage::new();
    avg.record_sample(10);
    avg.resize(2).unwrap();
    assert!(avg.record_sample(7).is_none());
    let cycle = avg.record_sample(9).unwrap();
    assert_eq!(cycle.samples, vec![7, 9]);
    assert_eq!(cycle.average, 8.0);
}

#[test]
fn test_averagers_are_independent() {
    let mut a = RollingAverage::new();
    let mut b = RollingAverage::with_window_size(1).unwrap();

    a.record_sample(100);
    assert!(b.record_sample(5).is_some());
    assert_eq!(a.cursor(), 1);
    assert_eq!(a.last_average(), 0.0);
    assert_eq!(b.last_average(), 5.0);
}

#[test]
fn test_resize_contract() {
    let mut avg = RollingAverage::new();
    tokio_test::assert_err!(avg.resize(0));
    let err = avg.resize(MAX_WINDOW_SIZE + 1).unwrap_err();
    assert_eq!(
        err,
        WindowError::OutOfRange {
            requested: MAX_WINDOW_SIZE + 1,
            capacity: MAX_WINDOW_SIZE,
        }
    );
    assert_eq!(avg.window_size(), 3);
    tokio_test::assert_ok!(avg.resize(MAX_WINDOW_SIZE));
}

#[test]
fn test_every_cycle_is_the_mean_of_its_samples() {
    let config = PipelineConfig {
        sample_count: 99,
        seed: Some(2024),
        ..PipelineConfig::default()
    };
    let source = RandomSampleSource::new(1500, 1600, config.seed);
    let mut pipeline = SamplePipeline::new(config, source).unwrap();
    let mut events = Vec::new();
    for _ in 0..99 {
        pipeline.step(&mut events);
    }

    // Replay: samples since the last cycle/resize must be exactly the ones averaged
    let mut pending: Vec<i32> = Vec::new();
    for event in &events {
        match event {
            PipelineEvent::Sample { value } => {
                assert!((1500..1600).contains(value));
                pending.push(*value);
            }
            PipelineEvent::CycleComplete(cycle) => {
                assert_eq!(cycle.samples, pending);
                let mean = pending.iter().map(|&v| v as f64).sum::<f64>() / pending.len() as f64;
                assert!((cycle.average as f64 - mean).abs() < 1e-3);
                pending.clear();
            }
            PipelineEvent::WindowResized { .. } => pending.clear(),
            PipelineEvent::ResizeRejected { .. } => panic!("default config never over-resizes"),
        }
    }
}

#[test]
fn test_oversized_resize_max_is_rejected_not_fatal() {
    let config = PipelineConfig {
        sample_count: 200,
        resize_every: 1,
        resize_max: 40,
        seed: Some(9),
        ..PipelineConfig::default()
    };
    let mut pipeline = SamplePipeline::new(config, ScriptedSamples::new(vec![1550])).unwrap();
    let mut events = Vec::new();
    for _ in 0..200 {
        pipeline.step(&mut events);
        assert!(pipeline.averager().window_size() <= MAX_WINDOW_SIZE);
    }

    let rejected = events
        .iter()
        .filter(|e| matches!(e, PipelineEvent::ResizeRejected { .. }))
        .count();
    assert!(rejected > 0);
    assert_eq!(pipeline.summary().rejected_resizes as usize, rejected);
    assert!(cycles(&events).iter().all(|c| c.average == 1550.0));
}

#[tokio::test]
async fn test_pipeline_to_reporter_end_to_end() {
    let config = PipelineConfig {
        seed: Some(1),
        ..PipelineConfig::default()
    };
    let (tx, rx) = mpsc::unbounded_channel();
    let reporter = Reporter::new(TemperatureUnit::Fahrenheit, ReportFormat::Json).spawn(rx);

    let source = RandomSampleSource::new(config.sample_min, config.sample_max, config.seed);
    let mut pipeline = SamplePipeline::new(config, source).unwrap();
    let mut sink = tx;
    let summary = pipeline.run(&mut sink).await;
    drop(sink);

    let totals = reporter.await.unwrap();
    assert_eq!(summary.samples, 99);
    assert_eq!(totals.samples, 99);
    assert_eq!(totals.cycles, summary.cycles);
    assert_eq!(totals.resizes, 9);
    assert_eq!(totals.rejected_resizes, 0);
}

#[test]
fn test_custom_sink() {
    struct CycleCounter(usize);

    impl EventSink for CycleCounter {
        fn publish(&mut self, event: PipelineEvent) {
            if let PipelineEvent::CycleComplete(_) = event {
                self.0 += 1;
            }
        }
    }

    let config = PipelineConfig {
        initial_window: 1,
        resize_every: 1000,
        ..PipelineConfig::default()
    };
    let mut pipeline = SamplePipeline::new(config, ScriptedSamples::new(vec![3, 4])).unwrap();
    let mut counter = CycleCounter(0);
    for _ in 0..12 {
        pipeline.step(&mut counter);
    }
    assert_eq!(counter.0, 12);
}
