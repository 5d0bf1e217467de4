// Sampling loop tests: tick/elapsed semantics under a manual clock

mod common;

use common::{CollectorSink, ManualClock, reference_devices};
use hwtwin::error::TwinError;
use hwtwin::models::{DeviceSet, Snapshot};
use hwtwin::sampler::{self, Clock, SystemClock};
use hwtwin::source::{MetricSource, SyntheticSource};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Source whose sampling itself consumes simulated time, like the live
/// source's blocking CPU window.
struct SlowSource<'a, S> {
    inner: S,
    clock: &'a ManualClock,
    cost: Duration,
}

impl<S: MetricSource> MetricSource for SlowSource<'_, S> {
    fn sample(
        &mut self,
        devices: &mut DeviceSet,
        elapsed_secs: f64,
    ) -> Result<Snapshot, TwinError> {
        self.clock.advance(self.cost);
        self.inner.sample(devices, elapsed_secs)
    }
}

#[test]
fn test_loop_ticks_until_duration_and_signals_completion() {
    let mut devices = reference_devices();
    let mut source = SyntheticSource::new(StdRng::seed_from_u64(0));
    let mut sink = CollectorSink::default();
    let clock = ManualClock::default();

    sampler::run(&mut devices, &mut source, &mut sink, &clock, 10.0, 1.0).unwrap();

    assert_eq!(sink.snapshots.len(), 10);
    assert_eq!(sink.completed, 1);
    assert_eq!(clock.monotonic(), Duration::from_secs(10));
}

#[test]
fn test_snapshots_are_tagged_with_elapsed_at_tick_start() {
    let mut devices = reference_devices();
    let mut source = SyntheticSource::new(StdRng::seed_from_u64(0));
    let mut sink = CollectorSink::default();
    let clock = ManualClock::default();

    sampler::run(&mut devices, &mut source, &mut sink, &clock, 5.0, 1.0).unwrap();

    let tags: Vec<f64> = sink.snapshots.iter().map(|s| s.elapsed_secs).collect();
    assert_eq!(tags, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_slow_ticks_shorten_the_tick_count_not_the_duration() {
    let mut devices = reference_devices();
    let clock = ManualClock::default();
    let mut source = SlowSource {
        inner: SyntheticSource::new(StdRng::seed_from_u64(0)),
        clock: &clock,
        cost: Duration::from_secs(3),
    };
    let mut sink = CollectorSink::default();

    sampler::run(&mut devices, &mut source, &mut sink, &clock, 10.0, 1.0).unwrap();

    // Each tick costs 3s of sampling plus the 1s interval.
    assert_eq!(sink.snapshots.len(), 3);
    assert_eq!(sink.completed, 1);
    let tags: Vec<f64> = sink.snapshots.iter().map(|s| s.elapsed_secs).collect();
    assert_eq!(tags, vec![0.0, 4.0, 8.0]);
}

#[test]
fn test_rejects_invalid_magnitudes_before_any_tick() {
    let mut devices = reference_devices();
    let clock = ManualClock::default();

    for (duration, interval) in [
        (0.0, 1.0),
        (-5.0, 1.0),
        (10.0, 0.0),
        (10.0, -1.0),
        (f64::NAN, 1.0),
        (10.0, f64::INFINITY),
    ] {
        let mut source = SyntheticSource::new(StdRng::seed_from_u64(0));
        let mut sink = CollectorSink::default();
        let err = sampler::run(
            &mut devices,
            &mut source,
            &mut sink,
            &clock,
            duration,
            interval,
        )
        .unwrap_err();
        assert!(matches!(err, TwinError::InvalidInput(_)));
        assert!(sink.snapshots.is_empty());
        assert_eq!(sink.completed, 0);
    }
    // Nothing slept either.
    assert_eq!(clock.monotonic(), Duration::ZERO);
}

#[test]
fn test_source_failure_aborts_the_run_without_completion() {
    struct FailingSource;
    impl MetricSource for FailingSource {
        fn sample(&mut self, _: &mut DeviceSet, _: f64) -> Result<Snapshot, TwinError> {
            Err(TwinError::TelemetryUnavailable("down".into()))
        }
    }

    let mut devices = reference_devices();
    let mut sink = CollectorSink::default();
    let clock = ManualClock::default();
    let err = sampler::run(&mut devices, &mut FailingSource, &mut sink, &clock, 5.0, 1.0)
        .unwrap_err();
    assert!(matches!(err, TwinError::TelemetryUnavailable(_)));
    assert_eq!(sink.completed, 0);
}

#[test]
fn test_real_clock_run_terminates_within_bounds() {
    let mut devices = reference_devices();
    let mut source = SyntheticSource::new(StdRng::seed_from_u64(0));
    let mut sink = CollectorSink::default();
    let clock = SystemClock::new();

    let started = std::time::Instant::now();
    sampler::run(&mut devices, &mut source, &mut sink, &clock, 0.1, 0.02).unwrap();
    let runtime = started.elapsed();

    assert!(!sink.snapshots.is_empty());
    assert_eq!(sink.completed, 1);
    // At least duration - interval of wall time, and nowhere near forever.
    assert!(runtime >= Duration::from_millis(80));
    assert!(runtime < Duration::from_secs(5));
}
