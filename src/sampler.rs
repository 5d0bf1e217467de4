// Timed sampling loop over an injectable clock

use crate::error::TwinError;
use crate::models::DeviceSet;
use crate::sink::ReportSink;
use crate::source::MetricSource;
use std::time::{Duration, Instant};

/// Monotonic time plus blocking sleep, injectable so tests can simulate
/// elapsed duration without waiting.
pub trait Clock {
    /// Monotonic reading, measured from an arbitrary fixed origin.
    fn monotonic(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

/// Real wall clock; readings are measured from construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

fn ensure_positive_seconds(name: &str, value: f64) -> Result<(), TwinError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TwinError::InvalidInput(format!(
            "{name} must be a positive number of seconds, got {value}"
        )));
    }
    Ok(())
}

/// Drives `source` at `interval_secs` until `duration_secs` of wall-clock
/// time has elapsed, forwarding each snapshot to `sink` and a completion
/// signal at the end.
///
/// Each snapshot is tagged with the elapsed time measured at the start of
/// its tick, not corrected mid-tick. Termination is by wall clock, not
/// tick count: a slow tick (e.g. the live source's sampling window)
/// shortens the remaining tick count but the loop still exits at or
/// shortly after `duration_secs`.
pub fn run<S, K, C>(
    devices: &mut DeviceSet,
    source: &mut S,
    sink: &mut K,
    clock: &C,
    duration_secs: f64,
    interval_secs: f64,
) -> Result<(), TwinError>
where
    S: MetricSource + ?Sized,
    K: ReportSink + ?Sized,
    C: Clock + ?Sized,
{
    ensure_positive_seconds("duration", duration_secs)?;
    ensure_positive_seconds("interval", interval_secs)?;

    let start = clock.monotonic();
    let mut elapsed_secs = 0.0;
    let mut ticks: u64 = 0;

    while elapsed_secs < duration_secs {
        let snapshot = source.sample(devices, elapsed_secs)?;
        sink.on_snapshot(&snapshot);
        ticks += 1;
        tracing::debug!(operation = "sample", elapsed_secs, ticks, "tick");

        clock.sleep(Duration::from_secs_f64(interval_secs));
        elapsed_secs = clock.monotonic().saturating_sub(start).as_secs_f64();
    }

    tracing::debug!(ticks, elapsed_secs, "sampling loop finished");
    sink.on_complete();
    Ok(())
}
