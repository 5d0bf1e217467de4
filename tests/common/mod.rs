// Shared test helpers: collecting sink, scripted telemetry, manual clock

#![allow(dead_code)]

use hwtwin::alerts::Alert;
use hwtwin::error::TwinError;
use hwtwin::models::{DeviceSet, DiskCounters, Snapshot};
use hwtwin::sampler::Clock;
use hwtwin::sink::ReportSink;
use hwtwin::telemetry::TelemetryProvider;
use std::cell::RefCell;
use std::time::Duration;

/// Reference device set: 8 cores at 2.6/4.5 GHz, 32 GB, 1000 GB, 100 MB/s.
pub fn reference_devices() -> DeviceSet {
    hwtwin::config::HardwareConfig::default().device_set()
}

#[derive(Default)]
pub struct CollectorSink {
    pub snapshots: Vec<Snapshot>,
    pub alert_batches: Vec<Vec<Alert>>,
    pub completed: usize,
}

impl ReportSink for CollectorSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn on_alerts(&mut self, alerts: &[Alert]) {
        self.alert_batches.push(alerts.to_vec());
    }

    fn on_complete(&mut self) {
        self.completed += 1;
    }
}

/// Clock whose sleeps advance simulated time instantly.
#[derive(Default)]
pub struct ManualClock {
    now: RefCell<Duration>,
}

impl ManualClock {
    pub fn advance(&self, duration: Duration) {
        *self.now.borrow_mut() += duration;
    }
}

impl Clock for ManualClock {
    fn monotonic(&self) -> Duration {
        *self.now.borrow()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Telemetry provider returning canned readings, optionally failing.
pub struct ScriptedTelemetry {
    pub cpu_percent: f64,
    pub used_memory_bytes: u64,
    pub disk: DiskCounters,
    pub bytes_sent: u64,
    pub fail: bool,
}

impl Default for ScriptedTelemetry {
    fn default() -> Self {
        Self {
            cpu_percent: 25.0,
            used_memory_bytes: 4 * 1024 * 1024 * 1024,
            disk: DiskCounters {
                read_ops: 1200,
                write_ops: 800,
            },
            bytes_sent: 10 * 1024 * 1024,
            fail: false,
        }
    }
}

impl TelemetryProvider for ScriptedTelemetry {
    fn cpu_percent(&mut self) -> Result<f64, TwinError> {
        if self.fail {
            return Err(TwinError::TelemetryUnavailable("scripted failure".into()));
        }
        Ok(self.cpu_percent)
    }

    fn used_memory_bytes(&mut self) -> Result<u64, TwinError> {
        if self.fail {
            return Err(TwinError::TelemetryUnavailable("scripted failure".into()));
        }
        Ok(self.used_memory_bytes)
    }

    fn disk_counters(&mut self) -> Result<DiskCounters, TwinError> {
        if self.fail {
            return Err(TwinError::TelemetryUnavailable("scripted failure".into()));
        }
        Ok(self.disk)
    }

    fn network_bytes_sent(&mut self) -> Result<u64, TwinError> {
        if self.fail {
            return Err(TwinError::TelemetryUnavailable("scripted failure".into()));
        }
        Ok(self.bytes_sent)
    }
}
