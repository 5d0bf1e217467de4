// Metric sources: pluggable snapshot producers over the device set

use crate::error::TwinError;
use crate::models::{DeviceSet, DiskCounters, Snapshot};
use rand::Rng;

/// Produces one snapshot per invocation, applying the sampled loads to the
/// device models. The sampling loop is agnostic to which variant is active.
pub trait MetricSource {
    fn sample(
        &mut self,
        devices: &mut DeviceSet,
        elapsed_secs: f64,
    ) -> Result<Snapshot, TwinError>;
}

/// Synthetic draw ranges (percent for CPU, MB/s for I/O).
const CPU_LOAD_RANGE: (f64, f64) = (10.0, 100.0);
const MEMORY_FLOOR_GB: f64 = 1.0;
const IO_SPEED_RANGE: (f64, f64) = (50.0, 500.0);

/// Draws loads from uniform distributions. Generic over the RNG so tests
/// can seed a `StdRng` and assert exact snapshot values.
pub struct SyntheticSource<R: Rng> {
    rng: R,
}

impl<R: Rng> SyntheticSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MetricSource for SyntheticSource<R> {
    fn sample(
        &mut self,
        devices: &mut DeviceSet,
        elapsed_secs: f64,
    ) -> Result<Snapshot, TwinError> {
        let cpu_load = self.rng.gen_range(CPU_LOAD_RANGE.0..=CPU_LOAD_RANGE.1);
        let cpu_clock_ghz = devices.cpu.apply_load(cpu_load);

        // Profiles below the 1 GB floor collapse the range to the capacity.
        let memory_floor = MEMORY_FLOOR_GB.min(devices.memory.total_gb);
        let memory_request = self.rng.gen_range(memory_floor..=devices.memory.total_gb);
        devices.memory.apply_usage(memory_request);

        // Informational only; storage state is never mutated.
        let io_speed = self.rng.gen_range(IO_SPEED_RANGE.0..=IO_SPEED_RANGE.1);
        let io_message = devices.storage.describe_io(io_speed);

        let network_load = self.rng.gen_range(0.0..=devices.network.bandwidth_mbps);
        devices.network.apply_load(network_load);

        Ok(Snapshot {
            elapsed_secs,
            cpu: devices.cpu.clone(),
            memory: devices.memory.clone(),
            storage: devices.storage.clone(),
            network: devices.network.clone(),
            cpu_clock_ghz,
            io_message,
            disk: DiskCounters::default(),
        })
    }
}
