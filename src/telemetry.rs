// Live host telemetry via sysinfo (psutil equivalent)

use crate::error::TwinError;
use crate::models::{DeviceSet, DiskCounters, Snapshot};
use crate::source::MetricSource;
use std::time::Duration;
use sysinfo::{Networks, System};

const BYTES_PER_GB: f64 = (1024u64 * 1024 * 1024) as f64;
const BYTES_PER_MB: f64 = (1024u64 * 1024) as f64;

/// Raw host counters consumed by the live source. Providers report what
/// the OS exposes; the twin owns the unit conversion.
pub trait TelemetryProvider {
    /// CPU utilization percentage sampled over the provider's window
    /// (a blocking wait).
    fn cpu_percent(&mut self) -> Result<f64, TwinError>;

    /// Physical memory currently in use, in bytes.
    fn used_memory_bytes(&mut self) -> Result<u64, TwinError>;

    /// Cumulative disk read/write operation counts.
    fn disk_counters(&mut self) -> Result<DiskCounters, TwinError>;

    /// Cumulative bytes sent over all network interfaces.
    fn network_bytes_sent(&mut self) -> Result<u64, TwinError>;
}

/// Host telemetry through the sysinfo crate, plus /proc for the disk
/// operation counts sysinfo does not expose.
pub struct SysinfoProvider {
    sys: System,
    networks: Networks,
    cpu_window: Duration,
}

impl SysinfoProvider {
    pub fn new(cpu_window: Duration) -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys,
            networks,
            cpu_window,
        }
    }
}

impl TelemetryProvider for SysinfoProvider {
    fn cpu_percent(&mut self) -> Result<f64, TwinError> {
        self.sys.refresh_cpu_all();
        if self.sys.cpus().is_empty() {
            return Err(TwinError::TelemetryUnavailable(
                "host reported no CPUs".into(),
            ));
        }
        // Two refreshes bracketing the window; usage is the delta between them.
        std::thread::sleep(self.cpu_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys.refresh_cpu_all();
        Ok(self.sys.global_cpu_usage() as f64)
    }

    fn used_memory_bytes(&mut self) -> Result<u64, TwinError> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(TwinError::TelemetryUnavailable(
                "host reported zero total memory".into(),
            ));
        }
        Ok(total.saturating_sub(self.sys.available_memory()))
    }

    fn disk_counters(&mut self) -> Result<DiskCounters, TwinError> {
        // Zero fallback off Linux or when /proc is unreadable.
        Ok(read_diskstats().unwrap_or_default())
    }

    fn network_bytes_sent(&mut self) -> Result<u64, TwinError> {
        self.networks.refresh(true);
        Ok(self
            .networks
            .list()
            .iter()
            .map(|(_, data)| data.total_transmitted())
            .sum())
    }
}

/// Sum of completed read/write operations across whole block devices from
/// /proc/diskstats (fields 4 and 8). Loop and ram devices are skipped.
fn read_diskstats() -> Option<DiskCounters> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/diskstats").ok()?;
        let mut counters = DiskCounters::default();
        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 10 {
                continue;
            }
            let name = fields[2];
            if name.starts_with("loop") || name.starts_with("ram") {
                continue;
            }
            let (Ok(reads), Ok(writes)) = (fields[3].parse::<u64>(), fields[7].parse::<u64>())
            else {
                continue;
            };
            counters.read_ops += reads;
            counters.write_ops += writes;
        }
        Some(counters)
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Drives the device models from real host readings through the same
/// transition contracts as the synthetic source. Disk counters are
/// reported in the snapshot but never applied to storage state.
pub struct LiveSource<P: TelemetryProvider> {
    provider: P,
}

impl<P: TelemetryProvider> LiveSource<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: TelemetryProvider> MetricSource for LiveSource<P> {
    fn sample(
        &mut self,
        devices: &mut DeviceSet,
        elapsed_secs: f64,
    ) -> Result<Snapshot, TwinError> {
        let cpu_load = self.provider.cpu_percent()?;
        let cpu_clock_ghz = devices.cpu.apply_load(cpu_load);

        let used_gb = self.provider.used_memory_bytes()? as f64 / BYTES_PER_GB;
        devices.memory.apply_usage(used_gb);

        let disk = self.provider.disk_counters()?;
        let io_message = format!(
            "Disk read/write count: {}/{}",
            disk.read_ops, disk.write_ops
        );

        // Cumulative bytes sent, treated as an instantaneous MB/s load.
        let sent_mb = self.provider.network_bytes_sent()? as f64 / BYTES_PER_MB;
        devices.network.apply_load(sent_mb);

        Ok(Snapshot {
            elapsed_secs,
            cpu: devices.cpu.clone(),
            memory: devices.memory.clone(),
            storage: devices.storage.clone(),
            network: devices.network.clone(),
            cpu_clock_ghz,
            io_message,
            disk,
        })
    }
}
