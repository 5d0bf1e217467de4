// Device models (ported from the Python twin)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuState {
    pub cores: u32,
    pub base_clock_ghz: f64,
    pub max_clock_ghz: f64,
    pub current_load: f64,
}

impl CpuState {
    pub fn new(cores: u32, base_clock_ghz: f64, max_clock_ghz: f64) -> Self {
        Self {
            cores,
            base_clock_ghz,
            max_clock_ghz,
            current_load: 0.0,
        }
    }

    /// Applies a load percentage and returns the resulting clock speed.
    /// The load is stored as-is; out-of-range values pass through.
    pub fn apply_load(&mut self, load: f64) -> f64 {
        self.current_load = load;
        self.clock_for(load)
    }

    /// Clock speed for a given load: below 50% the governor stays at base,
    /// 50% and above runs at max.
    pub fn clock_for(&self, load: f64) -> f64 {
        if load < 50.0 {
            self.base_clock_ghz
        } else {
            self.max_clock_ghz
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryState {
    pub total_gb: f64,
    pub used_gb: f64,
}

impl MemoryState {
    pub fn new(total_gb: f64) -> Self {
        Self {
            total_gb,
            used_gb: 0.0,
        }
    }

    /// Sets used memory to the requested amount, capped at total capacity.
    /// Negative requests pass through the `min` unchanged.
    pub fn apply_usage(&mut self, requested_gb: f64) -> f64 {
        self.used_gb = self.total_gb.min(requested_gb);
        self.used_gb
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageState {
    pub capacity_gb: f64,
    /// Declared but never written by any operation.
    pub used_gb: f64,
}

impl StorageState {
    pub fn new(capacity_gb: f64) -> Self {
        Self {
            capacity_gb,
            used_gb: 0.0,
        }
    }

    /// Describes a transfer at the requested rate. Pure; does not touch state.
    pub fn describe_io(&self, speed_mbps: f64) -> String {
        format!("Performing I/O at {speed_mbps:.2} MB/s")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
    pub bandwidth_mbps: f64,
    pub current_usage_mbps: f64,
}

impl NetworkState {
    pub fn new(bandwidth_mbps: f64) -> Self {
        Self {
            bandwidth_mbps,
            current_usage_mbps: 0.0,
        }
    }

    /// Sets current usage to the requested load, capped at bandwidth.
    /// Negative requests pass through the `min` unchanged.
    pub fn apply_load(&mut self, requested_mbps: f64) -> f64 {
        self.current_usage_mbps = self.bandwidth_mbps.min(requested_mbps);
        self.current_usage_mbps
    }
}

/// Cumulative disk operation counts, reported by the live source but never
/// applied to `StorageState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskCounters {
    pub read_ops: u64,
    pub write_ops: u64,
}

/// Immutable record of all device states and derived values at one
/// sampling instant. Produced once per tick or per on-demand read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub elapsed_secs: f64,
    pub cpu: CpuState,
    pub memory: MemoryState,
    pub storage: StorageState,
    pub network: NetworkState,
    pub cpu_clock_ghz: f64,
    pub io_message: String,
    #[serde(default)]
    pub disk: DiskCounters,
}

/// The long-lived simulation context: the four device models, constructed
/// once at startup and mutated in place by whichever operation runs.
#[derive(Debug, Clone)]
pub struct DeviceSet {
    pub cpu: CpuState,
    pub memory: MemoryState,
    pub storage: StorageState,
    pub network: NetworkState,
}

impl DeviceSet {
    pub fn new(
        cpu: CpuState,
        memory: MemoryState,
        storage: StorageState,
        network: NetworkState,
    ) -> Self {
        Self {
            cpu,
            memory,
            storage,
            network,
        }
    }

    /// Snapshot of the current state without mutating anything. The clock
    /// is recomputed from the stored load; there is no transfer in flight,
    /// so the I/O message is empty.
    pub fn observe(&self, elapsed_secs: f64) -> Snapshot {
        Snapshot {
            elapsed_secs,
            cpu: self.cpu.clone(),
            memory: self.memory.clone(),
            storage: self.storage.clone(),
            network: self.network.clone(),
            cpu_clock_ghz: self.cpu.clock_for(self.cpu.current_load),
            io_message: String::new(),
            disk: DiskCounters::default(),
        }
    }
}
