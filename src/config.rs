use crate::models::{CpuState, DeviceSet, MemoryState, NetworkState, StorageState};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub hardware: HardwareConfig,
    pub monitoring: MonitoringConfig,
}

/// Capacity parameters for the modeled hardware. Defaults are the
/// reference profile: 8 cores at 2.6/4.5 GHz, 32 GB RAM, 1000 GB disk,
/// 100 MB/s network.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    pub cpu_cores: u32,
    pub base_clock_ghz: f64,
    pub max_clock_ghz: f64,
    pub total_memory_gb: f64,
    pub storage_capacity_gb: f64,
    pub network_bandwidth_mbps: f64,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            cpu_cores: 8,
            base_clock_ghz: 2.6,
            max_clock_ghz: 4.5,
            total_memory_gb: 32.0,
            storage_capacity_gb: 1000.0,
            network_bandwidth_mbps: 100.0,
        }
    }
}

impl HardwareConfig {
    /// Builds the long-lived device set from this profile.
    pub fn device_set(&self) -> DeviceSet {
        DeviceSet::new(
            CpuState::new(self.cpu_cores, self.base_clock_ghz, self.max_clock_ghz),
            MemoryState::new(self.total_memory_gb),
            StorageState::new(self.storage_capacity_gb),
            NetworkState::new(self.network_bandwidth_mbps),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Sampling window for live CPU utilization reads, in milliseconds.
    /// The read blocks for this long.
    pub cpu_sample_window_ms: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            cpu_sample_window_ms: 1000,
        }
    }
}

impl AppConfig {
    /// Loads from CONFIG_FILE (or ./config.toml). A missing file is not an
    /// error for an interactive tool; the reference profile applies.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path, "no config file; using reference hardware profile");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.hardware.cpu_cores > 0,
            "hardware.cpu_cores must be > 0, got {}",
            self.hardware.cpu_cores
        );
        anyhow::ensure!(
            self.hardware.base_clock_ghz.is_finite() && self.hardware.base_clock_ghz > 0.0,
            "hardware.base_clock_ghz must be finite and > 0, got {}",
            self.hardware.base_clock_ghz
        );
        anyhow::ensure!(
            self.hardware.max_clock_ghz.is_finite()
                && self.hardware.max_clock_ghz >= self.hardware.base_clock_ghz,
            "hardware.max_clock_ghz must be finite and >= base_clock_ghz, got {} vs {}",
            self.hardware.max_clock_ghz,
            self.hardware.base_clock_ghz
        );
        anyhow::ensure!(
            self.hardware.total_memory_gb.is_finite() && self.hardware.total_memory_gb > 0.0,
            "hardware.total_memory_gb must be finite and > 0, got {}",
            self.hardware.total_memory_gb
        );
        anyhow::ensure!(
            self.hardware.storage_capacity_gb.is_finite()
                && self.hardware.storage_capacity_gb > 0.0,
            "hardware.storage_capacity_gb must be finite and > 0, got {}",
            self.hardware.storage_capacity_gb
        );
        anyhow::ensure!(
            self.hardware.network_bandwidth_mbps.is_finite()
                && self.hardware.network_bandwidth_mbps > 0.0,
            "hardware.network_bandwidth_mbps must be finite and > 0, got {}",
            self.hardware.network_bandwidth_mbps
        );
        anyhow::ensure!(
            self.monitoring.cpu_sample_window_ms > 0,
            "monitoring.cpu_sample_window_ms must be > 0, got {}",
            self.monitoring.cpu_sample_window_ms
        );
        Ok(())
    }
}
