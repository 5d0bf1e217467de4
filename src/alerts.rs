// Stateless threshold evaluation over a snapshot

use crate::models::Snapshot;
use serde::{Deserialize, Serialize};

/// Load percentage above which the CPU is considered overloaded.
pub const CPU_LOAD_WARN_PERCENT: f64 = 80.0;

/// Fraction of capacity above which RAM and network usage warn.
pub const USAGE_WARN_RATIO: f64 = 0.8;

/// Alert kind; serializes to camelCase JSON (e.g. "cpuHigh").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    CpuHigh,
    RamHigh,
    NetSaturated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    /// The snapshot the alert was derived from.
    pub source: Snapshot,
}

/// Evaluates fixed thresholds against one snapshot. Pure and stateless;
/// the three conditions are independent, so zero to three alerts fire.
pub fn evaluate(snapshot: &Snapshot) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if snapshot.cpu.current_load > CPU_LOAD_WARN_PERCENT {
        alerts.push(Alert {
            kind: AlertKind::CpuHigh,
            message: "High CPU load, performance may degrade.".into(),
            source: snapshot.clone(),
        });
    }
    if snapshot.memory.used_gb > snapshot.memory.total_gb * USAGE_WARN_RATIO {
        alerts.push(Alert {
            kind: AlertKind::RamHigh,
            message: "High RAM usage, consider adding more memory.".into(),
            source: snapshot.clone(),
        });
    }
    if snapshot.network.current_usage_mbps > snapshot.network.bandwidth_mbps * USAGE_WARN_RATIO {
        alerts.push(Alert {
            kind: AlertKind::NetSaturated,
            message: "Network bandwidth is nearly saturated.".into(),
            source: snapshot.clone(),
        });
    }

    alerts
}
