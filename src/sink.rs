// Presentation seam: the engine emits immutable events, sinks render them

use crate::alerts::Alert;
use crate::models::Snapshot;
use std::io::Write;

/// Consumes snapshots and alerts for display. The engine never prints;
/// tests swap in a collector.
pub trait ReportSink {
    fn on_snapshot(&mut self, snapshot: &Snapshot);

    /// An on-demand live read, outside any timed run. Defaults to the
    /// regular snapshot rendering.
    fn on_live_snapshot(&mut self, snapshot: &Snapshot) {
        self.on_snapshot(snapshot);
    }

    fn on_alerts(&mut self, alerts: &[Alert]);
    fn on_complete(&mut self);
}

/// Renders events in the interactive session's line format. Write errors
/// on the console are ignored; there is nowhere left to report them.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn on_snapshot(&mut self, s: &Snapshot) {
        let t = s.elapsed_secs;
        let _ = writeln!(
            self.out,
            "[{t:.1}s] CPU Load: {:.2}% - Clock Speed: {} GHz",
            s.cpu.current_load, s.cpu_clock_ghz
        );
        let _ = writeln!(
            self.out,
            "[{t:.1}s] RAM Usage: {:.2} GB / {} GB",
            s.memory.used_gb, s.memory.total_gb
        );
        let _ = writeln!(self.out, "[{t:.1}s] {}", s.io_message);
        let _ = writeln!(
            self.out,
            "[{t:.1}s] Network Usage: {:.2} MB/s / {} MB/s",
            s.network.current_usage_mbps, s.network.bandwidth_mbps
        );
    }

    fn on_live_snapshot(&mut self, s: &Snapshot) {
        let _ = writeln!(self.out, "Real-time CPU Load: {}%", s.cpu.current_load);
        let _ = writeln!(self.out, "Real-time RAM Usage: {:.2} GB", s.memory.used_gb);
        let _ = writeln!(
            self.out,
            "Real-time Disk Read/Write Count: {}/{}",
            s.disk.read_ops, s.disk.write_ops
        );
        let _ = writeln!(
            self.out,
            "Real-time Network Usage: {:.2} MB/s",
            s.network.current_usage_mbps
        );
    }

    fn on_alerts(&mut self, alerts: &[Alert]) {
        if alerts.is_empty() {
            let _ = writeln!(self.out, "No warnings; all resources within thresholds.");
            return;
        }
        for alert in alerts {
            let _ = writeln!(self.out, "Warning: {}", alert.message);
        }
    }

    fn on_complete(&mut self) {
        let _ = writeln!(self.out, "\nSimulation completed.\n");
    }
}
