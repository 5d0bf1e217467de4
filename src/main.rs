use anyhow::Result;
use hwtwin::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Diagnostics go to stderr; stdout belongs to the interactive session.
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        version = version::VERSION,
        cores = app_config.hardware.cpu_cores,
        memory_gb = app_config.hardware.total_memory_gb,
        "starting {}",
        version::NAME
    );

    let mut devices = app_config.hardware.device_set();
    let mut synthetic = source::SyntheticSource::new(rand::thread_rng());
    let provider = telemetry::SysinfoProvider::new(Duration::from_millis(
        app_config.monitoring.cpu_sample_window_ms,
    ));
    let mut live = telemetry::LiveSource::new(provider);
    let clock = sampler::SystemClock::new();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();
    cli::run_session(
        &mut devices,
        &mut synthetic,
        &mut live,
        &clock,
        &mut input,
        &mut out,
    )?;

    Ok(())
}
