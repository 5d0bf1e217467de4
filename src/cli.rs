// Interactive command dispatcher (one line at a time)

use crate::alerts;
use crate::error::TwinError;
use crate::models::DeviceSet;
use crate::sampler::{self, Clock};
use crate::sink::{ConsoleSink, ReportSink};
use crate::source::MetricSource;
use std::io::{self, BufRead, Write};

fn write_menu<O: Write>(out: &mut O) -> io::Result<()> {
    writeln!(out, "\nAvailable commands:")?;
    writeln!(out, "1: Simulate system behavior over time")?;
    writeln!(out, "2: Monitor real-time data")?;
    writeln!(out, "3: Monitor and predict")?;
    writeln!(out, "4: Exit")?;
    writeln!(out)
}

/// Prompts for one line and parses it as f64. `Ok(None)` covers both EOF
/// and a non-numeric answer; the caller reports and carries on.
fn prompt_number<I: BufRead, O: Write>(
    input: &mut I,
    out: &mut O,
    prompt: &str,
) -> io::Result<Option<f64>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(line.trim().parse::<f64>().ok())
}

/// Runs the interactive session until Exit or EOF. One operation at a
/// time; the device set is the only state carried across commands.
pub fn run_session<I, O, S, L, C>(
    devices: &mut DeviceSet,
    synthetic: &mut S,
    live: &mut L,
    clock: &C,
    input: &mut I,
    out: &mut O,
) -> io::Result<()>
where
    I: BufRead,
    O: Write,
    S: MetricSource,
    L: MetricSource,
    C: Clock,
{
    loop {
        write_menu(out)?;
        write!(out, "Enter a command number: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "1" => {
                let duration =
                    prompt_number(input, out, "Enter the duration of the simulation in seconds: ")?;
                let interval =
                    prompt_number(input, out, "Enter the interval between updates in seconds: ")?;
                let (Some(duration), Some(interval)) = (duration, interval) else {
                    writeln!(
                        out,
                        "Invalid input. Please enter numerical values for duration and interval."
                    )?;
                    continue;
                };

                writeln!(out, "\nSimulating system behavior over time:")?;
                let result = {
                    let mut sink = ConsoleSink::new(&mut *out);
                    sampler::run(devices, synthetic, &mut sink, clock, duration, interval)
                };
                match result {
                    Ok(()) => {}
                    Err(e @ TwinError::InvalidInput(_)) => {
                        tracing::warn!(error = %e, operation = "simulate", "arguments rejected");
                        writeln!(
                            out,
                            "Invalid input. Duration and interval must be positive numbers."
                        )?;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, operation = "simulate", "sampling failed");
                        writeln!(out, "Simulation aborted: {e}")?;
                    }
                }
            }
            "2" => {
                writeln!(out, "\nMonitoring real-time data:")?;
                let result = {
                    let mut sink = ConsoleSink::new(&mut *out);
                    live.sample(devices, 0.0).map(|s| sink.on_live_snapshot(&s))
                };
                if let Err(e) = result {
                    tracing::warn!(error = %e, operation = "monitor", "live read failed");
                    writeln!(out, "Live monitoring failed: {e}")?;
                }
            }
            "3" => {
                writeln!(out, "\nMonitoring and predicting:")?;
                let snapshot = devices.observe(0.0);
                let alerts = alerts::evaluate(&snapshot);
                let mut sink = ConsoleSink::new(&mut *out);
                sink.on_alerts(&alerts);
            }
            "4" => {
                writeln!(out, "Exiting program.")?;
                break;
            }
            other => {
                tracing::debug!(command = other, "unrecognized command");
                writeln!(out, "Invalid command. Please enter a valid command number.")?;
            }
        }
    }
    Ok(())
}
