//! Core application runner (scan-cycle driver) for `ble-scout`.
//!
//! This module is intentionally decoupled from CLI parsing and process exit
//! codes so it can be tested deterministically with an injected scanner and
//! an injected output stream.

use crate::event::AdvertisementEvent;
use crate::output::OutputFormatter;
use crate::output::text::TextFormatter;
use crate::registry::DeviceRegistry;
use crate::scanner::{Backend, ScanError};
use clap::Parser;
use std::future::Future;
use std::io;
use std::io::Write;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Configuration for the scan loop.
#[derive(Parser, Debug, Clone)]
#[command(author, about, version)]
pub struct Options {
    /// How long to collect advertisements in each scan cycle.
    /// Accepts duration with suffix: 10s, 1m, 500ms, 2h.
    /// Without suffix, value is interpreted as seconds.
    #[arg(long, default_value = "10s", value_parser = parse_duration)]
    pub duration: Duration,

    /// Pause between scan cycles.
    #[arg(long, default_value = "60s", value_parser = parse_duration)]
    pub interval: Duration,

    /// Number of scan cycles to run before exiting (default: run until
    /// interrupted).
    #[arg(long)]
    pub cycles: Option<u32>,

    /// Keep discovered devices across scan cycles instead of clearing the
    /// registry at the start of each cycle.
    #[arg(long)]
    pub retain: bool,

    /// Verbose output, include raw advertising frames in reports
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Bluetooth scanner backend to use
    #[arg(long, default_value_t, value_enum)]
    pub backend: Backend,
}

/// Errors returned by the scan loop.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Scanner abstraction to enable deterministic unit tests without Bluetooth
/// hardware.
pub trait Scanner: Send + Sync {
    fn start_scan(
        &self,
        backend: Backend,
    ) -> Pin<
        Box<dyn Future<Output = Result<mpsc::Receiver<AdvertisementEvent>, ScanError>> + Send + '_>,
    >;
}

/// Real scanner implementation that delegates to the compiled-in backends.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealScanner;

impl Scanner for RealScanner {
    fn start_scan(
        &self,
        backend: Backend,
    ) -> Pin<
        Box<dyn Future<Output = Result<mpsc::Receiver<AdvertisementEvent>, ScanError>> + Send + '_>,
    > {
        Box::pin(async move { crate::scanner::start_scan(backend).await })
    }
}

/// Run the scan loop, writing reports to `out`.
///
/// Each cycle clears the registry (unless `options.retain` is set), feeds
/// incoming advertisements through [`DeviceRegistry::upsert`] for
/// `options.duration`, printing a sighting line whenever a record is
/// written, then prints a summary of the snapshot. The loop ends after
/// `options.cycles` cycles, or early and cleanly when the event source
/// closes.
pub async fn run_with_io(
    options: Options,
    scanner: &dyn Scanner,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let formatter = TextFormatter::new(options.verbose);
    let mut registry = DeviceRegistry::new();

    let mut events = scanner.start_scan(options.backend).await?;

    let mut cycle = 0u32;
    loop {
        cycle += 1;
        if !options.retain {
            registry.clear();
        }
        writeln!(out, "--- scan cycle {cycle} ---")?;

        let deadline = tokio::time::sleep(options.duration);
        tokio::pin!(deadline);

        let mut source_open = true;
        while source_open {
            tokio::select! {
                _ = &mut deadline => break,
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => {
                        if let Some(record) = registry.upsert(&event) {
                            writeln!(out, "{}", formatter.sighting(record))?;
                        }
                    }
                    None => source_open = false,
                }
            }
        }

        writeln!(out, "{}", formatter.summary(&registry.snapshot()))?;

        if !source_open {
            return Ok(());
        }
        if let Some(limit) = options.cycles
            && cycle >= limit
        {
            return Ok(());
        }
        tokio::time::sleep(options.interval).await;
    }
}

/// Parse a duration from a human-readable string.
///
/// Supports the following suffixes:
/// - `s` or no suffix: seconds
/// - `m`: minutes
/// - `h`: hours
/// - `ms`: milliseconds
pub fn parse_duration(src: &str) -> Result<Duration, String> {
    let src = src.trim();

    if src.is_empty() {
        return Err("empty duration string".to_string());
    }

    if let Some(num) = src.strip_suffix("ms") {
        let millis: u64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid milliseconds: {}", num))?;
        return Ok(Duration::from_millis(millis));
    }

    if let Some(num) = src.strip_suffix('h') {
        let hours: u64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid hours: {}", num))?;
        return Ok(Duration::from_secs(hours * 3600));
    }

    if let Some(num) = src.strip_suffix('m') {
        let minutes: u64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid minutes: {}", num))?;
        return Ok(Duration::from_secs(minutes * 60));
    }

    if let Some(num) = src.strip_suffix('s') {
        let secs: u64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid seconds: {}", num))?;
        return Ok(Duration::from_secs(secs));
    }

    // No suffix, treat as seconds
    let secs: u64 = src
        .parse()
        .map_err(|_| format!("invalid duration: {}", src))?;
    Ok(Duration::from_secs(secs))
}
