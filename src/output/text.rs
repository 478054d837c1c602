//! Plain-text formatter for console reporting.

use std::fmt::Write;

use crate::device::DeviceRecord;
use crate::output::OutputFormatter;

/// Marker printed in place of a name or company that was never learned.
const UNKNOWN: &str = "unknown";

/// Human-readable console output.
///
/// With `verbose` set, sighting lines and summary entries also carry the
/// raw advertising frame captured with the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl OutputFormatter for TextFormatter {
    fn sighting(&self, record: &DeviceRecord) -> String {
        let mut line = format!(
            "Device: {}, RSSI: {}, Name: {}, Company: {}",
            record.address,
            record.rssi,
            record.name.as_deref().unwrap_or(UNKNOWN),
            record.company.as_deref().unwrap_or(UNKNOWN),
        );
        if self.verbose {
            let _ = write!(line, ", Frame: {}", record.raw_frame);
        }
        line
    }

    fn summary(&self, records: &[DeviceRecord]) -> String {
        if records.is_empty() {
            return "No devices found.".to_string();
        }

        let mut out = format!("{} unique device(s) found:", records.len());
        for record in records {
            let _ = write!(
                out,
                "\n  - Addr: {}, RSSI: {}, Name: {}, Company: {}",
                record.address,
                record.rssi,
                record.name.as_deref().unwrap_or(UNKNOWN),
                record.company.as_deref().unwrap_or(UNKNOWN),
            );
            if let Some(data) = &record.manufacturer_data {
                let _ = write!(out, "\n    MfgData: {data}");
            }
            if self.verbose {
                let _ = write!(out, "\n    Frame: {}", record.raw_frame);
            }
        }
        out
    }
}
