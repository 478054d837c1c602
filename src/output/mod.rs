//! Output formatting for discovered devices.
//!
//! A formatter turns registry records into the lines the operator sees:
//! one sighting line per registry write, plus an end-of-cycle summary of
//! the whole snapshot.

pub mod text;

use crate::device::DeviceRecord;

/// Trait for rendering device records into report strings.
pub trait OutputFormatter: Send + Sync {
    /// Format a single sighting, emitted when the registry writes a record.
    fn sighting(&self, record: &DeviceRecord) -> String;

    /// Format the end-of-cycle summary for a registry snapshot.
    fn summary(&self, records: &[DeviceRecord]) -> String;
}
