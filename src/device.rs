//! Device record held by the registry.

use crate::mac_address::MacAddress;

/// Everything learned so far about one observed device.
///
/// `name`, `manufacturer_data` and `company` start out absent and are filled
/// in as advertisements supplying them arrive; once learned they are never
/// forgotten (short of clearing the registry). `rssi` and `raw_frame` belong
/// to the sighting that last wrote the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Device address; unique key of the registry.
    pub address: MacAddress,
    /// Signal strength (dBm) of the sighting that created or last updated
    /// the record.
    pub rssi: i16,
    /// Local name from a Shortened/Complete Local Name AD element.
    pub name: Option<String>,
    /// Manufacturer-specific data as a lowercase hex string.
    pub manufacturer_data: Option<String>,
    /// Vendor name resolved from the manufacturer data's company ID.
    pub company: Option<String>,
    /// Full raw advertising payload (lowercase hex) captured when the
    /// record was last written, kept for diagnostics.
    pub raw_frame: String,
}
