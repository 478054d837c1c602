//! Bluetooth company identifier lookup.
//!
//! Manufacturer-specific advertising data starts with a 16-bit company ID
//! assigned by the Bluetooth SIG, transmitted little-endian. The table here
//! is a small fixed subset of the assigned-numbers registry covering vendors
//! commonly seen in the wild; unknown IDs simply resolve to nothing.

/// Known company identifiers, sorted by ID for binary search.
///
/// Source: Bluetooth SIG assigned numbers ("Company Identifiers").
const COMPANY_IDS: &[(u16, &str)] = &[
    (0x0006, "Microsoft"),
    (0x004C, "Apple, Inc."),
    (0x0059, "Nordic Semiconductor ASA"),
    (0x0075, "Samsung Electronics Co., Ltd."),
    (0x00C4, "Plus Location Systems"),
    (0x00E0, "Google"),
    (0x0157, "Bose Corporation"),
    (0x038F, "Xiaomi Inc."),
    (0x0499, "Ruuvi Innovations Ltd."),
];

/// Resolve the vendor name from raw manufacturer-specific data.
///
/// The company ID occupies the first two bytes, little-endian. Returns
/// `None` when the data is shorter than two bytes or the ID is not in the
/// table; this never fails.
pub fn resolve_company(manufacturer_data: &[u8]) -> Option<&'static str> {
    if manufacturer_data.len() < 2 {
        return None;
    }
    let id = u16::from_le_bytes([manufacturer_data[0], manufacturer_data[1]]);
    lookup(id)
}

/// Look up a company name by its numeric identifier.
pub fn lookup(id: u16) -> Option<&'static str> {
    COMPANY_IDS
        .binary_search_by_key(&id, |&(key, _)| key)
        .ok()
        .map(|index| COMPANY_IDS[index].1)
}
