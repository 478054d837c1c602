//! Advertisement event delivered by a scanner backend.

use crate::mac_address::MacAddress;

/// One received BLE advertisement, as handed over by the radio driver.
///
/// This is the single intake type of the core: every backend reduces its
/// native scan result to one of these per sighting. The payload is the raw
/// advertising data buffer, still in AD-structure encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementEvent {
    /// Address type (0 = public, 1 = random).
    pub address_type: u8,
    /// Advertiser address.
    pub address: MacAddress,
    /// Advertisement PDU type as reported by the controller.
    pub adv_type: u8,
    /// Received signal strength in dBm.
    pub rssi: i16,
    /// Raw advertising data (AD structures, typically at most 31 bytes).
    pub data: Vec<u8>,
}
