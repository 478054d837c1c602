//! Deduplicated registry of observed devices.
//!
//! One record per device address, merged across sightings: a record is
//! rewritten only when the incoming advertisement adds information the
//! record does not have yet (a name or manufacturer data). Repeat sightings
//! that add nothing are dropped, which deliberately leaves `rssi` and
//! `raw_frame` at the values of the last informative sighting.

use std::collections::HashMap;

use crate::adv::{self, hex_string};
use crate::company::resolve_company;
use crate::device::DeviceRecord;
use crate::event::AdvertisementEvent;
use crate::mac_address::MacAddress;

/// In-memory registry of devices seen during a scan.
///
/// Mutation is single-owner and synchronous: `upsert` never blocks and the
/// registry is never observable in a half-updated state. Records survive
/// until [`DeviceRegistry::clear`]; there is no per-address expiry.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<MacAddress, DeviceRecord>,
    /// Addresses in first-write order, for stable reporting.
    order: Vec<MacAddress>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.devices.clear();
        self.order.clear();
    }

    /// Process one advertisement event.
    ///
    /// Decodes the payload, then writes the record if this is the first
    /// sighting of the address or if the event supplies a name or
    /// manufacturer data the record lacks. Merged fields prefer the fresh
    /// value and fall back to the stored one.
    ///
    /// Returns the written record when a write occurred, `None` when the
    /// event was a duplicate sighting adding no new information.
    pub fn upsert(&mut self, event: &AdvertisementEvent) -> Option<&DeviceRecord> {
        let fields = adv::parse_ad_fields(&event.data);
        // An empty decoded name or empty manufacturer value carries no
        // information; treat it as absent so the real value, should one
        // arrive later, can still be learned.
        let name = fields.local_name.filter(|name| !name.is_empty());
        let manufacturer = fields.manufacturer_data.filter(|data| !data.is_empty());
        let company = manufacturer
            .as_deref()
            .and_then(resolve_company)
            .map(str::to_owned);
        let manufacturer_data = manufacturer.as_deref().map(hex_string);

        let (name, manufacturer_data, company) = match self.devices.get(&event.address) {
            None => (name, manufacturer_data, company),
            Some(existing) => {
                let learned_name = name.is_some() && existing.name.is_none();
                let learned_data =
                    manufacturer_data.is_some() && existing.manufacturer_data.is_none();
                if !learned_name && !learned_data {
                    return None;
                }
                (
                    name.or_else(|| existing.name.clone()),
                    manufacturer_data.or_else(|| existing.manufacturer_data.clone()),
                    company.or_else(|| existing.company.clone()),
                )
            }
        };

        let record = DeviceRecord {
            address: event.address,
            rssi: event.rssi,
            name,
            manufacturer_data,
            company,
            raw_frame: hex_string(&event.data),
        };

        if self.devices.insert(event.address, record).is_none() {
            self.order.push(event.address);
        }
        self.devices.get(&event.address)
    }

    /// Look up the record for an address.
    pub fn get(&self, address: &MacAddress) -> Option<&DeviceRecord> {
        self.devices.get(address)
    }

    /// Clone all records in first-write order.
    pub fn snapshot(&self) -> Vec<DeviceRecord> {
        self.order
            .iter()
            .filter_map(|address| self.devices.get(address))
            .cloned()
            .collect()
    }

    /// Number of devices currently known.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
