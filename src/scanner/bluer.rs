//! BlueZ D-Bus backend.
//!
//! This backend uses the `bluer` crate to drive device discovery through
//! the BlueZ daemon. BlueZ hands out decoded device properties rather than
//! raw advertising frames, so the properties of interest are re-framed into
//! AD structures with [`crate::adv::build_ad_buffer`]; that keeps a single
//! intake path for both backends. Requires a running `bluetoothd`.

use super::{EVENT_CHANNEL_BUFFER_SIZE, ScanError};
use crate::adv::build_ad_buffer;
use crate::event::AdvertisementEvent;
use crate::mac_address::MacAddress;
use bluer::{Adapter, AdapterEvent, Address, AddressType, Session};
use futures::{StreamExt, pin_mut};
use std::collections::HashMap;
use tokio::sync::mpsc;

impl From<bluer::Error> for ScanError {
    fn from(err: bluer::Error) -> Self {
        ScanError::Bluetooth(err.to_string())
    }
}

/// Start device discovery through the BlueZ daemon.
///
/// Powers the default adapter, starts discovery and spawns a task that
/// turns each discovered device into an [`AdvertisementEvent`] on the
/// returned channel. Runs until the receiver is dropped.
pub async fn start_scan() -> Result<mpsc::Receiver<AdvertisementEvent>, ScanError> {
    let session = Session::new().await?;
    let adapter = session.default_adapter().await?;
    adapter.set_powered(true).await?;

    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER_SIZE);

    // Spawn a task that owns all Bluetooth state and runs the event loop.
    // The discovery stream borrows the adapter, so it is created inside the
    // task that owns it.
    tokio::spawn(async move {
        let _session = session;
        let discover = match adapter.discover_devices().await {
            Ok(discover) => discover,
            Err(_) => return,
        };
        pin_mut!(discover);

        while let Some(event) = discover.next().await {
            if let AdapterEvent::DeviceAdded(address) = event {
                // Per-device D-Bus errors (device vanished mid-query) just
                // drop that sighting.
                if let Ok(Some(adv)) = synthesize_event(&adapter, address).await
                    && tx.send(adv).await.is_err()
                {
                    break;
                }
            }
        }
    });

    Ok(rx)
}

/// Read the discovered device's properties and re-frame them as one event.
async fn synthesize_event(
    adapter: &Adapter,
    address: Address,
) -> Result<Option<AdvertisementEvent>, ScanError> {
    let device = adapter.device(address)?;

    let name = device.name().await?;
    let manufacturer_data = device.manufacturer_data().await?;
    let rssi = device.rssi().await?;
    let address_type = device.address_type().await?;

    Ok(event_from_properties(
        address,
        address_type,
        name,
        manufacturer_data,
        rssi,
    ))
}

/// Turn decoded device properties into one advertisement event.
///
/// A device without an RSSI reading is BlueZ handing back a cached entry
/// rather than something just heard on the air; that is not a sighting and
/// yields `None` rather than a fabricated signal strength. A device with no
/// name and no manufacturer data still produces an event with an empty
/// payload; the first sighting of an address is informative on its own.
fn event_from_properties(
    address: Address,
    address_type: AddressType,
    name: Option<String>,
    manufacturer_data: Option<HashMap<u16, Vec<u8>>>,
    rssi: Option<i16>,
) -> Option<AdvertisementEvent> {
    let rssi = rssi?;

    let address_type = match address_type {
        AddressType::BrEdr | AddressType::LePublic => 0,
        AddressType::LeRandom => 1,
    };

    // BlueZ merges manufacturer data into a map keyed by company ID; take
    // one entry and restore the little-endian wire framing.
    let manufacturer = manufacturer_data
        .as_ref()
        .and_then(|map| map.iter().next())
        .map(|(&id, payload)| (id, payload.as_slice()));

    let data = build_ad_buffer(name.as_deref(), manufacturer);

    Some(AdvertisementEvent {
        address_type,
        address: MacAddress::from(address),
        adv_type: 0,
        rssi,
        data,
    })
}
