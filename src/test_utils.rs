use crate::event::AdvertisementEvent;
use crate::mac_address::MacAddress;

/// A stable device address for unit tests.
pub const TEST_MAC: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);

/// Build an advertisement event with defaulted address/PDU types.
///
/// Tests only care about the address, the signal strength and the payload.
pub fn event_with_data(address: MacAddress, rssi: i16, data: Vec<u8>) -> AdvertisementEvent {
    AdvertisementEvent {
        address_type: 0,
        address,
        adv_type: 0,
        rssi,
        data,
    }
}
