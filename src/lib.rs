//! `ble-scout` library.
//!
//! The binary (`src/main.rs`) is responsible for CLI parsing and process exit codes.
//! The core “business logic” lives in [`crate::app`] where it can be tested
//! deterministically with an injected scanner + injected output stream; the
//! decoding and bookkeeping underneath it ([`crate::adv`], [`crate::company`],
//! [`crate::registry`]) is plain synchronous code.

pub mod adv;
pub mod app;
pub mod company;
pub mod device;
pub mod event;
pub mod mac_address;
pub mod output;
pub mod registry;
pub mod scanner;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types at the crate root
pub use adv::{AdFields, build_ad_buffer, hex_string, parse_ad_fields};
pub use company::resolve_company;
pub use device::DeviceRecord;
pub use event::AdvertisementEvent;
pub use mac_address::MacAddress;
pub use output::OutputFormatter;
pub use output::text::TextFormatter;
pub use registry::DeviceRegistry;
pub use scanner::{Backend, ScanError};
