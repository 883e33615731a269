//! Accessory identity derived from the factory MAC address.
//!
//! Produces the stable display name `LightBulb-XXYYZZ` (last 3 bytes of
//! the 6-byte MAC in uppercase hex).  Derived once at startup and
//! immutable for the process lifetime; the accessory server advertises
//! it and the provisioning AP uses it as its SSID.

/// Display name: "LightBulb-XXYYZZ" (16 chars).
pub type AccessoryName = heapless::String<24>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}

/// Derive the accessory display name from the last 3 MAC bytes.
/// Format: `LightBulb-XXYYZZ` (e.g., `LightBulb-EFCAFE`).
pub fn accessory_name(mac: &MacAddress) -> AccessoryName {
    let mut name = AccessoryName::new();
    use core::fmt::Write;
    let _ = write!(
        name,
        "LightBulb-{:02X}{:02X}{:02X}",
        mac[3], mac[4], mac[5]
    );
    name
}

/// Serial number reported in the accessory information service:
/// the full MAC, uppercase hex, no separators.
pub fn serial_number(mac: &MacAddress) -> heapless::String<16> {
    let mut serial = heapless::String::<16>::new();
    use core::fmt::Write;
    for byte in mac {
        let _ = write!(serial, "{:02X}", byte);
    }
    serial
}
