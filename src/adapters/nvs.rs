//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`StatePort`]: the user-visible relay value survives
//! reboots so the switch powers up the way it was left, matching what
//! the paired client last saw.
//!
//! The blob is postcard-encoded.  WiFi credentials and accessory
//! pairing data are *not* stored here — those live in the namespaces
//! owned by the respective external components, which is why the
//! factory-reset sequence delegates their erasure instead of touching
//! this adapter.

use log::info;

use crate::app::ports::StatePort;
use crate::error::StorageError;

#[cfg(not(target_os = "espidf"))]
use std::cell::RefCell;
#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

const NAMESPACE: &str = "switch";
const RELAY_KEY: &str = "relay";

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    store: RefCell<HashMap<String, Vec<u8>>>,
}

impl NvsAdapter {
    /// Create the adapter and initialise NVS flash.
    ///
    /// On first boot or after a partition-version mismatch the NVS
    /// partition is erased and re-initialised automatically.
    pub fn new() -> Result<Self, StorageError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from
            // the single main-task context before any concurrent access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                log::warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(StorageError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(StorageError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(StorageError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: RefCell::new(HashMap::new()),
        })
    }

    // ── Raw blob access ───────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn read_blob(&self, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let mut ns_buf = [0u8; 16];
        let ns = NAMESPACE.as_bytes();
        ns_buf[..ns.len()].copy_from_slice(ns);
        let mut key_buf = [0u8; 16];
        let kb = key.as_bytes();
        key_buf[..kb.len()].copy_from_slice(kb);

        let mut handle: nvs_handle_t = 0;
        // SAFETY: nvs_open/get_blob/close on a local handle; key and
        // namespace buffers are NUL-terminated by construction.
        unsafe {
            if nvs_open(ns_buf.as_ptr().cast(), nvs_open_mode_t_NVS_READONLY, &mut handle)
                != ESP_OK
            {
                return Err(StorageError::NotFound);
            }
            let mut len = buf.len();
            let ret = nvs_get_blob(handle, key_buf.as_ptr().cast(), buf.as_mut_ptr().cast(), &mut len);
            nvs_close(handle);
            if ret != ESP_OK {
                return Err(StorageError::NotFound);
            }
            Ok(len)
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_blob(&self, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let store = self.store.borrow();
        match store.get(&format!("{}::{}", NAMESPACE, key)) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    #[cfg(target_os = "espidf")]
    fn write_blob(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let mut ns_buf = [0u8; 16];
        let ns = NAMESPACE.as_bytes();
        ns_buf[..ns.len()].copy_from_slice(ns);
        let mut key_buf = [0u8; 16];
        let kb = key.as_bytes();
        key_buf[..kb.len()].copy_from_slice(kb);

        let mut handle: nvs_handle_t = 0;
        // SAFETY: as read_blob; nvs_commit makes the write atomic.
        unsafe {
            if nvs_open(ns_buf.as_ptr().cast(), nvs_open_mode_t_NVS_READWRITE, &mut handle)
                != ESP_OK
            {
                return Err(StorageError::IoError);
            }
            let ret = nvs_set_blob(handle, key_buf.as_ptr().cast(), data.as_ptr().cast(), data.len());
            let commit = nvs_commit(handle);
            nvs_close(handle);
            if ret != ESP_OK || commit != ESP_OK {
                return Err(StorageError::IoError);
            }
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_blob(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.store
            .borrow_mut()
            .insert(format!("{}::{}", NAMESPACE, key), data.to_vec());
        Ok(())
    }
}

impl StatePort for NvsAdapter {
    fn load_relay_state(&self) -> Result<bool, StorageError> {
        let mut buf = [0u8; 8];
        let n = self.read_blob(RELAY_KEY, &mut buf)?;
        postcard::from_bytes::<bool>(&buf[..n]).map_err(|_| StorageError::Corrupted)
    }

    fn save_relay_state(&mut self, on: bool) -> Result<(), StorageError> {
        let bytes = postcard::to_allocvec(&on).map_err(|_| StorageError::IoError)?;
        self.write_blob(RELAY_KEY, &bytes)
    }
}
