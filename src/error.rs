//! Error types for the switch firmware.
//!
//! The taxonomy is intentionally small: this device has no user-facing
//! error channel beyond the serial log.  Relay GPIO writes are treated
//! as infallible, the factory-reset sequence never reports failure (it
//! proceeds to restart regardless), and peripheral bring-up has its own
//! typed error next to the init code.  What remains is persistent
//! storage.

use core::fmt;

/// Errors from persistent key-value storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Stored blob failed to decode.
    Corrupted,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Corrupted => write!(f, "blob corrupted"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
