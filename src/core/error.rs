//! Typed error handling for the ordo map core
//!
//! Almost every failure the core can meet is recoverable at the interaction
//! boundary: malformed records are dropped, an empty filter result is a
//! valid state and an out-of-range focus is a no-op. The types here cover
//! the remaining cases that callers may want to match on.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: configuration parsing and loading
//! - [`StorageError`]: record source access
//! - [`GeolocationError`]: location acquisition failures
//!
//! # Example
//!
//! ```rust,ignore
//! match controller.locate(&provider).await {
//!     LocationStatus::Failed { error: GeolocationError::PermissionDenied, .. } => {
//!         println!("location permission denied");
//!     }
//!     status => println!("{}", status),
//! }
//! ```

use thiserror::Error;

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    /// Failed to parse configuration content
    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    /// A configuration value is out of its accepted range
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to record sources
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read
    #[error("Failed to read collection '{collection}': {message}")]
    ReadFailed { collection: String, message: String },

    /// The backing store could not be written
    #[error("Failed to write collection '{collection}': {message}")]
    WriteFailed { collection: String, message: String },

    /// Lock poisoned or similar internal failure
    #[error("Storage lock error: {0}")]
    Lock(String),
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ReadFailed { .. } => "STORAGE_READ_FAILED",
            StorageError::WriteFailed { .. } => "STORAGE_WRITE_FAILED",
            StorageError::Lock(_) => "STORAGE_LOCK_ERROR",
        }
    }
}

// =============================================================================
// Geolocation Errors
// =============================================================================

/// Reasons a location request can fail
///
/// None of these are retried automatically; the user has to trigger the
/// request again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The platform has no geolocation capability
    #[error("geolocation is not supported on this platform")]
    Unsupported,

    /// The user refused to share their location
    #[error("location permission denied")]
    PermissionDenied,

    /// A position could not be determined
    #[error("position unavailable: {0}")]
    Unavailable(String),

    /// The provider gave up waiting for a fix
    #[error("location request timed out")]
    Timeout,
}

impl GeolocationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "GEOLOCATION_UNSUPPORTED",
            GeolocationError::PermissionDenied => "GEOLOCATION_DENIED",
            GeolocationError::Unavailable(_) => "GEOLOCATION_UNAVAILABLE",
            GeolocationError::Timeout => "GEOLOCATION_TIMEOUT",
        }
    }
}
