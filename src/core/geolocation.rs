//! User location acquisition

use crate::core::error::GeolocationError;
use crate::core::facility::Coordinate;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Supplies the user's position
///
/// The core enforces no timeout and never cancels a pending request; a
/// provider that never resolves simply leaves the request pending.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Provider answering every request with the same result
#[derive(Debug, Clone)]
pub struct StaticGeolocation {
    result: Result<Coordinate, GeolocationError>,
}

impl StaticGeolocation {
    pub fn at(position: Coordinate) -> Self {
        Self {
            result: Ok(position),
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self { result: Err(error) }
    }

    /// Provider for platforms without location support
    pub fn unsupported() -> Self {
        Self::failing(GeolocationError::Unsupported)
    }
}

#[async_trait]
impl GeolocationProvider for StaticGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.result.clone()
    }
}

/// Outcome of a locate request, shown to the user as a status line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationStatus {
    /// Request issued, waiting on the provider
    Locating,
    /// Position found, with the number of facilities nearby
    Located { position: Coordinate, nearby: usize },
    /// Request failed; the user has to try again
    Failed {
        #[serde(skip)]
        error: GeolocationError,
        message: String,
    },
}

impl LocationStatus {
    pub fn failed(error: GeolocationError) -> Self {
        let message = error.to_string();
        LocationStatus::Failed { error, message }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LocationStatus::Located { .. })
    }
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationStatus::Locating => write!(f, "Locating you..."),
            LocationStatus::Located { nearby: 0, .. } => write!(f, "Location found"),
            LocationStatus::Located { nearby, .. } => {
                write!(f, "Location found, {} facilities near you", nearby)
            }
            LocationStatus::Failed { message, .. } => {
                write!(f, "Could not determine your location ({}), try again", message)
            }
        }
    }
}
