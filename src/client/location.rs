use async_trait::async_trait;

use crate::client::ClientError;

/// Outcome of a location permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Requested accuracy of a position fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Balanced,
    High,
}

/// A position fix in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub latitude: f64,
    pub longitude: f64,
}

/// Device location capability
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Ask the user for foreground location access.
    async fn request_permission(&self) -> Result<PermissionStatus, ClientError>;

    /// Current device position.
    async fn current_position(&self, accuracy: Accuracy) -> Result<Coords, ClientError>;
}

/// Provider answering with a fixed permission and position
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    permission: PermissionStatus,
    coords: Option<Coords>,
}

impl FixedLocationProvider {
    pub fn granted(latitude: f64, longitude: f64) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            coords: Some(Coords { latitude, longitude }),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            coords: None,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> Result<PermissionStatus, ClientError> {
        Ok(self.permission)
    }

    async fn current_position(&self, _accuracy: Accuracy) -> Result<Coords, ClientError> {
        match (self.permission, self.coords) {
            (PermissionStatus::Granted, Some(coords)) => Ok(coords),
            (PermissionStatus::Denied, _) => {
                Err(ClientError::LocationUnavailable("permission denied".to_string()))
            }
            (PermissionStatus::Granted, None) => {
                Err(ClientError::LocationUnavailable("no position fix".to_string()))
            }
        }
    }
}
