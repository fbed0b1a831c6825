use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Rejected coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid coordinates: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Geographic point stored with each developer
///
/// Serialized as a GeoJSON point, so the coordinate array is
/// `[longitude, latitude]`. Construction always goes through [`GeoPoint::new`],
/// deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonPoint", into = "GeoJsonPoint")]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            Ok(Self { longitude, latitude })
        } else {
            Err(InvalidCoordinates { latitude, longitude })
        }
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeoJsonPoint {
    #[serde(rename = "type")]
    kind: String,
    coordinates: [f64; 2],
}

impl TryFrom<GeoJsonPoint> for GeoPoint {
    type Error = String;

    fn try_from(value: GeoJsonPoint) -> Result<Self, Self::Error> {
        if value.kind != "Point" {
            return Err(format!("unsupported geometry type: {}", value.kind));
        }
        let [longitude, latitude] = value.coordinates;
        GeoPoint::new(latitude, longitude).map_err(|e| e.to_string())
    }
}

impl From<GeoPoint> for GeoJsonPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [point.longitude, point.latitude],
        }
    }
}

/// Developer profile with location and technology tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dev {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub name: String,
    pub github_username: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub techs: Vec<String>,
    pub location: GeoPoint,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Dev {
    /// Build a new profile for a freshly registered developer
    pub fn new(
        github_username: String,
        name: String,
        bio: Option<String>,
        avatar_url: String,
        techs: Vec<String>,
        location: GeoPoint,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            github_username,
            bio,
            avatar_url,
            techs,
            location,
            created_at: Some(chrono::Utc::now()),
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
