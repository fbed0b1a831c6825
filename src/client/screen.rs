use uuid::Uuid;

use crate::client::{
    location::{Accuracy, Coords, LocationProvider, PermissionStatus},
    navigation::{Navigator, Route},
    SearchApi,
    ClientError,
};
use crate::models::Dev;

/// Latitude and longitude span of the initial map region
pub const INITIAL_DELTA: f64 = 0.04;

/// Visible map viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Region centered on a position fix with the initial zoom
    pub fn centered(coords: Coords) -> Self {
        Self {
            latitude: coords.latitude,
            longitude: coords.longitude,
            latitude_delta: INITIAL_DELTA,
            longitude_delta: INITIAL_DELTA,
        }
    }
}

/// Observable states of the map screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapState {
    /// Nothing is rendered until a position is known
    #[default]
    NoLocation,
    LocationAcquired { region: Region },
    ResultsLoaded { region: Region, devs: Vec<Dev> },
}

impl MapState {
    pub fn region(&self) -> Option<&Region> {
        match self {
            MapState::NoLocation => None,
            MapState::LocationAcquired { region } | MapState::ResultsLoaded { region, .. } => Some(region),
        }
    }

    pub fn devs(&self) -> &[Dev] {
        match self {
            MapState::ResultsLoaded { devs, .. } => devs.as_slice(),
            _ => &[],
        }
    }
}

/// Callout shown when a marker is selected
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub name: String,
    pub bio: Option<String>,
    pub techs: String,
    pub github_username: String,
}

impl Callout {
    /// Route pushed when the callout is pressed
    pub fn on_press(&self) -> Route {
        Route::Profile {
            github_username: self.github_username.clone(),
        }
    }
}

/// One developer drawn on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: Uuid,
    pub coordinate: Coords,
    pub avatar_url: String,
    pub callout: Callout,
}

impl From<&Dev> for Marker {
    fn from(dev: &Dev) -> Self {
        Self {
            key: dev.id,
            coordinate: Coords {
                latitude: dev.location.latitude(),
                longitude: dev.location.longitude(),
            },
            avatar_url: dev.avatar_url.clone(),
            callout: Callout {
                name: dev.name.clone(),
                bio: dev.bio.clone(),
                techs: dev.techs.join(", "),
                github_username: dev.github_username.clone(),
            },
        }
    }
}

/// Search screen: map plus tech input plus locate button
///
/// Every async transition takes `&mut self`, so each one completes before the
/// next can start.
#[derive(Debug, Default)]
pub struct MapScreen {
    state: MapState,
    techs: String,
}

impl MapScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn techs(&self) -> &str {
        &self.techs
    }

    /// Whether the screen renders anything at all
    pub fn is_visible(&self) -> bool {
        !matches!(self.state, MapState::NoLocation)
    }

    /// Acquire the initial position on mount
    ///
    /// A denied permission leaves the screen in [`MapState::NoLocation`] for
    /// good and is not an error.
    pub async fn load_initial_position(&mut self, provider: &dyn LocationProvider) -> Result<(), ClientError> {
        if !matches!(self.state, MapState::NoLocation) {
            return Err(ClientError::InvalidTransition("initial position already loaded"));
        }

        match provider.request_permission().await? {
            PermissionStatus::Denied => {
                tracing::info!("Location permission denied");
                Ok(())
            }
            PermissionStatus::Granted => {
                let coords = provider.current_position(Accuracy::High).await?;
                self.state = MapState::LocationAcquired {
                    region: Region::centered(coords),
                };
                Ok(())
            }
        }
    }

    /// The user dragged or zoomed the map
    pub fn region_changed(&mut self, new_region: Region) {
        match &mut self.state {
            MapState::NoLocation => {}
            MapState::LocationAcquired { region } | MapState::ResultsLoaded { region, .. } => {
                *region = new_region;
            }
        }
    }

    /// The user edited the tech input
    pub fn set_techs(&mut self, text: impl Into<String>) {
        self.techs = text.into();
    }

    /// Search around the held region center with the typed techs
    ///
    /// On failure the previous state is kept. Returns how many devs loaded.
    pub async fn load_devs(&mut self, api: &dyn SearchApi) -> Result<usize, ClientError> {
        let region = *self.state.region().ok_or(ClientError::NoLocation)?;

        let devs = api.search(region.latitude, region.longitude, &self.techs).await?;
        let count = devs.len();

        self.state = MapState::ResultsLoaded { region, devs };
        Ok(count)
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.state.devs().iter().map(Marker::from).collect()
    }

    /// Press the callout of the marker with `key`, pushing its profile
    pub fn press_callout(&self, key: Uuid, navigator: &mut Navigator) -> bool {
        match self.state.devs().iter().find(|dev| dev.id == key) {
            Some(dev) => {
                navigator.push(Marker::from(dev).callout.on_press());
                true
            }
            None => false,
        }
    }
}
