use crate::core::{
    distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box},
    techs::{EmptyFilterPolicy, TechFilter},
};
use crate::models::{BoundingBox, Dev, GeoPoint};

/// Default search radius in meters
pub const DEFAULT_MAX_DISTANCE_METERS: f64 = 10_000.0;

/// Parameters of a proximity search
#[derive(Debug, Clone)]
pub struct ProximityQuery {
    pub center: GeoPoint,
    pub max_distance_meters: f64,
    pub filter: TechFilter,
    pub limit: Option<usize>,
}

impl ProximityQuery {
    pub fn new(center: GeoPoint, filter: TechFilter) -> Self {
        Self {
            center,
            max_distance_meters: DEFAULT_MAX_DISTANCE_METERS,
            filter,
            limit: None,
        }
    }

    pub fn with_max_distance(mut self, meters: f64) -> Self {
        self.max_distance_meters = meters;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Box used by stores to pre-filter candidates
    pub fn bounding_box(&self) -> BoundingBox {
        calculate_bounding_box(&self.center, self.max_distance_meters)
    }
}

/// Search settings shared by every request
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub max_distance_meters: f64,
    pub empty_filter: EmptyFilterPolicy,
    pub max_results: Option<usize>,
}

impl SearchOptions {
    /// Build the query for one request
    pub fn query(&self, center: GeoPoint, raw_techs: &str) -> ProximityQuery {
        ProximityQuery::new(center, TechFilter::parse(raw_techs, self.empty_filter))
            .with_max_distance(self.max_distance_meters)
            .with_limit(self.max_results)
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_distance_meters: DEFAULT_MAX_DISTANCE_METERS,
            empty_filter: EmptyFilterPolicy::default(),
            max_results: None,
        }
    }
}

/// Run a proximity search over a candidate set
///
/// # Pipeline Stages
/// 1. Tech filter
/// 2. Bounding box pre-filter
/// 3. Exact haversine radius check
/// 4. Ordering by distance, nearest first
///
/// Stores call this on whatever their index pre-selected, so the outcome does
/// not depend on how coarse that pre-selection was.
pub fn rank_nearby(query: &ProximityQuery, candidates: Vec<Dev>) -> Vec<Dev> {
    if query.filter.matches_nothing() {
        return Vec::new();
    }

    let bbox = query.bounding_box();

    let mut nearby: Vec<(f64, Dev)> = candidates
        .into_iter()
        .filter(|dev| query.filter.matches(&dev.techs))
        .filter(|dev| is_within_bounding_box(&dev.location, &bbox))
        .filter_map(|dev| {
            let distance = haversine_distance(&query.center, &dev.location);
            (distance <= query.max_distance_meters).then_some((distance, dev))
        })
        .collect();

    nearby.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(limit) = query.limit {
        nearby.truncate(limit);
    }

    nearby.into_iter().map(|(_, dev)| dev).collect()
}
