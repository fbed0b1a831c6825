// Core search exports
pub mod distance;
pub mod search;
pub mod techs;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use search::{rank_nearby, ProximityQuery, SearchOptions, DEFAULT_MAX_DISTANCE_METERS};
pub use techs::{parse_techs, EmptyFilterPolicy, TechFilter};
