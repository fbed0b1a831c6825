use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::models::{Dev, DevsResponse, GeoPoint, SearchQuery};
use crate::routes::AppState;
use crate::services::{CacheError, CacheKey};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search_devs));
}

/// Search developers near a point
///
/// GET /api/v1/search?lat={lat}&lon={lon}&techs={comma separated techs}
///
/// Returns `{ "devs": [...] }` with every developer inside the configured
/// radius who knows at least one of the techs, nearest first.
async fn search_devs(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let center = GeoPoint::new(query.lat, query.lon)
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let proximity = state.search.query(center, &query.techs);

    tracing::info!(
        "Searching devs near ({}, {}) with techs {:?}",
        query.lat,
        query.lon,
        proximity.filter.techs()
    );

    let cache_key = CacheKey::search(query.lat, query.lon, proximity.filter.techs());

    if let Some(cache) = &state.cache {
        match cache.get::<Vec<Dev>>(&cache_key).await {
            Ok(devs) => {
                tracing::debug!("Serving {} devs from cache", devs.len());
                return Ok(HttpResponse::Ok().json(DevsResponse { devs }));
            }
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Cache read failed for {}: {}", cache_key, e),
        }
    }

    let generation = state.cache.as_ref().map(|cache| cache.generation());

    let devs = state
        .store
        .search(&proximity)
        .await
        .map_err(|e| ApiError::store("search_failed", e))?;

    if let (Some(cache), Some(generation)) = (&state.cache, generation) {
        // Registrations finishing meanwhile must not be hidden by this entry
        if let Err(e) = cache.set_if_current(&cache_key, &devs, generation).await {
            tracing::warn!("Failed to cache search results: {}", e);
        }
    }

    tracing::info!("Returning {} devs", devs.len());

    Ok(HttpResponse::Ok().json(DevsResponse { devs }))
}
