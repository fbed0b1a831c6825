use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::parse_techs;
use crate::errors::ApiError;
use crate::models::{Dev, DevsResponse, GeoPoint, StoreDevRequest};
use crate::routes::AppState;
use crate::services::{CacheError, CacheKey, GitHubUser, StoreError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/devs")
            .route(web::get().to(list_devs))
            .route(web::post().to(store_dev)),
    );
}

/// List every registered developer
///
/// GET /api/v1/devs
async fn list_devs(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let devs = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::store("list_failed", e))?;

    Ok(HttpResponse::Ok().json(DevsResponse { devs }))
}

/// Register a developer
///
/// POST /api/v1/devs
///
/// Request body:
/// ```json
/// {
///   "github_username": "string",
///   "techs": "ReactJS, Node.js",
///   "latitude": -23.55,
///   "longitude": -46.63
/// }
/// ```
///
/// An already registered username returns the stored profile with 200.
async fn store_dev(
    state: web::Data<AppState>,
    req: web::Json<StoreDevRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let location = GeoPoint::new(req.latitude, req.longitude)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if let Some(existing) = state
        .store
        .find_by_github_username(&req.github_username)
        .await
        .map_err(|e| ApiError::store("register_failed", e))?
    {
        tracing::debug!("Dev {} already registered", req.github_username);
        return Ok(HttpResponse::Ok().json(existing));
    }

    let user = fetch_github_user(&state, &req.github_username).await?;

    let dev = Dev::new(
        req.github_username.clone(),
        user.display_name().to_string(),
        user.bio,
        user.avatar_url,
        parse_techs(&req.techs),
        location,
    );

    let inserted = state
        .store
        .insert(&dev)
        .await
        .map_err(|e| ApiError::store("register_failed", e))?;

    if !inserted {
        // Lost a race against a concurrent registration of the same user
        let existing = state
            .store
            .find_by_github_username(&dev.github_username)
            .await
            .and_then(|found| {
                found.ok_or_else(|| {
                    StoreError::InvalidRecord(format!("dev {} vanished after conflict", dev.github_username))
                })
            })
            .map_err(|e| ApiError::store("register_failed", e))?;
        return Ok(HttpResponse::Ok().json(existing));
    }

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.invalidate_prefix(CacheKey::SEARCH_PREFIX).await {
            tracing::warn!("Failed to invalidate search cache: {}", e);
        }
    }

    tracing::info!("Registered dev {} with techs {:?}", dev.github_username, dev.techs);

    Ok(HttpResponse::Created().json(dev))
}

async fn fetch_github_user(state: &AppState, username: &str) -> Result<GitHubUser, ApiError> {
    let cache_key = CacheKey::github_user(username);

    if let Some(cache) = &state.cache {
        match cache.get::<GitHubUser>(&cache_key).await {
            Ok(user) => return Ok(user),
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Cache read failed for {}: {}", cache_key, e),
        }
    }

    let user = state.github.get_user(username).await.map_err(|e| {
        tracing::error!("Failed to fetch GitHub user {}: {}", username, e);
        ApiError::from(e)
    })?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&cache_key, &user).await {
            tracing::warn!("Failed to cache GitHub user: {}", e);
        }
    }

    Ok(user)
}
