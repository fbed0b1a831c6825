// Route exports
pub mod devs;
pub mod health;
pub mod search;

use actix_web::web;
use std::sync::Arc;

use crate::core::SearchOptions;
use crate::services::{CacheManager, DevRepository, GitHubClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DevRepository>,
    pub github: Arc<GitHubClient>,
    pub cache: Option<Arc<CacheManager>>,
    pub search: SearchOptions,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(devs::configure)
            .configure(search::configure),
    );
}
