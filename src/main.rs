use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use devradar::config::{LoggingSettings, Settings};
use devradar::core::SearchOptions;
use devradar::errors::{handle_json_payload_error, handle_query_payload_error};
use devradar::routes::{self, AppState};
use devradar::services::{CacheManager, GitHubClient, PostgresDevStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(io_error(format!("Configuration error: {}", e)));
        }
    };

    init_logging(&settings.logging);

    info!("Starting DevRadar service...");

    let github = GitHubClient::new(
        settings.github.api_url.clone(),
        settings.github.token.clone(),
        Duration::from_secs(settings.github.timeout_secs),
    )
    .map_err(|e| io_error(format!("GitHub client error: {}", e)))?;

    info!("GitHub client initialized ({})", settings.github.api_url);

    let cache = if settings.cache.enabled {
        let ttl = settings.cache.ttl_secs.unwrap_or(60);
        let l1_size = settings.cache.l1_cache_size.unwrap_or(1000);

        let manager = match &settings.cache.redis_url {
            Some(url) => match CacheManager::with_redis(url, l1_size, ttl).await {
                Ok(manager) => manager,
                Err(e) => {
                    warn!("Failed to connect to Redis ({}), using in-process cache only", e);
                    CacheManager::in_memory(l1_size, ttl)
                }
            },
            None => CacheManager::in_memory(l1_size, ttl),
        };

        info!(
            "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
            l1_size,
            ttl,
            manager.has_redis()
        );
        Some(Arc::new(manager))
    } else {
        info!("Caching disabled");
        None
    };

    let store = PostgresDevStore::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        io_error(format!("PostgreSQL connection error: {}", e))
    })?;

    info!("PostgreSQL store initialized");

    let search = SearchOptions::from(&settings.search);

    info!("Search options: {:?}", search);

    let app_state = AppState {
        store: Arc::new(store),
        github: Arc::new(github),
        cache,
        search,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
