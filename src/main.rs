mod config;
mod core;
mod errors;
mod matchmaking;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::filters::FilterConfig;
use core::matcher::CandidateFilter;
use matchmaking::{MatchmakingService, PaginationLimits};
use routes::matchmaking::AppState;
use services::{ActionLedger, CacheManager, HttpProfileClient, MutualMatchRegistry};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON/query payload errors, raised before a
/// request ever reaches a handler and so before `MatchmakingError` applies.
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    std::env::set_var("RUST_LOG", &log_level);

    let subscriber = tracing_subscriber::fmt().with_target(false).with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting kallyanam-matchmaking service...");

    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    let profile_client: Arc<HttpProfileClient> = Arc::new(HttpProfileClient::new(
        settings.profile_service.base_url.clone(),
        settings.profile_service.api_key.clone(),
    ));

    info!("Profile service client initialized ({})", settings.profile_service.base_url);

    let db_max_conn = settings.database.max_connections.unwrap_or(10);
    let db_min_conn = settings.database.min_connections.unwrap_or(1);

    let action_ledger = Arc::new(
        ActionLedger::new(&settings.database.url, db_max_conn, db_min_conn)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                panic!("PostgreSQL connection error: {}", e);
            }),
    );

    info!("Action Ledger initialized (max: {} connections)", db_max_conn);

    let mutual_matches = Arc::new(MutualMatchRegistry::from_pool(action_ledger.pool().clone()));

    let cache = match &settings.cache.redis_url {
        Some(redis_url) => {
            let ttl = settings.cache.ttl_secs.unwrap_or(300);
            let l1_size = settings.cache.l1_cache_size.unwrap_or(1000);
            match CacheManager::new(redis_url, l1_size, ttl).await {
                Ok(c) => {
                    info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_size, ttl);
                    Some(Arc::new(c))
                }
                Err(e) => {
                    error!("Failed to connect to Redis ({}), running without cache", e);
                    None
                }
            }
        }
        None => {
            info!("No cache configured, running without recommendation caching");
            None
        }
    };

    let filter_config = FilterConfig {
        apply_age_filter: settings.matching.filters.apply_age_filter,
        apply_height_filter: settings.matching.filters.apply_height_filter,
        apply_physically_challenged_filter: settings.matching.filters.apply_physically_challenged_filter,
        apply_marital_status_filter: settings.matching.filters.apply_marital_status_filter,
        apply_education_filter: settings.matching.filters.apply_education_filter,
    };

    let limits = PaginationLimits {
        default_limit: settings.matching.default_limit.unwrap_or(10),
        max_limit: settings.matching.max_limit.unwrap_or(50),
        history_default_limit: settings.matching.history_default_limit.unwrap_or(20),
    };

    let matchmaking = Arc::new(MatchmakingService::new(
        Arc::clone(&profile_client) as Arc<dyn services::ProfileReader>,
        profile_client as Arc<dyn services::PreferenceReader>,
        action_ledger,
        mutual_matches,
        CandidateFilter::new(filter_config),
        cache,
        limits,
    ));

    info!("Matchmaking service initialized");

    let app_state = AppState { matchmaking };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
