use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::errors::MatchmakingError;
use crate::matchmaking::MatchmakingService;
use crate::models::{
    GetMatchHistoryRequest, GetMutualMatchesRequest, GetRecommendationsRequest, HealthResponse, RecordActionRequest,
    UpdateActionRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matchmaking: Arc<MatchmakingService>,
}

/// Configure all matchmaking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations", web::get().to(get_recommendations))
        .route("/actions", web::post().to(record_action))
        .route("/actions/{target_profile_id}", web::put().to(update_action))
        .route("/actions/history", web::get().to(get_match_history))
        .route("/matches", web::get().to(get_mutual_matches));
}

/// Extract the authenticated actor's user id from request context.
///
/// Authentication/session handling lives upstream of this service; a
/// gateway is expected to resolve the caller and forward it as this header.
/// Handlers here only consume the already-authenticated identity.
fn actor_id(req: &HttpRequest) -> Result<Uuid, MatchmakingError> {
    req.headers()
        .get("X-User-Id")
        .ok_or_else(|| MatchmakingError::InvalidArgument("missing X-User-Id header".to_string()))?
        .to_str()
        .map_err(|_| MatchmakingError::InvalidArgument("X-User-Id header is not valid UTF-8".to_string()))
        .and_then(|s| Uuid::parse_str(s).map_err(|_| MatchmakingError::InvalidArgument("X-User-Id is not a valid UUID".to_string())))
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/v1/recommendations?limit=10&offset=0
async fn get_recommendations(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<GetRecommendationsRequest>,
) -> Result<HttpResponse, MatchmakingError> {
    if let Err(errors) = query.validate() {
        return Err(MatchmakingError::InvalidArgument(errors.to_string()));
    }

    let seeker_id = actor_id(&req)?;
    let response = state
        .matchmaking
        .get_recommendations(seeker_id, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/actions
async fn record_action(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<RecordActionRequest>,
) -> Result<HttpResponse, MatchmakingError> {
    if let Err(errors) = body.validate() {
        return Err(MatchmakingError::InvalidArgument(errors.to_string()));
    }

    let actor_id = actor_id(&req)?;
    let target_profile_id = body.target_profile_id;

    let target_user_id = state
        .matchmaking
        .resolve_target_user_id(target_profile_id)
        .await?
        .ok_or_else(|| MatchmakingError::NotFound(format!("profile {target_profile_id} not found")))?;

    let is_mutual_match = state
        .matchmaking
        .record_action(actor_id, target_user_id, body.action)
        .await?;

    Ok(HttpResponse::Ok().json(crate::models::responses::RecordActionResponse { is_mutual_match }))
}

/// PUT /api/v1/actions/{target_profile_id}
async fn update_action(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateActionRequest>,
) -> Result<HttpResponse, MatchmakingError> {
    if let Err(errors) = body.validate() {
        return Err(MatchmakingError::InvalidArgument(errors.to_string()));
    }

    let actor_id = actor_id(&req)?;
    let target_profile_id = path.into_inner();

    let target_user_id = state
        .matchmaking
        .resolve_target_user_id(target_profile_id)
        .await?
        .ok_or_else(|| MatchmakingError::NotFound(format!("profile {target_profile_id} not found")))?;

    let (is_mutual_match, was_mutual_match_broken) = state
        .matchmaking
        .update_action(actor_id, target_user_id, body.action)
        .await?;

    Ok(HttpResponse::Ok().json(crate::models::responses::UpdateActionResponse {
        is_mutual_match,
        was_mutual_match_broken,
    }))
}

/// GET /api/v1/actions/history?status=liked&limit=20&offset=0
async fn get_match_history(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<GetMatchHistoryRequest>,
) -> Result<HttpResponse, MatchmakingError> {
    if let Err(errors) = query.validate() {
        return Err(MatchmakingError::InvalidArgument(errors.to_string()));
    }

    let actor_id = actor_id(&req)?;
    let response = state
        .matchmaking
        .get_match_history(actor_id, query.status, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/matches?limit=10&offset=0
async fn get_mutual_matches(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<GetMutualMatchesRequest>,
) -> Result<HttpResponse, MatchmakingError> {
    if let Err(errors) = query.validate() {
        return Err(MatchmakingError::InvalidArgument(errors.to_string()));
    }

    let user_id = actor_id(&req)?;
    let response = state
        .matchmaking
        .get_mutual_matches(user_id, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
