//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. Data endpoints require a bearer
//! token; `/health` and the auth endpoints are public.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};

use super::dto::{
    CreateLocalityRequest, CreatePartnerRequest, DashboardData, HealthResponse,
    LocalityListResponse, LoginRequest, MessageResponse, PartnerListResponse, RegisterRequest,
    ResetPasswordRequest, SessionResponse, UpdateLocalityRequest, UpdatePartnerRequest, UserDto,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{Locality, LocalityId, Partner, PartnerId, User};
use crate::db::services as db_services;
use crate::services::dashboard;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))
}

/// Resolve the caller's session or reject the request.
async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let token = bearer_token(headers)?;
    Ok(state.auth.current_user(token).await?)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Authentication
// =============================================================================

/// POST /v1/auth/login
///
/// Exchange an email/password pair for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<SessionResponse> {
    let session = state
        .auth
        .login(&request.email, &request.password, request.remember_me)
        .await?;
    let user = state.auth.current_user(&session.token).await?;

    Ok(Json(SessionResponse {
        token: session.token,
        user: UserDto::from(user),
    }))
}

/// POST /v1/auth/register
///
/// Create an account and log it in immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = state
        .auth
        .register(
            &request.name,
            &request.email,
            &request.password,
            request.company,
        )
        .await?;
    let user = state.auth.current_user(&session.token).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: session.token,
            user: UserDto::from(user),
        }),
    ))
}

/// POST /v1/auth/logout
///
/// Drop the caller's session. Succeeds whether or not a valid token was sent.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<MessageResponse> {
    if let Ok(token) = bearer_token(&headers) {
        state.auth.logout(token);
    }

    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

/// GET /v1/auth/session
///
/// Return the user behind the caller's bearer token.
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<UserDto> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(UserDto::from(user)))
}

/// POST /v1/auth/reset-password
///
/// Start the password-reset flow. The response never reveals whether the
/// email has an account.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> HandlerResult<MessageResponse> {
    state.auth.request_password_reset(&request.email).await?;

    Ok(Json(MessageResponse {
        message: "If that email has an account, a reset link is on its way".to_string(),
    }))
}

// =============================================================================
// Partner CRUD
// =============================================================================

/// GET /v1/partners
///
/// List all partners in insertion order.
pub async fn list_partners(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<PartnerListResponse> {
    require_user(&state, &headers).await?;

    let partners = db_services::list_partners(state.repository.as_ref()).await?;
    let total = partners.len();

    Ok(Json(PartnerListResponse { partners, total }))
}

/// POST /v1/partners
///
/// Create a new partner.
pub async fn create_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreatePartnerRequest>,
) -> Result<(StatusCode, Json<Partner>), AppError> {
    require_user(&state, &headers).await?;

    let partner = request.into_record().map_err(AppError::BadRequest)?;
    let created = db_services::create_partner(state.repository.as_ref(), &partner).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/partners/{partner_id}
///
/// Fetch a single partner.
pub async fn get_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(partner_id): Path<i64>,
) -> HandlerResult<Partner> {
    require_user(&state, &headers).await?;

    let partner =
        db_services::get_partner(state.repository.as_ref(), PartnerId::new(partner_id)).await?;

    Ok(Json(partner))
}

/// PUT /v1/partners/{partner_id}
///
/// Update a partner. Omitted fields keep their current value.
pub async fn update_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(partner_id): Path<i64>,
    Json(request): Json<UpdatePartnerRequest>,
) -> HandlerResult<Partner> {
    require_user(&state, &headers).await?;

    let id = PartnerId::new(partner_id);
    let existing = db_services::get_partner(state.repository.as_ref(), id).await?;
    let merged = request.apply(&existing).map_err(AppError::BadRequest)?;
    let updated = db_services::update_partner(state.repository.as_ref(), id, &merged).await?;

    Ok(Json(updated))
}

/// DELETE /v1/partners/{partner_id}
///
/// Delete a partner.
pub async fn delete_partner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(partner_id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    require_user(&state, &headers).await?;

    db_services::delete_partner(state.repository.as_ref(), PartnerId::new(partner_id)).await?;

    Ok(Json(MessageResponse {
        message: format!("Partner {} deleted", partner_id),
    }))
}

// =============================================================================
// Locality CRUD
// =============================================================================

/// GET /v1/localities
///
/// List all localities in insertion order.
pub async fn list_localities(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<LocalityListResponse> {
    require_user(&state, &headers).await?;

    let localities = db_services::list_localities(state.repository.as_ref()).await?;
    let total = localities.len();

    Ok(Json(LocalityListResponse { localities, total }))
}

/// POST /v1/localities
///
/// Create a new locality.
pub async fn create_locality(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateLocalityRequest>,
) -> Result<(StatusCode, Json<Locality>), AppError> {
    require_user(&state, &headers).await?;

    let locality = request.into_record().map_err(AppError::BadRequest)?;
    let created = db_services::create_locality(state.repository.as_ref(), &locality).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/localities/{locality_id}
///
/// Fetch a single locality.
pub async fn get_locality(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(locality_id): Path<i64>,
) -> HandlerResult<Locality> {
    require_user(&state, &headers).await?;

    let locality =
        db_services::get_locality(state.repository.as_ref(), LocalityId::new(locality_id)).await?;

    Ok(Json(locality))
}

/// PUT /v1/localities/{locality_id}
///
/// Update a locality. Omitted fields keep their current value.
pub async fn update_locality(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(locality_id): Path<i64>,
    Json(request): Json<UpdateLocalityRequest>,
) -> HandlerResult<Locality> {
    require_user(&state, &headers).await?;

    let id = LocalityId::new(locality_id);
    let existing = db_services::get_locality(state.repository.as_ref(), id).await?;
    let merged = request.apply(&existing).map_err(AppError::BadRequest)?;
    let updated = db_services::update_locality(state.repository.as_ref(), id, &merged).await?;

    Ok(Json(updated))
}

/// DELETE /v1/localities/{locality_id}
///
/// Delete a locality.
pub async fn delete_locality(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(locality_id): Path<i64>,
) -> HandlerResult<MessageResponse> {
    require_user(&state, &headers).await?;

    db_services::delete_locality(state.repository.as_ref(), LocalityId::new(locality_id)).await?;

    Ok(Json(MessageResponse {
        message: format!("Locality {} deleted", locality_id),
    }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard
///
/// Match every locality against the partner pool and return predictions
/// plus the coverage summary.
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<DashboardData> {
    require_user(&state, &headers).await?;

    let data = dashboard::get_dashboard_data(state.repository.as_ref()).await?;

    Ok(Json(data))
}
