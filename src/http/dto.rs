//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Partner, locality and dashboard payloads are re-exported from the core
//! library since those records already derive Serialize/Deserialize; this
//! module adds the auth payloads and the request shapes for CRUD writes.

use serde::{Deserialize, Serialize};

use crate::api::{Locality, Partner, Role, User};

// Re-export existing DTOs that are already serializable
pub use crate::api::{CoverageSummary, DashboardData, MatchResult};

// =============================================================================
// Authentication
// =============================================================================

/// Request body for logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Raw password
    pub password: String,
    /// Keep the session across restarts (default: false)
    #[serde(default)]
    pub remember_me: bool,
}

/// Request body for registering a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Login email, must be unused
    pub email: String,
    /// Raw password, checked against the minimum length
    pub password: String,
    /// Optional company affiliation
    #[serde(default)]
    pub company: Option<String>,
}

/// Request body for the password-reset flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// Email to send the reset link to
    pub email: String,
}

/// Response for a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// The authenticated user
    pub user: UserDto,
}

/// User as exposed over the API. Never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    /// User ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Optional company affiliation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Account role
    pub role: Role,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.value()).unwrap_or_default(),
            name: user.name,
            email: user.email,
            company: user.company,
            role: user.role,
        }
    }
}

// =============================================================================
// Partner CRUD
// =============================================================================

/// Request body for creating a partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePartnerRequest {
    /// Partner name
    pub name: String,
    /// Deployable capacity in TRX
    pub network_capacity: f64,
}

impl CreatePartnerRequest {
    /// Validate the request into a partner record.
    pub fn into_record(self) -> Result<Partner, String> {
        Partner::new(self.name, self.network_capacity)
    }
}

/// Request body for updating a partner. Omitted fields keep their value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdatePartnerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network_capacity: Option<f64>,
}

impl UpdatePartnerRequest {
    /// Merge the request over an existing record, re-running validation.
    pub fn apply(self, existing: &Partner) -> Result<Partner, String> {
        let mut updated = Partner::new(
            self.name.unwrap_or_else(|| existing.name.clone()),
            self.network_capacity.unwrap_or(existing.network_capacity),
        )?;
        updated.id = existing.id;
        Ok(updated)
    }
}

/// Partner list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerListResponse {
    /// All partners in insertion order
    pub partners: Vec<Partner>,
    /// Total count
    pub total: usize,
}

// =============================================================================
// Locality CRUD
// =============================================================================

/// Request body for creating a locality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocalityRequest {
    /// Locality name
    pub name: String,
    /// Mean busy-hour traffic per subscriber, in Erlang
    pub avg_traffic_per_subscriber: f64,
    /// Subscriber count
    pub total_subscribers: i64,
    /// Target blocking probability, in percent
    pub blocking_probability: f64,
}

impl CreateLocalityRequest {
    /// Validate the request into a locality record.
    pub fn into_record(self) -> Result<Locality, String> {
        Locality::new(
            self.name,
            self.avg_traffic_per_subscriber,
            self.total_subscribers,
            self.blocking_probability,
        )
    }
}

/// Request body for updating a locality. Omitted fields keep their value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateLocalityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avg_traffic_per_subscriber: Option<f64>,
    #[serde(default)]
    pub total_subscribers: Option<i64>,
    #[serde(default)]
    pub blocking_probability: Option<f64>,
}

impl UpdateLocalityRequest {
    /// Merge the request over an existing record, re-running validation.
    pub fn apply(self, existing: &Locality) -> Result<Locality, String> {
        let mut updated = Locality::new(
            self.name.unwrap_or_else(|| existing.name.clone()),
            self.avg_traffic_per_subscriber
                .unwrap_or(existing.avg_traffic_per_subscriber),
            self.total_subscribers.unwrap_or(existing.total_subscribers),
            self.blocking_probability
                .unwrap_or(existing.blocking_probability),
        )?;
        updated.id = existing.id;
        Ok(updated)
    }
}

/// Locality list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalityListResponse {
    /// All localities in insertion order
    pub localities: Vec<Locality>,
    /// Total count
    pub total: usize,
}

// =============================================================================
// Misc
// =============================================================================

/// Generic acknowledgement response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message about the operation
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository status
    pub database: String,
}
