//! Public API surface for the Rust backend.
//!
//! This file consolidates the domain records and typed identifiers shared by
//! the repository, service and HTTP layers. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::routes::dashboard::CoverageSummary;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::dashboard::MatchResult;

use serde::{Deserialize, Serialize};

/// Partner identifier (repository primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PartnerId(pub i64);

/// Locality identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalityId(pub i64);

/// User identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl PartnerId {
    pub fn new(value: i64) -> Self {
        PartnerId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl LocalityId {
    pub fn new(value: i64) -> Self {
        LocalityId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl UserId {
    pub fn new(value: i64) -> Self {
        UserId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PartnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for LocalityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PartnerId> for i64 {
    fn from(id: PartnerId) -> Self {
        id.0
    }
}
impl From<LocalityId> for i64 {
    fn from(id: LocalityId) -> Self {
        id.0
    }
}

/// Network partner offering deployable capacity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partner {
    /// Repository ID (optional on input, server-assigned)
    #[serde(default)]
    pub id: Option<PartnerId>,
    /// Partner name, unique per deployment
    pub name: String,
    /// Deployable network capacity in TRX units
    pub network_capacity: f64,
}

impl Partner {
    pub fn new(name: impl Into<String>, network_capacity: f64) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Partner name must not be empty".to_string());
        }
        if !network_capacity.is_finite() || network_capacity <= 0.0 {
            return Err("Network capacity must be a positive number of TRX".to_string());
        }
        Ok(Self {
            id: None,
            name,
            network_capacity,
        })
    }
}

/// Locality (service area) whose traffic demand drives capacity planning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Locality {
    /// Repository ID (optional on input, server-assigned)
    #[serde(default)]
    pub id: Option<LocalityId>,
    /// Locality name
    pub name: String,
    /// Average traffic per subscriber in Erlang
    pub avg_traffic_per_subscriber: f64,
    /// Subscriber count
    pub total_subscribers: i64,
    /// Target blocking probability as a percentage (0, 100]
    pub blocking_probability: f64,
}

impl Locality {
    pub fn new(
        name: impl Into<String>,
        avg_traffic_per_subscriber: f64,
        total_subscribers: i64,
        blocking_probability: f64,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Locality name must not be empty".to_string());
        }
        if !avg_traffic_per_subscriber.is_finite() || avg_traffic_per_subscriber <= 0.0 {
            return Err("Average traffic per subscriber must be positive Erlang".to_string());
        }
        if total_subscribers <= 0 {
            return Err("Total subscribers must be positive".to_string());
        }
        if !blocking_probability.is_finite()
            || blocking_probability <= 0.0
            || blocking_probability > 100.0
        {
            return Err("Blocking probability must be a percentage in (0, 100]".to_string());
        }
        Ok(Self {
            id: None,
            name,
            avg_traffic_per_subscriber,
            total_subscribers,
            blocking_probability,
        })
    }
}

/// Account role as exposed to the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Registered account. The password digest never leaves the server;
/// the HTTP layer exposes users through a digest-free DTO.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Repository ID (optional on input, server-assigned)
    #[serde(default)]
    pub id: Option<UserId>,
    /// Display name
    pub name: String,
    /// Login email, unique per deployment
    pub email: String,
    /// Optional company affiliation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub role: Role,
    /// SHA-256 hex digest of the password
    #[serde(default)]
    pub password_digest: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company: Option<String>,
        role: Role,
        password_digest: impl Into<String>,
    ) -> Result<Self, String> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err("User name must not be empty".to_string());
        }
        if !email.contains('@') {
            return Err("Email address is not valid".to_string());
        }
        Ok(Self {
            id: None,
            name,
            email,
            company,
            role,
            password_digest: password_digest.into(),
        })
    }
}
