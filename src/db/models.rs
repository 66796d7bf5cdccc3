//! Shared data models re-exported for database layer consumers.

pub use crate::api::{Locality, LocalityId, Partner, PartnerId, Role, User, UserId};
pub use crate::routes::dashboard::{CoverageSummary, DashboardData, MatchResult};
