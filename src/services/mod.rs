//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that sits between the repository
//! operations and the HTTP handlers. Services implement the capacity
//! estimation engine, the partner matcher and the dashboard assembly.

pub mod capacity;

pub mod dashboard;

pub mod matching;

pub use capacity::{estimate_capacity, estimate_locality_capacity, CHANNELS_PER_TRX};
pub use dashboard::get_dashboard_data;
pub use matching::{
    compatible_partners, coverage_summary, match_all, match_locality, match_partner, PartnerMatch,
};
