use serde::{Deserialize, Serialize};

use crate::api::{Locality, Partner};

// =========================================================
// Dashboard types
// =========================================================

/// Prediction and matching outcome for one locality.
///
/// Derived data: rebuilt from the current partner and locality sets on every
/// computation, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub locality: Locality,
    /// Estimated capacity need in TRX units (raw, unrounded)
    pub capacity_needed: f64,
    /// Partners able to cover the need, ascending by capacity
    pub compatible_partners: Vec<Partner>,
    /// Smallest compatible partner, if any
    pub best_partner: Option<Partner>,
}

/// Aggregate coverage statistics across all localities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageSummary {
    pub total_localities: usize,
    pub matched_localities: usize,
    /// Share of matched localities in percent, 0 when there are no localities
    pub match_percentage: f64,
}

/// Complete dashboard dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardData {
    pub predictions: Vec<MatchResult>,
    pub summary: CoverageSummary,
}
