//! Partner matching for localities.
//!
//! Pairs each locality's estimated capacity need with the partners able to
//! serve it. Matching is deterministic: partners are filtered on capacity,
//! ordered ascending so the least oversized partner comes first, and the
//! best partner is that first entry. A locality with no compatible partner
//! is a normal outcome, not an error.

use crate::api::{CoverageSummary, DashboardData, Locality, MatchResult, Partner};
use crate::services::capacity::estimate_locality_capacity;

/// Outcome of matching one capacity requirement against the partner pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerMatch {
    /// Partners able to cover the requirement, ascending by capacity.
    pub compatible_partners: Vec<Partner>,
    /// Compatible partner with the smallest capacity, if any.
    pub best_partner: Option<Partner>,
}

/// Partners able to cover `capacity_needed`, ordered by ascending capacity.
///
/// `Vec::sort_by` is stable, so partners with equal capacity keep their
/// input order.
pub fn compatible_partners(capacity_needed: f64, partners: &[Partner]) -> Vec<Partner> {
    let mut compatible: Vec<Partner> = partners
        .iter()
        .filter(|p| p.network_capacity >= capacity_needed)
        .cloned()
        .collect();

    compatible.sort_by(|a, b| {
        a.network_capacity
            .partial_cmp(&b.network_capacity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    compatible
}

/// Match a capacity requirement against the partner pool.
///
/// The best partner is the compatible partner with the smallest capacity,
/// or `None` when no partner can cover the requirement.
pub fn match_partner(capacity_needed: f64, partners: &[Partner]) -> PartnerMatch {
    let compatible = compatible_partners(capacity_needed, partners);
    let best_partner = compatible.first().cloned();

    PartnerMatch {
        compatible_partners: compatible,
        best_partner,
    }
}

/// Match a single locality against the partner pool.
pub fn match_locality(locality: &Locality, partners: &[Partner]) -> MatchResult {
    let capacity_needed = estimate_locality_capacity(locality);
    let partner_match = match_partner(capacity_needed, partners);

    MatchResult {
        locality: locality.clone(),
        capacity_needed,
        compatible_partners: partner_match.compatible_partners,
        best_partner: partner_match.best_partner,
    }
}

/// Match every locality against the partner pool.
///
/// Localities are processed independently and results keep the input order.
pub fn match_all(localities: &[Locality], partners: &[Partner]) -> DashboardData {
    let predictions: Vec<MatchResult> = localities
        .iter()
        .map(|locality| match_locality(locality, partners))
        .collect();
    let summary = coverage_summary(&predictions);

    DashboardData {
        predictions,
        summary,
    }
}

/// Aggregate coverage statistics over a set of match results.
pub fn coverage_summary(results: &[MatchResult]) -> CoverageSummary {
    let total_localities = results.len();
    let matched_localities = results.iter().filter(|r| r.best_partner.is_some()).count();
    let match_percentage = if total_localities > 0 {
        matched_localities as f64 / total_localities as f64 * 100.0
    } else {
        0.0
    };

    CoverageSummary {
        total_localities,
        matched_localities,
        match_percentage,
    }
}
