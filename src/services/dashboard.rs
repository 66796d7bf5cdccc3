//! Dashboard assembly.
//!
//! Pulls the current partner and locality sets from the repository and runs
//! the matching pipeline over them. There is no cached state: every call
//! recomputes the predictions from what the repository holds right now, so
//! the dashboard always reflects the latest mutations.

use tracing::debug;

use crate::api::DashboardData;
use crate::db::repository::error::RepositoryResult;
use crate::db::repository::{FullRepository, LocalityRepository, PartnerRepository};
use crate::services::matching::match_all;

/// Build the full dashboard payload from current repository state.
pub async fn get_dashboard_data(repo: &dyn FullRepository) -> RepositoryResult<DashboardData> {
    let partners = repo.list_partners().await?;
    let localities = repo.list_localities().await?;

    debug!(
        partners = partners.len(),
        localities = localities.len(),
        "computing dashboard predictions"
    );

    Ok(match_all(&localities, &partners))
}
