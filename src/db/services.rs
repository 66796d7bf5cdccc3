//! High-level service functions over the repository traits.
//!
//! These functions are the recommended entry points for application code:
//! they wrap the repository operations with logging and keep handlers free
//! of storage details. All functions work with any `FullRepository`
//! implementation.

use tracing::{debug, info};

use crate::db::models::{Locality, LocalityId, Partner, PartnerId, User};
use crate::db::repository::{
    FullRepository, LocalityRepository, PartnerRepository, RepositoryResult, UserRepository,
};

/// Check the storage backend is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

// =========================================================
// Partners
// =========================================================

/// List all partners in insertion order.
pub async fn list_partners(repo: &dyn FullRepository) -> RepositoryResult<Vec<Partner>> {
    let partners = repo.list_partners().await?;
    debug!(count = partners.len(), "listed partners");
    Ok(partners)
}

/// Fetch a single partner.
pub async fn get_partner(repo: &dyn FullRepository, id: PartnerId) -> RepositoryResult<Partner> {
    repo.get_partner(id).await
}

/// Store a new partner.
pub async fn create_partner(
    repo: &dyn FullRepository,
    partner: &Partner,
) -> RepositoryResult<Partner> {
    let created = repo.create_partner(partner).await?;
    info!(
        partner = %created.name,
        capacity = created.network_capacity,
        "created partner"
    );
    Ok(created)
}

/// Replace an existing partner's data.
pub async fn update_partner(
    repo: &dyn FullRepository,
    id: PartnerId,
    partner: &Partner,
) -> RepositoryResult<Partner> {
    let updated = repo.update_partner(id, partner).await?;
    info!(partner = %updated.name, id = %id, "updated partner");
    Ok(updated)
}

/// Delete a partner.
pub async fn delete_partner(repo: &dyn FullRepository, id: PartnerId) -> RepositoryResult<()> {
    repo.delete_partner(id).await?;
    info!(id = %id, "deleted partner");
    Ok(())
}

// =========================================================
// Localities
// =========================================================

/// List all localities in insertion order.
pub async fn list_localities(repo: &dyn FullRepository) -> RepositoryResult<Vec<Locality>> {
    let localities = repo.list_localities().await?;
    debug!(count = localities.len(), "listed localities");
    Ok(localities)
}

/// Fetch a single locality.
pub async fn get_locality(
    repo: &dyn FullRepository,
    id: LocalityId,
) -> RepositoryResult<Locality> {
    repo.get_locality(id).await
}

/// Store a new locality.
pub async fn create_locality(
    repo: &dyn FullRepository,
    locality: &Locality,
) -> RepositoryResult<Locality> {
    let created = repo.create_locality(locality).await?;
    info!(
        locality = %created.name,
        subscribers = created.total_subscribers,
        "created locality"
    );
    Ok(created)
}

/// Replace an existing locality's data.
pub async fn update_locality(
    repo: &dyn FullRepository,
    id: LocalityId,
    locality: &Locality,
) -> RepositoryResult<Locality> {
    let updated = repo.update_locality(id, locality).await?;
    info!(locality = %updated.name, id = %id, "updated locality");
    Ok(updated)
}

/// Delete a locality.
pub async fn delete_locality(repo: &dyn FullRepository, id: LocalityId) -> RepositoryResult<()> {
    repo.delete_locality(id).await?;
    info!(id = %id, "deleted locality");
    Ok(())
}

// =========================================================
// Users
// =========================================================

/// List all registered users.
pub async fn list_users(repo: &dyn FullRepository) -> RepositoryResult<Vec<User>> {
    repo.list_users().await
}
