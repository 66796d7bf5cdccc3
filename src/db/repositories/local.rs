//! In-memory repository implementation.
//!
//! Backs the repository traits with `parking_lot` maps for local development
//! and tests. IDs are assigned from per-entity atomic counters, so iterating
//! the underlying `BTreeMap`s yields records in insertion order.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{Locality, LocalityId, Partner, PartnerId, User, UserId};
use crate::db::repository::error::ErrorContext;
use crate::db::repository::{
    FullRepository, LocalityRepository, PartnerRepository, RepositoryError, RepositoryResult,
    UserRepository,
};

/// In-memory repository for partners, localities and users.
///
/// Cloning is cheap and clones share the same underlying storage.
#[derive(Clone)]
pub struct LocalRepository {
    partners: Arc<RwLock<BTreeMap<i64, Partner>>>,
    localities: Arc<RwLock<BTreeMap<i64, Locality>>>,
    users: Arc<RwLock<BTreeMap<i64, User>>>,
    next_partner_id: Arc<AtomicI64>,
    next_locality_id: Arc<AtomicI64>,
    next_user_id: Arc<AtomicI64>,
    healthy: Arc<AtomicBool>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            partners: Arc::new(RwLock::new(BTreeMap::new())),
            localities: Arc::new(RwLock::new(BTreeMap::new())),
            users: Arc::new(RwLock::new(BTreeMap::new())),
            next_partner_id: Arc::new(AtomicI64::new(1)),
            next_locality_id: Arc::new(AtomicI64::new(1)),
            next_user_id: Arc::new(AtomicI64::new(1)),
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle the simulated health state (test hook).
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Remove all stored records.
    pub fn clear(&self) {
        self.partners.write().clear();
        self.localities.write().clear();
        self.users.write().clear();
    }

    /// Number of stored partners.
    pub fn partner_count(&self) -> usize {
        self.partners.read().len()
    }

    /// Number of stored localities.
    pub fn locality_count(&self) -> usize {
        self.localities.read().len()
    }

    /// Number of stored users.
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    /// Whether a partner with this ID exists.
    pub fn has_partner(&self, id: PartnerId) -> bool {
        self.partners.read().contains_key(&id.value())
    }

    /// Whether a locality with this ID exists.
    pub fn has_locality(&self, id: LocalityId) -> bool {
        self.localities.read().contains_key(&id.value())
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::internal_with_context(
                "Repository unavailable",
                ErrorContext::new(operation),
            ))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PartnerRepository for LocalRepository {
    async fn create_partner(&self, partner: &Partner) -> RepositoryResult<Partner> {
        self.ensure_healthy("create_partner")?;

        let mut stored = Partner::new(partner.name.clone(), partner.network_capacity)?;
        let id = self.next_partner_id.fetch_add(1, Ordering::SeqCst);
        stored.id = Some(PartnerId::new(id));

        self.partners.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_partner(&self, id: PartnerId) -> RepositoryResult<Partner> {
        self.ensure_healthy("get_partner")?;

        self.partners.read().get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Partner {} not found", id),
                ErrorContext::new("get_partner")
                    .with_entity("partner")
                    .with_entity_id(id),
            )
        })
    }

    async fn list_partners(&self) -> RepositoryResult<Vec<Partner>> {
        self.ensure_healthy("list_partners")?;
        Ok(self.partners.read().values().cloned().collect())
    }

    async fn update_partner(&self, id: PartnerId, partner: &Partner) -> RepositoryResult<Partner> {
        self.ensure_healthy("update_partner")?;

        let mut updated = Partner::new(partner.name.clone(), partner.network_capacity)?;
        updated.id = Some(id);

        let mut partners = self.partners.write();
        if !partners.contains_key(&id.value()) {
            return Err(RepositoryError::not_found_with_context(
                format!("Partner {} not found", id),
                ErrorContext::new("update_partner")
                    .with_entity("partner")
                    .with_entity_id(id),
            ));
        }
        partners.insert(id.value(), updated.clone());
        Ok(updated)
    }

    async fn delete_partner(&self, id: PartnerId) -> RepositoryResult<()> {
        self.ensure_healthy("delete_partner")?;

        match self.partners.write().remove(&id.value()) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::not_found_with_context(
                format!("Partner {} not found", id),
                ErrorContext::new("delete_partner")
                    .with_entity("partner")
                    .with_entity_id(id),
            )),
        }
    }
}

#[async_trait]
impl LocalityRepository for LocalRepository {
    async fn create_locality(&self, locality: &Locality) -> RepositoryResult<Locality> {
        self.ensure_healthy("create_locality")?;

        let mut stored = Locality::new(
            locality.name.clone(),
            locality.avg_traffic_per_subscriber,
            locality.total_subscribers,
            locality.blocking_probability,
        )?;
        let id = self.next_locality_id.fetch_add(1, Ordering::SeqCst);
        stored.id = Some(LocalityId::new(id));

        self.localities.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_locality(&self, id: LocalityId) -> RepositoryResult<Locality> {
        self.ensure_healthy("get_locality")?;

        self.localities.read().get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Locality {} not found", id),
                ErrorContext::new("get_locality")
                    .with_entity("locality")
                    .with_entity_id(id),
            )
        })
    }

    async fn list_localities(&self) -> RepositoryResult<Vec<Locality>> {
        self.ensure_healthy("list_localities")?;
        Ok(self.localities.read().values().cloned().collect())
    }

    async fn update_locality(
        &self,
        id: LocalityId,
        locality: &Locality,
    ) -> RepositoryResult<Locality> {
        self.ensure_healthy("update_locality")?;

        let mut updated = Locality::new(
            locality.name.clone(),
            locality.avg_traffic_per_subscriber,
            locality.total_subscribers,
            locality.blocking_probability,
        )?;
        updated.id = Some(id);

        let mut localities = self.localities.write();
        if !localities.contains_key(&id.value()) {
            return Err(RepositoryError::not_found_with_context(
                format!("Locality {} not found", id),
                ErrorContext::new("update_locality")
                    .with_entity("locality")
                    .with_entity_id(id),
            ));
        }
        localities.insert(id.value(), updated.clone());
        Ok(updated)
    }

    async fn delete_locality(&self, id: LocalityId) -> RepositoryResult<()> {
        self.ensure_healthy("delete_locality")?;

        match self.localities.write().remove(&id.value()) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::not_found_with_context(
                format!("Locality {} not found", id),
                ErrorContext::new("delete_locality")
                    .with_entity("locality")
                    .with_entity_id(id),
            )),
        }
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn create_user(&self, user: &User) -> RepositoryResult<User> {
        self.ensure_healthy("create_user")?;

        let mut stored = User::new(
            user.name.clone(),
            user.email.clone(),
            user.company.clone(),
            user.role,
            user.password_digest.clone(),
        )?;

        let mut users = self.users.write();
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&stored.email))
        {
            return Err(RepositoryError::conflict_with_context(
                format!("Email {} is already registered", stored.email),
                ErrorContext::new("create_user").with_entity("user"),
            ));
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        stored.id = Some(UserId::new(id));
        users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, id: UserId) -> RepositoryResult<User> {
        self.ensure_healthy("get_user")?;

        self.users.read().get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("User {} not found", id),
                ErrorContext::new("get_user")
                    .with_entity("user")
                    .with_entity_id(id),
            )
        })
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        self.ensure_healthy("find_user_by_email")?;

        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.ensure_healthy("list_users")?;
        Ok(self.users.read().values().cloned().collect())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.healthy.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(name: &str, capacity: f64) -> Partner {
        Partner::new(name, capacity).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_partner() {
        let repo = LocalRepository::new();
        let created = repo.create_partner(&partner("AMN", 4.0)).await.unwrap();
        let id = created.id.unwrap();

        let fetched = repo.get_partner(id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_list_partners_in_insertion_order() {
        let repo = LocalRepository::new();
        repo.create_partner(&partner("AMN", 4.0)).await.unwrap();
        repo.create_partner(&partner("NURAN", 2.0)).await.unwrap();
        repo.create_partner(&partner("RURALSTAR", 8.0)).await.unwrap();

        let names: Vec<String> = repo
            .list_partners()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["AMN", "NURAN", "RURALSTAR"]);
    }

    #[tokio::test]
    async fn test_update_partner_keeps_id() {
        let repo = LocalRepository::new();
        let created = repo.create_partner(&partner("AMN", 4.0)).await.unwrap();
        let id = created.id.unwrap();

        let updated = repo
            .update_partner(id, &partner("AMN Upgraded", 6.0))
            .await
            .unwrap();
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.network_capacity, 6.0);
        assert_eq!(repo.partner_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_partner_is_not_found() {
        let repo = LocalRepository::new();
        let result = repo.delete_partner(PartnerId::new(42)).await;
        assert!(matches!(
            result,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_partner_validates_record() {
        let repo = LocalRepository::new();
        let invalid = Partner {
            id: None,
            name: "Bad".to_string(),
            network_capacity: -1.0,
        };
        let result = repo.create_partner(&invalid).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = LocalRepository::new();
        let user = User::new(
            "Admin",
            "admin@example.com",
            None,
            crate::api::Role::Admin,
            "digest",
        )
        .unwrap();
        repo.create_user(&user).await.unwrap();

        let mut again = user.clone();
        again.email = "ADMIN@example.com".to_string();
        let result = repo.create_user(&again).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConflictError { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_user_by_email_case_insensitive() {
        let repo = LocalRepository::new();
        let user = User::new(
            "Admin",
            "admin@example.com",
            None,
            crate::api::Role::Admin,
            "digest",
        )
        .unwrap();
        repo.create_user(&user).await.unwrap();

        let found = repo.find_user_by_email("Admin@Example.COM").await.unwrap();
        assert!(found.is_some());
        let missing = repo.find_user_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_unhealthy_repository_rejects_operations() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        assert!(repo.list_partners().await.is_err());
        assert!(repo.create_partner(&partner("AMN", 4.0)).await.is_err());
        assert!(!repo.health_check().await.unwrap());

        repo.set_healthy(true);
        assert!(repo.list_partners().await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let repo = LocalRepository::new();
        repo.create_partner(&partner("AMN", 4.0)).await.unwrap();
        repo.create_locality(&Locality::new("Bouake", 0.04, 15_000, 3.0).unwrap())
            .await
            .unwrap();

        repo.clear();
        assert_eq!(repo.partner_count(), 0);
        assert_eq!(repo.locality_count(), 0);
    }
}
