//! Repository trait definitions for the storage layer.
//!
//! The traits here describe storage operations per entity; concrete backends
//! live in [`crate::db::repositories`]. Splitting the traits keeps each
//! backend free to implement only what it needs while `FullRepository`
//! bundles everything the application layer works against.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{Locality, LocalityId, Partner, PartnerId, User, UserId};

/// Repository trait for partner storage.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    /// Store a new partner and assign it an ID.
    ///
    /// # Arguments
    /// * `partner` - Partner record; any caller-supplied ID is ignored
    ///
    /// # Returns
    /// * `Ok(Partner)` - Stored record with the assigned ID
    /// * `Err(RepositoryError)` - Validation or conflict failure
    async fn create_partner(&self, partner: &Partner) -> RepositoryResult<Partner>;

    /// Fetch a single partner by ID.
    async fn get_partner(&self, id: PartnerId) -> RepositoryResult<Partner>;

    /// List all partners in insertion order.
    async fn list_partners(&self) -> RepositoryResult<Vec<Partner>>;

    /// Replace an existing partner's data, keeping its ID.
    ///
    /// # Arguments
    /// * `id` - ID of the partner to update
    /// * `partner` - New field values; the record's own `id` is ignored
    ///
    /// # Returns
    /// * `Ok(Partner)` - Updated record
    /// * `Err(RepositoryError::NotFound)` - No partner with that ID
    async fn update_partner(&self, id: PartnerId, partner: &Partner) -> RepositoryResult<Partner>;

    /// Delete a partner by ID.
    ///
    /// # Returns
    /// * `Ok(())` - Partner removed
    /// * `Err(RepositoryError::NotFound)` - No partner with that ID
    async fn delete_partner(&self, id: PartnerId) -> RepositoryResult<()>;
}

/// Repository trait for locality storage.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait LocalityRepository: Send + Sync {
    /// Store a new locality and assign it an ID.
    async fn create_locality(&self, locality: &Locality) -> RepositoryResult<Locality>;

    /// Fetch a single locality by ID.
    async fn get_locality(&self, id: LocalityId) -> RepositoryResult<Locality>;

    /// List all localities in insertion order.
    async fn list_localities(&self) -> RepositoryResult<Vec<Locality>>;

    /// Replace an existing locality's data, keeping its ID.
    async fn update_locality(
        &self,
        id: LocalityId,
        locality: &Locality,
    ) -> RepositoryResult<Locality>;

    /// Delete a locality by ID.
    async fn delete_locality(&self, id: LocalityId) -> RepositoryResult<()>;
}

/// Repository trait for user accounts.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user and assign it an ID.
    ///
    /// # Returns
    /// * `Ok(User)` - Stored record with the assigned ID
    /// * `Err(RepositoryError::ConflictError)` - Email already registered
    async fn create_user(&self, user: &User) -> RepositoryResult<User>;

    /// Fetch a single user by ID.
    async fn get_user(&self, id: UserId) -> RepositoryResult<User>;

    /// Look up a user by login email (case-insensitive).
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Matching account
    /// * `Ok(None)` - No account with that email
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// List all users in insertion order.
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
}

/// Combined repository interface the application layer works against.
#[async_trait]
pub trait FullRepository: PartnerRepository + LocalityRepository + UserRepository {
    /// Check the storage backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
