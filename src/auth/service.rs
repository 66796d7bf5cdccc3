//! Authentication workflows over a repository and a session store.
//!
//! [`AuthService`] is the single entry point the HTTP layer uses for
//! identity: logging in, registering, resolving a bearer token back to a
//! user, and the mock password-reset flow. It owns no state of its own
//! beyond outstanding reset tokens; users live in the repository and
//! sessions in the [`SessionStore`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{Role, User};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{Session, SessionStore};
use crate::db::repository::{FullRepository, RepositoryError, UserRepository};

/// Minimum accepted password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 8;

// ============================================================================
// Errors
// ============================================================================

/// Failures surfaced by authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately a single variant so
    /// responses cannot reveal which of the two failed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration attempted with an email that already has an account.
    #[error("An account with email '{0}' already exists")]
    EmailTaken(String),

    /// Registration attempted with a password below [`MIN_PASSWORD_LEN`].
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,

    /// Bearer token missing, unknown, or no longer valid.
    #[error("Not authenticated")]
    Unauthorized,

    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ============================================================================
// Service
// ============================================================================

/// Identity operations for the dashboard.
///
/// # Thread Safety
///
/// Cloning shares the repository, session store, and reset-token table, so
/// one instance can be handed to every request handler.
#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn FullRepository>,
    sessions: Arc<dyn SessionStore>,
    /// Outstanding password-reset tokens, keyed by token. The mock flow
    /// issues them but redemption is left to a future delivery channel.
    reset_tokens: Arc<RwLock<HashMap<String, String>>>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn FullRepository>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            repository,
            sessions,
            reset_tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Authenticate an email/password pair and open a session.
    ///
    /// # Arguments
    ///
    /// * `email` - Login email, matched case-insensitively
    /// * `password` - Raw password to check against the stored digest
    /// * `remember` - When true the session is marked persistent and
    ///   survives a restart if the store supports it
    ///
    /// # Returns
    ///
    /// The freshly opened [`Session`], or [`AuthError::InvalidCredentials`]
    /// for any unknown email or password mismatch.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<Session, AuthError> {
        let user = self
            .repository
            .find_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_digest) {
            warn!(email = %user.email, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.open_session(&user, remember)?;
        info!(email = %user.email, persistent = remember, "user logged in");
        Ok(session)
    }

    /// Create an account and immediately open a session for it.
    ///
    /// New accounts always get the `User` role; the seeded administrator is
    /// the only `Admin`. Registration keeps the new account signed in across
    /// restarts, so the session is persistent.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        company: Option<String>,
    ) -> Result<Session, AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let candidate = User::new(name, email, company, Role::User, hash_password(password))
            .map_err(RepositoryError::validation)?;

        let created = self
            .repository
            .create_user(&candidate)
            .await
            .map_err(|e| match e {
                RepositoryError::ConflictError { .. } => AuthError::EmailTaken(email.to_string()),
                other => AuthError::Repository(other),
            })?;

        let session = self.open_session(&created, true)?;
        info!(email = %created.email, "user registered");
        Ok(session)
    }

    /// Drop the session for a token. Unknown tokens are ignored so logout
    /// is always safe to call.
    pub fn logout(&self, token: &str) {
        self.sessions.clear(token);
    }

    /// Resolve a bearer token to its user.
    pub async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let session = self.sessions.load(token).ok_or(AuthError::Unauthorized)?;
        match self.repository.get_user(session.user_id).await {
            Ok(user) => Ok(user),
            // A session whose user has vanished is dead; drop it.
            Err(RepositoryError::NotFound { .. }) => {
                self.sessions.clear(token);
                Err(AuthError::Unauthorized)
            }
            Err(other) => Err(AuthError::Repository(other)),
        }
    }

    /// Issue a password-reset token for an email.
    ///
    /// Always succeeds from the caller's point of view: whether the email
    /// has an account or not, the response is the same, so the endpoint
    /// cannot be used to probe for registered addresses. In this mock flow
    /// the token is only logged, never delivered.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        if let Some(user) = self.repository.find_user_by_email(email).await? {
            let token = Uuid::new_v4().to_string();
            self.reset_tokens
                .write()
                .insert(token.clone(), user.email.clone());
            info!(email = %user.email, token = %token, "password reset requested");
        }
        Ok(())
    }

    /// Number of reset tokens issued and not yet redeemed.
    pub fn pending_reset_count(&self) -> usize {
        self.reset_tokens.read().len()
    }

    fn open_session(&self, user: &User, persistent: bool) -> Result<Session, AuthError> {
        // Repositories assign IDs on create, so a stored user without one is
        // an internal invariant violation rather than a client error.
        let user_id = user
            .id
            .ok_or_else(|| RepositoryError::internal("stored user is missing an ID"))?;
        let session = Session::new(user_id, &user.email, persistent);
        self.sessions.save(session.clone());
        Ok(session)
    }
}
