//! Demo seed data for local development.
//!
//! Mirrors the deployment's launch dataset: the three network partners and
//! two demo accounts. Localities start empty so operators enter their own
//! service areas. Seeding is idempotent per partner name and user email.

use tracing::info;

use crate::auth::password::hash_password;
use crate::db::models::{Partner, Role, User};
use crate::db::repository::{
    FullRepository, PartnerRepository, RepositoryResult, UserRepository,
};

/// Default password for the demo accounts.
const DEMO_PASSWORD: &str = "password123";

fn seed_partners() -> Vec<(&'static str, f64)> {
    vec![("AMN", 4.0), ("NURAN", 2.0), ("RURALSTAR", 8.0)]
}

fn seed_users() -> Vec<(&'static str, &'static str, &'static str, Role)> {
    vec![
        ("Admin Test", "admin@example.com", "TelecomPredict", Role::Admin),
        ("User Test", "user@example.com", "Client Company", Role::User),
    ]
}

/// Populate the repository with the demo dataset.
///
/// Records already present (matched by partner name or user email) are left
/// untouched, so calling this on a non-empty repository is safe.
pub async fn seed_repository(repo: &dyn FullRepository) -> RepositoryResult<()> {
    let existing_partners = repo.list_partners().await?;
    let mut created_partners = 0;
    for (name, capacity) in seed_partners() {
        if existing_partners.iter().any(|p| p.name == name) {
            continue;
        }
        let partner = Partner::new(name, capacity)?;
        repo.create_partner(&partner).await?;
        created_partners += 1;
    }

    let digest = hash_password(DEMO_PASSWORD);
    let mut created_users = 0;
    for (name, email, company, role) in seed_users() {
        if repo.find_user_by_email(email).await?.is_some() {
            continue;
        }
        let user = User::new(name, email, Some(company.to_string()), role, digest.clone())?;
        repo.create_user(&user).await?;
        created_users += 1;
    }

    info!(
        partners = created_partners,
        users = created_users,
        "seeded repository with demo data"
    );
    Ok(())
}
