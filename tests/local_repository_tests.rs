//! Expanded tests for LocalRepository.
//!
//! These tests cover concurrent access patterns, edge cases, error conditions,
//! and insertion-order guarantees for the in-memory repository implementation.

use std::sync::Arc;

use telepredict::api::{Locality, LocalityId, Partner, PartnerId, Role, User};
use telepredict::db::repositories::LocalRepository;
use telepredict::db::repository::{
    FullRepository, LocalityRepository, PartnerRepository, RepositoryError, UserRepository,
};

fn test_partner(name: &str, capacity: f64) -> Partner {
    Partner::new(name, capacity).unwrap()
}

fn test_locality(name: &str) -> Locality {
    Locality::new(name, 0.05, 10_000, 3.0).unwrap()
}

fn test_user(email: &str) -> User {
    User::new("Test User", email, None, Role::User, "digest").unwrap()
}

// =========================================================
// Concurrent Access Tests
// =========================================================

#[tokio::test]
async fn test_concurrent_partner_creates() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = vec![];
    for i in 0..10 {
        let repo_clone = Arc::clone(&repo);
        let handle = tokio::spawn(async move {
            let partner = test_partner(&format!("partner_{}", i), (i + 1) as f64);
            repo_clone.create_partner(&partner).await
        });
        handles.push(handle);
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }

    let partners = repo.list_partners().await.unwrap();
    assert_eq!(partners.len(), 10);

    // IDs are unique even under contention.
    let mut ids: Vec<i64> = partners.iter().filter_map(|p| p.id.map(|i| i.value())).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_concurrent_reads_and_writes() {
    let repo = Arc::new(LocalRepository::new());
    let initial = repo.create_partner(&test_partner("initial", 4.0)).await.unwrap();
    let initial_id = initial.id.unwrap();

    let mut read_handles = vec![];
    let mut write_handles = vec![];

    for _ in 0..10 {
        let repo_clone = Arc::clone(&repo);
        read_handles.push(tokio::spawn(
            async move { repo_clone.get_partner(initial_id).await },
        ));
    }

    for i in 0..5 {
        let repo_clone = Arc::clone(&repo);
        write_handles.push(tokio::spawn(async move {
            let locality = test_locality(&format!("concurrent_{}", i));
            repo_clone.create_locality(&locality).await
        }));
    }

    for handle in read_handles {
        assert!(handle.await.unwrap().is_ok());
    }
    for handle in write_handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(repo.locality_count(), 5);
}

#[tokio::test]
async fn test_concurrent_health_checks() {
    let repo = Arc::new(LocalRepository::new());

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo_clone = Arc::clone(&repo);
            tokio::spawn(async move { repo_clone.health_check().await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }
}

// =========================================================
// Ordering Guarantees
// =========================================================

#[tokio::test]
async fn test_partners_listed_in_insertion_order() {
    let repo = LocalRepository::new();
    for name in ["AMN", "NURAN", "RURALSTAR"] {
        repo.create_partner(&test_partner(name, 4.0)).await.unwrap();
    }

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
async fn test_insertion_order_survives_deletes() {
    let repo = LocalRepository::new();
    let mut ids = vec![];
    for name in ["first", "second", "third", "fourth"] {
        let created = repo.create_locality(&test_locality(name)).await.unwrap();
        ids.push(created.id.unwrap());
    }

    repo.delete_locality(ids[1]).await.unwrap();
    repo.create_locality(&test_locality("fifth")).await.unwrap();

    let names: Vec<String> = repo
        .list_localities()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();

    // Deleted IDs are never reused, so later creates sort after survivors.
    assert_eq!(names, vec!["first", "third", "fourth", "fifth"]);
}

// =========================================================
// CRUD Edge Cases
// =========================================================

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let repo = LocalRepository::new();

    let a = repo.create_partner(&test_partner("a", 1.0)).await.unwrap();
    let b = repo.create_partner(&test_partner("b", 2.0)).await.unwrap();

    assert_eq!(a.id, Some(PartnerId::new(1)));
    assert_eq!(b.id, Some(PartnerId::new(2)));
}

#[tokio::test]
async fn test_update_preserves_identity() {
    let repo = LocalRepository::new();
    let created = repo.create_partner(&test_partner("before", 2.0)).await.unwrap();
    let id = created.id.unwrap();

    let updated = repo
        .update_partner(id, &test_partner("after", 9.0))
        .await
        .unwrap();

    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.name, "after");
    assert_eq!(repo.get_partner(id).await.unwrap().network_capacity, 9.0);
}

#[tokio::test]
async fn test_get_missing_partner_is_not_found() {
    let repo = LocalRepository::new();

    let result = repo.get_partner(PartnerId::new(42)).await;

    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_is_terminal() {
    let repo = LocalRepository::new();
    let created = repo.create_locality(&test_locality("short-lived")).await.unwrap();
    let id = created.id.unwrap();

    repo.delete_locality(id).await.unwrap();

    assert!(repo.get_locality(id).await.is_err());
    assert!(matches!(
        repo.delete_locality(id).await,
        Err(RepositoryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_missing_locality_is_not_found() {
    let repo = LocalRepository::new();

    let result = repo
        .update_locality(LocalityId::new(7), &test_locality("ghost"))
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
async fn test_names_with_special_characters() {
    let repo = LocalRepository::new();

    let created = repo
        .create_locality(&test_locality("Bouaké / Gbêkê (zone 2)"))
        .await
        .unwrap();

    let fetched = repo.get_locality(created.id.unwrap()).await.unwrap();
    assert_eq!(fetched.name, "Bouaké / Gbêkê (zone 2)");
}

#[tokio::test]
async fn test_duplicate_partner_names_are_allowed() {
    let repo = LocalRepository::new();

    repo.create_partner(&test_partner("twin", 2.0)).await.unwrap();
    repo.create_partner(&test_partner("twin", 4.0)).await.unwrap();

    assert_eq!(repo.partner_count(), 2);
}

// =========================================================
// User Storage
// =========================================================

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let repo = LocalRepository::new();
    repo.create_user(&test_user("planner@example.com")).await.unwrap();

    let result = repo.create_user(&test_user("PLANNER@example.com")).await;

    assert!(matches!(result, Err(RepositoryError::ConflictError { .. })));
    assert_eq!(repo.user_count(), 1);
}

#[tokio::test]
async fn test_find_user_by_email_is_case_insensitive() {
    let repo = LocalRepository::new();
    repo.create_user(&test_user("planner@example.com")).await.unwrap();

    let found = repo.find_user_by_email("Planner@Example.COM").await.unwrap();

    assert_eq!(found.unwrap().email, "planner@example.com");
}

// =========================================================
// Health and Reset
// =========================================================

#[tokio::test]
async fn test_unhealthy_repository_rejects_operations() {
    let repo = LocalRepository::new();
    repo.create_partner(&test_partner("early", 2.0)).await.unwrap();

    repo.set_healthy(false);

    assert!(repo.list_partners().await.is_err());
    assert!(repo.create_partner(&test_partner("late", 2.0)).await.is_err());
    assert!(!repo.health_check().await.unwrap());

    repo.set_healthy(true);
    assert_eq!(repo.list_partners().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_clear_empties_every_store() {
    let repo = LocalRepository::new();
    repo.create_partner(&test_partner("p", 2.0)).await.unwrap();
    repo.create_locality(&test_locality("l")).await.unwrap();
    repo.create_user(&test_user("u@example.com")).await.unwrap();

    repo.clear();

    assert_eq!(repo.partner_count(), 0);
    assert_eq!(repo.locality_count(), 0);
    assert_eq!(repo.user_count(), 0);
}

#[tokio::test]
async fn test_clones_share_underlying_state() {
    let repo = LocalRepository::new();
    let clone = repo.clone();

    repo.create_partner(&test_partner("shared", 2.0)).await.unwrap();

    assert_eq!(clone.partner_count(), 1);
    assert!(clone.has_partner(PartnerId::new(1)));
}

// =========================================================
// Volume
// =========================================================

#[tokio::test]
async fn test_many_partners() {
    let repo = LocalRepository::new();

    for i in 0..100 {
        repo.create_partner(&test_partner(&format!("partner_{}", i), (i + 1) as f64))
            .await
            .unwrap();
    }

    let partners = repo.list_partners().await.unwrap();
    assert_eq!(partners.len(), 100);
    assert_eq!(partners[99].name, "partner_99");
}
