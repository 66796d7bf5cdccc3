//! Tests for db::repository::error module.

use telepredict::db::repository::{ErrorContext, RepositoryError};

// =========================================================
// ErrorContext
// =========================================================

#[test]
fn test_error_context_new() {
    let ctx = ErrorContext::new("create_partner");
    assert_eq!(ctx.operation, Some("create_partner".to_string()));
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
}

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("update_locality")
        .with_entity("locality")
        .with_entity_id(42)
        .with_details("blocking probability out of range");

    assert_eq!(ctx.operation, Some("update_locality".to_string()));
    assert_eq!(ctx.entity, Some("locality".to_string()));
    assert_eq!(ctx.entity_id, Some("42".to_string()));
    assert_eq!(
        ctx.details,
        Some("blocking probability out of range".to_string())
    );
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("get_partner")
        .with_entity("partner")
        .with_entity_id(7);

    let display = format!("{}", ctx);
    assert!(display.contains("operation=get_partner"));
    assert!(display.contains("entity=partner"));
    assert!(display.contains("id=7"));
}

#[test]
fn test_error_context_display_with_details() {
    let ctx = ErrorContext::new("seed").with_details("duplicate email");
    let display = format!("{}", ctx);
    assert!(display.contains("details=duplicate email"));
}

#[test]
fn test_error_context_default_is_empty() {
    let ctx = ErrorContext::default();
    assert!(ctx.operation.is_none());
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
    assert_eq!(format!("{}", ctx), "[]");
}

// =========================================================
// RepositoryError Constructors
// =========================================================

#[test]
fn test_not_found_error() {
    let err = RepositoryError::not_found("Partner with ID 9 not found");
    assert!(err.to_string().contains("Not found"));
    assert!(err.to_string().contains("Partner with ID 9 not found"));
}

#[test]
fn test_not_found_with_context() {
    let ctx = ErrorContext::new("get_partner").with_entity("partner").with_entity_id(9);
    let err = RepositoryError::not_found_with_context("Partner with ID 9 not found", ctx);

    let message = err.to_string();
    assert!(message.contains("operation=get_partner"));
    assert!(message.contains("id=9"));
}

#[test]
fn test_validation_error() {
    let err = RepositoryError::validation("Network capacity must be a positive number of TRX");
    assert!(err.to_string().contains("Data validation error"));
}

#[test]
fn test_conflict_error() {
    let err = RepositoryError::conflict("email already registered");
    assert!(err.to_string().contains("Conflict"));
}

#[test]
fn test_configuration_error() {
    let err = RepositoryError::configuration("Unknown session store kind: redis");
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_internal_error() {
    let err = RepositoryError::internal("Repository unavailable");
    assert!(err.to_string().contains("Internal error"));
}

// =========================================================
// Context Access and Editing
// =========================================================

#[test]
fn test_context_accessor() {
    let ctx = ErrorContext::new("list_partners").with_entity("partner");
    let err = RepositoryError::internal_with_context("Repository unavailable", ctx);

    assert_eq!(err.context().operation, Some("list_partners".to_string()));
    assert_eq!(err.context().entity, Some("partner".to_string()));
}

#[test]
fn test_with_operation_overrides_context() {
    let err = RepositoryError::not_found("missing").with_operation("delete_locality");
    assert_eq!(err.context().operation, Some("delete_locality".to_string()));
}

// =========================================================
// String Conversions
// =========================================================

#[test]
fn test_record_validation_strings_become_validation_errors() {
    // Record constructors return plain strings; the repository layer lifts
    // them into validation errors.
    let err: RepositoryError = "Partner name must not be empty".to_string().into();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let err: RepositoryError = "Email address is not valid".into();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}
