//! # TelecomPredict Backend
//!
//! Capacity-planning engine for rural mobile network rollouts.
//!
//! This crate provides the backend for the TelecomPredict partner-matching
//! dashboard. It estimates how many TRX units a locality needs from its
//! traffic profile, matches localities against infrastructure partners with
//! enough deployable capacity, and exposes the results over a REST API via
//! Axum for the dashboard frontend.
//!
//! ## Features
//!
//! - **Capacity Estimation**: Erlang-based TRX requirements per locality
//! - **Partner Matching**: Compatible-partner search with best-fit selection
//! - **Coverage Summary**: Fleet-wide match statistics for the dashboard
//! - **CRUD**: Partner and locality management behind a repository trait
//! - **Mock Auth**: Session tokens, registration, and password digests
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Core records (partners, localities, users) and ID newtypes
//! - [`db`]: Repository pattern, in-memory storage, config and seeding
//! - [`services`]: Capacity estimation, matching, and dashboard assembly
//! - [`auth`]: Password digests, sessions, and the auth service
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod auth;

pub mod db;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
