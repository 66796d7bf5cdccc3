//! Mock authentication layer.
//!
//! Identity for the dashboard is deliberately lightweight: accounts live in
//! the same repository as the planning data, passwords are stored as SHA-256
//! digests, and sessions are opaque tokens held by a swappable
//! [`SessionStore`]. The pieces compose into one [`AuthService`] consumed by
//! the HTTP layer.
//!
//! Submodules:
//! - [`password`]: digest and verification helpers
//! - [`session`]: session records plus in-memory and file-backed stores
//! - [`service`]: login, registration, token resolution, password reset

pub mod password;
pub mod service;
pub mod session;

pub use service::{AuthError, AuthService, MIN_PASSWORD_LEN};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
