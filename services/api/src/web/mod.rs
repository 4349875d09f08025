pub mod admin;
pub mod auth;
pub mod credits;
pub mod middleware;
pub mod models;
pub mod rest;
pub mod router;
pub mod state;
pub mod stories;
pub mod topics;
pub mod users;

// Re-export the router builder so the binary and integration tests can
// assemble the full application.
pub use middleware::{require_admin, require_auth};
pub use router::build_router;
