//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the calling contact from a JWT Bearer token.
//! - [`rbac::RequireCoordinator`] -- Requires `coordinator` or `admin` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated caller.

pub mod auth;
pub mod rbac;
