//! Volunteer domain rules with zero internal dependencies.
//!
//! Everything here is pure: parameter coercion, the project and need
//! predicates, permission rules and shared constants. Persistence lives in
//! `volunteer_db`, request handling in `volunteer_api`.

pub mod error;
pub mod need;
pub mod option_group;
pub mod params;
pub mod permission;
pub mod project;
pub mod roles;
pub mod types;
