//! Option groups consulted by the volunteer module.
//!
//! Must match the seed data in `20260301000005_create_option_values.sql`.

/// Relationship types between a contact and a project.
pub const RELATIONSHIP_OPTION_GROUP: &str = "volunteer_project_relationship";

/// Volunteer roles a need can ask for.
pub const ROLE_OPTION_GROUP: &str = "volunteer_role";

/// Need visibility levels.
pub const VISIBILITY_OPTION_GROUP: &str = "visibility";

/// Name of the publicly visible option in [`VISIBILITY_OPTION_GROUP`].
pub const VISIBILITY_PUBLIC: &str = "public";
