//! Volunteer domain services.
//!
//! - [`project`] -- the project entity with its memoized derived fields, and
//!   the service that creates and retrieves projects.
//! - [`project_contact`] -- create/get/delete for contact-project links.
//! - [`entity`] -- registry of entities a project can be attached to.
//! - [`options`] -- option-value lookups shared by both services.

pub mod entity;
pub mod options;
pub mod project;
pub mod project_contact;

pub use entity::{EntityRegistry, RelatedEntity, RelatedEntitySource};
pub use project::{ProjectService, VolunteerProject};
pub use project_contact::ProjectContactApi;
