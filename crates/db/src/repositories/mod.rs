//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod event_repo;
pub mod need_repo;
pub mod option_value_repo;
pub mod project_contact_repo;
pub mod project_repo;

pub use assignment_repo::AssignmentRepo;
pub use event_repo::EventRepo;
pub use need_repo::NeedRepo;
pub use option_value_repo::OptionValueRepo;
pub use project_contact_repo::ProjectContactRepo;
pub use project_repo::ProjectRepo;
