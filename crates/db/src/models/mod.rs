//! Database row models and DTOs.

pub mod assignment;
pub mod event;
pub mod need;
pub mod option_value;
pub mod project;
pub mod project_contact;
