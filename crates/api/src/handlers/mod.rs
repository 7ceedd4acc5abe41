pub mod volunteer_project;
pub mod volunteer_project_contact;
