//! Project-level permission rules.

use crate::roles::{ROLE_ADMIN, ROLE_COORDINATOR};

/// Operation a caller wants to perform on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    Add,
    Update,
}

impl ProjectAction {
    /// Add when no project id is given, update otherwise.
    pub fn for_project_id(id: Option<i64>) -> Self {
        match id {
            Some(id) if id > 0 => ProjectAction::Update,
            _ => ProjectAction::Add,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectAction::Add => "add",
            ProjectAction::Update => "update",
        }
    }
}

/// Whether a caller with `role` may perform `action` on a project.
///
/// Admins and coordinators may add and update projects. Every other role is
/// denied.
pub fn check_project_perms(role: &str, action: ProjectAction) -> bool {
    match action {
        ProjectAction::Add | ProjectAction::Update => {
            role == ROLE_ADMIN || role == ROLE_COORDINATOR
        }
    }
}
