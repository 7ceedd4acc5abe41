//! Shared helpers for `volunteer-api` integration tests.
//!
//! [`MemoryStore`] implements `VolunteerStore` over plain vectors so the
//! domain services and the router can be exercised without PostgreSQL. It
//! seeds the same option values as the migrations.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use volunteer_api::auth::jwt::{generate_access_token, JwtConfig};
use volunteer_api::config::ServerConfig;
use volunteer_api::router::build_app_router;
use volunteer_api::state::AppState;
use volunteer_api::volunteer::{EntityRegistry, ProjectContactApi, ProjectService};
use volunteer_core::need::assignment_status;
use volunteer_core::types::{DbId, Timestamp};
use volunteer_db::models::event::Event;
use volunteer_db::models::need::{CreateNeed, Need};
use volunteer_db::models::option_value::OptionValue;
use volunteer_db::models::project::{
    CreateProject, Project, ProjectFilter, ProjectWrite, UpdateProject,
};
use volunteer_db::models::project_contact::{
    ContactLink, CreateProjectContact, ProjectContact, ProjectContactFilter, UpdateProjectContact,
};
use volunteer_db::store::VolunteerStore;

pub const TEST_JWT_SECRET: &str = "test-secret-for-volunteer-api";

/// Visibility id of the seeded `public` option.
pub const PUBLIC: DbId = 1;
/// Visibility id of the seeded `admin` option.
pub const ADMIN_ONLY: DbId = 2;

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    next_id: DbId,
    projects: Vec<Project>,
    contacts: Vec<ProjectContact>,
    needs: Vec<Need>,
    /// `(need_id, status)` per assignment.
    assignments: Vec<(DbId, String)>,
    events: Vec<Event>,
    options: Vec<OptionValue>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn insert_project(&mut self, input: &CreateProject) -> Project {
        let now = Utc::now();
        let project = Project {
            id: self.next_id(),
            entity_table: input.entity_table.clone(),
            entity_id: input.entity_id,
            title: input.title.clone(),
            description: input.description.clone(),
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        self.projects.push(project.clone());
        project
    }

    fn update_project(&mut self, id: DbId, input: &UpdateProject) -> Option<Project> {
        let p = self.projects.iter_mut().find(|p| p.id == id)?;
        if let Some(v) = &input.entity_table {
            p.entity_table = v.clone();
        }
        if let Some(v) = input.entity_id {
            p.entity_id = v;
        }
        if let Some(v) = &input.title {
            p.title = v.clone();
        }
        if let Some(v) = &input.description {
            p.description = Some(v.clone());
        }
        if let Some(v) = input.is_active {
            p.is_active = v;
        }
        p.updated_at = Utc::now();
        Some(p.clone())
    }

    fn insert_contact(&mut self, input: &CreateProjectContact) -> ProjectContact {
        let now = Utc::now();
        let contact = ProjectContact {
            id: self.next_id(),
            project_id: input.project_id,
            contact_id: input.contact_id,
            relationship_type_id: input.relationship_type_id,
            created_at: now,
            updated_at: now,
        };
        self.contacts.push(contact.clone());
        contact
    }
}

/// `VolunteerStore` over in-memory tables.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Number of `list_visible_needs` calls, for memoization checks.
    pub need_queries: Mutex<usize>,
}

impl MemoryStore {
    /// Store seeded with the option values the migrations insert.
    pub fn seeded() -> Self {
        let store = Self::default();
        for (value, name, label) in [
            ("1", "volunteer_owner", "Owner"),
            ("2", "volunteer_manager", "Manager"),
            ("3", "volunteer_beneficiary", "Beneficiary"),
        ] {
            store.add_option("volunteer_project_relationship", value, name, label);
        }
        store.add_option("visibility", "1", "public", "Public");
        store.add_option("visibility", "2", "admin", "Admin");
        store.add_option("volunteer_role", "1", "volunteer_general", "Volunteer");
        store
    }

    pub fn add_option(&self, group: &str, value: &str, name: &str, label: &str) {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.options.push(OptionValue {
            id,
            option_group: group.to_string(),
            value: value.to_string(),
            name: name.to_string(),
            label: label.to_string(),
            weight: 0,
            is_active: true,
        });
    }

    pub fn add_event(&self, title: &str, start: Timestamp, end: Option<Timestamp>) -> Event {
        let mut t = self.tables.lock().unwrap();
        let event = Event {
            id: t.next_id(),
            title: title.to_string(),
            start_date: start,
            end_date: end,
        };
        t.events.push(event.clone());
        event
    }

    pub fn add_need(&self, input: CreateNeed) -> Need {
        let mut t = self.tables.lock().unwrap();
        let need = Need {
            id: t.next_id(),
            project_id: input.project_id,
            role_id: input.role_id,
            is_flexible: input.is_flexible,
            start_time: input.start_time,
            duration: input.duration,
            quantity: input.quantity,
            visibility_id: input.visibility_id,
            is_active: input.is_active,
        };
        t.needs.push(need.clone());
        need
    }

    pub fn add_assignments(&self, need_id: DbId, status: &str, count: usize) {
        let mut t = self.tables.lock().unwrap();
        for _ in 0..count {
            t.assignments.push((need_id, status.to_string()));
        }
    }

    pub fn projects(&self) -> Vec<Project> {
        self.tables.lock().unwrap().projects.clone()
    }

    pub fn contacts(&self) -> Vec<ProjectContact> {
        self.tables.lock().unwrap().contacts.clone()
    }

    pub fn need_query_count(&self) -> usize {
        *self.need_queries.lock().unwrap()
    }
}

#[async_trait]
impl VolunteerStore for MemoryStore {
    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn save_project(
        &self,
        write: &ProjectWrite,
        contacts: &[ContactLink],
    ) -> Result<Option<(Project, Vec<ProjectContact>)>, sqlx::Error> {
        // One lock for the whole save keeps it atomic.
        let mut t = self.tables.lock().unwrap();
        let project = match write {
            ProjectWrite::Create(input) => t.insert_project(input),
            ProjectWrite::Update(id, input) => match t.update_project(*id, input) {
                Some(project) => project,
                None => return Ok(None),
            },
        };
        let linked = contacts
            .iter()
            .map(|link| t.insert_contact(&link.for_project(project.id)))
            .collect();
        Ok(Some((project, linked)))
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<Project> = t
            .projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    async fn insert_project_contact(
        &self,
        input: &CreateProjectContact,
    ) -> Result<ProjectContact, sqlx::Error> {
        Ok(self.tables.lock().unwrap().insert_contact(input))
    }

    async fn update_project_contact(
        &self,
        id: DbId,
        input: &UpdateProjectContact,
    ) -> Result<Option<ProjectContact>, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        let Some(c) = t.contacts.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(v) = input.project_id {
            c.project_id = v;
        }
        if let Some(v) = input.contact_id {
            c.contact_id = v;
        }
        if let Some(v) = input.relationship_type_id {
            c.relationship_type_id = v;
        }
        c.updated_at = Utc::now();
        Ok(Some(c.clone()))
    }

    async fn list_project_contacts(
        &self,
        filter: &ProjectContactFilter,
    ) -> Result<Vec<ProjectContact>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.contacts
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn delete_project_contact(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut t = self.tables.lock().unwrap();
        let before = t.contacts.len();
        t.contacts.retain(|c| c.id != id);
        Ok(t.contacts.len() < before)
    }

    async fn list_visible_needs(
        &self,
        project_id: DbId,
        visibility_id: DbId,
    ) -> Result<Vec<Need>, sqlx::Error> {
        *self.need_queries.lock().unwrap() += 1;
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<Need> = t
            .needs
            .iter()
            .filter(|n| {
                n.project_id == project_id && n.visibility_id == visibility_id && n.is_active
            })
            .cloned()
            .collect();
        // NULL start times first, as in PostgreSQL's `ASC NULLS FIRST`.
        rows.sort_by_key(|n| (n.start_time, n.id));
        Ok(rows)
    }

    async fn count_assignments(&self, need_id: DbId) -> Result<i64, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        let count = t
            .assignments
            .iter()
            .filter(|(id, status)| *id == need_id && status != assignment_status::CANCELLED)
            .count();
        Ok(count as i64)
    }

    async fn list_active_flexible_need_ids(
        &self,
        project_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.needs
            .iter()
            .filter(|n| n.project_id == project_id && n.is_flexible && n.is_active)
            .map(|n| n.id)
            .collect())
    }

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.events.iter().find(|e| e.id == id).cloned())
    }

    async fn find_option_values(
        &self,
        group: &str,
        value: &str,
    ) -> Result<Vec<OptionValue>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.options
            .iter()
            .filter(|o| o.option_group == group && o.value == value)
            .cloned()
            .collect())
    }

    async fn find_option_values_by_name(
        &self,
        group: &str,
        name: &str,
    ) -> Result<Vec<OptionValue>, sqlx::Error> {
        let t = self.tables.lock().unwrap();
        Ok(t.options
            .iter()
            .filter(|o| o.option_group == group && o.name == name)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Services and fixtures
// ---------------------------------------------------------------------------

pub fn services(store: &Arc<MemoryStore>) -> (ProjectService, ProjectContactApi) {
    let store: Arc<dyn VolunteerStore> = store.clone();
    let entities = Arc::new(EntityRegistry::with_defaults(Arc::clone(&store)));
    (
        ProjectService::new(Arc::clone(&store), entities),
        ProjectContactApi::new(store),
    )
}

/// Insert a project directly, bypassing permission checks.
pub async fn seed_project(store: &MemoryStore, entity_id: DbId, title: &str) -> Project {
    let write = ProjectWrite::Create(CreateProject {
        entity_table: "event".into(),
        entity_id,
        title: title.into(),
        description: None,
        is_active: true,
    });
    let (project, _) = store.save_project(&write, &[]).await.unwrap().unwrap();
    project
}

pub async fn seed_contact(
    store: &MemoryStore,
    project_id: DbId,
    contact_id: DbId,
    relationship_type_id: DbId,
) -> ProjectContact {
    store
        .insert_project_contact(&CreateProjectContact {
            project_id,
            contact_id,
            relationship_type_id,
        })
        .await
        .unwrap()
}

/// An active, public, fixed-role need starting `hours` from now.
pub fn fixed_need(project_id: DbId, role_id: DbId, hours: i64, quantity: i32) -> CreateNeed {
    CreateNeed {
        project_id,
        role_id: Some(role_id),
        is_flexible: false,
        start_time: Some(Utc::now() + Duration::hours(hours)),
        duration: Some(60),
        quantity: Some(quantity),
        visibility_id: PUBLIC,
        is_active: true,
    }
}

/// An active, public flexible need with no start time.
pub fn flexible_need(project_id: DbId) -> CreateNeed {
    CreateNeed {
        project_id,
        role_id: None,
        is_flexible: true,
        start_time: None,
        duration: None,
        quantity: None,
        visibility_id: PUBLIC,
        is_active: true,
    }
}

pub fn params(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().unwrap()
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over `store`.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_app_router(AppState::new(test_config(), store))
}

/// Mint a Bearer token for `contact_id` with `role`.
pub fn token(contact_id: DbId, role: &str) -> String {
    generate_access_token(contact_id, role, &test_config().jwt).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(json)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
