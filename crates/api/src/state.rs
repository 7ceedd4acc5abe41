use std::sync::Arc;

use volunteer_db::store::VolunteerStore;

use crate::config::ServerConfig;
use crate::volunteer::{EntityRegistry, ProjectContactApi, ProjectService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Record storage; PostgreSQL in production, in-memory in tests.
    pub store: Arc<dyn VolunteerStore>,
    /// Sources for the entities a project can be attached to.
    pub entities: Arc<EntityRegistry>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Arc<dyn VolunteerStore>) -> Self {
        let entities = Arc::new(EntityRegistry::with_defaults(Arc::clone(&store)));
        Self {
            config: Arc::new(config),
            store,
            entities,
        }
    }

    pub fn projects(&self) -> ProjectService {
        ProjectService::new(Arc::clone(&self.store), Arc::clone(&self.entities))
    }

    pub fn project_contacts(&self) -> ProjectContactApi {
        ProjectContactApi::new(Arc::clone(&self.store))
    }
}
