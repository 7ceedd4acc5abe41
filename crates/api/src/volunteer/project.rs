//! Volunteer projects.
//!
//! [`VolunteerProject`] wraps a stored [`Project`] row and lazily computes the
//! fields derived from its related entity, needs and assignments. Each derived
//! field is computed at most once per instance and never refreshed; callers
//! that need fresh values load the project again.
//!
//! [`ProjectService`] creates and retrieves projects from loosely typed
//! parameter mappings.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::OnceCell;
use validator::Validate;
use volunteer_core::error::CoreError;
use volunteer_core::need::{
    format_time_range, is_open_need, role_key, sort_roles, RoleLabel, FLEXIBLE_ROLE_ID,
    FLEXIBLE_ROLE_LABEL, UNKNOWN_ROLE_LABEL,
};
use volunteer_core::option_group::{ROLE_OPTION_GROUP, VISIBILITY_OPTION_GROUP, VISIBILITY_PUBLIC};
use volunteer_core::params::{flag_param, has_value, id_param, Params};
use volunteer_core::permission::{check_project_perms, ProjectAction};
use volunteer_core::project::{copy_values, data_exists, parse_project_contacts, RelationshipRef};
use volunteer_core::types::{DbId, Timestamp};
use volunteer_db::models::need::Need;
use volunteer_db::models::project::{
    CreateProject, Project, ProjectFilter, ProjectWrite, UpdateProject,
};
use volunteer_db::models::project_contact::{ContactLink, ProjectContactFilter};
use volunteer_db::store::VolunteerStore;

use crate::error::AppResult;
use crate::volunteer::entity::{EntityRegistry, RelatedEntity};
use crate::volunteer::options;
use crate::volunteer::project_contact::ProjectContactApi;

/// Title and start time of the entity a project is attached to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityAttributes {
    pub start_time: Option<Timestamp>,
    pub title: Option<String>,
}

/// A visible need with the number of volunteers currently assigned to it.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectNeed {
    #[serde(flatten)]
    pub need: Need,
    pub quantity_assigned: i64,
}

/// A need that can still take volunteers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenNeed {
    pub need_id: DbId,
    /// Human-readable time range, e.g. `May 1, 2030 9:00 AM - 10:30 AM`.
    pub label: String,
    /// The need's stored role, even for flexible needs.
    pub role_id: Option<DbId>,
}

/// A persisted volunteer project and its memoized derived fields.
pub struct VolunteerProject {
    record: Project,
    store: Arc<dyn VolunteerStore>,
    entities: Arc<EntityRegistry>,
    related: OnceCell<Option<RelatedEntity>>,
    needs: OnceCell<Vec<ProjectNeed>>,
    roles: OnceCell<Vec<RoleLabel>>,
    open_needs: OnceCell<Vec<OpenNeed>>,
    flexible_need_id: OnceCell<Option<DbId>>,
}

impl fmt::Debug for VolunteerProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolunteerProject")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl VolunteerProject {
    pub fn new(
        record: Project,
        store: Arc<dyn VolunteerStore>,
        entities: Arc<EntityRegistry>,
    ) -> Self {
        Self {
            record,
            store,
            entities,
            related: OnceCell::new(),
            needs: OnceCell::new(),
            roles: OnceCell::new(),
            open_needs: OnceCell::new(),
            flexible_need_id: OnceCell::new(),
        }
    }

    pub fn record(&self) -> &Project {
        &self.record
    }

    pub fn id(&self) -> DbId {
        self.record.id
    }

    pub fn into_record(self) -> Project {
        self.record
    }

    /// The related entity, or `None` if its table has no registered source or
    /// no row matches.
    async fn related(&self) -> AppResult<Option<&RelatedEntity>> {
        let related = self
            .related
            .get_or_try_init(|| async {
                match self.entities.get(&self.record.entity_table) {
                    Some(source) => source.fetch(self.record.entity_id).await,
                    None => {
                        tracing::debug!(
                            entity_table = %self.record.entity_table,
                            project_id = self.record.id,
                            "No related entity source registered",
                        );
                        Ok(None)
                    }
                }
            })
            .await?;
        Ok(related.as_ref())
    }

    /// Start time and title of the related entity.
    ///
    /// `None` when the entity table is not supported. Fails with not-found
    /// when the table is supported but the entity does not exist.
    pub async fn entity_attributes(&self) -> AppResult<Option<EntityAttributes>> {
        let Some(source) = self.entities.get(&self.record.entity_table) else {
            return Ok(None);
        };
        let entity = self.related().await?.ok_or(CoreError::NotFound {
            entity: source.entity_name(),
            id: self.record.entity_id,
        })?;
        Ok(Some(EntityAttributes {
            start_time: entity.start_time,
            title: entity.title.clone(),
        }))
    }

    pub async fn start_date(&self) -> AppResult<Option<Timestamp>> {
        Ok(self.related().await?.and_then(|e| e.start_time))
    }

    /// End date of the related entity; `None` when it has none.
    pub async fn end_date(&self) -> AppResult<Option<Timestamp>> {
        Ok(self.related().await?.and_then(|e| e.end_time))
    }

    /// Active, publicly visible needs in ascending start order.
    pub async fn needs(&self) -> AppResult<&[ProjectNeed]> {
        let needs = self.needs.get_or_try_init(|| self.load_needs()).await?;
        Ok(needs.as_slice())
    }

    async fn load_needs(&self) -> AppResult<Vec<ProjectNeed>> {
        let public = options::get_single_by_name(
            self.store.as_ref(),
            VISIBILITY_OPTION_GROUP,
            VISIBILITY_PUBLIC,
        )
        .await?;
        let visibility_id = options::value_as_id(&public)?;

        let rows = self
            .store
            .list_visible_needs(self.record.id, visibility_id)
            .await?;
        let mut needs = Vec::with_capacity(rows.len());
        for need in rows {
            let quantity_assigned = self.store.count_assignments(need.id).await?;
            needs.push(ProjectNeed {
                need,
                quantity_assigned,
            });
        }
        Ok(needs)
    }

    /// Distinct roles among the visible needs, sorted by label.
    pub async fn roles(&self) -> AppResult<&[RoleLabel]> {
        let roles = self.roles.get_or_try_init(|| self.load_roles()).await?;
        Ok(roles.as_slice())
    }

    async fn load_roles(&self) -> AppResult<Vec<RoleLabel>> {
        let mut labels: BTreeMap<DbId, String> = BTreeMap::new();
        for item in self.needs().await? {
            let Some(role_id) = role_key(item.need.is_flexible, item.need.role_id) else {
                continue;
            };
            if labels.contains_key(&role_id) {
                continue;
            }
            let label = if role_id == FLEXIBLE_ROLE_ID {
                FLEXIBLE_ROLE_LABEL.to_string()
            } else {
                options::label(self.store.as_ref(), ROLE_OPTION_GROUP, role_id)
                    .await?
                    .unwrap_or_else(|| UNKNOWN_ROLE_LABEL.to_string())
            };
            labels.insert(role_id, label);
        }
        Ok(sort_roles(labels))
    }

    /// Visible needs that start in the future and are not yet filled.
    pub async fn open_needs(&self) -> AppResult<&[OpenNeed]> {
        let open = self
            .open_needs
            .get_or_try_init(|| async {
                let now = Utc::now();
                let open = self
                    .needs()
                    .await?
                    .iter()
                    .filter_map(|item| {
                        let need = &item.need;
                        let start = need.start_time?;
                        is_open_need(need.start_time, need.quantity, item.quantity_assigned, now)
                            .then(|| OpenNeed {
                                need_id: need.id,
                                label: format_time_range(start, need.duration),
                                role_id: need.role_id,
                            })
                    })
                    .collect::<Vec<_>>();
                Ok::<_, crate::error::AppError>(open)
            })
            .await?;
        Ok(open.as_slice())
    }

    /// Id of the project's single active flexible need.
    ///
    /// `None` when there is no such need or more than one.
    pub async fn flexible_need_id(&self) -> AppResult<Option<DbId>> {
        let id = self
            .flexible_need_id
            .get_or_try_init(|| async {
                if self.record.id <= 0 {
                    return Ok(None);
                }
                let ids = self
                    .store
                    .list_active_flexible_need_ids(self.record.id)
                    .await?;
                if ids.len() > 1 {
                    tracing::warn!(
                        project_id = self.record.id,
                        count = ids.len(),
                        "Project has more than one active flexible need",
                    );
                }
                Ok::<_, crate::error::AppError>(match ids.as_slice() {
                    [only] => Some(*only),
                    _ => None,
                })
            })
            .await?;
        Ok(*id)
    }
}

/// Creates and retrieves volunteer projects.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn VolunteerStore>,
    entities: Arc<EntityRegistry>,
    contacts: ProjectContactApi,
}

impl ProjectService {
    pub fn new(store: Arc<dyn VolunteerStore>, entities: Arc<EntityRegistry>) -> Self {
        let contacts = ProjectContactApi::new(Arc::clone(&store));
        Self {
            store,
            entities,
            contacts,
        }
    }

    fn wrap(&self, record: Project) -> VolunteerProject {
        VolunteerProject::new(record, Arc::clone(&self.store), Arc::clone(&self.entities))
    }

    /// Insert a project, or update the one named by `params["id"]`.
    ///
    /// When `check_permissions` is truthy the caller's role must allow the
    /// add/update; a denial writes nothing. An optional `project_contacts`
    /// mapping (`{relationship type: [contact ids]}`) links contacts to the
    /// saved project. The project and its links are saved together or not
    /// at all.
    pub async fn create(
        &self,
        mut params: Params,
        caller_role: Option<&str>,
    ) -> AppResult<VolunteerProject> {
        let action = ProjectAction::for_project_id(id_param(&params, "id")?);

        if flag_param(&params, "check_permissions") {
            let allowed = caller_role.is_some_and(|role| check_project_perms(role, action));
            if !allowed {
                tracing::warn!(
                    action = action.as_str(),
                    role = caller_role.unwrap_or(""),
                    "Volunteer project permission denied",
                );
                return Err(CoreError::Forbidden(format!(
                    "You do not have permission to {} this project",
                    action.as_str()
                ))
                .into());
            }
        }

        if !data_exists(&params) {
            return Err(CoreError::Validation(
                "Not enough data to create volunteer project object.".into(),
            )
            .into());
        }

        let contact_links = match params.get("project_contacts") {
            Some(value) if has_value(&params, "project_contacts") => {
                parse_project_contacts(value)?
            }
            _ => Vec::new(),
        };
        let mut links = Vec::new();
        for (relationship, contact_ids) in contact_links {
            let relationship_type_id = self
                .contacts
                .resolve_relationship_type(&relationship)
                .await?;
            for contact_id in contact_ids {
                let link = ContactLink {
                    contact_id,
                    relationship_type_id,
                };
                link.validate()?;
                links.push(link);
            }
        }

        let values = copy_values(&mut params)?;
        let update_id = values.id.filter(|id| *id > 0);
        let write = match update_id {
            Some(id) => ProjectWrite::Update(
                id,
                UpdateProject {
                    entity_table: values.entity_table,
                    entity_id: values.entity_id,
                    title: values.title,
                    description: values.description,
                    is_active: values.is_active,
                },
            ),
            None => {
                let missing = || {
                    CoreError::Validation(
                        "Not enough data to create volunteer project object.".into(),
                    )
                };
                ProjectWrite::Create(CreateProject {
                    entity_table: values.entity_table.ok_or_else(missing)?,
                    entity_id: values.entity_id.ok_or_else(missing)?,
                    title: values.title.ok_or_else(missing)?,
                    description: values.description,
                    is_active: values.is_active.unwrap_or(true),
                })
            }
        };

        // Only an update can miss its row.
        let (record, linked) = self
            .store
            .save_project(&write, &links)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "VolunteerProject",
                id: update_id.unwrap_or_default(),
            })?;
        tracing::info!(
            project_id = record.id,
            entity_table = %record.entity_table,
            entity_id = record.entity_id,
            contacts = linked.len(),
            updated = update_id.is_some(),
            "Saved volunteer project",
        );

        Ok(self.wrap(record))
    }

    /// Projects matching the column filters and optional contact filter.
    ///
    /// The `project_contacts` filter has the same shape as in [`create`] and
    /// selects projects linked to any of the listed contacts with the given
    /// relationship type. Results are keyed and ordered by project id.
    ///
    /// [`create`]: ProjectService::create
    pub async fn retrieve(
        &self,
        mut params: Params,
    ) -> AppResult<BTreeMap<DbId, VolunteerProject>> {
        let contact_filter = match params.get("project_contacts") {
            Some(value) if has_value(&params, "project_contacts") => {
                Some(parse_project_contacts(value)?)
            }
            _ => None,
        };

        let values = copy_values(&mut params)?;
        let mut filter = ProjectFilter {
            id: values.id,
            entity_id: values.entity_id,
            entity_table: values.entity_table,
            title: values.title,
            is_active: values.is_active,
            ids: None,
        };

        if let Some(links) = contact_filter {
            let ids = self.project_ids_for_contacts(&links).await?;
            if ids.is_empty() {
                return Ok(BTreeMap::new());
            }
            filter.ids = Some(ids.into_iter().collect());
        }

        let rows = self.store.list_projects(&filter).await?;
        Ok(rows
            .into_iter()
            .map(|record| (record.id, self.wrap(record)))
            .collect())
    }

    async fn project_ids_for_contacts(
        &self,
        links: &[(RelationshipRef, Vec<DbId>)],
    ) -> AppResult<BTreeSet<DbId>> {
        let mut ids = BTreeSet::new();
        for (relationship, contact_ids) in links {
            let relationship_type_id = self.contacts.resolve_relationship_type(relationship).await?;
            let filter = ProjectContactFilter {
                contact_ids: Some(contact_ids.clone()),
                relationship_type_id: Some(relationship_type_id),
                ..Default::default()
            };
            let rows = self.store.list_project_contacts(&filter).await?;
            ids.extend(rows.into_iter().map(|c| c.project_id));
        }
        Ok(ids)
    }

    /// The project with `id`. Fails when `id` is not positive or not found.
    pub async fn retrieve_by_id(&self, id: DbId) -> AppResult<VolunteerProject> {
        if id <= 0 {
            return Err(CoreError::Validation(format!(
                "Project id must be a positive integer, got {id}"
            ))
            .into());
        }
        let filter = ProjectFilter {
            id: Some(id),
            ..Default::default()
        };
        let record = self
            .store
            .list_projects(&filter)
            .await?
            .into_iter()
            .next()
            .ok_or(CoreError::NotFound {
                entity: "VolunteerProject",
                id,
            })?;
        Ok(self.wrap(record))
    }

    /// Active flag of the single project attached to an entity.
    ///
    /// `None` when no project or more than one references the entity.
    pub async fn is_active(&self, entity_id: DbId, entity_table: &str) -> AppResult<Option<bool>> {
        let filter = ProjectFilter {
            entity_id: Some(entity_id),
            entity_table: Some(entity_table.to_string()),
            ..Default::default()
        };
        let rows = self.store.list_projects(&filter).await?;
        Ok(match rows.as_slice() {
            [only] => Some(only.is_active),
            _ => None,
        })
    }

    /// Contact ids linked to a project with the given relationship type.
    pub async fn contacts_by_relationship(
        &self,
        project_id: DbId,
        relationship: &RelationshipRef,
    ) -> AppResult<Vec<DbId>> {
        let relationship_type_id = self.contacts.resolve_relationship_type(relationship).await?;
        let filter = ProjectContactFilter {
            project_id: Some(project_id),
            relationship_type_id: Some(relationship_type_id),
            ..Default::default()
        };
        let rows = self.store.list_project_contacts(&filter).await?;
        Ok(rows.into_iter().map(|c| c.contact_id).collect())
    }
}
