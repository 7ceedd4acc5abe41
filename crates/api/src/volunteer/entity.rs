//! Entities a volunteer project can be attached to.
//!
//! A project points at its owner through `(entity_table, entity_id)`. Each
//! supported table registers a [`RelatedEntitySource`] that knows how to load
//! the owner's title and dates in a common vocabulary. Tables without a source
//! are tolerated: the project's derived dates are simply empty.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use volunteer_core::project::ENTITY_TABLE_EVENT;
use volunteer_core::types::{DbId, Timestamp};
use volunteer_db::store::VolunteerStore;

use crate::error::AppResult;

/// Attributes of a related entity, translated to a common vocabulary.
///
/// An event's `start_date`, for example, becomes `start_time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedEntity {
    pub title: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

/// Loads [`RelatedEntity`] attributes for one entity table.
#[async_trait]
pub trait RelatedEntitySource: Send + Sync {
    /// Entity name used in not-found errors.
    fn entity_name(&self) -> &'static str;

    /// Fetch the entity, or `None` if no row has `entity_id`.
    async fn fetch(&self, entity_id: DbId) -> AppResult<Option<RelatedEntity>>;
}

/// Events: `start_date` / `end_date` become `start_time` / `end_time`.
pub struct EventSource {
    store: Arc<dyn VolunteerStore>,
}

impl EventSource {
    pub fn new(store: Arc<dyn VolunteerStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RelatedEntitySource for EventSource {
    fn entity_name(&self) -> &'static str {
        "Event"
    }

    async fn fetch(&self, entity_id: DbId) -> AppResult<Option<RelatedEntity>> {
        let event = self.store.find_event(entity_id).await?;
        Ok(event.map(|e| RelatedEntity {
            title: Some(e.title),
            start_time: Some(e.start_date),
            end_time: e.end_date,
        }))
    }
}

/// Maps `entity_table` names to their [`RelatedEntitySource`].
#[derive(Default, Clone)]
pub struct EntityRegistry {
    sources: HashMap<String, Arc<dyn RelatedEntitySource>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in sources (currently events only).
    pub fn with_defaults(store: Arc<dyn VolunteerStore>) -> Self {
        let mut registry = Self::new();
        registry.register(ENTITY_TABLE_EVENT, Arc::new(EventSource::new(store)));
        registry
    }

    /// Register (or replace) the source for `entity_table`.
    pub fn register(&mut self, entity_table: &str, source: Arc<dyn RelatedEntitySource>) {
        self.sources.insert(entity_table.to_string(), source);
    }

    pub fn get(&self, entity_table: &str) -> Option<&Arc<dyn RelatedEntitySource>> {
        self.sources.get(entity_table)
    }
}
