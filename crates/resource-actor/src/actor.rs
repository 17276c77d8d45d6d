//! # Generic Actor Server
//!
//! `ResourceActor` owns the store for one resource type and processes requests one at a
//! time, so every mutation of that type is serialized and every read sees a whole
//! snapshot. Different resource types run in separate tasks and never share a lock.

use crate::client::ResourceClient;
use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor (server) and a client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use resource_actor::{ResourceActor, ResourceEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u64, text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ResourceEntity for Note {
///     type Id = u64;
///     type Create = String;
///     type Update = String;
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u64, text: String) -> Result<Self, NoteError> {
///         Ok(Self { id, text })
///     }
///     async fn on_update(&mut self, text: String, _: &()) -> Result<(), NoteError> {
///         self.text = text;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let note = client.create("hello".to_string()).await.unwrap();
///     assert_eq!(note.id, 1);
/// }
/// ```
///
/// # Store
///
/// Entities live in a `BTreeMap` keyed by id. Ids come from a `u64` counter that starts
/// at 1 and is advanced for every create attempt, successful or not, so an id is never
/// handed out twice even after its entity has been removed.
pub struct ResourceActor<T: ResourceEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u64,
    entity_type: String,
}

impl<T: ResourceEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // Short type name ("Resource" rather than "resource_service::model::Resource")
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown")
            .to_string();
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
            entity_type,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Overrides the `entity_type` field used in log lines.
    ///
    /// Useful when one entity type backs several stores.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.entity_type = label.into();
        self
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` argument is passed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type.clone();
        let entity_type = entity_type.as_str();
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to
                        .send(item.ok_or_else(|| FrameworkError::NotFound(id.to_string())));
                }
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(_) => {}
                        Err(e @ (FrameworkError::DuplicateId(_) | FrameworkError::IdsExhausted)) => {
                            error!(entity_type, error = %e, "Store invariant violated")
                        }
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { ids, respond_to } => {
                    debug!(entity_type, ?ids, "Delete");
                    let result = self.delete(ids, &context).await;
                    match &result {
                        Ok(removed) => {
                            info!(entity_type, ?removed, size = self.store.len(), "Deleted")
                        }
                        Err(e) => warn!(entity_type, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T, FrameworkError> {
        let raw = self.next_id;
        self.next_id = raw.checked_add(1).ok_or(FrameworkError::IdsExhausted)?;
        let id = T::Id::from(raw);

        if self.store.contains_key(&id) {
            return Err(FrameworkError::DuplicateId(id.to_string()));
        }

        let mut item = T::from_create_params(id.clone(), params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        self.store.insert(id.clone(), item.clone());
        info!(entity_type = %self.entity_type, %id, size = self.store.len(), "Created");
        Ok(item)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let current = self
            .store
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        // Work on a copy so a failing hook leaves the stored entity untouched
        let mut next = current.clone();
        next.on_update(update, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        *current = next.clone();
        Ok(next)
    }

    async fn delete(
        &mut self,
        ids: Vec<T::Id>,
        context: &T::Context,
    ) -> Result<Vec<T::Id>, FrameworkError> {
        let mut unique: Vec<T::Id> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        // Check everything before touching the store
        for id in &unique {
            let item = self
                .store
                .get(id)
                .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
            item.on_delete(context)
                .await
                .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        }

        for id in &unique {
            self.store.remove(id);
        }
        Ok(unique)
    }
}
