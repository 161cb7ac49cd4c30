use super::store::{Store, Subscription};
use crate::error::FetchError;
use crate::model::{Entity, EntityId, Todo};
use crate::source::ResourceSource;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Observable state of one resource collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<E> {
    /// Newest local additions first, then the remote order.
    pub items: Vec<E>,
    /// True only while a fetch is in flight.
    pub loading: bool,
    /// Message of the last failed fetch.
    pub error: Option<String>,
}

impl<E> Default for ResourceState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// What a call to [`ResourceStore::fetch`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was not empty; nothing was requested.
    Skipped,
    /// The collection was replaced with this many items.
    Loaded(usize),
    /// The read failed and the message was stored in `error`.
    Failed,
}

/// Fetch-once cache of a remote collection with local CRUD.
///
/// `fetch` reads the remote endpoint only while the collection is empty.
/// `add`, `delete` (and `toggle` for todos) apply immediately and are
/// never sent to the remote source. Clones share the same state.
///
/// # Examples
///
/// ```
/// use dashkit::{MemorySource, NewTodo, ResourceStore, Todo};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = MemorySource::new().with(
///     "/todos",
///     json!([{ "id": 1, "userId": 1, "title": "a", "completed": false }]),
/// );
/// let todos: ResourceStore<Todo> = ResourceStore::new(Arc::new(source));
///
/// todos.fetch().await;
/// let added = todos.add(NewTodo { title: "b".into() });
/// todos.toggle(added.id);
///
/// assert_eq!(todos.len(), 2);
/// assert!(todos.items()[0].completed);
/// # }
/// ```
pub struct ResourceStore<E: Entity> {
    store: Store<ResourceState<E>>,
    source: Arc<dyn ResourceSource>,
}

impl<E: Entity> ResourceStore<E> {
    /// Create an empty store reading from `source`.
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        Self::with_items(source, Vec::new())
    }

    /// Create a store that already holds `items`.
    pub fn with_items(source: Arc<dyn ResourceSource>, items: Vec<E>) -> Self {
        Self {
            store: Store::new(ResourceState {
                items,
                ..ResourceState::default()
            }),
            source,
        }
    }

    /// Resource name, e.g. `"posts"`.
    pub fn resource(&self) -> &'static str {
        E::RESOURCE
    }

    /// Load the remote collection if the local one is empty.
    ///
    /// Errors are never returned: a failed read leaves `items` as they
    /// were and stores the message in `error`. Dropping the future before
    /// it completes clears `loading` and discards the response.
    pub async fn fetch(&self) -> FetchOutcome {
        let started = self.store.try_update(|state| {
            if !state.items.is_empty() {
                return None;
            }
            state.loading = true;
            state.error = None;
            Some(())
        });
        if started.is_none() {
            debug!(resource = E::RESOURCE, "collection already loaded, skipping fetch");
            return FetchOutcome::Skipped;
        }

        let mut in_flight = InFlight {
            store: &self.store,
            settled: false,
        };
        let result = self.read_remote().await;
        in_flight.settled = true;

        match result {
            Ok(items) => {
                let count = items.len();
                self.store.update(|state| {
                    state.items = items;
                    state.loading = false;
                    state.error = None;
                });
                info!(resource = E::RESOURCE, count, "collection loaded");
                FetchOutcome::Loaded(count)
            }
            Err(err) => {
                let mut message = err.to_string();
                if message.is_empty() {
                    message = format!("Failed to load {}", E::RESOURCE);
                }
                warn!(resource = E::RESOURCE, error = %message, "fetch failed");
                self.store.update(|state| {
                    state.loading = false;
                    state.error = Some(message);
                });
                FetchOutcome::Failed
            }
        }
    }

    async fn read_remote(&self) -> Result<Vec<E>, FetchError> {
        let body = self.source.get(&E::endpoint()).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Prepend a new entity built from `draft` and return it.
    pub fn add(&self, draft: E::Draft) -> E {
        let entity = self.store.update(|state| {
            let mut id = next_local_id();
            while state.items.iter().any(|item| item.id() == id) {
                id += 1;
            }
            let entity = E::from_draft(id, draft);
            state.items.insert(0, entity.clone());
            entity
        });
        debug!(resource = E::RESOURCE, id = entity.id(), "added");
        entity
    }

    /// Remove the entity with `id`. Returns `false` if there was none.
    pub fn delete(&self, id: EntityId) -> bool {
        let removed = self
            .store
            .try_update(|state| {
                let before = state.items.len();
                state.items.retain(|item| item.id() != id);
                (state.items.len() != before).then_some(())
            })
            .is_some();
        debug!(resource = E::RESOURCE, id, removed, "delete");
        removed
    }

    /// Snapshot of the whole state.
    pub fn state(&self) -> ResourceState<E> {
        self.store.get()
    }

    /// Clone of the current items, newest first.
    pub fn items(&self) -> Vec<E> {
        self.store.read(|state| state.items.clone())
    }

    /// The entity with `id`, if present.
    pub fn get(&self, id: EntityId) -> Option<E> {
        self.store
            .read(|state| state.items.iter().find(|item| item.id() == id).cloned())
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.store.read(|state| state.items.len())
    }

    /// True while no items are held; `fetch` will read the remote.
    pub fn is_empty(&self) -> bool {
        self.store.read(|state| state.items.is_empty())
    }

    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.store.read(|state| state.loading)
    }

    /// Message of the last failed fetch, if any.
    pub fn error(&self) -> Option<String> {
        self.store.read(|state| state.error.clone())
    }

    /// Call `callback` with the new state after every change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ResourceState<E>) + Send + Sync + 'static,
    {
        debug!(resource = E::RESOURCE, "subscribe");
        self.store.subscribe(callback)
    }
}

impl ResourceStore<Todo> {
    /// Flip `completed` on the todo with `id`.
    ///
    /// Returns the new value, or `None` if no such todo exists.
    pub fn toggle(&self, id: EntityId) -> Option<bool> {
        let completed = self.store.try_update(|state| {
            let todo = state.items.iter_mut().find(|todo| todo.id == id)?;
            todo.completed = !todo.completed;
            Some(todo.completed)
        });
        debug!(resource = Todo::RESOURCE, id, ?completed, "toggle");
        completed
    }
}

impl<E: Entity> Clone for ResourceStore<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            source: Arc::clone(&self.source),
        }
    }
}

/// Clears `loading` if a fetch is dropped before it settles.
struct InFlight<'a, E: Entity> {
    store: &'a Store<ResourceState<E>>,
    settled: bool,
}

impl<E: Entity> Drop for InFlight<'_, E> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(resource = E::RESOURCE, "fetch dropped before settling");
            self.store.update(|state| state.loading = false);
        }
    }
}

static LAST_LOCAL_ID: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp, bumped so ids never repeat within the process.
fn next_local_id() -> EntityId {
    let now = Utc::now().timestamp_millis();
    let previous = match LAST_LOCAL_ID.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(now.max(last + 1))
    }) {
        Ok(previous) | Err(previous) => previous,
    };
    now.max(previous + 1)
}
