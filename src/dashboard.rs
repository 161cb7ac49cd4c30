//! Composition root: the four resource stores and the home page selectors.

use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::model::{Comment, Entity, Post, Todo, User};
use crate::source::{HttpSource, ResourceSource};
use crate::store::{FetchOutcome, ResourceStore};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Number of users shown in the "recent users" panel.
pub const RECENT_USERS: usize = 5;

/// Every resource store the dashboard works with, sharing one source.
///
/// Built once at startup and handed to consumers explicitly. Stores are
/// independent: deleting a post leaves its comments in place.
#[derive(Clone)]
pub struct Dashboard {
    pub posts: ResourceStore<Post>,
    pub users: ResourceStore<User>,
    pub comments: ResourceStore<Comment>,
    pub todos: ResourceStore<Todo>,
}

/// Outcome of [`Dashboard::load`] per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub users: FetchOutcome,
    pub posts: FetchOutcome,
    pub comments: FetchOutcome,
    pub todos: FetchOutcome,
}

impl LoadReport {
    /// True if any of the four reads failed.
    pub fn has_failures(&self) -> bool {
        [self.users, self.posts, self.comments, self.todos]
            .contains(&FetchOutcome::Failed)
    }
}

/// One summary card: how many items a resource holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub resource: &'static str,
    pub count: usize,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodosOverview {
    pub completed: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPoint {
    pub name: &'static str,
    pub value: usize,
}

impl Dashboard {
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        Self {
            posts: ResourceStore::new(Arc::clone(&source)),
            users: ResourceStore::new(Arc::clone(&source)),
            comments: ResourceStore::new(Arc::clone(&source)),
            todos: ResourceStore::new(source),
        }
    }

    /// Build a dashboard reading from the HTTP API described by `config`.
    pub fn connect(config: &ApiConfig) -> Result<Self, FetchError> {
        let source = HttpSource::new(config.clone())?;
        info!(base_url = %config.base_url, "dashboard connected");
        Ok(Self::new(Arc::new(source)))
    }

    /// Build a dashboard from an optional TOML file plus environment overrides.
    pub fn from_config(path: Option<&Path>) -> crate::Result<Self> {
        let config = match path {
            Some(path) => ApiConfig::load(path)?,
            None => ApiConfig::default(),
        };
        Ok(Self::connect(&config.with_env_overrides()?)?)
    }

    /// Fetch all four collections concurrently.
    ///
    /// Each store applies its own fetch-once guard.
    pub async fn load(&self) -> LoadReport {
        let (users, posts, comments, todos) = tokio::join!(
            self.users.fetch(),
            self.posts.fetch(),
            self.comments.fetch(),
            self.todos.fetch(),
        );
        LoadReport {
            users,
            posts,
            comments,
            todos,
        }
    }

    /// Summary cards in display order: users, posts, comments, todos.
    pub fn stats(&self) -> Vec<StatCard> {
        vec![
            card(&self.users),
            card(&self.posts),
            card(&self.comments),
            card(&self.todos),
        ]
    }

    pub fn todos_overview(&self) -> TodosOverview {
        let items = self.todos.items();
        let completed = items.iter().filter(|todo| todo.completed).count();
        TodosOverview {
            completed,
            pending: items.len() - completed,
        }
    }

    /// The first `limit` users in store order (newest local additions first).
    pub fn recent_users(&self, limit: usize) -> Vec<User> {
        let mut users = self.users.items();
        users.truncate(limit);
        users
    }

    /// Post and comment volume for the activity chart.
    pub fn activity(&self) -> Vec<ActivityPoint> {
        vec![
            ActivityPoint {
                name: "Posts",
                value: self.posts.len(),
            },
            ActivityPoint {
                name: "Comments",
                value: self.comments.len(),
            },
        ]
    }
}

fn card<E: Entity>(store: &ResourceStore<E>) -> StatCard {
    let state = store.state();
    StatCard {
        resource: store.resource(),
        count: state.items.len(),
        loading: state.loading,
    }
}
