//! # Dashkit
//!
//! Observable resource stores for an admin dashboard backed by a REST API.
//!
//! Dashkit provides two levels of abstraction:
//!
//! ## Store (Low-level container)
//!
//! - `Store<T>` - Thread-safe state container that notifies subscribers
//! - `Subscription` - RAII handle; dropping it unsubscribes
//!
//! ## Resource stores (Dashboard state)
//!
//! - `ResourceStore<E>` - Fetch-once cache of a remote collection with
//!   local add/delete (and toggle for todos); nothing is written back
//! - `Dashboard` - The posts, users, comments and todos stores built
//!   around one shared `ResourceSource`, plus the home page selectors
//!
//! ```
//! use dashkit::{Dashboard, MemorySource, NewPost};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let source = MemorySource::new()
//!     .with("/posts", json!([{ "id": 1, "userId": 1, "title": "hello", "body": "..." }]))
//!     .with("/users", json!([]))
//!     .with("/comments", json!([]))
//!     .with("/todos", json!([]));
//! let dashboard = Dashboard::new(Arc::new(source));
//!
//! dashboard.load().await;
//! dashboard.posts.add(NewPost { title: "draft".into(), body: "...".into() });
//!
//! assert_eq!(dashboard.posts.len(), 2);
//! assert_eq!(dashboard.posts.items()[0].title, "draft");
//! # }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod source;
pub mod store;

// Re-export main types for convenience
pub use config::ApiConfig;
pub use dashboard::{ActivityPoint, Dashboard, LoadReport, StatCard, TodosOverview};
pub use error::{ConfigError, Error, FetchError, Result};
pub use model::{
    Address, Comment, Company, Entity, EntityId, Geo, NewComment, NewPost, NewTodo, NewUser, Post,
    Todo, User,
};
pub use source::{HttpSource, MemorySource, ResourceSource};
pub use store::{FetchOutcome, ResourceState, ResourceStore, Store, Subscription};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let store = Store::new(0);
        assert_eq!(store.get(), 0);
        store.set(42);
        assert_eq!(store.get(), 42);
    }
}
