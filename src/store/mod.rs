//! State containers.
//!
//! [`Store`] is the generic observable container. [`ResourceStore`] builds
//! the fetch-once cache and local CRUD for one remote collection on top
//! of it.

mod resource;
mod store;

pub use resource::{FetchOutcome, ResourceState, ResourceStore};
pub use store::{Store, Subscription};
