//! Entity types for the four dashboard resources.
//!
//! Field names follow the remote API (camelCase on the wire). Only `id`
//! is required when decoding; every other field falls back to its default.
//! Foreign keys are optional because records added locally carry none, and
//! no referential integrity is enforced between resources.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier shared by all entities.
///
/// Server-assigned for loaded records, timestamp-based for local ones.
pub type EntityId = i64;

/// A record held by a [`ResourceStore`](crate::ResourceStore).
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Caller-supplied fields for a locally added record.
    type Draft;

    /// Resource name, also the last segment of the endpoint.
    const RESOURCE: &'static str;

    fn id(&self) -> EntityId;

    /// Build a new record from a draft and a fresh id.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Fixed remote endpoint, e.g. `/posts`.
    fn endpoint() -> String {
        format!("/{}", Self::RESOURCE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: EntityId,
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl Entity for Post {
    type Draft = NewPost;
    const RESOURCE: &'static str = "posts";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NewPost) -> Self {
        Self {
            id,
            user_id: None,
            title: draft.title,
            body: draft.body,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub address: Address,
}

/// Fields collected by the "add user" form.
///
/// `company` and `address` are single free-text values; they become the
/// company name and the street line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub company: String,
    pub address: String,
}

impl Entity for User {
    type Draft = NewUser;
    const RESOURCE: &'static str = "users";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            username: draft.username,
            email: draft.email,
            phone: draft.phone,
            website: draft.website,
            company: Company {
                name: draft.company,
                ..Company::default()
            },
            address: Address {
                street: draft.address,
                ..Address::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntityId,
    #[serde(default)]
    pub post_id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: Option<EntityId>,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Entity for Comment {
    type Draft = NewComment;
    const RESOURCE: &'static str = "comments";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NewComment) -> Self {
        Self {
            id,
            post_id: draft.post_id,
            name: draft.name,
            email: draft.email,
            body: draft.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: EntityId,
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
}

impl Entity for Todo {
    type Draft = NewTodo;
    const RESOURCE: &'static str = "todos";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NewTodo) -> Self {
        Self {
            id,
            user_id: None,
            title: draft.title,
            completed: false,
        }
    }
}
