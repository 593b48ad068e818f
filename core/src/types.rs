//! Wire types shared by the todo service and its client.
//!
//! # Design
//! A record is addressed by `title`, not by `id`. The `id` is assigned by the
//! store when the record is first written and is never accepted from a
//! caller: it is optional here so create payloads can omit it and so a
//! freshly created record, which is echoed back as stored, can be
//! represented without one.

use serde::{Deserialize, Serialize};

/// A single to-do record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
}

impl Todo {
    /// A record that has not been stored yet.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Envelope returned by the create and update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoResponse {
    pub message: String,
    pub to_do: Todo,
}

/// Plain confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every error response produced by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}
