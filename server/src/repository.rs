//! Maps to-do records to and from documents of the `todos` collection.
//!
//! `title` is the lookup key for every operation. It is not unique in the
//! store, so lookups, updates and deletes act on the first match.

use std::sync::Arc;

use futures::{stream::BoxStream, StreamExt};
use mongodb::bson::{doc, Bson, Document};
use todo_core::Todo;

use crate::error::{MappingError, StoreError};
use crate::store::DocumentStore;

/// Lazy, single-pass sequence of records.
pub type TodoStream = BoxStream<'static, Result<Todo, StoreError>>;

#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn DocumentStore>,
}

impl TodoRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn fetch_one(&self, title: &str) -> Result<Option<Todo>, StoreError> {
        tracing::debug!(title, "fetching todo");
        self.store
            .find_one(doc! { "title": title })
            .await?
            .map(|document| todo_from_document(&document))
            .transpose()
            .map_err(StoreError::from)
    }

    pub async fn fetch_all(&self) -> Result<TodoStream, StoreError> {
        tracing::debug!("fetching all todos");
        let documents = self.store.find(doc! {}).await?;
        Ok(documents
            .map(|document| -> Result<Todo, StoreError> {
                Ok(todo_from_document(&document?)?)
            })
            .boxed())
    }

    /// Store `todo` as a new document, dropping any caller-supplied `id`.
    ///
    /// Returns the fields as stored, without the generated id, or `None` if
    /// the store reported no inserted id.
    pub async fn create(&self, todo: Todo) -> Result<Option<Todo>, StoreError> {
        let document = doc! {
            "title": todo.title.as_str(),
            "description": todo.description.as_str(),
        };
        let inserted_id = self.store.insert_one(document).await?;
        tracing::debug!(title = %todo.title, id = %inserted_id, "created todo");
        if matches!(inserted_id, Bson::Null | Bson::Undefined) {
            return Ok(None);
        }
        Ok(Some(Todo { id: None, ..todo }))
    }

    /// Set the description of the first record titled `title` and return it
    /// as it is after the write.
    pub async fn update(&self, title: &str, description: &str) -> Result<Option<Todo>, StoreError> {
        tracing::debug!(title, "updating todo");
        self.store
            .find_one_and_update(
                doc! { "title": title },
                doc! { "$set": { "description": description } },
            )
            .await?
            .map(|document| todo_from_document(&document))
            .transpose()
            .map_err(StoreError::from)
    }

    /// Returns whether exactly one record was removed.
    pub async fn delete(&self, title: &str) -> Result<bool, StoreError> {
        let deleted = self.store.delete_one(doc! { "title": title }).await?;
        tracing::debug!(title, deleted, "deleted todo");
        Ok(deleted == 1)
    }
}

/// Validate a stored document and convert it to a record.
///
/// `_id` is stringified: object ids become their hex form, strings are taken
/// as is.
pub fn todo_from_document(document: &Document) -> Result<Todo, MappingError> {
    let id = match document.get("_id") {
        None => return Err(MappingError::MissingField("_id")),
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    Ok(Todo {
        id: Some(id),
        title: string_field(document, "title")?,
        description: string_field(document, "description")?,
    })
}

fn string_field(document: &Document, field: &'static str) -> Result<String, MappingError> {
    match document.get(field) {
        None => Err(MappingError::MissingField(field)),
        Some(Bson::String(s)) => Ok(s.clone()),
        Some(_) => Err(MappingError::WrongType(field)),
    }
}
