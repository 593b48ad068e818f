//! Storage client for a single collection of schemaless documents.
//!
//! # Design
//! The repository talks to the database only through `DocumentStore`, which
//! is handed to it at construction time. `MongoStore` is the production
//! implementation; `MemoryStore` keeps documents in process and stands in
//! for the database in tests and local runs.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use futures::stream::BoxStream;
use mongodb::bson::{Bson, Document};

use crate::error::StoreError;

/// Single-pass sequence of documents, read lazily from the cursor by
/// `MongoStore`.
pub type DocumentStream = BoxStream<'static, Result<Document, StoreError>>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document matching `filter`, in storage order.
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError>;

    /// Every document matching `filter`, in storage order.
    async fn find(&self, filter: Document) -> Result<DocumentStream, StoreError>;

    /// Store `document` and return the `_id` the store assigned to it.
    async fn insert_one(&self, document: Document) -> Result<Bson, StoreError>;

    /// Apply `update` to the first match and return the document after the
    /// update, atomically.
    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove the first match and return how many documents were removed.
    async fn delete_one(&self, filter: Document) -> Result<u64, StoreError>;
}
