use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{Bson, Document},
    options::ReturnDocument,
    Client, Collection,
};

use super::{DocumentStore, DocumentStream};
use crate::error::StoreError;

/// `DocumentStore` backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connect to `uri` and bind to `database.collection`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(client.database(database).collection(collection)))
    }

    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.collection.find_one(filter).await?)
    }

    async fn find(&self, filter: Document) -> Result<DocumentStream, StoreError> {
        let cursor = self.collection.find(filter).await?;
        Ok(Box::pin(cursor.map_err(StoreError::from)))
    }

    async fn insert_one(&self, document: Document) -> Result<Bson, StoreError> {
        let result = self.collection.insert_one(document).await?;
        Ok(result.inserted_id)
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_one(&self, filter: Document) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count)
    }
}
