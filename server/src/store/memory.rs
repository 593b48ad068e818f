use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::{DocumentStore, DocumentStream};
use crate::error::StoreError;

/// In-process `DocumentStore`.
///
/// Filters are field equality only and updates understand `$set` only;
/// anything else is rejected with `StoreError::Unsupported`. `find`
/// materialises its matches up front, so its stream is not lazy.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store documents verbatim, without assigning `_id`.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }
}

fn matches(document: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (key, expected) in filter {
        if key.starts_with('$') {
            return Err(StoreError::Unsupported(format!("filter operator {key}")));
        }
        if document.get(key) != Some(expected) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn position(documents: &[Document], filter: &Document) -> Result<Option<usize>, StoreError> {
    for (i, document) in documents.iter().enumerate() {
        if matches(document, filter)? {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

fn apply_update(document: &mut Document, update: &Document) -> Result<(), StoreError> {
    for (operator, fields) in update {
        match (operator.as_str(), fields) {
            ("$set", Bson::Document(fields)) => {
                for (key, value) in fields {
                    document.insert(key.clone(), value.clone());
                }
            }
            _ => {
                return Err(StoreError::Unsupported(format!("update operator {operator}")));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.read().await;
        Ok(position(&documents, &filter)?.map(|i| documents[i].clone()))
    }

    async fn find(&self, filter: Document) -> Result<DocumentStream, StoreError> {
        let documents = self.documents.read().await;
        let mut found = Vec::new();
        for document in documents.iter() {
            if matches(document, &filter)? {
                found.push(Ok(document.clone()));
            }
        }
        Ok(futures::stream::iter(found).boxed())
    }

    async fn insert_one(&self, mut document: Document) -> Result<Bson, StoreError> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };
        self.documents.write().await.push(document);
        Ok(id)
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut documents = self.documents.write().await;
        let Some(i) = position(&documents, &filter)? else {
            return Ok(None);
        };
        apply_update(&mut documents[i], &update)?;
        Ok(Some(documents[i].clone()))
    }

    async fn delete_one(&self, filter: Document) -> Result<u64, StoreError> {
        let mut documents = self.documents.write().await;
        match position(&documents, &filter)? {
            Some(i) => {
                documents.remove(i);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
