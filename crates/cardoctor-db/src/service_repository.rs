use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use serde_json::{Map, Value};

use cardoctor_core::error::AppError;
use cardoctor_core::models::{Service, ServiceSummary};

use crate::documents::{from_document, map_to_document, parse_object_id};

/// Read access to the seeded `services` collection, plus the bulk writes the
/// seeding tool needs.
#[derive(Clone)]
pub struct ServiceRepository {
    collection: Collection<Document>,
}

impl ServiceRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Every stored service, with all of its fields.
    pub async fn list(&self) -> Result<Vec<Service>, AppError> {
        let docs: Vec<Document> = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        docs.into_iter().map(from_document).collect()
    }

    /// One service by id, projected to its summary fields. `None` on a miss.
    pub async fn get_summary(&self, id: &str) -> Result<Option<ServiceSummary>, AppError> {
        let oid = parse_object_id(id)?;

        let mut projection = Document::new();
        for field in ServiceSummary::PROJECTED_FIELDS {
            projection.insert(field, 1);
        }

        let found = self
            .collection
            .find_one(doc! { "_id": oid })
            .projection(projection)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        found.map(from_document).transpose()
    }

    /// Insert seed documents verbatim. Returns how many were written.
    pub async fn insert_many(&self, services: &[Map<String, Value>]) -> Result<usize, AppError> {
        if services.is_empty() {
            return Ok(0);
        }

        let docs = services
            .iter()
            .map(map_to_document)
            .collect::<Result<Vec<_>, _>>()?;

        let result = self
            .collection
            .insert_many(docs)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.inserted_ids.len())
    }

    /// Remove every service. Returns the number deleted.
    pub async fn clear(&self) -> Result<u64, AppError> {
        let result = self
            .collection
            .delete_many(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}
