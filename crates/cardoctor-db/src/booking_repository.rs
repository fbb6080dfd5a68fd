use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc};

use cardoctor_core::error::AppError;
use cardoctor_core::models::{Booking, DeleteResult, InsertResult, NewBooking, UpdateResult};

use crate::documents::{from_document, id_to_string, map_to_document, parse_object_id};

/// Repository for the `booking` collection.
///
/// None of these operations check ownership; callers decide who may do what.
#[derive(Clone)]
pub struct BookingRepository {
    collection: Collection<Document>,
}

impl BookingRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Store a booking as submitted. The id is assigned by the store.
    pub async fn create(&self, booking: NewBooking) -> Result<InsertResult, AppError> {
        let doc = map_to_document(booking.fields())?;

        let result = self
            .collection
            .insert_one(doc)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let inserted_id = id_to_string(result.inserted_id);
        tracing::info!(booking_id = %inserted_id, "booking created");

        Ok(InsertResult {
            acknowledged: true,
            inserted_id,
        })
    }

    /// Bookings for one customer email, or every booking when `email` is `None`.
    pub async fn list(&self, email: Option<&str>) -> Result<Vec<Booking>, AppError> {
        let filter = match email {
            Some(email) => doc! { "email": email },
            None => doc! {},
        };

        let docs: Vec<Document> = self
            .collection
            .find(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        docs.into_iter().map(from_document).collect()
    }

    /// Delete by id. A missing id yields `deleted_count == 0`, not an error.
    pub async fn delete(&self, id: &str) -> Result<DeleteResult, AppError> {
        let oid = parse_object_id(id)?;

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        tracing::info!(booking_id = %id, deleted = result.deleted_count, "booking deleted");

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    /// Overwrite `status` with whatever the caller sent; `None` stores null.
    pub async fn update_status(
        &self,
        id: &str,
        status: Option<String>,
    ) -> Result<UpdateResult, AppError> {
        let oid = parse_object_id(id)?;
        let status = status.map_or(Bson::Null, Bson::String);

        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": { "status": status } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        tracing::info!(
            booking_id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "booking status updated"
        );

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(id_to_string),
        })
    }
}
