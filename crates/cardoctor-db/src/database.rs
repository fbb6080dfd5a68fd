use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};

use cardoctor_core::AppError;

use crate::booking_repository::BookingRepository;
use crate::config::DatabaseConfig;
use crate::service_repository::ServiceRepository;

pub const SERVICES_COLLECTION: &str = "services";
pub const BOOKINGS_COLLECTION: &str = "booking";

/// Central database facade: owns the driver client and vends repository
/// instances.
///
/// The client is cheap to clone and is shared by every request for the life
/// of the process; it is never closed explicitly.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db: mongodb::Database,
}

impl Database {
    /// Build a client for the configured deployment.
    ///
    /// The driver connects lazily, so this only fails on a malformed
    /// connection string (or an unresolvable SRV record).
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Invalid connection string: {e}")))?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = Client::with_options(options)
            .map_err(|e| AppError::DatabaseError(format!("Failed to create client: {e}")))?;

        Ok(Self::from_client(client, &config.database))
    }

    /// Create a `Database` from an existing client (useful for testing).
    pub fn from_client(client: Client, database: &str) -> Self {
        let db = client.database(database);
        Self { client, db }
    }

    /// Round-trip a `ping` command to the deployment.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Get a [`ServiceRepository`] over the `services` collection.
    pub fn service_repo(&self) -> ServiceRepository {
        ServiceRepository::new(self.collection(SERVICES_COLLECTION))
    }

    /// Get a [`BookingRepository`] over the `booking` collection.
    pub fn booking_repo(&self) -> BookingRepository {
        BookingRepository::new(self.collection(BOOKINGS_COLLECTION))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}
