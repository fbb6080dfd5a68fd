use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bookable car service, seeded out-of-band and read-only over HTTP.
///
/// Services carry no enforced schema: the document is kept as stored, with
/// `_id` held as whatever JSON the store rendered for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Service {
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// Stored as seeded: usually a decimal string, sometimes a number.
    pub fn price(&self) -> Option<&Value> {
        self.fields.get("price")
    }
}

/// Projection of a [`Service`] returned by the single-service lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(rename = "_id")]
    pub id: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ServiceSummary {
    /// Field names kept by the projection (`_id` is always included).
    pub const PROJECTED_FIELDS: [&'static str; 4] = ["title", "img", "price", "description"];
}

impl From<Service> for ServiceSummary {
    fn from(service: Service) -> Self {
        let mut fields = service.fields;
        fields.retain(|key, _| Self::PROJECTED_FIELDS.contains(&key.as_str()));

        Self {
            id: service.id,
            fields,
        }
    }
}

/// A stored booking. Apart from `_id`, the document is whatever the client
/// submitted, plus a `status` set later by staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Booking {
    pub fn email(&self) -> Option<&str> {
        self.fields.get("email").and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.fields.get("status").and_then(Value::as_str)
    }

    /// The referenced service id, as submitted. Never checked against the
    /// services collection.
    pub fn service_id(&self) -> Option<&str> {
        self.fields.get("service_id").and_then(Value::as_str)
    }
}

/// Booking body as received from the client, ready for insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBooking(Map<String, Value>);

impl NewBooking {
    /// Accepts the body verbatim, except for `_id`: ids are assigned by the
    /// store.
    pub fn from_body(mut body: Map<String, Value>) -> Self {
        body.remove("_id");
        Self(body)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

/// Claims a caller asked to be signed into their session credential.
///
/// The shape is not validated; only `email` is ever read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub Map<String, Value>);

impl Identity {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// The raw `email` claim, whatever its JSON type.
    pub fn email_claim(&self) -> Option<&Value> {
        self.0.get("email")
    }

    pub fn email(&self) -> Option<&str> {
        self.email_claim().and_then(Value::as_str)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Store acknowledgement of a single insert.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Store acknowledgement of a delete. `deleted_count == 0` is not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Store acknowledgement of an update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
}
